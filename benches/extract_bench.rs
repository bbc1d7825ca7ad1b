use criterion::{Criterion, black_box, criterion_group, criterion_main};

use voucherbook::core::{ExtractConfig, ReconConfig};
use voucherbook::recon::reconcile;
use voucherbook::voucher::extract_vouchers;
use voucherbook::xml::sanitize;

/// A day book with `n` sales vouchers and one receipt against every other one.
fn build_daybook(n: usize) -> String {
    let mut body = String::new();
    for i in 1..=n {
        let customer = format!("Customer {:03}", i % 50);
        body.push_str(&format!(
            "<VOUCHER VCHTYPE=\"Invoice\">\
               <DATE>2025{:02}{:02}</DATE>\
               <VOUCHERNUMBER>S-{i}</VOUCHERNUMBER>\
               <PARTYLEDGERNAME>{customer}</PARTYLEDGERNAME>\
               <NARRATION>Goods sold &#x1; batch {i}</NARRATION>\
               <ALLINVENTORYENTRIES.LIST>\
                 <STOCKITEMNAME>Widget</STOCKITEMNAME>\
                 <BILLEDQTY>{i} Nos</BILLEDQTY>\
                 <AMOUNT>{}.00</AMOUNT>\
               </ALLINVENTORYENTRIES.LIST>\
               <LEDGERENTRIES.LIST>\
                 <LEDGERNAME>{customer}</LEDGERNAME>\
                 <AMOUNT>-{}.00</AMOUNT>\
                 <BILLALLOCATIONS.LIST>\
                   <NAME>S-{i}</NAME><BILLTYPE>New Ref</BILLTYPE>\
                   <BILLCREDITPERIOD>30 Days</BILLCREDITPERIOD>\
                   <AMOUNT>-{}.00</AMOUNT>\
                 </BILLALLOCATIONS.LIST>\
               </LEDGERENTRIES.LIST>\
             </VOUCHER>",
            (i % 12) + 1,
            (i % 28) + 1,
            i * 100,
            i * 118,
            i * 118,
        ));
        if i % 2 == 0 {
            body.push_str(&format!(
                "<VOUCHER VCHTYPE=\"Receipt\">\
                   <DATE>20251231</DATE>\
                   <VOUCHERNUMBER>R-{i}</VOUCHERNUMBER>\
                   <PARTYLEDGERNAME>{customer}</PARTYLEDGERNAME>\
                   <ALLLEDGERENTRIES.LIST>\
                     <LEDGERNAME>{customer}</LEDGERNAME>\
                     <AMOUNT>{}.00</AMOUNT>\
                     <BILLALLOCATIONS.LIST>\
                       <NAME>S-{i}</NAME><BILLTYPE>Agst Ref</BILLTYPE>\
                       <AMOUNT>{}.00</AMOUNT>\
                     </BILLALLOCATIONS.LIST>\
                   </ALLLEDGERENTRIES.LIST>\
                 </VOUCHER>",
                i * 50,
                i * 50,
            ));
        }
    }
    format!(
        "<ENVELOPE><HEADER><STATUS>1</STATUS></HEADER><BODY><DATA>{body}</DATA></BODY></ENVELOPE>"
    )
}

fn bench_sanitize(c: &mut Criterion) {
    let xml = build_daybook(1000);
    c.bench_function("sanitize_1000_vouchers", |b| {
        b.iter(|| black_box(sanitize(black_box(&xml))));
    });
}

fn bench_extract_small(c: &mut Criterion) {
    let xml = build_daybook(10);
    let config = ExtractConfig::default();
    c.bench_function("extract_10_vouchers", |b| {
        b.iter(|| black_box(extract_vouchers(black_box(&xml), &config)));
    });
}

fn bench_extract_large(c: &mut Criterion) {
    let xml = build_daybook(1000);
    let config = ExtractConfig::default();
    c.bench_function("extract_1000_vouchers", |b| {
        b.iter(|| black_box(extract_vouchers(black_box(&xml), &config)));
    });
}

fn bench_reconcile(c: &mut Criterion) {
    let xml = build_daybook(1000);
    let extraction = extract_vouchers(&xml, &ExtractConfig::default()).unwrap();
    let config = ReconConfig::default();
    c.bench_function("reconcile_1500_allocations", |b| {
        b.iter(|| black_box(reconcile(black_box(&extraction.bills), &[], &config)));
    });
}

criterion_group!(
    benches,
    bench_sanitize,
    bench_extract_small,
    bench_extract_large,
    bench_reconcile,
);
criterion_main!(benches);
