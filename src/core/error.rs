use thiserror::Error;

/// Errors that abort an extraction or reconciliation call.
///
/// Data-quality problems on individual vouchers or bills are not errors;
/// they fall back to documented defaults and surface as [`ReconWarning`]s
/// or log records instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VoucherError {
    /// The document is not well-formed XML even after sanitization.
    #[error("XML error: {0}")]
    Xml(String),

    /// The upstream response carried a STATUS other than "1".
    #[error(
        "upstream returned STATUS={status}{}",
        .message.as_ref().map(|m| format!(" - {m}")).unwrap_or_default()
    )]
    Status {
        status: String,
        message: Option<String>,
    },

    /// A field the record cannot exist without is absent.
    #[error("missing {field} in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    /// A date field is present but in none of the accepted formats.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    /// Invalid or inconsistent configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The transport collaborator failed to deliver a document.
    #[error("source error: {0}")]
    Source(String),

    /// The persistence collaborator rejected a write.
    #[error("sink error: {0}")]
    Sink(String),
}

pub type Result<T> = std::result::Result<T, VoucherError>;

/// What went wrong with a single bill during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WarningKind {
    /// `pending != original - adjusted`: the adjusting entries of this bill
    /// carry the same sign as its originating entries.
    PendingMismatch,
    /// Adjusting entries exist but nothing originated the bill; the group is dropped.
    OrphanAdjustment,
    /// An outstanding-report row claims more pending than was originally billed.
    ReportInconsistent,
}

/// A data-integrity finding for one `(ledger, bill)` key.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReconWarning {
    pub ledger_name: String,
    pub bill_name: String,
    pub kind: WarningKind,
    /// Human-readable detail, including the amounts involved.
    pub message: String,
}

impl std::fmt::Display for ReconWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:?}] {} / {}: {}",
            self.kind, self.ledger_name, self.bill_name, self.message
        )
    }
}

impl ReconWarning {
    pub fn new(
        ledger_name: impl Into<String>,
        bill_name: impl Into<String>,
        kind: WarningKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ledger_name: ledger_name.into(),
            bill_name: bill_name.into(),
            kind,
            message: message.into(),
        }
    }
}
