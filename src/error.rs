//! Error types for the order desk library.

/// A single failed intake validation condition.
///
/// Each failing condition is reported on its own so callers can show
/// one message per problem instead of a generic rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Customer name is blank.
    MissingCustomerName,
    /// Phone number is blank.
    MissingPhoneNumber,
    /// Delivery address is blank.
    MissingAddress,
    /// Order total is below the minimum order value.
    BelowMinimumTotal {
        /// The computed total that failed the check, in minor units.
        total: i64,
        /// The required minimum, in minor units.
        minimum: i64,
    },
}

impl core::fmt::Display for ValidationIssue {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingCustomerName => write!(f, "customer name must not be blank"),
            Self::MissingPhoneNumber => write!(f, "phone number must not be blank"),
            Self::MissingAddress => write!(f, "address must not be blank"),
            Self::BelowMinimumTotal { total, minimum } => {
                write!(f, "order total {total} is below the minimum of {minimum}")
            }
        }
    }
}

/// Joins validation issues into a single display string.
fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// All errors that can occur when using the order desk.
#[derive(Debug, thiserror::Error)]
pub enum ChangeMoneyError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend failed to read or write the order sequence.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// Intake validation rejected the draft; one issue per failing
    /// condition.
    #[error("invalid order: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// No order with the given id exists in the store.
    #[error("order not found: {0}")]
    NotFound(String),

    /// The remote store returned a non-success status.
    #[error("remote store error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the remote store.
        status: u16,
        /// Response body or a fallback description.
        message: String,
    },

    /// HTTP transport failure while talking to the remote store.
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Spreadsheet generation failed.
    #[cfg(feature = "export")]
    #[error("export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// Admin password did not match the expected value.
    #[error("incorrect admin password")]
    Unauthorized,

    /// A required builder parameter was not provided.
    #[error("configuration error: {0}")]
    Config(&'static str),
}

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, ChangeMoneyError>;
