use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scriptable CLI consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    AlreadyInitialized,
    ConfigParseError,
    OfferNotFound,
    AmbiguousId,
    InvalidEnumValue,
    InvalidDate,
    CorruptStore,
    StoreWriteFailed,
    LockContention,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::AlreadyInitialized => "E1002",
            Self::ConfigParseError => "E1003",
            Self::OfferNotFound => "E2001",
            Self::AmbiguousId => "E2002",
            Self::InvalidEnumValue => "E2003",
            Self::InvalidDate => "E2004",
            Self::CorruptStore => "E3001",
            Self::StoreWriteFailed => "E3002",
            Self::LockContention => "E3003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Tracker not initialized",
            Self::AlreadyInitialized => "Tracker already initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::OfferNotFound => "Offer not found",
            Self::AmbiguousId => "Ambiguous offer ID",
            Self::InvalidEnumValue => "Invalid csat value",
            Self::InvalidDate => "Invalid or out-of-order date",
            Self::CorruptStore => "Corrupt offers.json store",
            Self::StoreWriteFailed => "Store write failed",
            Self::LockContention => "Lock contention",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `ot init` to create the tracker store."),
            Self::AlreadyInitialized => Some("The store already exists; no init needed."),
            Self::ConfigParseError => Some("Fix syntax in config.toml and retry."),
            Self::OfferNotFound => None,
            Self::AmbiguousId => Some("Use a longer ID prefix to disambiguate."),
            Self::InvalidEnumValue => Some("Use one of: positive, neutral, negative."),
            Self::InvalidDate => Some("Dates must be YYYY-MM-DD and not precede the offer date."),
            Self::CorruptStore => Some("Restore offers.json from a backup; it failed to parse."),
            Self::StoreWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `ot` process releases its lock."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Typed errors for store, config, and lookup failures.
///
/// Engine-level validation (adding a second active follow-up, clearing when
/// nothing is pending) is deliberately *not* an [`Error`]: those operations
/// return `false` and leave the offer untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("tracker not initialized at {path}")]
    NotInitialized { path: PathBuf },

    #[error("tracker already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no offer matches '{idref}'")]
    OfferNotFound { idref: String },

    #[error("'{idref}' matches {count} offers")]
    AmbiguousId { idref: String, count: usize },

    #[error("invalid csat value '{raw}'")]
    InvalidCsat { raw: String },

    #[error("conversion date {conversion} is before offer date {offer}")]
    ConversionBeforeOffer {
        conversion: chrono::NaiveDate,
        offer: chrono::NaiveDate,
    },

    #[error("corrupt store at {path}: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store write failed at {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lock timed out after {waited:?} at {path}")]
    LockTimeout {
        path: PathBuf,
        waited: std::time::Duration,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized { .. } => ErrorCode::NotInitialized,
            Self::AlreadyInitialized { .. } => ErrorCode::AlreadyInitialized,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::OfferNotFound { .. } => ErrorCode::OfferNotFound,
            Self::AmbiguousId { .. } => ErrorCode::AmbiguousId,
            Self::InvalidCsat { .. } => ErrorCode::InvalidEnumValue,
            Self::ConversionBeforeOffer { .. } => ErrorCode::InvalidDate,
            Self::CorruptStore { .. } => ErrorCode::CorruptStore,
            Self::StoreWrite { .. } | Self::Io(_) => ErrorCode::StoreWriteFailed,
            Self::LockTimeout { .. } => ErrorCode::LockContention,
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
