use thiserror::Error;

/// Result type alias using TraceLogError
pub type Result<T> = std::result::Result<T, TraceLogError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable in tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownSeverity,
    SeverityConflict,
    ReservedRank,
    InvalidDirective,
    AlreadyInstalled,
    Config,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnknownSeverity => "ERR_UNKNOWN_SEVERITY",
            ErrorKind::SeverityConflict => "ERR_SEVERITY_CONFLICT",
            ErrorKind::ReservedRank => "ERR_RESERVED_RANK",
            ErrorKind::InvalidDirective => "ERR_INVALID_DIRECTIVE",
            ErrorKind::AlreadyInstalled => "ERR_ALREADY_INSTALLED",
            ErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Errors raised while configuring the facade.
///
/// The logging paths themselves never fail; these only come out of setup
/// calls (severity registration, directive parsing, sink installation).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceLogError {
    /// No severity with this name is known
    #[error("Unknown severity: {name}")]
    UnknownSeverity { name: String },

    /// A severity with this name already exists at a different rank
    #[error("Severity {name} already registered with rank {existing}, requested {requested}")]
    SeverityConflict {
        name: String,
        existing: u16,
        requested: u16,
    },

    /// Rank is reserved for OFF/ALL
    #[error("Rank {rank} is reserved")]
    ReservedRank { rank: u16 },

    /// A level directive could not be parsed
    #[error("Invalid level directive '{directive}': {reason}")]
    InvalidDirective { directive: String, reason: String },

    /// The process-wide sink was already installed
    #[error("A global sink is already installed")]
    SinkAlreadyInstalled,

    /// The process-wide instrumentation config was already set
    #[error("Instrumentation is already configured")]
    AlreadyConfigured,

    /// Configuration document failed to parse
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl TraceLogError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            TraceLogError::UnknownSeverity { .. } => ErrorKind::UnknownSeverity,
            TraceLogError::SeverityConflict { .. } => ErrorKind::SeverityConflict,
            TraceLogError::ReservedRank { .. } => ErrorKind::ReservedRank,
            TraceLogError::InvalidDirective { .. } => ErrorKind::InvalidDirective,
            TraceLogError::SinkAlreadyInstalled | TraceLogError::AlreadyConfigured => {
                ErrorKind::AlreadyInstalled
            }
            TraceLogError::Config { .. } => ErrorKind::Config,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<toml::de::Error> for TraceLogError {
    fn from(err: toml::de::Error) -> Self {
        TraceLogError::Config {
            reason: err.to_string(),
        }
    }
}
