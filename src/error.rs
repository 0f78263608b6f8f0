use std::fmt;

/// Error kinds callers can branch on without string matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    NotFound,
    Conflict,
    Unauthorized,
    Validation,
    Network,
    Server,
    Api,
    Cancelled,
    DeadlineExceeded,
    Decode,
    Io,
}

/// Custom error type for TFE operations
#[derive(Debug)]
pub enum TfeError {
    /// Missing hostname/token/organization, unreadable config or local file
    Config(String),
    /// Resource lookup returned nothing
    NotFound(String),
    /// Duplicate key, lineage mismatch, workspace already locked
    Conflict(String),
    /// Credential rejected (401/403)
    Unauthorized(String),
    /// Local validation failed (semver, SHA, flag combination)
    Validation(String),
    /// TCP/TLS/DNS failure
    Network(reqwest::Error),
    /// 5xx from upstream
    Server { status: u16, message: String },
    /// Any other non-success response
    Api { status: u16, message: String },
    /// Request context was cancelled (Ctrl-C)
    Cancelled,
    /// Request context deadline passed
    DeadlineExceeded,
    /// JSON parsing error
    Json(String),
    /// Local I/O failure
    Io(String),
    /// Annotation added at a layer boundary
    Context {
        context: String,
        source: Box<TfeError>,
    },
}

impl TfeError {
    /// Kind of the innermost error, looking through context annotations
    pub fn kind(&self) -> ErrorKind {
        match self {
            TfeError::Config(_) => ErrorKind::Config,
            TfeError::NotFound(_) => ErrorKind::NotFound,
            TfeError::Conflict(_) => ErrorKind::Conflict,
            TfeError::Unauthorized(_) => ErrorKind::Unauthorized,
            TfeError::Validation(_) => ErrorKind::Validation,
            TfeError::Network(_) => ErrorKind::Network,
            TfeError::Server { .. } => ErrorKind::Server,
            TfeError::Api { .. } => ErrorKind::Api,
            TfeError::Cancelled => ErrorKind::Cancelled,
            TfeError::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            TfeError::Json(_) => ErrorKind::Decode,
            TfeError::Io(_) => ErrorKind::Io,
            TfeError::Context { source, .. } => source.kind(),
        }
    }

    /// Wrap this error with a context annotation
    pub fn context(self, context: impl Into<String>) -> Self {
        TfeError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build an error from a non-success HTTP status
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => TfeError::Unauthorized(message),
            404 => TfeError::NotFound(message),
            409 => TfeError::Conflict(message),
            500..=599 => TfeError::Server { status, message },
            _ => TfeError::Api { status, message },
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TfeError::Unauthorized(_) => Some(401),
            TfeError::NotFound(_) => Some(404),
            TfeError::Conflict(_) => Some(409),
            TfeError::Server { status, .. } | TfeError::Api { status, .. } => Some(*status),
            TfeError::Context { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfeError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TfeError::NotFound(msg) => write!(f, "{}", msg),
            TfeError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            TfeError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            TfeError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            TfeError::Network(e) => write!(f, "HTTP request failed: {}", e),
            TfeError::Server { status, message } => {
                write!(f, "Server error (status {}): {}", status, message)
            }
            TfeError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            TfeError::Cancelled => write!(f, "Request cancelled"),
            TfeError::DeadlineExceeded => write!(f, "Request deadline exceeded"),
            TfeError::Json(msg) => write!(f, "JSON error: {}", msg),
            TfeError::Io(msg) => write!(f, "I/O error: {}", msg),
            TfeError::Context { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for TfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfeError::Network(e) => Some(e),
            TfeError::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TfeError::DeadlineExceeded
        } else {
            TfeError::Network(err)
        }
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        TfeError::Json(err.to_string())
    }
}

impl From<std::io::Error> for TfeError {
    fn from(err: std::io::Error) -> Self {
        TfeError::Io(err.to_string())
    }
}

/// Attach context to the error side of a result
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.context(f()))
    }
}

/// Result type alias for TFE operations
pub type Result<T> = std::result::Result<T, TfeError>;
