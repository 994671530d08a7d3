//! Application error type.
//!
//! Every failure carries a coarse [`ErrorKind`] (what went wrong), a
//! human-readable message, and the process exit code the binary should use.

/// Category of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A date token did not match `YYYYMmm`.
    Format,
    /// The remote API could not be reached or answered with a non-success status.
    RemoteRequest,
    /// The response body was not the expected JSON shape.
    Decode,
    /// The output directory could not be created.
    DirectoryCreate,
    /// The output file could not be written.
    FileWrite,
    /// The chart backend failed to produce output.
    Render,
    /// Invalid configuration value.
    Config,
    /// The web endpoint could not be started.
    Server,
}

impl ErrorKind {
    fn default_exit_code(self) -> u8 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::DirectoryCreate | ErrorKind::FileWrite => 3,
            ErrorKind::Format | ErrorKind::RemoteRequest | ErrorKind::Decode => 4,
            ErrorKind::Render | ErrorKind::Server => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    status: Option<u16>,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.default_exit_code(),
            status: None,
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    /// Remote request failure; `status` is set when the server actually answered.
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            ..Self::new(ErrorKind::RemoteRequest, message)
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn directory_create(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DirectoryCreate, message)
    }

    pub fn file_write(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileWrite, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Render, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status of a [`ErrorKind::RemoteRequest`] failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("status", &self.status)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
