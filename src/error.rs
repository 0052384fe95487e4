use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pulsecontrol operations
#[derive(Error, Diagnostic, Debug)]
pub enum PulseError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pulsecontrol::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pulsecontrol::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Malformed {field}: {token:?}")]
    #[diagnostic(code(pulsecontrol::malformed_field))]
    MalformedField { field: String, token: String },

    #[error("Ran out of lines while reading {context}")]
    #[diagnostic(code(pulsecontrol::unexpected_end))]
    UnexpectedEndOfInput { context: &'static str },

    #[error("Detailed list item {name:?} is missing details: {details:?}")]
    #[diagnostic(
        code(pulsecontrol::missing_detail),
        help("Members are expected to look like `name: Description (attribute: value, ...)`")
    )]
    MissingDetail { name: String, details: String },

    #[error("Unknown byte unit {unit:?} in {token:?}")]
    #[diagnostic(code(pulsecontrol::byte_unit), help("Recognized units are B, KiB, MiB and GiB"))]
    UnknownByteUnit { unit: String, token: String },

    #[error("{owner} is missing required field {field:?}")]
    #[diagnostic(code(pulsecontrol::missing_field))]
    MissingField { owner: String, field: &'static str },

    #[error("Received unknown event: {line:?}")]
    #[diagnostic(code(pulsecontrol::event))]
    MalformedEvent { line: String },

    #[error("pactl {command} failed: {message}")]
    #[diagnostic(code(pulsecontrol::command))]
    CommandFailed {
        command: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Output error: {message}")]
    #[diagnostic(code(pulsecontrol::output))]
    Output {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(pulsecontrol::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl PulseError {
    pub(crate) fn malformed(field: impl Into<String>, token: impl Into<String>) -> Self {
        PulseError::MalformedField {
            field: field.into(),
            token: token.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PulseError>;
