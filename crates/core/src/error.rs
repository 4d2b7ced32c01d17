//! Error types for container text extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during container text extraction.
///
/// The markup transducer never produces these; it is total over its input.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The archive is unreadable or is not a ZIP container.
    #[error("Invalid container: {0}")]
    Container(String),

    /// An expected part is absent from the container.
    #[error("Missing part '{part}'")]
    MissingPart { part: String },

    /// A located part is not well-formed XML.
    #[error("Malformed part '{part}': {message}")]
    MalformedPart { part: String, message: String },
}

impl Error {
    /// Build a malformed-part error for the named part.
    pub fn malformed(part: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedPart {
            part: part.into(),
            message: message.to_string(),
        }
    }

    /// Whether the archive itself could not be read as a container.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Whether an expected part was absent.
    pub fn is_missing_part(&self) -> bool {
        matches!(self, Self::MissingPart { .. })
    }

    /// Whether a part failed to parse as XML.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPart { .. })
    }

    /// Name of the part this error refers to, if any.
    pub fn part(&self) -> Option<&str> {
        match self {
            Self::MissingPart { part } | Self::MalformedPart { part, .. } => Some(part),
            _ => None,
        }
    }
}
