use std::num::ParseFloatError;

/// Error type
#[derive(Debug)]
pub enum Error {
    /// The aggregator was given no points, or a window that is not positive.
    InvalidInput,

    /// A numeric string sample could not be parsed as a float,
    /// or a sample value is not finite (NaN, infinity).
    MalformedSample {
        /// The offending sample value
        value: String,

        /// The underlying parse error, if the value was a string
        source: Option<ParseFloatError>,
    },

    /// A sample kind that has no numeric value (e.g. boolean, distribution),
    /// only returned when unsupported kinds are not dropped.
    UnsupportedSampleKind(&'static str),

    /// A provider timestamp could not be parsed.
    Timestamp(chrono::ParseError),
}

impl From<chrono::ParseError> for Error {
    fn from(value: chrono::ParseError) -> Self {
        Self::Timestamp(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => {
                write!(f, "InvalidInput",)
            }
            Self::MalformedSample {
                value,
                source: Some(e),
            } => {
                write!(f, "MalformedSample({value:?}): {e}")
            }
            Self::MalformedSample {
                value,
                source: None,
            } => {
                write!(f, "MalformedSample({value:?}): not a finite number")
            }
            Self::UnsupportedSampleKind(kind) => {
                write!(f, "UnsupportedSampleKind({kind})")
            }
            Self::Timestamp(e) => {
                write!(f, "{e}",)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedSample { source, .. } => source.as_ref().map(|e| e as _),
            Self::Timestamp(e) => Some(e),
            Self::InvalidInput | Self::UnsupportedSampleKind(_) => None,
        }
    }
}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
