use std::fmt;

/// Errors raised while building a level or loading its data.
#[derive(Debug)]
pub enum PounceError {
    /// Spikes orientation outside {0, 90, 180, 270}.
    InvalidOrientation(i32),
    /// Malformed level data. `line` is 1-based.
    LevelFormat { line: usize, message: String },
    /// The level file could not be read.
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, PounceError>;

impl PounceError {
    pub fn level_format(line: usize, message: impl Into<String>) -> Self {
        Self::LevelFormat {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for PounceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrientation(degrees) if degrees % 90 != 0 => {
                write!(f, "spike orientation {degrees} is not a multiple of 90")
            },
            Self::InvalidOrientation(degrees) => {
                write!(f, "spike orientation {degrees} is outside 0..=270")
            },
            Self::LevelFormat { line, message } => write!(f, "level line {line}: {message}"),
            Self::Io(e) => write!(f, "level file: {e}"),
        }
    }
}

impl std::error::Error for PounceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PounceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
