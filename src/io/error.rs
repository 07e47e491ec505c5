//! Error types for the line boil pipeline and its file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pipeline operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet pipeline requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Effect parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Two pipeline stages disagree on grid dimensions
    ///
    /// Only produced when a stage is handed data it did not agree to accept,
    /// so it always points at a bug in the caller rather than bad user input.
    DimensionMismatch {
        /// Stage that detected the mismatch
        stage: &'static str,
        /// Dimensions the stage expected (width, height)
        expected: (u32, u32),
        /// Dimensions the stage received (width, height)
        found: (u32, u32),
    },

    /// GIF encoder rejected a frame or the stream
    AnimationEncode {
        /// Path of the animation being written
        path: PathBuf,
        /// Underlying GIF encoding error
        source: gif::EncodingError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DimensionMismatch {
                stage,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {stage}: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::AnimationEncode { path, source } => {
                write!(
                    f,
                    "Failed to encode animation '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::AnimationEncode { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<gif::EncodingError> for AlgorithmError {
    fn from(err: gif::EncodingError) -> Self {
        Self::AnimationEncode {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error
pub const fn dimension_mismatch(
    stage: &'static str,
    expected: (u32, u32),
    found: (u32, u32),
) -> AlgorithmError {
    AlgorithmError::DimensionMismatch {
        stage,
        expected,
        found,
    }
}
