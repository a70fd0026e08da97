//! Error types for argument validation, image I/O and evolution setup

use std::fmt;
use std::path::PathBuf;

/// Main error type for all blending operations
#[derive(Debug)]
pub enum BlendError {
    /// Image/weight arguments were missing or unpaired
    Usage,

    /// A weight argument did not parse or fell outside `[0, 1]`
    InvalidWeight {
        /// The argument exactly as supplied
        value: String,
    },

    /// Input weights do not add up to 1 within tolerance
    WeightSum {
        /// Sum of the supplied weights
        total: f64,
    },

    /// Failed to open or decode a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source image decoded to zero pixels
    EmptyImage {
        /// Path to the image file
        path: PathBuf,
    },

    /// Failed to save the evolved image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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

    /// Evolution parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Internal computation reached a state it cannot continue from
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl BlendError {
    /// Whether this error belongs to the command-line argument family
    ///
    /// Argument errors are raised before any file is touched.
    pub const fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::Usage | Self::InvalidWeight { .. } | Self::WeightSum { .. }
        )
    }

    /// Process exit status for this error
    ///
    /// Every error is fatal and reported with the same status.
    pub const fn exit_code(&self) -> u8 {
        1
    }
}

impl fmt::Display for BlendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => {
                write!(
                    f,
                    "Usage: genblend <image_1> <weight_1> [<image_2> <weight_2> ...]"
                )
            }
            Self::InvalidWeight { value } => write!(f, "Invalid weight - {value}"),
            Self::WeightSum { .. } => write!(f, "Weights must add up to 1"),
            Self::ImageLoad { path, .. } | Self::EmptyImage { path } => {
                write!(f, "Invalid filename - {}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for BlendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for blending results
pub type Result<T> = std::result::Result<T, BlendError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BlendError {
    BlendError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> BlendError {
    BlendError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
