use thiserror::Error;

use crate::context::{InstanceLabel, StyleLabel};
use crate::primitive::ValidationError;
use crate::transform::TransformError;
use crate::triangulation::DecodeError;

/// Any per-instance failure of the conversion pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for per-instance conversion.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// A non-fatal problem recorded during a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionWarning {
    #[error("Instance {instance} has no geometry")]
    EmptyGeometry { instance: InstanceLabel },

    #[error("Instance {instance} skipped: {error}")]
    Decode {
        instance: InstanceLabel,
        error: DecodeError,
    },

    #[error("Instance {instance} skipped: {error}")]
    Transform {
        instance: InstanceLabel,
        error: TransformError,
    },

    #[error("Instance {instance} skipped: {error}")]
    Validation {
        instance: InstanceLabel,
        error: ValidationError,
    },

    #[error("Instance {instance} references unusable style {style}, using default material")]
    MissingStyle {
        instance: InstanceLabel,
        style: StyleLabel,
    },
}

impl ConversionWarning {
    /// Wrap a pipeline error for `instance`.
    pub fn from_error(instance: InstanceLabel, error: ConvertError) -> Self {
        match error {
            ConvertError::Decode(error) => ConversionWarning::Decode { instance, error },
            ConvertError::Transform(error) => ConversionWarning::Transform { instance, error },
            ConvertError::Validation(error) => ConversionWarning::Validation { instance, error },
        }
    }

    pub fn instance(&self) -> InstanceLabel {
        match self {
            ConversionWarning::EmptyGeometry { instance }
            | ConversionWarning::Decode { instance, .. }
            | ConversionWarning::Transform { instance, .. }
            | ConversionWarning::Validation { instance, .. }
            | ConversionWarning::MissingStyle { instance, .. } => *instance,
        }
    }

    /// True if the instance was dropped from the scene.
    pub fn is_skip(&self) -> bool {
        !matches!(self, ConversionWarning::MissingStyle { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_keeps_kind() {
        let warning = ConversionWarning::from_error(
            InstanceLabel(4),
            ConvertError::from(TransformError::NonFinite),
        );

        assert_eq!(
            warning,
            ConversionWarning::Transform {
                instance: InstanceLabel(4),
                error: TransformError::NonFinite
            }
        );
        assert!(warning.is_skip());
        assert_eq!(warning.instance(), InstanceLabel(4));
    }

    #[test]
    fn test_missing_style_is_not_a_skip() {
        let warning = ConversionWarning::MissingStyle {
            instance: InstanceLabel(1),
            style: StyleLabel(2),
        };
        assert!(!warning.is_skip());
    }

    #[test]
    fn test_display_names_instance() {
        let warning = ConversionWarning::Decode {
            instance: InstanceLabel(12),
            error: DecodeError::Empty,
        };
        assert_eq!(
            warning.to_string(),
            "Instance #12 skipped: Geometry blob is empty"
        );
    }
}
