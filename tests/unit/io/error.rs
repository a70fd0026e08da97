//! Tests for error messages, source chaining and error families

#[cfg(test)]
mod tests {
    use genblend::BlendError;
    use genblend::io::error::{computation_error, invalid_parameter};
    use std::error::Error;
    use std::path::PathBuf;

    fn image_error() -> image::ImageError {
        image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ))
    }

    // Tests the argument error messages shown to users
    // Verified by changing the message wording
    #[test]
    fn test_argument_messages() {
        assert_eq!(
            BlendError::Usage.to_string(),
            "Usage: genblend <image_1> <weight_1> [<image_2> <weight_2> ...]"
        );
        assert_eq!(
            BlendError::InvalidWeight {
                value: "abc".to_string()
            }
            .to_string(),
            "Invalid weight - abc"
        );
        assert_eq!(
            BlendError::WeightSum { total: 0.6 }.to_string(),
            "Weights must add up to 1"
        );
    }

    // Tests unreadable and empty images both report the file name
    // Verified by formatting the underlying decoder error instead
    #[test]
    fn test_image_load_messages() {
        let load = BlendError::ImageLoad {
            path: PathBuf::from("missing.png"),
            source: image_error(),
        };
        let empty = BlendError::EmptyImage {
            path: PathBuf::from("blank.png"),
        };

        assert_eq!(load.to_string(), "Invalid filename - missing.png");
        assert_eq!(empty.to_string(), "Invalid filename - blank.png");
        assert!(load.source().is_some());
        assert!(empty.source().is_none());
    }

    // Tests argument errors are distinguished from the rest
    // Verified by classifying image errors as argument errors
    #[test]
    fn test_argument_family() {
        assert!(BlendError::Usage.is_argument_error());
        assert!(BlendError::WeightSum { total: 2.0 }.is_argument_error());
        assert!(
            BlendError::InvalidWeight {
                value: "-1".to_string()
            }
            .is_argument_error()
        );
        assert!(
            !BlendError::EmptyImage {
                path: PathBuf::new()
            }
            .is_argument_error()
        );
        assert!(!computation_error("run", &"empty").is_argument_error());
    }

    // Tests every error exits with status one
    // Verified by returning zero for argument errors
    #[test]
    fn test_exit_code() {
        assert_eq!(BlendError::Usage.exit_code(), 1);
        assert_eq!(invalid_parameter("sigma", &-1.0, &"negative").exit_code(), 1);
    }

    // Tests export and file system errors chain their causes
    // Verified by returning None from source
    #[test]
    fn test_source_chain() {
        let export = BlendError::ImageExport {
            path: PathBuf::from("out.png"),
            source: image_error(),
        };
        let fs = BlendError::FileSystem {
            path: PathBuf::from("/tmp/x"),
            operation: "create directory",
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert!(export.source().is_some());
        assert!(export.to_string().contains("out.png"));
        assert!(fs.source().is_some());
        assert!(fs.to_string().contains("create directory"));
    }

    // Tests helper constructors fill every field
    // Verified by omitting the value from the message
    #[test]
    fn test_helpers() {
        let message = invalid_parameter("indpb", &1.5, &"must be within [0, 1]").to_string();
        assert!(message.contains("indpb"));
        assert!(message.contains("1.5"));
        assert!(message.contains("must be within [0, 1]"));

        let message = computation_error("run", &"no fitness").to_string();
        assert!(message.contains("run"));
        assert!(message.contains("no fitness"));
    }
}
