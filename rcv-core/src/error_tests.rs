/*!
Tests for error types and the mismatch report format.
*/

#[cfg(test)]
mod tests {
    use crate::diff::DiffResult;
    use crate::error::{DataChangedError, RcvError, CHANGED_OUTPUT_HINT};
    use std::io;
    use std::path::PathBuf;

    fn changed() -> DataChangedError {
        DataChangedError {
            fixture_path: PathBuf::from("fixtures/tmp/test.json"),
            diff: DiffResult {
                added: vec!["key".to_string()],
                removed: vec!["duplicated".to_string(), "nested".to_string()],
                updated: vec![],
            },
            text_diff: "--- existing\n+++ new\n-a\n+b\n".to_string(),
        }
    }

    #[test]
    fn test_rcv_error_display() {
        let error = RcvError::validation("test validation error");
        assert_eq!(error.to_string(), "Validation error: test validation error");

        let error = RcvError::storage("test storage error");
        assert_eq!(error.to_string(), "Storage error: test storage error");

        let error = RcvError::decode("yaml", "bad indent");
        assert_eq!(
            error.to_string(),
            "Failed to decode fixture with yaml codec: bad indent"
        );
    }

    #[test]
    fn test_rcv_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        match RcvError::from(io_error) {
            RcvError::Io(ref io_err) => {
                assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_rcv_error_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(RcvError::from(json_error), RcvError::Json(_)));
    }

    #[test]
    fn test_rcv_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        assert!(matches!(RcvError::from(yaml_error), RcvError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<RcvError>();
        assert_sync::<RcvError>();
    }

    #[test]
    fn test_data_changed_message_format() {
        let message = changed().to_string();
        assert!(message.starts_with(CHANGED_OUTPUT_HINT));
        assert!(message.contains("Fixture: fixtures/tmp/test.json"));
        assert!(message.contains("The following keys were added: [\"key\"]"));
        assert!(message.contains("The following keys were removed: [\"duplicated\", \"nested\"]"));
        assert!(message.contains("The following keys were updated: []"));
        assert!(message.ends_with("-a\n+b\n"));
    }

    #[test]
    fn test_data_changed_converts_and_is_transparent() {
        let error = RcvError::from(changed());
        assert_eq!(error.to_string(), changed().to_string());
        assert_eq!(error.as_data_changed(), Some(&changed()));
        assert!(RcvError::validation("x").as_data_changed().is_none());
    }

    #[test]
    fn test_error_result_type() {
        fn returns_error() -> crate::Result<()> {
            Err(RcvError::producer("test error"))
        }

        assert!(returns_error().is_err());
    }
}
