use std::io;

use modgen::error::Error;

#[test]
fn test_io_error_carries_path() {
    let err = Error::io("/tmp/x/module.xml", io::Error::new(io::ErrorKind::NotFound, "missing"));

    match &err {
        Error::IoError { path, .. } => assert_eq!(path, "/tmp/x/module.xml"),
        _ => panic!("Expected IoError variant"),
    }
    assert_eq!(err.to_string(), "IO error on '/tmp/x/module.xml': missing.");
}

#[test]
fn test_error_display() {
    let err = Error::PreconditionFailed("root exists".to_string());
    assert_eq!(err.to_string(), "Precondition failed: root exists.");

    let err = Error::TemplateNotFound { name: "BMO.template".to_string() };
    assert_eq!(err.to_string(), "Template 'BMO.template' not found.");
}

#[test]
fn test_answers_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::AnswersError(_)));
}
