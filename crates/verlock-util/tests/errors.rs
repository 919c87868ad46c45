use verlock_util::errors::VerlockError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = VerlockError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = VerlockError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_lockfile_error_display() {
    let err = VerlockError::Lockfile {
        message: "line 3: missing '='".to_string(),
    };
    assert_eq!(err.to_string(), "Lock file error: line 3: missing '='");
}

#[test]
fn test_generic_error_display() {
    let err = VerlockError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: VerlockError = io_err.into();
    assert!(matches!(err, VerlockError::Io(_)));
}

#[test]
fn test_converts_into_miette_report() {
    let report: miette::Report = VerlockError::Manifest {
        message: "oops".to_string(),
    }
    .into();
    assert!(report.downcast_ref::<VerlockError>().is_some());
}
