//! Unit tests for error context helpers

use appinit_domain::error::Error;
use appinit_infrastructure::error_ext::ErrorContext;
use std::io;

fn io_failure() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::AddrInUse, "address in use"))
}

#[test]
fn test_config_context_wraps_source() {
    let err = io_failure().config_context("Failed to read config").unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("Failed to read config"));
    assert!(err.to_string().contains("address in use"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_transport_context_wraps_source() {
    let err = io_failure()
        .transport_context("Failed to bind inbound 127.0.0.1:8086")
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert_eq!(err.kind(), "transport");
}

#[test]
fn test_lazy_context_is_not_evaluated_on_success() {
    let ok: Result<u8, io::Error> = Ok(7);
    let value = ok
        .with_transport_context(|| -> String { panic!("context built on success") })
        .unwrap();
    assert_eq!(value, 7);
}
