//! Unit tests for logging setup

use appinit_domain::error::Error;
use appinit_infrastructure::config::LoggingConfig;
use appinit_infrastructure::logging::{Logger, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    assert!(matches!(
        parse_log_level("chatty"),
        Err(Error::Config { .. })
    ));
}

#[test]
fn test_init_logging_is_idempotent() {
    let config = LoggingConfig::default();
    init_logging(&config).unwrap();
    init_logging(&config).unwrap();
}

#[test]
fn test_init_logging_validates_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_logger_carries_service_name() {
    let logger = Logger::new("hello");
    assert_eq!(logger.service(), "hello");
    logger.info("logger constructed");
}
