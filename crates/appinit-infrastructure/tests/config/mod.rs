//! Configuration integration tests
