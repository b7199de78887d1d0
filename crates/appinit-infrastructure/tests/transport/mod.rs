//! Transport integration tests

mod tcp_test;
