//! Service integration tests

mod hello_test;
mod process_test;
