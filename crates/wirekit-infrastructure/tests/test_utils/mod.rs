//! Test utilities for wirekit-infrastructure integration tests
//!
//! Fixture implementations, a linked greeter entry and on-disk project helpers.


pub use fixtures::*;
