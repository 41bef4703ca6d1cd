//! Configuration Tests
//!
//! Tests for kernel settings and JSON document loading.

mod loader_test;
