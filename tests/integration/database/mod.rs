//! Schema-level tests

mod constraints_test;
