//! Shared test utilities for integration tests.
//! This module is not compiled as a test binary — it is included by test files.
#![allow(dead_code)]

pub mod fixtures;
