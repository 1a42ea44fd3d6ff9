//! Common test utilities and helpers.
//!
//! This module provides shared functionality for all tests, including:
//! - In-memory PDF fixtures with embedded image XObjects
//! - Assertions on fatal checksum failures

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
pub use fixtures::*;
