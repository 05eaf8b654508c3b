//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `arenasub` registry.
//!
//! This module centralizes the error types and the logging setup.

pub mod error;
pub mod logging;

pub use error::RegistryError;
