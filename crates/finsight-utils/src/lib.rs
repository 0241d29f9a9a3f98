//! Shared utilities for finsight
//!
//! This crate provides common functionality used across the finsight
//! workspace, currently logging setup.

pub mod logging;

pub use logging::init_tracing;
