//! # drmake-common
//!
//! Shared error definitions, configuration model, constants, and
//! content-derived naming used across the drmake workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod naming;
