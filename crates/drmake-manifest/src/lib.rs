//! # drmake-manifest
//!
//! Parser and resolver for drmake build manifests.
//!
//! Handles:
//! - **Parser**: line-oriented parsing of manifest text into targets.
//! - **Registry**: name-keyed target store and whole-manifest validation.
//! - **Graph**: `petgraph`-backed cycle checking used by validation.
//! - **Recipe**: assembly of a target's recipe through inheritance references.
//! - **Plan**: de-duplicated, dependency-first execution order.
//! - **Listing**: name and description rendering of described targets.

pub mod graph;
pub mod listing;
pub mod parser;
pub mod plan;
pub mod recipe;
pub mod registry;
pub mod target;
