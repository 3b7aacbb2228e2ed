//! # drmake-runtime
//!
//! Drives planned targets through a container runtime.
//!
//! - **Engine**: walks an execution order, resolving recipes, building and
//!   running images, and copying artifacts back to the host.
//! - **Backend**: the [`ContainerRuntime`](backend::ContainerRuntime) seam and
//!   the script backend that renders the equivalent shell commands.

pub mod backend;
pub mod engine;
