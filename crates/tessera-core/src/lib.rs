//! Tessera Core Types and Definitions
//!
//! This crate provides the foundational types for the Tessera template
//! layout engine. It includes:
//!
//! - **Modules**: Field-schema templates and their kinds ([`module`] module)
//! - **Instances**: Placed module occurrences with grid coordinates and the
//!   persisted wire shape ([`instance`] module)
//! - **Catalog**: The read-only lookup boundary for module definitions
//!   ([`catalog`] module)

pub mod catalog;
pub mod instance;
pub mod module;
