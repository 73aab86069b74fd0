//! Relayout Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Relayout
//! incremental layout engine and its front ends. It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::Id`])
//! - **Geometry**: Points, sizes and bounds with unset sentinels ([`geometry`] module)
//! - **Semantic**: The immutable diagram snapshot model ([`semantic`] module)
//! - **Metrics**: Text and image measurement collaborators ([`metrics`] module)

pub mod geometry;
pub mod identifier;
pub mod metrics;
pub mod semantic;
