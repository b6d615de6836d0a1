//! Core engine types and utilities for Firehawk.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Affine transform builders and the consume-once accumulated transform
//! - Time management driven by per-frame elapsed milliseconds
//! - Table-driven finite-state machines for animated entities

pub mod state_machine;
pub mod time;
pub mod transform;

pub use state_machine::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
