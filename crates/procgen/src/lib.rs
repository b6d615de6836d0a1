//! Procedural generation for the forest patch.

pub mod forest;

pub use forest::*;
