//! Scene construction errors.

use engine_core::StateTableError;
use procgen::LayoutError;
use renderer::MeshError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),
    #[error("incomplete state table: {0}")]
    StateTable(#[from] StateTableError),
    #[error("forest layout failed: {0}")]
    Layout(#[from] LayoutError),
}
