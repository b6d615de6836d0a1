//! Geometry and scene graph for Firehawk.
//!
//! Meshes are produced here as plain attribute buffers; uploading them is up
//! to whatever [`RenderBackend`] the host plugs in.

pub mod building;
pub mod draw_list;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod scene;
pub mod vertex;

pub use building::*;
pub use draw_list::*;
pub use material::*;
pub use mesh::*;
pub use primitives::*;
pub use scene::*;
pub use vertex::*;
