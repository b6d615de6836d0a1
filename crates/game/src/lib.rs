//! Firehawk simulation: a helicopter carrying a water bucket between a lake
//! and a burning forest.

pub mod bucket;
pub mod config;
pub mod error;
pub mod fire;
pub mod forest;
pub mod helicopter;
pub mod models;
pub mod state;

pub use bucket::{Bucket, HingeState};
pub use config::{HelicopterConfig, SimConfig, TerrainConfig};
pub use error::SceneError;
pub use fire::{Fire, FireState};
pub use forest::{Forest, Lake, Tree};
pub use helicopter::{FlightContext, FlightState, Helicopter};
pub use models::SceneModels;
pub use state::SimState;
