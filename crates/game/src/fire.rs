//! Fire lifecycle: burning, shrinking under water, extinguished.

use engine_core::{ramp, StateId, StateTable, StateTableError, Stateful};
use glam::Vec3;

/// Flame scale lost per tick while being put out.
pub const PUT_OUT_STEP: f32 = 0.2;
const FLICKER_RATE: f32 = 6.0;
const FLICKER_AMPLITUDE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    /// Burning; flicker follows the forest clock.
    Idle,
    PutOut,
    /// Terminal.
    Extinguished,
}

impl StateId for FireState {
    const ALL: &'static [Self] = &[FireState::Idle, FireState::PutOut, FireState::Extinguished];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fire {
    state: FireState,
    /// Base of the flame on the ground.
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
    pub slices: u32,
    /// Flame scale factor; 0 means extinguished.
    pub scale: f32,
    /// Relative height offset from flickering.
    pub flicker: f32,
    phase: f32,
}

impl Fire {
    pub fn new(position: Vec3, radius: f32, height: f32, slices: u32) -> Self {
        Self {
            state: FireState::Idle,
            position,
            radius,
            height,
            slices,
            scale: 1.0,
            flicker: 0.0,
            // Decorrelate neighbouring flames.
            phase: position.x * 0.37 + position.z * 0.61,
        }
    }

    pub fn is_active(&self) -> bool {
        self.scale > 0.0
    }

    /// Start putting the fire out. Returns false if it is already going out.
    pub fn put_out(&mut self) -> bool {
        if self.state != FireState::Idle {
            return false;
        }
        self.state = FireState::PutOut;
        true
    }

    /// Relight at full size.
    pub fn reset(&mut self) {
        self.state = FireState::Idle;
        self.scale = 1.0;
        self.flicker = 0.0;
    }

    /// Planar test against a point overhead: within the larger of the flame
    /// radius and `reach`.
    pub fn is_below(&self, overhead: Vec3, reach: f32) -> bool {
        is_below(self.position, self.radius, overhead, reach)
    }
}

/// XZ distance between `position` and `overhead` is at most
/// `max(radius, reach)`.
pub fn is_below(position: Vec3, radius: f32, overhead: Vec3, reach: f32) -> bool {
    let dx = position.x - overhead.x;
    let dz = position.z - overhead.z;
    let limit = radius.max(reach);
    dx * dx + dz * dz <= limit * limit
}

impl Stateful for Fire {
    type State = FireState;

    fn state(&self) -> FireState {
        self.state
    }

    fn set_state(&mut self, state: FireState) {
        self.state = state;
    }
}

/// Context is the forest clock in seconds.
fn idle(fire: &mut Fire, time: &f32) -> Option<FireState> {
    fire.flicker = (time * FLICKER_RATE + fire.phase).sin() * FLICKER_AMPLITUDE;
    None
}

fn put_out(fire: &mut Fire, _: &f32) -> Option<FireState> {
    fire.scale = ramp(fire.scale, 0.0, PUT_OUT_STEP);
    if fire.scale > 0.0 {
        return None;
    }
    fire.flicker = 0.0;
    log::info!(
        "Fire at ({:.1}, {:.1}) extinguished",
        fire.position.x,
        fire.position.z
    );
    Some(FireState::Extinguished)
}

fn extinguished(_: &mut Fire, _: &f32) -> Option<FireState> {
    None
}

pub fn fire_table() -> Result<StateTable<Fire, f32>, StateTableError> {
    StateTable::<Fire, f32>::new(&[
        (FireState::Idle, idle),
        (FireState::PutOut, put_out),
        (FireState::Extinguished, extinguished),
    ])
}
