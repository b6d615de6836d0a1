//! Water bucket slung under the helicopter: visual scale, water load and the
//! hinged bottom that releases it.

use engine_core::{ramp, StateId, StateTable, StateTableError, Stateful};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_8};

/// Hinge movement per tick, radians.
pub const HINGE_STEP: f32 = FRAC_PI_8;
/// Fully open hinge angle.
pub const HINGE_OPEN: f32 = FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HingeState {
    Idle,
    OpenBottom,
    /// Single-tick pass-through that lets the water go.
    DropWater,
    CloseBottom,
}

impl StateId for HingeState {
    const ALL: &'static [Self] = &[
        HingeState::Idle,
        HingeState::OpenBottom,
        HingeState::DropWater,
        HingeState::CloseBottom,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    state: HingeState,
    /// Bottom hinge angle, 0 (closed) to [`HINGE_OPEN`].
    pub hinge_angle: f32,
    /// Visual scale of bucket and rope; 0 while stowed.
    pub scale: f32,
    pub has_water: bool,
    released: bool,
}

impl Default for Bucket {
    fn default() -> Self {
        Self::new()
    }
}

impl Bucket {
    pub fn new() -> Self {
        Self {
            state: HingeState::Idle,
            hinge_angle: 0.0,
            scale: 0.0,
            has_water: false,
            released: false,
        }
    }

    /// Start opening the bottom. Ignored while the hinge is already moving.
    pub fn open(&mut self) -> bool {
        if self.state != HingeState::Idle {
            return false;
        }
        self.state = HingeState::OpenBottom;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.scale > 0.0
    }

    /// Whether water left the bucket since the last call.
    pub fn take_release(&mut self) -> bool {
        std::mem::take(&mut self.released)
    }

    /// Stowed, empty and closed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Stateful for Bucket {
    type State = HingeState;

    fn state(&self) -> HingeState {
        self.state
    }

    fn set_state(&mut self, state: HingeState) {
        self.state = state;
    }
}

fn idle(_: &mut Bucket, _: &()) -> Option<HingeState> {
    None
}

fn open_bottom(bucket: &mut Bucket, _: &()) -> Option<HingeState> {
    bucket.hinge_angle = ramp(bucket.hinge_angle, HINGE_OPEN, HINGE_STEP);
    (bucket.hinge_angle == HINGE_OPEN).then_some(HingeState::DropWater)
}

fn drop_water(bucket: &mut Bucket, _: &()) -> Option<HingeState> {
    if bucket.has_water {
        bucket.has_water = false;
        bucket.released = true;
        log::info!("Water released");
    }
    Some(HingeState::CloseBottom)
}

fn close_bottom(bucket: &mut Bucket, _: &()) -> Option<HingeState> {
    bucket.hinge_angle = ramp(bucket.hinge_angle, 0.0, HINGE_STEP);
    (bucket.hinge_angle == 0.0).then_some(HingeState::Idle)
}

pub fn hinge_table() -> Result<StateTable<Bucket, ()>, StateTableError> {
    StateTable::<Bucket, ()>::new(&[
        (HingeState::Idle, idle),
        (HingeState::OpenBottom, open_bottom),
        (HingeState::DropWater, drop_water),
        (HingeState::CloseBottom, close_bottom),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hinge_cycle() {
        let table = hinge_table().unwrap();
        let mut bucket = Bucket::new();
        bucket.has_water = true;

        table.step(&mut bucket, &());
        assert_eq!(bucket.state(), HingeState::Idle);

        assert!(bucket.open());
        assert!(!bucket.open());

        let mut visited = Vec::new();
        for _ in 0..9 {
            table.step(&mut bucket, &());
            visited.push(bucket.state());
        }
        use HingeState::*;
        assert_eq!(
            visited,
            vec![
                OpenBottom,
                OpenBottom,
                OpenBottom,
                DropWater,
                CloseBottom,
                CloseBottom,
                CloseBottom,
                CloseBottom,
                Idle
            ]
        );
        assert_eq!(bucket.hinge_angle, 0.0);
        assert!(!bucket.has_water);
        assert!(bucket.take_release());
        assert!(!bucket.take_release());
    }

    #[test]
    fn hinge_peaks_at_right_angle() {
        let table = hinge_table().unwrap();
        let mut bucket = Bucket::new();
        bucket.open();
        let mut peak: f32 = 0.0;
        for _ in 0..9 {
            table.step(&mut bucket, &());
            peak = peak.max(bucket.hinge_angle);
        }
        assert_eq!(peak, HINGE_OPEN);
    }

    #[test]
    fn empty_bucket_releases_nothing() {
        let table = hinge_table().unwrap();
        let mut bucket = Bucket::new();
        bucket.open();
        for _ in 0..9 {
            table.step(&mut bucket, &());
        }
        assert!(!bucket.take_release());
    }
}
