//! Helicopter flight: simple thrust/drag physics plus the flight state machine.

use crate::bucket::Bucket;
use crate::forest::Lake;
use engine_core::{ramp, StateId, StateTable, StateTableError, Stateful};
use glam::{Vec2, Vec3};
use input::{Control, ControlSet};
use std::f32::consts::{PI, TAU};

pub const MAX_BLADE_SPEED: f32 = 0.5;
/// Blade speed gained per tick while the engine spins up.
pub const BLADE_SPEED_STEP: f32 = 0.02;
pub const VERTICAL_THRUST: f32 = 0.01;
pub const HORIZONTAL_THRUST: f32 = 0.02;
/// Yaw change per tick while a turn key is held.
pub const TURN_RATE: f32 = PI / 90.0;
/// Largest yaw correction per tick when turning for home.
pub const HOMING_TURN_STEP: f32 = PI / 80.0;
/// Horizontal velocity kept after each tick.
pub const DRAG: f32 = 0.98;
/// Bucket scale gained per tick while it is lowered.
pub const BUCKET_DROP_STEP: f32 = 0.2;
/// Squared horizontal distance at which the flight home stops.
const ARRIVAL_RADIUS_SQ: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    /// Parked on the pad.
    Stationary,
    StartEngine,
    Ascend,
    DropBucket,
    /// Player-controlled cruise.
    Fly,
    RotateToHeliport,
    FlyToHeliport,
    FillBucket,
}

impl StateId for FlightState {
    const ALL: &'static [Self] = &[
        FlightState::Stationary,
        FlightState::StartEngine,
        FlightState::Ascend,
        FlightState::DropBucket,
        FlightState::Fly,
        FlightState::RotateToHeliport,
        FlightState::FlyToHeliport,
        FlightState::FillBucket,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Whole-scene facts the flight handlers read each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightContext {
    /// Controls held this tick.
    pub controls: ControlSet,
    pub lake: Lake,
    /// Landing pad position (only X and Z are used for homing).
    pub heliport: Vec3,
    pub building_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    position: Vec3,
    velocity: Vec3,
    yaw: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Helicopter {
    state: FlightState,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Rotation about +Y; heading is `(cos yaw, 0, -sin yaw)`.
    pub yaw: f32,
    pub blade_speed: f32,
    /// Accumulated rotor angle, radians in `0..TAU`.
    pub rotor_angle: f32,
    pub rope_length: f32,
    pub bucket_width: f32,
    pub bucket_top_radius: f32,
    pub bucket: Bucket,
    initial: Snapshot,
}

impl Helicopter {
    pub fn new(position: Vec3, rope_length: f32, bucket_width: f32, bucket_top_radius: f32) -> Self {
        Self {
            state: FlightState::Stationary,
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            blade_speed: 0.0,
            rotor_angle: 0.0,
            rope_length,
            bucket_width,
            bucket_top_radius,
            bucket: Bucket::new(),
            initial: Snapshot {
                position,
                velocity: Vec3::ZERO,
                yaw: 0.0,
            },
        }
    }

    /// Unit heading in the XZ plane.
    pub fn heading(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Thrust along the heading, or straight up when `vertical`.
    pub fn accelerate(&mut self, value: f32, vertical: bool) {
        if vertical {
            self.velocity.y += value;
        } else {
            self.velocity.x += value * self.yaw.cos();
            self.velocity.z += value * -self.yaw.sin();
        }
    }

    /// Change yaw by `delta`, swinging the horizontal velocity with it.
    pub fn turn(&mut self, delta: f32) {
        self.yaw += delta;
        let (sin, cos) = delta.sin_cos();
        let (vx, vz) = (self.velocity.x, self.velocity.z);
        self.velocity.x = vx * cos + vz * sin;
        self.velocity.z = vz * cos - vx * sin;
    }

    /// Restore position, velocity and yaw captured at construction. The
    /// flight state is left alone.
    pub fn reset(&mut self) {
        log::debug!("Helicopter reset to {:?}", self.initial.position);
        self.position = self.initial.position;
        self.velocity = self.initial.velocity;
        self.yaw = self.initial.yaw;
    }

    /// Altitude at which horizontal flight begins.
    pub fn cruise_height(&self, building_height: f32) -> f32 {
        building_height + self.rope_length
    }

    pub fn half_bucket_width(&self) -> f32 {
        self.bucket_width / 2.0
    }

    pub fn is_above_lake(&self, lake: &Lake) -> bool {
        lake.covers_footprint(self.position, self.half_bucket_width())
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.x.hypot(self.velocity.z)
    }

    /// Signed angle from the current heading to `target` in the ground plane.
    /// Positive means a positive `turn` brings the nose onto the target.
    pub fn bearing_error(&self, target: Vec3) -> f32 {
        // Ground plane as (x, -z) so yaw is a counter-clockwise angle.
        let heading = Vec2::new(self.yaw.cos(), self.yaw.sin());
        let to_target = Vec2::new(target.x - self.position.x, self.position.z - target.z);
        heading.perp_dot(to_target).atan2(heading.dot(to_target))
    }

    /// One simulation tick: reset key, flight handler, integration, drag.
    pub fn tick(&mut self, table: &StateTable<Helicopter, FlightContext>, ctx: &FlightContext) {
        if ctx.controls.contains(Control::Reset) {
            self.reset();
        }
        table.step(self, ctx);

        self.position += self.velocity;
        self.velocity.x *= DRAG;
        self.velocity.z *= DRAG;
        self.rotor_angle = (self.rotor_angle + self.blade_speed).rem_euclid(TAU);
    }

    /// Parked, engine off, bucket stowed, back at the start pose.
    pub fn reset_all(&mut self) {
        self.reset();
        self.state = FlightState::Stationary;
        self.blade_speed = 0.0;
        self.rotor_angle = 0.0;
        self.bucket.reset();
    }
}

impl Stateful for Helicopter {
    type State = FlightState;

    fn state(&self) -> FlightState {
        self.state
    }

    fn set_state(&mut self, state: FlightState) {
        self.state = state;
    }
}

fn stationary(_: &mut Helicopter, ctx: &FlightContext) -> Option<FlightState> {
    ctx.controls
        .contains(Control::StartEngine)
        .then_some(FlightState::StartEngine)
}

fn start_engine(heli: &mut Helicopter, _: &FlightContext) -> Option<FlightState> {
    heli.blade_speed = ramp(heli.blade_speed, MAX_BLADE_SPEED, BLADE_SPEED_STEP);
    (heli.blade_speed == MAX_BLADE_SPEED).then_some(FlightState::Ascend)
}

fn ascend(heli: &mut Helicopter, ctx: &FlightContext) -> Option<FlightState> {
    if heli.position.y >= heli.cruise_height(ctx.building_height) {
        heli.velocity.y = 0.0;
        return Some(FlightState::DropBucket);
    }
    heli.accelerate(VERTICAL_THRUST, true);
    None
}

fn drop_bucket(heli: &mut Helicopter, _: &FlightContext) -> Option<FlightState> {
    heli.bucket.scale = ramp(heli.bucket.scale, 1.0, BUCKET_DROP_STEP);
    (heli.bucket.scale == 1.0).then_some(FlightState::Fly)
}

fn fly(heli: &mut Helicopter, ctx: &FlightContext) -> Option<FlightState> {
    let controls = ctx.controls;
    if controls.contains(Control::Forward) {
        heli.accelerate(HORIZONTAL_THRUST, false);
    }
    if controls.contains(Control::Back) {
        heli.accelerate(-HORIZONTAL_THRUST, false);
    }
    if controls.contains(Control::Left) {
        heli.turn(TURN_RATE);
    }
    if controls.contains(Control::Right) {
        heli.turn(-TURN_RATE);
    }

    if !controls.contains(Control::DropWater) {
        return None;
    }
    if heli.is_above_lake(&ctx.lake) {
        return Some(FlightState::FillBucket);
    }
    if heli.bucket.has_water {
        heli.bucket.open();
    }
    Some(FlightState::RotateToHeliport)
}

fn rotate_to_heliport(heli: &mut Helicopter, ctx: &FlightContext) -> Option<FlightState> {
    let error = heli.bearing_error(ctx.heliport);
    if error.abs() < HOMING_TURN_STEP {
        heli.turn(error);
        return Some(FlightState::FlyToHeliport);
    }
    heli.turn(HOMING_TURN_STEP.copysign(error));
    None
}

fn fly_to_heliport(heli: &mut Helicopter, ctx: &FlightContext) -> Option<FlightState> {
    let offset = Vec2::new(
        ctx.heliport.x - heli.position.x,
        ctx.heliport.z - heli.position.z,
    );
    let distance_sq = offset.length_squared();
    if distance_sq < ARRIVAL_RADIUS_SQ {
        heli.velocity.x = 0.0;
        heli.velocity.z = 0.0;
        return Some(FlightState::Fly);
    }

    heli.turn(heli.bearing_error(ctx.heliport));
    let heading = heli.heading();
    let along = heli.velocity.x * heading.x + heli.velocity.z * heading.z;
    let speed = (along + HORIZONTAL_THRUST).clamp(0.0, distance_sq.sqrt());
    heli.velocity.x = heading.x * speed;
    heli.velocity.z = heading.z * speed;
    None
}

fn fill_bucket(heli: &mut Helicopter, _: &FlightContext) -> Option<FlightState> {
    if heli.position.y - heli.rope_length / 2.0 <= 0.0 {
        heli.velocity.y = 0.0;
        heli.bucket.has_water = true;
        log::info!("Bucket filled at ({:.1}, {:.1})", heli.position.x, heli.position.z);
        return Some(FlightState::Ascend);
    }
    heli.velocity.y = heli.velocity.y.min(0.0);
    heli.accelerate(-VERTICAL_THRUST, true);
    None
}

pub fn flight_table() -> Result<StateTable<Helicopter, FlightContext>, StateTableError> {
    StateTable::<Helicopter, FlightContext>::new(&[
        (FlightState::Stationary, stationary),
        (FlightState::StartEngine, start_engine),
        (FlightState::Ascend, ascend),
        (FlightState::DropBucket, drop_bucket),
        (FlightState::Fly, fly),
        (FlightState::RotateToHeliport, rotate_to_heliport),
        (FlightState::FlyToHeliport, fly_to_heliport),
        (FlightState::FillBucket, fill_bucket),
    ])
}
