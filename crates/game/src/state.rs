//! Whole-scene simulation state: one tick advances every entity, one display
//! pass draws the result.

use crate::bucket::{hinge_table, Bucket};
use crate::config::SimConfig;
use crate::error::SceneError;
use crate::fire::{fire_table, Fire};
use crate::forest::{Forest, Lake};
use crate::helicopter::{flight_table, FlightContext, FlightState, Helicopter};
use crate::models::SceneModels;
use engine_core::{StateTable, Stateful, Time};
use glam::Vec3;
use input::{ControlSet, InputSource};
use renderer::{DisplayContext, RenderBackend};

pub struct SimState {
    time: Time,
    helicopter: Helicopter,
    forest: Forest,
    heliport: Vec3,
    building_height: f32,
    flight: StateTable<Helicopter, FlightContext>,
    hinge: StateTable<Bucket, ()>,
    fires: StateTable<Fire, f32>,
    models: SceneModels,
    /// Fires hit by water since the last reset.
    doused: usize,
}

impl SimState {
    pub fn new(config: &SimConfig) -> Result<Self, SceneError> {
        let lake = Lake::from_terrain(config.terrain.width, config.terrain.height);
        let forest = Forest::generate(&config.forest, lake)?;
        let models = SceneModels::new(config, &forest)?;

        let heli_cfg = &config.helicopter;
        let helicopter = Helicopter::new(
            Vec3::from(config.helicopter_start()),
            heli_cfg.rope_length,
            heli_cfg.bucket_width,
            heli_cfg.bucket_top_radius,
        );
        let [hx, hz] = config.heliport;

        log::info!(
            "Scene ready: {} trees, {} fires burning, lake {:.0}x{:.0}",
            forest.trees.len(),
            forest.active_fire_count(),
            lake.width,
            lake.depth
        );

        Ok(Self {
            time: Time::new(),
            helicopter,
            forest,
            heliport: Vec3::new(hx, config.building.height, hz),
            building_height: config.building.height,
            flight: flight_table()?,
            hinge: hinge_table()?,
            fires: fire_table()?,
            models,
            doused: 0,
        })
    }

    /// Advance every entity by one frame of `elapsed_ms` milliseconds.
    pub fn tick(&mut self, elapsed_ms: f32, input: &dyn InputSource) {
        self.time.advance(elapsed_ms);
        let ctx = FlightContext {
            controls: ControlSet::capture(input),
            lake: self.forest.lake,
            heliport: self.heliport,
            building_height: self.building_height,
        };

        self.helicopter.tick(&self.flight, &ctx);
        self.hinge.step(&mut self.helicopter.bucket, &());
        if self.helicopter.bucket.take_release() {
            let heli = &self.helicopter;
            self.doused += self
                .forest
                .put_out_fires_below(heli.position, heli.bucket_top_radius);
        }
        self.forest.tick(elapsed_ms, &self.fires);
    }

    /// Draw the post-tick scene. Returns the number of draw calls issued.
    pub fn display(&mut self, backend: &mut dyn RenderBackend) -> usize {
        let mut ctx = DisplayContext::new(backend);
        self.models.display(&mut ctx, &self.helicopter, &self.forest);
        ctx.draws()
    }

    /// Back to the initial scene: helicopter parked with the engine off and
    /// the bucket stowed, every fire burning.
    pub fn reset(&mut self) {
        log::info!("Scene reset after {} frames", self.time.frame_count());
        self.helicopter.reset_all();
        self.forest.reset();
        self.time.reset();
        self.doused = 0;
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.models.set_wireframe(wireframe);
    }

    pub fn helicopter(&self) -> &Helicopter {
        &self.helicopter
    }

    pub fn flight_state(&self) -> FlightState {
        self.helicopter.state()
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn doused(&self) -> usize {
        self.doused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fire::FireState;
    use input::Control;
    use renderer::DrawList;

    fn config() -> SimConfig {
        let mut config = SimConfig::default();
        config.forest.rows = 2;
        config.forest.columns = 2;
        config.forest.fire_count = 1;
        config.forest.tree_fire_chance = 0.0;
        config
    }

    fn run_until(state: &mut SimState, input: ControlSet, target: FlightState, limit: u32) -> u32 {
        let mut ticks = 0;
        while state.flight_state() != target {
            state.tick(16.0, &input);
            ticks += 1;
            assert!(ticks <= limit, "stuck in {:?}", state.flight_state());
        }
        ticks
    }

    #[test]
    fn fill_then_douse_then_fly_home() {
        let mut state = SimState::new(&config()).unwrap();
        let idle = ControlSet::empty();
        let drop = ControlSet::empty().with(Control::DropWater);

        state.tick(16.0, &ControlSet::empty().with(Control::StartEngine));
        run_until(&mut state, idle, FlightState::Fly, 500);
        assert!(state.helicopter().bucket.is_visible());
        assert!(state.helicopter().position.y >= 50.0);

        // Over the lake: fill and climb back.
        state.helicopter.position = Vec3::new(0.0, 50.0, 0.0);
        state.helicopter.velocity = Vec3::ZERO;
        state.tick(16.0, &drop);
        assert_eq!(state.flight_state(), FlightState::FillBucket);
        run_until(&mut state, idle, FlightState::Fly, 1000);
        assert!(state.helicopter().bucket.has_water);

        // Over the fire: open the bucket and head home.
        let target = Vec3::new(100.0, 0.0, 100.0);
        state.forest.fires[0].position = target;
        state.helicopter.position = Vec3::new(target.x, 50.0, target.z);
        state.helicopter.velocity = Vec3::ZERO;
        state.tick(16.0, &drop);
        assert_eq!(state.flight_state(), FlightState::RotateToHeliport);

        for _ in 0..12 {
            state.tick(16.0, &idle);
        }
        assert_eq!(state.doused(), 1);
        assert!(!state.helicopter().bucket.has_water);
        assert_eq!(state.forest().fires[0].state(), FireState::Extinguished);

        run_until(&mut state, idle, FlightState::Fly, 2000);
        let heli = state.helicopter();
        let dx = heli.position.x - state.heliport.x;
        let dz = heli.position.z - state.heliport.z;
        assert!(dx * dx + dz * dz < 1.0);
    }

    #[test]
    fn reset_restores_initial_scene() {
        let mut state = SimState::new(&config()).unwrap();
        let start = state.helicopter().position;

        state.tick(16.0, &ControlSet::empty().with(Control::StartEngine));
        run_until(&mut state, ControlSet::empty(), FlightState::Fly, 500);
        state.forest.fires[0].put_out();
        for _ in 0..6 {
            state.tick(16.0, &ControlSet::empty());
        }
        assert_eq!(state.forest().active_fire_count(), 0);

        state.reset();
        let heli = state.helicopter();
        assert_eq!(heli.position, start);
        assert_eq!(state.flight_state(), FlightState::Stationary);
        assert_eq!(heli.blade_speed, 0.0);
        assert!(!heli.bucket.is_visible());
        assert_eq!(state.forest().active_fire_count(), 1);
        assert_eq!(state.time().frame_count(), 0);
    }

    #[test]
    fn display_reflects_post_tick_pose() {
        let mut state = SimState::new(&config()).unwrap();
        let mut list = DrawList::new();
        let draws = state.display(&mut list);
        assert_eq!(draws, list.len());
        assert_eq!(list.labelled("blade").count(), 4);
        assert_eq!(list.labelled("flame").count(), 1);
        assert_eq!(list.labelled("rope").count(), 0);

        state.tick(16.0, &ControlSet::empty().with(Control::StartEngine));
        run_until(&mut state, ControlSet::empty(), FlightState::Fly, 500);
        list.clear();
        state.display(&mut list);
        assert_eq!(list.labelled("rope").count(), 8);
    }
}
