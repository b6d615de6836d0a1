//! Forest state: trees (some burning), loose fires, the lake, and the
//! queries the water drop uses.

use crate::fire::{self, Fire, FireState};
use crate::helicopter::Helicopter;
use engine_core::{StateTable, Stateful};
use glam::Vec3;
use procgen::{ForestLayout, ForestLayoutConfig, LayoutError, TreeSpec};

/// Lake footprint relative to the terrain size.
const LAKE_WIDTH_FRACTION: f32 = 0.44;
const LAKE_DEPTH_FRACTION: f32 = 0.26;
/// Slice count for flames sitting on tree crowns.
const CROWN_FIRE_SLICES: u32 = 8;

/// Axis-aligned lake rectangle on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lake {
    /// Center (x, z).
    pub center: [f32; 2],
    /// Extent along X.
    pub width: f32,
    /// Extent along Z.
    pub depth: f32,
}

impl Lake {
    /// Lake centered on the terrain origin.
    pub fn from_terrain(terrain_width: f32, terrain_height: f32) -> Self {
        Self {
            center: [0.0, 0.0],
            width: terrain_width * LAKE_WIDTH_FRACTION,
            depth: terrain_height * LAKE_DEPTH_FRACTION,
        }
    }

    /// True iff the square `center ± half_width` lies strictly inside the lake.
    pub fn covers_footprint(&self, center: Vec3, half_width: f32) -> bool {
        let [cx, cz] = self.center;
        let (hx, hz) = (self.width / 2.0, self.depth / 2.0);
        center.x - half_width > cx - hx
            && center.x + half_width < cx + hx
            && center.z - half_width > cz - hz
            && center.z + half_width < cz + hz
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub position: Vec3,
    pub tilt_angle: f32,
    /// Horizontal unit axis.
    pub tilt_axis: Vec3,
    pub crown_radius: f32,
    pub trunk_height: f32,
    pub fire: Option<Fire>,
}

impl Tree {
    pub fn from_spec(spec: &TreeSpec) -> Self {
        let fire = spec.on_fire.then(|| {
            Fire::new(
                spec.position,
                spec.crown_radius,
                spec.trunk_height + 2.0 * spec.crown_radius,
                CROWN_FIRE_SLICES,
            )
        });
        Self {
            position: spec.position,
            tilt_angle: spec.tilt_angle,
            tilt_axis: spec.tilt_axis,
            crown_radius: spec.crown_radius,
            trunk_height: spec.trunk_height,
            fire,
        }
    }

    /// Height of the crown cone.
    pub fn crown_height(&self) -> f32 {
        2.0 * self.crown_radius
    }

    pub fn is_burning(&self) -> bool {
        self.fire.as_ref().is_some_and(Fire::is_active)
    }

    /// Planar reach test; a tree without fire is matched by `reach` alone.
    pub fn is_below(&self, overhead: Vec3, reach: f32) -> bool {
        let radius = self.fire.as_ref().map_or(0.0, |f| f.radius);
        fire::is_below(self.position, radius, overhead, reach)
    }
}

#[derive(Debug, Clone)]
pub struct Forest {
    pub rows: u32,
    pub columns: u32,
    pub max_rows: u32,
    pub max_columns: u32,
    pub trees: Vec<Tree>,
    /// Fires placed independently of trees.
    pub fires: Vec<Fire>,
    pub lake: Lake,
    /// Seconds of simulated time; drives the flicker.
    elapsed: f32,
}

impl Forest {
    pub fn generate(config: &ForestLayoutConfig, lake: Lake) -> Result<Self, LayoutError> {
        let layout = ForestLayout::generate(config)?;
        Ok(Self::from_layout(&layout, config, lake))
    }

    pub fn from_layout(layout: &ForestLayout, config: &ForestLayoutConfig, lake: Lake) -> Self {
        Self {
            rows: layout.rows,
            columns: layout.columns,
            max_rows: config.max_rows,
            max_columns: config.max_columns,
            trees: layout.trees.iter().map(Tree::from_spec).collect(),
            fires: layout
                .fires
                .iter()
                .map(|f| Fire::new(f.position, f.radius, f.height, f.slices))
                .collect(),
            lake,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn all_fires(&self) -> impl Iterator<Item = &Fire> + '_ {
        self.trees
            .iter()
            .filter_map(|t| t.fire.as_ref())
            .chain(self.fires.iter())
    }

    fn all_fires_mut(&mut self) -> impl Iterator<Item = &mut Fire> + '_ {
        self.trees
            .iter_mut()
            .filter_map(|t| t.fire.as_mut())
            .chain(self.fires.iter_mut())
    }

    pub fn active_fire_count(&self) -> usize {
        self.all_fires().filter(|f| f.is_active()).count()
    }

    pub fn is_above_lake(&self, helicopter: &Helicopter) -> bool {
        helicopter.is_above_lake(&self.lake)
    }

    /// Advance the clock by `elapsed_ms` and step every fire once.
    pub fn tick(&mut self, elapsed_ms: f32, table: &StateTable<Fire, f32>) {
        self.elapsed += elapsed_ms / 1000.0;
        let time = self.elapsed;
        for fire in self.all_fires_mut() {
            table.step(fire, &time);
        }
    }

    /// Start putting out every burning fire under `overhead`. Tree fires
    /// use the tree test, loose fires their own. Returns how many started.
    pub fn put_out_fires_below(&mut self, overhead: Vec3, reach: f32) -> usize {
        let mut count = 0;
        for tree in &mut self.trees {
            if !tree.is_below(overhead, reach) {
                continue;
            }
            if let Some(fire) = tree.fire.as_mut() {
                count += usize::from(fire.put_out());
            }
        }
        for fire in &mut self.fires {
            if fire.is_below(overhead, reach) {
                count += usize::from(fire.put_out());
            }
        }
        if count > 0 {
            log::info!("{} fire(s) doused near ({:.1}, {:.1})", count, overhead.x, overhead.z);
        }
        count
    }

    /// Relight every fire.
    pub fn reset(&mut self) {
        for fire in self.all_fires_mut() {
            fire.reset();
        }
        self.elapsed = 0.0;
    }

    pub fn extinguished_count(&self) -> usize {
        self.all_fires()
            .filter(|f| f.state() == FireState::Extinguished)
            .count()
    }
}
