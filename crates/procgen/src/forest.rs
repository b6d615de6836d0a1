//! Forest layout: trees on a jittered grid and independently scattered fires.
//!
//! **Seed-based determinism:** every random draw comes from one `StdRng`
//! seeded with `config.seed`, so the same configuration always yields the
//! same forest.

use glam::{Vec2, Vec3};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Crown radius range for generated trees.
const CROWN_RADIUS: RangeInclusive<f32> = 1.5..=3.0;
/// Trunk height range.
const TRUNK_HEIGHT: RangeInclusive<f32> = 2.0..=5.0;
/// Maximum lean away from vertical, radians.
const MAX_TILT: f32 = 0.2;
/// Free-standing fire ranges.
const FIRE_RADIUS: RangeInclusive<f32> = 1.0..=3.0;
const FIRE_HEIGHT: RangeInclusive<f32> = 3.0..=8.0;
const FIRE_SLICES: RangeInclusive<u32> = 6..=12;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("forest patch must have a positive finite size, got {width} x {depth}")]
    EmptyPatch { width: f32, depth: f32 },
    #[error("tree fire chance must lie in [0, 1], got {0}")]
    FireChance(f32),
}

fn default_rows() -> u32 {
    8
}
fn default_max() -> u32 {
    16
}
fn default_extent() -> f32 {
    100.0
}
fn default_center() -> [f32; 2] {
    [110.0, 110.0]
}
fn default_fire_count() -> u32 {
    6
}
fn default_fire_chance() -> f32 {
    0.25
}

/// Configuration for forest placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestLayoutConfig {
    /// Requested grid rows (along Z).
    #[serde(default = "default_rows")]
    pub rows: u32,
    /// Requested grid columns (along X).
    #[serde(default = "default_rows")]
    pub columns: u32,
    /// Density cap on rows.
    #[serde(default = "default_max")]
    pub max_rows: u32,
    /// Density cap on columns.
    #[serde(default = "default_max")]
    pub max_columns: u32,
    /// Patch center on the ground plane (x, z).
    #[serde(default = "default_center")]
    pub center: [f32; 2],
    /// Patch extent along X.
    #[serde(default = "default_extent")]
    pub width: f32,
    /// Patch extent along Z.
    #[serde(default = "default_extent")]
    pub depth: f32,
    /// Fires placed independently of trees.
    #[serde(default = "default_fire_count")]
    pub fire_count: u32,
    /// Probability that a tree starts out burning.
    #[serde(default = "default_fire_chance")]
    pub tree_fire_chance: f32,
    #[serde(default)]
    pub seed: u64,
}

impl Default for ForestLayoutConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_rows(),
            max_rows: default_max(),
            max_columns: default_max(),
            center: default_center(),
            width: default_extent(),
            depth: default_extent(),
            fire_count: default_fire_count(),
            tree_fire_chance: default_fire_chance(),
            seed: 0,
        }
    }
}

impl ForestLayoutConfig {
    /// Rows actually placed after applying the density cap.
    pub fn effective_rows(&self) -> u32 {
        self.rows.min(self.max_rows)
    }

    pub fn effective_columns(&self) -> u32 {
        self.columns.min(self.max_columns)
    }

    pub fn min_corner(&self) -> Vec2 {
        Vec2::from(self.center) - Vec2::new(self.width, self.depth) / 2.0
    }

    pub fn max_corner(&self) -> Vec2 {
        Vec2::from(self.center) + Vec2::new(self.width, self.depth) / 2.0
    }

    /// Whether a ground-plane point lies inside the patch.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let (lo, hi) = (self.min_corner(), self.max_corner());
        (lo.x..=hi.x).contains(&x) && (lo.y..=hi.y).contains(&z)
    }
}

/// One generated tree, standing on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSpec {
    pub position: Vec3,
    /// Grid cell (row, column) the tree belongs to.
    pub cell: (u32, u32),
    pub tilt_angle: f32,
    /// Horizontal unit axis the tree leans about.
    pub tilt_axis: Vec3,
    pub crown_radius: f32,
    pub trunk_height: f32,
    pub on_fire: bool,
}

/// One free-standing fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireSpec {
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
    pub slices: u32,
}

/// Generated forest data.
#[derive(Debug, Clone)]
pub struct ForestLayout {
    pub trees: Vec<TreeSpec>,
    pub fires: Vec<FireSpec>,
    pub rows: u32,
    pub columns: u32,
    /// Size of one grid cell (x, z).
    pub cell_size: Vec2,
}

impl ForestLayout {
    /// Generate a forest from configuration.
    pub fn generate(config: &ForestLayoutConfig) -> Result<Self, LayoutError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(config.width) || !positive(config.depth) {
            return Err(LayoutError::EmptyPatch {
                width: config.width,
                depth: config.depth,
            });
        }
        if !(0.0..=1.0).contains(&config.tree_fire_chance) {
            return Err(LayoutError::FireChance(config.tree_fire_chance));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let rows = config.effective_rows();
        let columns = config.effective_columns();
        let cell_size = Vec2::new(
            config.width / columns.max(1) as f32,
            config.depth / rows.max(1) as f32,
        );
        let corner = config.min_corner();

        let mut trees = Vec::with_capacity((rows * columns) as usize);
        for row in 0..rows {
            for column in 0..columns {
                let cell_center = corner + cell_size * Vec2::new(column as f32 + 0.5, row as f32 + 0.5);
                let crown_radius = rng.gen_range(CROWN_RADIUS);
                let trunk_height = rng.gen_range(TRUNK_HEIGHT);

                let slack = (cell_size / 2.0 - Vec2::splat(crown_radius)).max(Vec2::ZERO);
                let jitter = Vec2::new(
                    rng.gen_range(-slack.x..=slack.x),
                    rng.gen_range(-slack.y..=slack.y),
                );

                let tilt_angle = rng.gen_range(0.0..=MAX_TILT);
                let heading = rng.gen_range(0.0..std::f32::consts::TAU);
                let tilt_axis = Vec3::new(heading.cos(), 0.0, heading.sin());
                let on_fire = rng.gen_bool(f64::from(config.tree_fire_chance));

                let p = cell_center + jitter;
                trees.push(TreeSpec {
                    position: Vec3::new(p.x, 0.0, p.y),
                    cell: (row, column),
                    tilt_angle,
                    tilt_axis,
                    crown_radius,
                    trunk_height,
                    on_fire,
                });
            }
        }

        let hi = config.max_corner();
        let fires = (0..config.fire_count)
            .map(|_| FireSpec {
                position: Vec3::new(rng.gen_range(corner.x..=hi.x), 0.0, rng.gen_range(corner.y..=hi.y)),
                radius: rng.gen_range(FIRE_RADIUS),
                height: rng.gen_range(FIRE_HEIGHT),
                slices: rng.gen_range(FIRE_SLICES),
            })
            .collect::<Vec<_>>();

        log::info!(
            "Forest layout: {}x{} grid, {} trees ({} burning), {} loose fires",
            rows,
            columns,
            trees.len(),
            trees.iter().filter(|t| t.on_fire).count(),
            fires.len()
        );

        Ok(Self {
            trees,
            fires,
            rows,
            columns,
            cell_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_forest() {
        let config = ForestLayoutConfig {
            seed: 4242,
            ..Default::default()
        };
        let a = ForestLayout::generate(&config).unwrap();
        let b = ForestLayout::generate(&config).unwrap();
        assert_eq!(a.trees, b.trees);
        assert_eq!(a.fires, b.fires);

        let c = ForestLayout::generate(&ForestLayoutConfig { seed: 7, ..config }).unwrap();
        assert_ne!(a.trees, c.trees);
    }

    #[test]
    fn density_cap_limits_grid() {
        let config = ForestLayoutConfig {
            rows: 40,
            columns: 3,
            max_rows: 5,
            max_columns: 10,
            ..Default::default()
        };
        let layout = ForestLayout::generate(&config).unwrap();
        assert_eq!((layout.rows, layout.columns), (5, 3));
        assert_eq!(layout.trees.len(), 15);
    }

    #[test]
    fn crowns_stay_inside_their_cells() {
        let config = ForestLayoutConfig {
            rows: 4,
            columns: 5,
            width: 60.0,
            depth: 40.0,
            center: [0.0, 0.0],
            seed: 99,
            ..Default::default()
        };
        let layout = ForestLayout::generate(&config).unwrap();
        let corner = config.min_corner();
        for tree in &layout.trees {
            let (row, column) = tree.cell;
            let cell_center =
                corner + layout.cell_size * Vec2::new(column as f32 + 0.5, row as f32 + 0.5);
            let offset = Vec2::new(tree.position.x, tree.position.z) - cell_center;
            let half = layout.cell_size / 2.0;
            assert!(offset.x.abs() + tree.crown_radius <= half.x + 1e-4);
            assert!(offset.y.abs() + tree.crown_radius <= half.y + 1e-4);
            assert!(CROWN_RADIUS.contains(&tree.crown_radius));
            assert!(TRUNK_HEIGHT.contains(&tree.trunk_height));
            assert!(tree.tilt_angle <= MAX_TILT);
            assert!((tree.tilt_axis.length() - 1.0).abs() < 1e-5);
            assert_eq!(tree.tilt_axis.y, 0.0);
        }
    }

    #[test]
    fn fires_fall_inside_patch() {
        let config = ForestLayoutConfig {
            fire_count: 50,
            seed: 3,
            ..Default::default()
        };
        let layout = ForestLayout::generate(&config).unwrap();
        assert_eq!(layout.fires.len(), 50);
        for fire in &layout.fires {
            assert!(config.contains(fire.position.x, fire.position.z));
            assert!(FIRE_SLICES.contains(&fire.slices));
            assert!(FIRE_RADIUS.contains(&fire.radius));
        }
    }

    #[test]
    fn empty_grid_is_allowed_but_empty_patch_is_not() {
        let layout = ForestLayout::generate(&ForestLayoutConfig {
            rows: 0,
            ..Default::default()
        })
        .unwrap();
        assert!(layout.trees.is_empty());

        let err = ForestLayout::generate(&ForestLayoutConfig {
            width: 0.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, LayoutError::EmptyPatch { .. }));
    }
}
