//! Procedural building: four window-gridded walls and a flat roof.

use crate::mesh::{grid_indices, grid_vertices, require_subdivisions, reserve, MeshData, MeshError};
use crate::primitives::{push_grid_face, GridFace};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

fn default_width() -> f32 {
    20.0
}
fn default_height() -> f32 {
    40.0
}
fn default_floors() -> u32 {
    10
}
fn default_windows() -> u32 {
    4
}

/// Square-footprint building standing on the ground plane (y = 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    /// Side length of the square footprint.
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Grid rows on each wall.
    #[serde(default = "default_floors")]
    pub floors: u32,
    /// Grid columns on each wall, and rows/columns of the roof grid.
    #[serde(default = "default_windows")]
    pub windows: u32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            floors: default_floors(),
            windows: default_windows(),
        }
    }
}

/// Walls and roof kept apart so each can carry its own texture.
#[derive(Debug, Clone)]
pub struct BuildingMeshes {
    pub walls: MeshData,
    pub ceiling: MeshData,
}

/// Four walls, indexed 0..4 counter-clockwise from the +Z side. Texture
/// coordinates count windows and floors so a repeating window tile lines up
/// with the grid.
pub fn building_walls(config: &BuildingConfig) -> Result<MeshData, MeshError> {
    let floors = require_subdivisions(config.floors, "building", "floors")?;
    let windows = require_subdivisions(config.windows, "building", "windows")?;
    let half = config.width / 2.0;

    // (outward normal, horizontal axis) per wall
    let walls = [
        (Vec3::Z, Vec3::X),
        (Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Z, Vec3::NEG_X),
        (Vec3::NEG_X, Vec3::Z),
    ];

    let mut mesh = reserve(
        "building",
        grid_vertices(floors, windows).and_then(|v| v.checked_mul(4)),
        grid_indices(floors, windows).and_then(|i| i.checked_mul(4)),
    )?;
    for (normal, u_axis) in walls {
        push_grid_face(
            &mut mesh,
            &GridFace {
                center: normal * half + Vec3::Y * (config.height / 2.0),
                u_axis,
                v_axis: Vec3::Y,
                normal,
                size: Vec2::new(config.width, config.height),
                columns: windows,
                rows: floors,
                uv_extent: Vec2::new(windows as f32, floors as f32),
            },
        );
    }
    mesh.validate()?;
    Ok(mesh)
}

/// Flat `(windows + 1)²` roof grid at the building height.
pub fn building_ceiling(config: &BuildingConfig) -> Result<MeshData, MeshError> {
    let windows = require_subdivisions(config.windows, "building", "windows")?;

    let mut mesh = reserve(
        "building",
        grid_vertices(windows, windows),
        grid_indices(windows, windows),
    )?;
    push_grid_face(
        &mut mesh,
        &GridFace {
            center: Vec3::Y * config.height,
            u_axis: Vec3::X,
            v_axis: Vec3::NEG_Z,
            normal: Vec3::Y,
            size: Vec2::splat(config.width),
            columns: windows,
            rows: windows,
            uv_extent: Vec2::ONE,
        },
    );
    mesh.validate()?;
    Ok(mesh)
}

pub fn building(config: &BuildingConfig) -> Result<BuildingMeshes, MeshError> {
    Ok(BuildingMeshes {
        walls: building_walls(config)?,
        ceiling: building_ceiling(config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_support::assert_well_formed;

    fn small() -> BuildingConfig {
        BuildingConfig {
            width: 10.0,
            height: 30.0,
            floors: 6,
            windows: 3,
        }
    }

    #[test]
    fn wall_grid_counts() {
        let walls = building_walls(&small()).unwrap();
        assert_eq!(walls.vertex_count(), 4 * 7 * 4);
        assert_eq!(walls.triangle_count(), 4 * 6 * 3 * 2);
        assert_well_formed(&walls);
    }

    #[test]
    fn walls_enclose_the_footprint() {
        let walls = building_walls(&small()).unwrap();
        for p in &walls.positions {
            assert!(p.x.abs() <= 5.0 + 1e-4 && p.z.abs() <= 5.0 + 1e-4);
            assert!((0.0..=30.0 + 1e-4).contains(&p.y));
            // Every wall vertex lies on the footprint boundary.
            assert!((p.x.abs().max(p.z.abs()) - 5.0).abs() < 1e-4);
        }
        let max_u = walls.tex_coords.iter().map(|uv| uv.x).fold(0.0, f32::max);
        let max_v = walls.tex_coords.iter().map(|uv| uv.y).fold(0.0, f32::max);
        assert_eq!((max_u, max_v), (3.0, 6.0));
    }

    #[test]
    fn ceiling_sits_on_top() {
        let roof = building_ceiling(&small()).unwrap();
        assert_eq!(roof.vertex_count(), 16);
        assert!(roof.positions.iter().all(|p| (p.y - 30.0).abs() < 1e-5));
        assert!(roof.normals.iter().all(|&n| n == Vec3::Y));
        assert_well_formed(&roof);
    }

    #[test]
    fn zero_floors_rejected() {
        let config = BuildingConfig {
            floors: 0,
            ..small()
        };
        assert_eq!(
            building(&config).unwrap_err(),
            MeshError::ZeroSubdivision {
                shape: "building",
                field: "floors"
            }
        );
    }

    #[test]
    fn window_grid_too_large_for_u32_indices() {
        let config = BuildingConfig {
            floors: 1_000_000,
            windows: 1_000_000,
            ..small()
        };
        assert_eq!(
            building_walls(&config).unwrap_err(),
            MeshError::TooManyVertices { shape: "building" }
        );
        assert!(building_ceiling(&config).is_err());
    }
}
