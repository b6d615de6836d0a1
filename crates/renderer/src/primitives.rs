//! Parametric primitive generation: rectangles, discs, boxes, frustums,
//! ellipsoids and pyramids.
//!
//! All grids are laid out top row (or innermost ring) first so that
//! [`MeshData::push_quad`] winds every cell counter-clockwise when seen from
//! outside. Every builder rejects zero subdivisions and validates its output.

use crate::mesh::{grid_indices, grid_vertices, require_subdivisions, reserve, MeshData, MeshError};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

fn one() -> f32 {
    1.0
}
fn sixteen() -> u32 {
    16
}
fn eight() -> u32 {
    8
}
fn four() -> u32 {
    4
}
fn one_u32() -> u32 {
    1
}

/// Subdivision count derived from a world extent, never below 1.
fn derived_subdivisions(extent: f32) -> u32 {
    if extent.is_finite() {
        extent.abs().ceil().max(1.0) as u32
    } else {
        1
    }
}

/// A flat grid of quads spanned by two in-plane axes.
///
/// `u_axis × v_axis` must equal `normal` for the cells to face outward.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GridFace {
    pub center: Vec3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
    pub normal: Vec3,
    pub size: Vec2,
    pub columns: u32,
    pub rows: u32,
    /// Texture coordinate range; values above 1 tile a repeating texture.
    pub uv_extent: Vec2,
}

pub(crate) fn push_grid_face(mesh: &mut MeshData, face: &GridFace) {
    let base = mesh.vertex_count() as u32;
    for r in 0..=face.rows {
        // Row 0 is the top edge (+v).
        let fv = r as f32 / face.rows as f32;
        for c in 0..=face.columns {
            let fu = c as f32 / face.columns as f32;
            let position = face.center
                + face.u_axis * ((fu - 0.5) * face.size.x)
                + face.v_axis * ((0.5 - fv) * face.size.y);
            let uv = Vec2::new(fu * face.uv_extent.x, (1.0 - fv) * face.uv_extent.y);
            mesh.push_vertex(position, face.normal, uv);
        }
    }
    for r in 0..face.rows {
        for c in 0..face.columns {
            mesh.push_quad(base + r * (face.columns + 1) + c, face.columns);
        }
    }
}

/// Flat rectangle in the XY plane facing +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleConfig {
    #[serde(default = "one")]
    pub width: f32,
    #[serde(default = "one")]
    pub height: f32,
    /// Defaults to `height` rounded up.
    #[serde(default)]
    pub rows: Option<u32>,
    /// Defaults to `width` rounded up.
    #[serde(default)]
    pub columns: Option<u32>,
}

impl Default for RectangleConfig {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            rows: None,
            columns: None,
        }
    }
}

impl RectangleConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows.unwrap_or_else(|| derived_subdivisions(self.height))
    }

    pub fn columns(&self) -> u32 {
        self.columns.unwrap_or_else(|| derived_subdivisions(self.width))
    }
}

pub fn rectangle(config: &RectangleConfig) -> Result<MeshData, MeshError> {
    let rows = require_subdivisions(config.rows(), "rectangle", "rows")?;
    let columns = require_subdivisions(config.columns(), "rectangle", "columns")?;

    let mut mesh = reserve("rectangle", grid_vertices(rows, columns), grid_indices(rows, columns))?;
    push_grid_face(
        &mut mesh,
        &GridFace {
            center: Vec3::ZERO,
            u_axis: Vec3::X,
            v_axis: Vec3::Y,
            normal: Vec3::Z,
            size: Vec2::new(config.width, config.height),
            columns,
            rows,
            uv_extent: Vec2::ONE,
        },
    );
    mesh.validate()?;
    Ok(mesh)
}

/// Disc in the XY plane facing +Z, built from concentric rings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleConfig {
    #[serde(default = "one")]
    pub radius: f32,
    #[serde(default = "sixteen")]
    pub slices: u32,
    #[serde(default = "one_u32")]
    pub layers: u32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            slices: 16,
            layers: 1,
        }
    }
}

pub fn circle(config: &CircleConfig) -> Result<MeshData, MeshError> {
    let slices = require_subdivisions(config.slices, "circle", "slices")?;
    let layers = require_subdivisions(config.layers, "circle", "layers")?;
    let radius = config.radius;

    // `layers` rings of `slices + 1` vertices plus the center.
    let mut mesh = reserve(
        "circle",
        grid_vertices(layers - 1, slices).and_then(|v| v.checked_add(1)),
        grid_indices(layers - 1, slices).and_then(|i| i.checked_add(3 * u64::from(slices))),
    )?;

    // Innermost ring first.
    for k in 0..layers {
        let r = radius * (k + 1) as f32 / layers as f32;
        for s in 0..=slices {
            let (sin, cos) = (TAU * s as f32 / slices as f32).sin_cos();
            let p = Vec3::new(r * cos, r * sin, 0.0);
            let uv = Vec2::new(0.5 + 0.5 * p.x / radius, 0.5 + 0.5 * p.y / radius);
            mesh.push_vertex(p, Vec3::Z, uv);
        }
    }
    let center = mesh.push_vertex(Vec3::ZERO, Vec3::Z, Vec2::splat(0.5));

    for k in 0..layers - 1 {
        for s in 0..slices {
            mesh.push_quad(k * (slices + 1) + s, slices);
        }
    }
    for s in 0..slices {
        mesh.push_triangle(center, s, (s + 1) % slices);
    }

    mesh.validate()?;
    Ok(mesh)
}

/// Axis-aligned box centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxConfig {
    #[serde(default = "one")]
    pub width: f32,
    #[serde(default = "one")]
    pub height: f32,
    #[serde(default = "one")]
    pub depth: f32,
    /// Grid subdivisions along each edge of every face.
    #[serde(default = "one_u32")]
    pub segments: u32,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            segments: 1,
        }
    }
}

impl BoxConfig {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            segments: 1,
        }
    }
}

pub fn cuboid(config: &BoxConfig) -> Result<MeshData, MeshError> {
    let n = require_subdivisions(config.segments, "box", "segments")?;
    let (w, h, d) = (config.width, config.height, config.depth);

    // (normal, u axis, v axis, half extent along normal, face size)
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y, d, Vec2::new(w, h)),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y, d, Vec2::new(w, h)),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y, w, Vec2::new(d, h)),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y, w, Vec2::new(d, h)),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z, h, Vec2::new(w, d)),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z, h, Vec2::new(w, d)),
    ];

    let mut mesh = reserve(
        "box",
        grid_vertices(n, n).and_then(|v| v.checked_mul(6)),
        grid_indices(n, n).and_then(|i| i.checked_mul(6)),
    )?;
    for (normal, u_axis, v_axis, extent, size) in faces {
        push_grid_face(
            &mut mesh,
            &GridFace {
                center: normal * (extent / 2.0),
                u_axis,
                v_axis,
                normal,
                size,
                columns: n,
                rows: n,
                uv_extent: Vec2::ONE,
            },
        );
    }
    mesh.validate()?;
    Ok(mesh)
}

/// Open frustum around the Y axis; covers cylinders and cones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderConfig {
    #[serde(default = "one")]
    pub radius: f32,
    /// Defaults to `radius`.
    #[serde(default)]
    pub top_radius: Option<f32>,
    /// Defaults to the resolved top radius.
    #[serde(default)]
    pub bottom_radius: Option<f32>,
    #[serde(default = "one")]
    pub height: f32,
    #[serde(default = "sixteen")]
    pub slices: u32,
    #[serde(default = "one_u32")]
    pub stacks: u32,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            top_radius: None,
            bottom_radius: None,
            height: 1.0,
            slices: 16,
            stacks: 1,
        }
    }
}

impl CylinderConfig {
    pub fn cylinder(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            ..Default::default()
        }
    }

    /// Frustum with distinct bottom and top radii.
    pub fn frustum(bottom_radius: f32, top_radius: f32, height: f32) -> Self {
        Self {
            radius: bottom_radius,
            top_radius: Some(top_radius),
            bottom_radius: Some(bottom_radius),
            height,
            ..Default::default()
        }
    }

    /// Cone with its apex at the top.
    pub fn cone(radius: f32, height: f32) -> Self {
        Self::frustum(radius, 0.0, height)
    }

    pub fn with_slices(mut self, slices: u32) -> Self {
        self.slices = slices;
        self
    }

    pub fn top(&self) -> f32 {
        self.top_radius.unwrap_or(self.radius)
    }

    pub fn bottom(&self) -> f32 {
        self.bottom_radius.unwrap_or_else(|| self.top())
    }
}

/// Vertical component of the side normals shared by frustums and pyramids.
fn side_slope(bottom: f32, top: f32, stacks: u32) -> f32 {
    (bottom - top) / stacks as f32
}

/// Side wall of a frustum, centered on the origin, top ring first.
pub fn frustum(config: &CylinderConfig) -> Result<MeshData, MeshError> {
    let slices = require_subdivisions(config.slices, "cylinder", "slices")?;
    let stacks = require_subdivisions(config.stacks, "cylinder", "stacks")?;
    let (top, bottom, height) = (config.top(), config.bottom(), config.height);
    let slope = side_slope(bottom, top, stacks);

    let mut mesh = reserve(
        "cylinder",
        grid_vertices(stacks, slices),
        grid_indices(stacks, slices),
    )?;
    for j in 0..=stacks {
        let f = j as f32 / stacks as f32;
        let y = height / 2.0 - height * f;
        let r = top + (bottom - top) * f;
        for s in 0..=slices {
            let u = s as f32 / slices as f32;
            let (sin, cos) = (TAU * u).sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            mesh.push_vertex(Vec3::new(r * sin, y, r * cos), normal, Vec2::new(u, 1.0 - f));
        }
    }
    for j in 0..stacks {
        for s in 0..slices {
            mesh.push_quad(j * (slices + 1) + s, slices);
        }
    }
    mesh.validate()?;
    Ok(mesh)
}

/// UV sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    #[serde(default = "one")]
    pub radius: f32,
    #[serde(default = "sixteen")]
    pub slices: u32,
    #[serde(default = "sixteen")]
    pub stacks: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            slices: 16,
            stacks: 16,
        }
    }
}

/// Ellipsoid with independent semi-axes. `stacks` counts latitude bands per
/// hemisphere, so the generated grid has twice as many.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipsoidConfig {
    #[serde(default = "one")]
    pub radius_x: f32,
    #[serde(default = "one")]
    pub radius_y: f32,
    #[serde(default = "one")]
    pub radius_z: f32,
    #[serde(default = "sixteen")]
    pub slices: u32,
    #[serde(default = "eight")]
    pub stacks: u32,
}

impl Default for EllipsoidConfig {
    fn default() -> Self {
        Self {
            radius_x: 1.0,
            radius_y: 1.0,
            radius_z: 1.0,
            slices: 16,
            stacks: 8,
        }
    }
}

impl EllipsoidConfig {
    pub fn new(radii: Vec3) -> Self {
        Self {
            radius_x: radii.x,
            radius_y: radii.y,
            radius_z: radii.z,
            ..Default::default()
        }
    }

    pub fn radii(&self) -> Vec3 {
        Vec3::new(self.radius_x, self.radius_y, self.radius_z)
    }
}

pub fn sphere(config: &SphereConfig) -> Result<MeshData, MeshError> {
    let slices = require_subdivisions(config.slices, "sphere", "slices")?;
    let stacks = require_subdivisions(config.stacks, "sphere", "stacks")?;
    latitude_grid("sphere", Vec3::splat(config.radius), slices, stacks)
}

pub fn ellipsoid(config: &EllipsoidConfig) -> Result<MeshData, MeshError> {
    let slices = require_subdivisions(config.slices, "ellipsoid", "slices")?;
    let stacks = require_subdivisions(config.stacks, "ellipsoid", "stacks")?;
    let rings = stacks
        .checked_mul(2)
        .ok_or(MeshError::TooManyVertices { shape: "ellipsoid" })?;
    latitude_grid("ellipsoid", config.radii(), slices, rings)
}

/// North pole first; rings run from φ = 0 to φ = π.
fn latitude_grid(
    shape: &'static str,
    radii: Vec3,
    slices: u32,
    rings: u32,
) -> Result<MeshData, MeshError> {
    let mut mesh = reserve(shape, grid_vertices(rings, slices), grid_indices(rings, slices))?;
    for j in 0..=rings {
        let v = j as f32 / rings as f32;
        let (sin_phi, cos_phi) = (PI * v).sin_cos();
        for s in 0..=slices {
            let u = s as f32 / slices as f32;
            let (sin_theta, cos_theta) = (TAU * u).sin_cos();
            let unit = Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta);
            // The surface gradient of an ellipsoid scales inversely with each axis.
            let normal = (unit / radii).normalize();
            mesh.push_vertex(unit * radii, normal, Vec2::new(u, 1.0 - v));
        }
    }
    for j in 0..rings {
        for s in 0..slices {
            mesh.push_quad(j * (slices + 1) + s, slices);
        }
    }
    mesh.validate()?;
    Ok(mesh)
}

/// Faceted frustum: one flat-shaded quad strip per slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PyramidConfig {
    #[serde(default = "one")]
    pub radius: f32,
    #[serde(default)]
    pub top_radius: f32,
    #[serde(default = "one")]
    pub height: f32,
    #[serde(default = "four")]
    pub slices: u32,
    #[serde(default = "one_u32")]
    pub stacks: u32,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            top_radius: 0.0,
            height: 1.0,
            slices: 4,
            stacks: 1,
        }
    }
}

pub fn pyramid(config: &PyramidConfig) -> Result<MeshData, MeshError> {
    let slices = require_subdivisions(config.slices, "pyramid", "slices")?;
    let stacks = require_subdivisions(config.stacks, "pyramid", "stacks")?;
    let (top, bottom, height) = (config.top_radius, config.radius, config.height);
    let slope = side_slope(bottom, top, stacks);

    let ring = |j: u32| {
        let f = j as f32 / stacks as f32;
        (height / 2.0 - height * f, top + (bottom - top) * f, 1.0 - f)
    };

    // Four unshared vertices per cell.
    let mut mesh = reserve(
        "pyramid",
        u64::from(slices).checked_mul(u64::from(stacks)).and_then(|c| c.checked_mul(4)),
        grid_indices(slices, stacks),
    )?;
    for s in 0..slices {
        let (u0, u1) = (s as f32 / slices as f32, (s + 1) as f32 / slices as f32);
        let (sin0, cos0) = (TAU * u0).sin_cos();
        let (sin1, cos1) = (TAU * u1).sin_cos();
        let facing = Vec2::new(sin0 + sin1, cos0 + cos1).normalize_or_zero();
        let normal = Vec3::new(facing.x, slope, facing.y).normalize_or_zero();

        for j in 0..stacks {
            let (y0, r0, v0) = ring(j);
            let (y1, r1, v1) = ring(j + 1);
            let base = mesh.push_vertex(Vec3::new(r0 * sin0, y0, r0 * cos0), normal, Vec2::new(u0, v0));
            mesh.push_vertex(Vec3::new(r0 * sin1, y0, r0 * cos1), normal, Vec2::new(u1, v0));
            mesh.push_vertex(Vec3::new(r1 * sin0, y1, r1 * cos0), normal, Vec2::new(u0, v1));
            mesh.push_vertex(Vec3::new(r1 * sin1, y1, r1 * cos1), normal, Vec2::new(u1, v1));
            mesh.push_quad(base, 1);
        }
    }
    mesh.validate()?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_support::{assert_well_formed, misoriented_triangles};

    #[test]
    fn sphere_counts() {
        let (s, t) = (12u32, 7u32);
        let mesh = sphere(&SphereConfig {
            radius: 2.0,
            slices: s,
            stacks: t,
        })
        .unwrap();
        assert_eq!(mesh.vertex_count(), ((s + 1) * (t + 1)) as usize);
        assert_eq!(mesh.indices.len(), (6 * s * t) as usize);
        assert_well_formed(&mesh);
        for p in &mesh.positions {
            assert!((p.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn ellipsoid_doubles_stacks_and_keeps_unit_normals() {
        let config = EllipsoidConfig {
            slices: 10,
            stacks: 3,
            ..EllipsoidConfig::new(Vec3::new(3.0, 1.0, 0.5))
        };
        let mesh = ellipsoid(&config).unwrap();
        assert_eq!(mesh.vertex_count(), 11 * 7);
        assert_eq!(mesh.indices.len(), 6 * 10 * 6);
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
        assert_well_formed(&mesh);
    }

    #[test]
    fn rectangle_defaults_rows_and_columns_from_extent() {
        let config = RectangleConfig::new(3.0, 2.5);
        assert_eq!(config.columns(), 3);
        assert_eq!(config.rows(), 3);
        let mesh = rectangle(&config).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 18);
        assert!(mesh.normals.iter().all(|&n| n == Vec3::Z));
        assert!(mesh.tex_coords.iter().all(|uv| (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)));
        assert_well_formed(&mesh);
    }

    #[test]
    fn circle_has_center_fan() {
        let mesh = circle(&CircleConfig {
            radius: 1.0,
            slices: 8,
            layers: 3,
        })
        .unwrap();
        assert_eq!(mesh.vertex_count(), 3 * 9 + 1);
        assert_eq!(mesh.indices.len(), 6 * 8 * 2 + 3 * 8);
        let center = (mesh.vertex_count() - 1) as u32;
        assert_eq!(&mesh.indices[mesh.indices.len() - 3..], &[center, 7, 0]);
        assert_well_formed(&mesh);
    }

    #[test]
    fn box_faces_point_outward() {
        let mesh = cuboid(&BoxConfig::new(2.0, 4.0, 6.0)).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            // Each vertex lies on the face its normal names.
            let half = Vec3::new(1.0, 2.0, 3.0);
            assert!((p.dot(*n) - half.dot(n.abs())).abs() < 1e-5);
        }
        assert_well_formed(&mesh);
    }

    #[test]
    fn cylinder_defaults_resolve_through_the_chain() {
        let config: CylinderConfig = ron::from_str("(radius: 2.0, height: 3.0)").unwrap();
        assert_eq!(config.top(), 2.0);
        assert_eq!(config.bottom(), 2.0);
        assert_eq!(config.slices, 16);
        assert_eq!(config.stacks, 1);

        let flared: CylinderConfig = ron::from_str("(top_radius: Some(0.5))").unwrap();
        assert_eq!(flared.top(), 0.5);
        assert_eq!(flared.bottom(), 0.5);
    }

    #[test]
    fn frustum_normals_use_the_side_slope() {
        let config = CylinderConfig {
            stacks: 2,
            ..CylinderConfig::frustum(2.0, 1.0, 1.0)
        };
        let mesh = frustum(&config).unwrap();
        let expected = Vec3::new(0.0, 0.5, 1.0).normalize();
        assert!((mesh.normals[0] - expected).length() < 1e-5);
        assert_eq!(mesh.vertex_count(), 3 * 17);
        assert_well_formed(&mesh);
    }

    #[test]
    fn cone_apex_collapses_top_ring() {
        let mesh = frustum(&CylinderConfig::cone(1.0, 2.0).with_slices(6)).unwrap();
        for p in &mesh.positions[..7] {
            assert!((*p - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        }
        assert_well_formed(&mesh);
    }

    #[test]
    fn pyramid_facets_share_one_normal() {
        let mesh = pyramid(&PyramidConfig::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        for quad in mesh.normals.chunks(4) {
            assert!(quad.iter().all(|n| *n == quad[0]));
        }
        assert_eq!(misoriented_triangles(&mesh), 0);
        mesh.validate().unwrap();
    }

    #[test]
    fn zero_subdivisions_are_rejected() {
        let err = sphere(&SphereConfig {
            slices: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            MeshError::ZeroSubdivision {
                shape: "sphere",
                field: "slices"
            }
        );
        assert!(frustum(&CylinderConfig {
            stacks: 0,
            ..Default::default()
        })
        .is_err());
        assert!(rectangle(&RectangleConfig {
            rows: Some(0),
            ..Default::default()
        })
        .is_err());
        assert!(circle(&CircleConfig {
            layers: 0,
            ..Default::default()
        })
        .is_err());
        assert!(cuboid(&BoxConfig {
            segments: 0,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert_eq!(
            rectangle(&RectangleConfig::new(70_000.0, 70_000.0)).unwrap_err(),
            MeshError::TooManyVertices { shape: "rectangle" }
        );
        let huge = u32::MAX;
        assert!(sphere(&SphereConfig {
            slices: huge,
            stacks: huge,
            ..Default::default()
        })
        .is_err());
        assert_eq!(
            ellipsoid(&EllipsoidConfig {
                stacks: huge,
                ..Default::default()
            })
            .unwrap_err(),
            MeshError::TooManyVertices { shape: "ellipsoid" }
        );
        assert!(cuboid(&BoxConfig {
            segments: 70_000,
            ..Default::default()
        })
        .is_err());
        assert!(circle(&CircleConfig {
            slices: 100_000,
            layers: 100_000,
            ..Default::default()
        })
        .is_err());
        assert!(pyramid(&PyramidConfig {
            slices: huge,
            stacks: 2,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn every_index_is_in_range() {
        let meshes = [
            rectangle(&RectangleConfig::default()).unwrap(),
            circle(&CircleConfig::default()).unwrap(),
            cuboid(&BoxConfig::default()).unwrap(),
            frustum(&CylinderConfig::default()).unwrap(),
            sphere(&SphereConfig::default()).unwrap(),
            ellipsoid(&EllipsoidConfig::default()).unwrap(),
            pyramid(&PyramidConfig::default()).unwrap(),
        ];
        for mesh in &meshes {
            let count = mesh.vertex_count() as u32;
            assert!(mesh.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn inverted_sphere_faces_inward() {
        let mesh = sphere(&SphereConfig::default()).unwrap().inverted();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(p.dot(*n) < 0.0);
        }
        assert_eq!(misoriented_triangles(&mesh), 0);
    }
}
