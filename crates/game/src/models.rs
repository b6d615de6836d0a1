//! Scene graph assemblies. Geometry is built once; every frame the nodes are
//! posed from simulation state and displayed.

use crate::config::SimConfig;
use crate::fire::Fire;
use crate::forest::{Forest, Lake};
use crate::helicopter::Helicopter;
use engine_core::{rotation, scaling, translation};
use glam::{Mat4, Vec3};
use renderer::{
    building, circle, cuboid, ellipsoid, frustum, pyramid, rectangle, sphere, BoxConfig, CircleConfig,
    CylinderConfig, DisplayContext, EllipsoidConfig, Material, MeshError, PyramidConfig,
    RectangleConfig, SceneNode, SphereConfig, TextureConfig, TextureId,
};
use std::collections::BTreeMap;
use std::f32::consts::FRAC_PI_2;

pub const GRASS_TEXTURE: TextureId = TextureId(0);
pub const WATER_TEXTURE: TextureId = TextureId(1);
pub const WINDOW_TEXTURE: TextureId = TextureId(2);
pub const ROOF_TEXTURE: TextureId = TextureId(3);
pub const SKY_TEXTURE: TextureId = TextureId(4);

const ROTOR_BLADES: u32 = 4;
const HUB_HEIGHT: f32 = 2.1;
const BLADE_LENGTH: f32 = 5.0;
const ROPE_SEGMENTS: u32 = 8;

/// Lays an XY-plane mesh flat on the ground, facing up.
fn face_up() -> Mat4 {
    rotation(-FRAC_PI_2, Vec3::X)
}

/// Sky dome, ground, lake and the heliport building.
pub struct EnvironmentModel {
    sky: SceneNode,
    terrain: SceneNode,
    lake: SceneNode,
    building: SceneNode,
}

impl EnvironmentModel {
    pub fn new(config: &SimConfig, lake: &Lake) -> Result<Self, MeshError> {
        let terrain_cfg = &config.terrain;
        let radius = terrain_cfg.width.max(terrain_cfg.height) * 0.75;

        let mut sky = SceneNode::leaf(
            "sky",
            sphere(&SphereConfig {
                radius,
                slices: 24,
                stacks: 12,
            })?
            .inverted(),
        )
        .with_material(Material::emissive([0.45, 0.65, 0.9]))
        .with_texture(TextureConfig::new(SKY_TEXTURE));
        sky.scale(1.0, 0.6, 1.0);

        let mut terrain = SceneNode::leaf(
            "terrain",
            rectangle(&RectangleConfig {
                width: terrain_cfg.width,
                height: terrain_cfg.height,
                rows: Some(terrain_cfg.subdivisions),
                columns: Some(terrain_cfg.subdivisions),
            })?,
        )
        .with_material(Material::color([0.3, 0.55, 0.2]))
        .with_texture(TextureConfig::new(GRASS_TEXTURE));
        terrain.rotate(-FRAC_PI_2, Vec3::X);

        let [lx, lz] = lake.center;
        let lake = SceneNode::leaf(
            "lake",
            rectangle(&RectangleConfig {
                width: lake.width,
                height: lake.depth,
                rows: Some(8),
                columns: Some(8),
            })?,
        )
        .with_placement(translation(Vec3::new(lx, 0.05, lz)) * face_up())
        .with_material(Material::shiny([0.1, 0.3, 0.7], 40.0))
        .with_texture(TextureConfig::new(WATER_TEXTURE));

        let meshes = building(&config.building)?;
        let pad = circle(&CircleConfig {
            radius: config.building.width * 0.3,
            slices: 24,
            layers: 2,
        })?;
        let [hx, hz] = config.heliport;
        let building = SceneNode::group(
            "building",
            vec![
                SceneNode::leaf("walls", meshes.walls).with_texture(TextureConfig::new(WINDOW_TEXTURE)),
                SceneNode::leaf("roof", meshes.ceiling).with_texture(TextureConfig::clamped(ROOF_TEXTURE)),
                SceneNode::leaf("heliport", pad)
                    .with_placement(translation(Vec3::Y * (config.building.height + 0.02)) * face_up())
                    .with_material(Material::color([0.9, 0.8, 0.1])),
            ],
        )
        .with_placement(translation(Vec3::new(hx, 0.0, hz)))
        .with_material(Material::color([0.6, 0.6, 0.65]));

        Ok(Self {
            sky,
            terrain,
            lake,
            building,
        })
    }

    /// Sky and terrain keep their construction-time transforms across frames.
    pub fn display(&mut self, ctx: &mut DisplayContext<'_>) {
        self.sky.display(ctx, true);
        self.terrain.display(ctx, true);
        self.lake.display(ctx, false);
        self.building.display(ctx, false);
    }

    pub fn triangle_count(&self) -> usize {
        [&self.sky, &self.terrain, &self.lake, &self.building]
            .into_iter()
            .map(SceneNode::triangle_count)
            .sum()
    }

    fn nodes_mut(&mut self) -> [&mut SceneNode; 4] {
        [&mut self.sky, &mut self.terrain, &mut self.lake, &mut self.building]
    }
}

/// Helicopter body plus the parts stamped per frame: rotor blades, rope
/// segments and the bucket.
pub struct HelicopterModel {
    body: SceneNode,
    blade: SceneNode,
    rope: SceneNode,
    bucket: SceneNode,
    bucket_bottom: SceneNode,
    bucket_height: f32,
    bucket_radius: f32,
}

impl HelicopterModel {
    pub fn new(rope_width: f32, bucket_width: f32, bucket_top_radius: f32) -> Result<Self, MeshError> {
        let fuselage = ellipsoid(&EllipsoidConfig::new(Vec3::new(4.0, 1.5, 1.8)))?;
        let cockpit = sphere(&SphereConfig {
            radius: 1.3,
            slices: 16,
            stacks: 8,
        })?;
        let tail = frustum(&CylinderConfig::frustum(0.6, 0.2, 5.0).with_slices(12))?;
        let fin = pyramid(&PyramidConfig {
            radius: 0.8,
            height: 1.6,
            ..Default::default()
        })?;
        let hub = frustum(&CylinderConfig::cylinder(0.3, 0.6))?;
        let skid = cuboid(&BoxConfig::new(6.0, 0.2, 0.2))?;
        let strut = cuboid(&BoxConfig::new(0.15, 1.0, 0.15))?;

        let gear = SceneNode::group(
            "landing_gear",
            [-1.2_f32, 1.2]
                .into_iter()
                .flat_map(|z| {
                    [
                        SceneNode::leaf("skid", skid.clone()).with_placement(translation(Vec3::new(0.0, -2.0, z))),
                        SceneNode::leaf("strut", strut.clone())
                            .with_placement(translation(Vec3::new(1.5, -1.5, z))),
                        SceneNode::leaf("strut", strut.clone())
                            .with_placement(translation(Vec3::new(-1.5, -1.5, z))),
                    ]
                })
                .collect(),
        );

        let mut body = SceneNode::group(
            "helicopter",
            vec![
                SceneNode::leaf("fuselage", fuselage),
                SceneNode::leaf("cockpit", cockpit).with_placement(translation(Vec3::new(2.2, 0.4, 0.0))),
                SceneNode::leaf("tail", tail)
                    .with_placement(translation(Vec3::new(-5.5, 0.3, 0.0)) * rotation(FRAC_PI_2, Vec3::Z)),
                SceneNode::leaf("fin", fin)
                    .with_placement(translation(Vec3::new(-7.5, 1.2, 0.0)) * scaling(Vec3::new(1.0, 1.0, 0.3))),
                SceneNode::leaf("hub", hub).with_placement(translation(Vec3::Y * 1.8)),
                gear,
            ],
        );
        body.set_material(Material::shiny([0.8, 0.1, 0.1], 32.0), true);
        if let Some(cockpit) = body.child_mut(1) {
            cockpit.set_material(Material::shiny([0.6, 0.8, 0.9], 96.0), false);
        }
        if let Some(gear) = body.child_mut(5) {
            gear.set_material(Material::color([0.2, 0.2, 0.2]), true);
        }

        let blade = SceneNode::leaf("blade", cuboid(&BoxConfig::new(BLADE_LENGTH, 0.08, 0.5))?)
            .with_material(Material::color([0.15, 0.15, 0.15]));
        let rope = SceneNode::leaf(
            "rope",
            frustum(&CylinderConfig::cylinder(rope_width, 1.0).with_slices(6))?,
        )
        .with_material(Material::color([0.5, 0.4, 0.3]));

        let bucket_radius = bucket_width / 2.0;
        let bucket_height = bucket_width;
        let wall = frustum(&CylinderConfig::frustum(bucket_radius, bucket_top_radius, bucket_height))?;
        let bucket = SceneNode::group(
            "bucket",
            vec![
                SceneNode::leaf("bucket_outer", wall.clone()),
                SceneNode::leaf("bucket_inner", wall.inverted()),
            ],
        )
        .with_material(Material::color([0.9, 0.5, 0.1]));
        let bucket_bottom = SceneNode::leaf(
            "bucket_bottom",
            circle(&CircleConfig {
                radius: bucket_radius,
                slices: 16,
                layers: 1,
            })?,
        )
        .with_material(Material::color([0.3, 0.3, 0.3]));

        Ok(Self {
            body,
            blade,
            rope,
            bucket,
            bucket_bottom,
            bucket_height,
            bucket_radius,
        })
    }

    pub fn display(&mut self, ctx: &mut DisplayContext<'_>, heli: &Helicopter) {
        ctx.push();
        ctx.multiply(translation(heli.position) * rotation(heli.yaw, Vec3::Y));

        self.body.display(ctx, false);
        for k in 0..ROTOR_BLADES {
            let angle = heli.rotor_angle + k as f32 * std::f32::consts::TAU / ROTOR_BLADES as f32;
            self.blade
                .translate(0.0, HUB_HEIGHT, 0.0)
                .rotate(angle, Vec3::Y)
                .translate(BLADE_LENGTH / 2.0, 0.0, 0.0);
            self.blade.display(ctx, false);
        }

        let bucket = &heli.bucket;
        if bucket.is_visible() {
            let drop = heli.rope_length * bucket.scale;
            let segment = drop / ROPE_SEGMENTS as f32;
            for i in 0..ROPE_SEGMENTS {
                self.rope
                    .translate(0.0, -(i as f32 + 0.5) * segment, 0.0)
                    .scale(1.0, segment, 1.0);
                self.rope.display(ctx, false);
            }

            ctx.push();
            ctx.multiply(translation(Vec3::new(0.0, -drop, 0.0)) * scaling(Vec3::splat(bucket.scale)));
            self.bucket.translate(0.0, -self.bucket_height / 2.0, 0.0);
            self.bucket.display(ctx, false);
            // Hinged at the +X rim; opening swings the free edge down.
            self.bucket_bottom
                .translate(self.bucket_radius, -self.bucket_height, 0.0)
                .rotate(bucket.hinge_angle, Vec3::Z)
                .translate(-self.bucket_radius, 0.0, 0.0)
                .rotate(FRAC_PI_2, Vec3::X);
            self.bucket_bottom.display(ctx, false);
            ctx.pop();
        }
        ctx.pop();
    }

    fn nodes_mut(&mut self) -> [&mut SceneNode; 5] {
        [
            &mut self.body,
            &mut self.blade,
            &mut self.rope,
            &mut self.bucket,
            &mut self.bucket_bottom,
        ]
    }
}

/// Shared trunk, crown and flame meshes stamped once per tree and fire.
pub struct ForestModel {
    trunk: SceneNode,
    crown: SceneNode,
    /// One flame cone per slice count in use.
    flames: BTreeMap<u32, SceneNode>,
}

impl ForestModel {
    pub fn new(forest: &Forest) -> Result<Self, MeshError> {
        let trunk = SceneNode::leaf("trunk", frustum(&CylinderConfig::cylinder(0.25, 1.0).with_slices(8))?)
            .with_material(Material::color([0.4, 0.25, 0.1]));
        let crown = SceneNode::leaf("crown", frustum(&CylinderConfig::cone(1.0, 1.0).with_slices(12))?)
            .with_material(Material::color([0.1, 0.45, 0.15]));

        let mut flames = BTreeMap::new();
        for fire in forest.all_fires() {
            if flames.contains_key(&fire.slices) {
                continue;
            }
            let mesh = frustum(&CylinderConfig::cone(1.0, 1.0).with_slices(fire.slices))?;
            flames.insert(
                fire.slices,
                SceneNode::leaf("flame", mesh).with_material(Material::emissive([1.0, 0.45, 0.05])),
            );
        }

        Ok(Self { trunk, crown, flames })
    }

    pub fn display(&mut self, ctx: &mut DisplayContext<'_>, forest: &Forest) {
        for tree in &forest.trees {
            let h = tree.trunk_height;
            self.trunk
                .translate_vec(tree.position)
                .rotate(tree.tilt_angle, tree.tilt_axis)
                .translate(0.0, h / 2.0, 0.0)
                .scale(1.0, h, 1.0);
            self.trunk.display(ctx, false);

            let (r, ch) = (tree.crown_radius, tree.crown_height());
            self.crown
                .translate_vec(tree.position)
                .rotate(tree.tilt_angle, tree.tilt_axis)
                .translate(0.0, h + ch / 2.0, 0.0)
                .scale(r, ch, r);
            self.crown.display(ctx, false);
        }
        for fire in forest.all_fires() {
            self.display_flame(ctx, fire);
        }
    }

    fn display_flame(&mut self, ctx: &mut DisplayContext<'_>, fire: &Fire) {
        if !fire.is_active() {
            return;
        }
        let Some(flame) = self.flames.get_mut(&fire.slices) else {
            log::warn!("no flame mesh with {} slices", fire.slices);
            return;
        };
        let r = fire.radius * fire.scale;
        let h = fire.height * fire.scale * (1.0 + fire.flicker);
        flame
            .translate_vec(fire.position)
            .translate(0.0, h / 2.0, 0.0)
            .scale(r, h, r);
        flame.display(ctx, false);
    }

    fn nodes_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> + '_ {
        [&mut self.trunk, &mut self.crown]
            .into_iter()
            .chain(self.flames.values_mut())
    }
}

/// Every model in the scene, displayed in a fixed order.
pub struct SceneModels {
    pub environment: EnvironmentModel,
    pub helicopter: HelicopterModel,
    pub forest: ForestModel,
}

impl SceneModels {
    pub fn new(config: &SimConfig, forest: &Forest) -> Result<Self, MeshError> {
        let heli = &config.helicopter;
        let models = Self {
            environment: EnvironmentModel::new(config, &forest.lake)?,
            helicopter: HelicopterModel::new(0.05, heli.bucket_width, heli.bucket_top_radius)?,
            forest: ForestModel::new(forest)?,
        };
        log::info!(
            "Scene built: {} environment triangles, {} flame meshes",
            models.environment.triangle_count(),
            models.forest.flames.len()
        );
        Ok(models)
    }

    pub fn display(&mut self, ctx: &mut DisplayContext<'_>, heli: &Helicopter, forest: &Forest) {
        self.environment.display(ctx);
        self.forest.display(ctx, forest);
        self.helicopter.display(ctx, heli);
    }

    /// Switch every model between wireframe and filled drawing.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        let apply = |node: &mut SceneNode| {
            if wireframe {
                node.set_line_mode();
            } else {
                node.set_fill_mode();
            }
        };
        self.environment.nodes_mut().into_iter().for_each(apply);
        self.helicopter.nodes_mut().into_iter().for_each(apply);
        self.forest.nodes_mut().for_each(apply);
    }
}
