//! Material and texture state consumed by a rendering backend.

use serde::{Deserialize, Serialize};

/// Phong-style surface parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default = "default_ambient")]
    pub ambient: [f32; 3],
    #[serde(default = "default_diffuse")]
    pub diffuse: [f32; 3],
    #[serde(default)]
    pub specular: [f32; 3],
    #[serde(default)]
    pub emission: [f32; 3],
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

fn default_ambient() -> [f32; 3] {
    [0.2, 0.2, 0.2]
}
fn default_diffuse() -> [f32; 3] {
    [0.8, 0.8, 0.8]
}
fn default_shininess() -> f32 {
    1.0
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: default_ambient(),
            diffuse: default_diffuse(),
            specular: [0.0; 3],
            emission: [0.0; 3],
            shininess: default_shininess(),
        }
    }
}

impl Material {
    /// Matte material of the given color.
    pub fn color(rgb: [f32; 3]) -> Self {
        Self {
            ambient: rgb.map(|c| c * 0.25),
            diffuse: rgb,
            ..Default::default()
        }
    }

    /// Glossy material of the given color.
    pub fn shiny(rgb: [f32; 3], shininess: f32) -> Self {
        Self {
            specular: [0.9; 3],
            shininess,
            ..Self::color(rgb)
        }
    }

    /// Self-lit material (flames, sky).
    pub fn emissive(rgb: [f32; 3]) -> Self {
        Self {
            emission: rgb,
            ..Self::color(rgb)
        }
    }

    /// Diffuse color with opaque alpha, used as the instance tint.
    pub fn tint(&self) -> [f32; 4] {
        let [r, g, b] = self.diffuse;
        [r, g, b, 1.0]
    }
}

/// Opaque handle to a texture owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Texture addressing outside `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureConfig {
    pub texture: TextureId,
    #[serde(default)]
    pub wrap_s: WrapMode,
    #[serde(default)]
    pub wrap_t: WrapMode,
}

impl TextureConfig {
    /// Texture repeating on both axes.
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
        }
    }

    pub fn clamped(texture: TextureId) -> Self {
        Self {
            texture,
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
        }
    }
}
