//! Recording backend: keeps one record per draw call.

use crate::material::{Material, TextureConfig};
use crate::scene::{DrawCall, DrawMode, RenderBackend};
use crate::vertex::InstanceData;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub label: String,
    pub instance: InstanceData,
    pub mode: DrawMode,
    pub vertex_count: usize,
    pub index_count: usize,
    pub material: Option<Material>,
    pub texture: Option<TextureConfig>,
}

/// Draw calls collected during one or more display passes.
#[derive(Debug, Default)]
pub struct DrawList {
    records: Vec<DrawRecord>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.records.iter().map(|r| r.index_count / 3).sum()
    }

    /// Records whose node name matches `label`.
    pub fn labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a DrawRecord> + 'a {
        self.records.iter().filter(move |r| r.label == label)
    }
}

impl RenderBackend for DrawList {
    fn draw(&mut self, call: &DrawCall<'_>) {
        let tint = call.material.map_or([1.0; 4], Material::tint);
        self.records.push(DrawRecord {
            label: call.label.to_owned(),
            instance: InstanceData::new(call.model.to_cols_array_2d(), tint),
            mode: call.mode,
            vertex_count: call.mesh.vertex_count(),
            index_count: call.mesh.indices.len(),
            material: call.material.copied(),
            texture: call.texture.copied(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{sphere, SphereConfig};
    use crate::scene::{DisplayContext, SceneNode};

    #[test]
    fn records_counts_and_tint() {
        let mesh = sphere(&SphereConfig {
            radius: 1.0,
            slices: 4,
            stacks: 2,
        })
        .unwrap();
        let mut node = SceneNode::leaf("ball", mesh).with_material(Material::color([0.5, 0.25, 1.0]));
        let mut list = DrawList::new();
        node.display(&mut DisplayContext::new(&mut list), false);

        assert_eq!(list.len(), 1);
        let record = &list.records()[0];
        assert_eq!(record.vertex_count, 15);
        assert_eq!(record.index_count, 48);
        assert_eq!(record.instance.color, [0.5, 0.25, 1.0, 1.0]);
        assert_eq!(list.triangle_count(), 16);
        assert_eq!(list.labelled("ball").count(), 1);

        list.clear();
        assert!(list.is_empty());
    }
}
