//! Scene nodes: a mesh or a fixed list of children, an accumulated transform
//! and optional material/texture state.
//!
//! Builder calls (`translate`, `scale`, `rotate`) right-compose onto the
//! node's pending transform. [`SceneNode::display`] consumes that transform
//! unless asked to retain it, so one node can be stamped at several poses in
//! the same frame.

use crate::material::{Material, TextureConfig};
use crate::mesh::MeshData;
use engine_core::{MatrixStack, PendingTransform};
use glam::{Mat4, Vec3};

/// Filled triangles or wireframe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawMode {
    #[default]
    Fill,
    Line,
}

/// Everything a backend needs to draw one leaf.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub label: &'a str,
    pub mesh: &'a MeshData,
    pub model: Mat4,
    pub material: Option<&'a Material>,
    pub texture: Option<&'a TextureConfig>,
    pub mode: DrawMode,
}

/// Consumer of draw calls (GPU upload, recording, ...).
pub trait RenderBackend {
    fn draw(&mut self, call: &DrawCall<'_>);
}

/// Traversal state for one display pass: the backend plus the global
/// transform stack.
pub struct DisplayContext<'a> {
    backend: &'a mut dyn RenderBackend,
    matrices: MatrixStack,
    draws: usize,
}

impl<'a> DisplayContext<'a> {
    pub fn new(backend: &'a mut dyn RenderBackend) -> Self {
        Self::with_root(backend, Mat4::IDENTITY)
    }

    pub fn with_root(backend: &'a mut dyn RenderBackend, root: Mat4) -> Self {
        Self {
            backend,
            matrices: MatrixStack::with_root(root),
            draws: 0,
        }
    }

    pub fn push(&mut self) {
        self.matrices.push();
    }

    pub fn pop(&mut self) {
        self.matrices.pop();
    }

    /// Right-multiply onto the current global transform.
    pub fn multiply(&mut self, m: Mat4) {
        self.matrices.multiply(m);
    }

    pub fn current(&self) -> Mat4 {
        self.matrices.current()
    }

    pub fn depth(&self) -> usize {
        self.matrices.depth()
    }

    /// Draw calls issued so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    fn draw(&mut self, call: &DrawCall<'_>) {
        self.draws += 1;
        self.backend.draw(call);
    }
}

#[derive(Debug, Clone)]
enum NodeContent {
    Mesh(MeshData),
    Group(Vec<SceneNode>),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    content: NodeContent,
    /// Construction-time local matrix, applied before the pending transform
    /// and never consumed.
    placement: Mat4,
    transform: PendingTransform,
    material: Option<Material>,
    texture: Option<TextureConfig>,
    mode: DrawMode,
}

impl SceneNode {
    /// Leaf node owning a mesh.
    pub fn leaf(name: impl Into<String>, mesh: MeshData) -> Self {
        Self::with_content(name.into(), NodeContent::Mesh(mesh))
    }

    /// Composite node; the child list is fixed from here on.
    pub fn group(name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self::with_content(name.into(), NodeContent::Group(children))
    }

    fn with_content(name: String, content: NodeContent) -> Self {
        Self {
            name,
            content,
            placement: Mat4::IDENTITY,
            transform: PendingTransform::new(),
            material: None,
            texture: None,
            mode: DrawMode::Fill,
        }
    }

    pub fn with_placement(mut self, placement: Mat4) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_texture(mut self, texture: TextureConfig) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) -> &mut Self {
        self.transform.translate(Vec3::new(tx, ty, tz));
        self
    }

    pub fn translate_vec(&mut self, offset: Vec3) -> &mut Self {
        self.transform.translate(offset);
        self
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.transform.scale(Vec3::new(sx, sy, sz));
        self
    }

    /// Rotate about a unit-length axis.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        self.transform.rotate(angle, axis);
        self
    }

    /// Accumulated transform awaiting the next display, if any.
    pub fn transform(&self) -> Option<Mat4> {
        self.transform.get()
    }

    /// Draw this node under the context's current global transform.
    ///
    /// Without `retain`, the accumulated transforms of this node and its
    /// descendants are reset to absent afterwards.
    pub fn display(&mut self, ctx: &mut DisplayContext<'_>, retain: bool) {
        self.display_inherited(ctx, retain, None, None);
    }

    fn display_inherited(
        &mut self,
        ctx: &mut DisplayContext<'_>,
        retain: bool,
        material: Option<Material>,
        texture: Option<TextureConfig>,
    ) {
        ctx.push();
        if self.placement != Mat4::IDENTITY {
            ctx.multiply(self.placement);
        }
        let local = if retain {
            self.transform.get()
        } else {
            self.transform.take()
        };
        if let Some(m) = local {
            ctx.multiply(m);
        }

        let material = self.material.or(material);
        let texture = self.texture.or(texture);

        match &mut self.content {
            NodeContent::Mesh(mesh) => {
                let call = DrawCall {
                    label: &self.name,
                    mesh,
                    model: ctx.current(),
                    material: material.as_ref(),
                    texture: texture.as_ref(),
                    mode: self.mode,
                };
                ctx.draw(&call);
            }
            NodeContent::Group(children) => {
                for child in children.iter_mut() {
                    child.display_inherited(ctx, retain, material, texture);
                }
            }
        }
        ctx.pop();
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.mode
    }

    pub fn set_fill_mode(&mut self) {
        self.set_mode(DrawMode::Fill);
    }

    pub fn set_line_mode(&mut self) {
        self.set_mode(DrawMode::Line);
    }

    fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
        for child in self.children_mut() {
            child.set_mode(mode);
        }
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Material, recursive: bool) {
        self.material = Some(material);
        if recursive {
            for child in self.children_mut() {
                child.set_material(material, true);
            }
        }
    }

    pub fn texture(&self) -> Option<&TextureConfig> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: TextureConfig, recursive: bool) {
        self.texture = Some(texture);
        if recursive {
            for child in self.children_mut() {
                child.set_texture(texture, true);
            }
        }
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        match &self.content {
            NodeContent::Mesh(mesh) => Some(mesh),
            NodeContent::Group(_) => None,
        }
    }

    pub fn children(&self) -> &[SceneNode] {
        match &self.content {
            NodeContent::Mesh(_) => &[],
            NodeContent::Group(children) => children,
        }
    }

    fn children_mut(&mut self) -> &mut [SceneNode] {
        match &mut self.content {
            NodeContent::Mesh(_) => &mut [],
            NodeContent::Group(children) => children,
        }
    }

    /// Child by position, as given at construction.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut SceneNode> {
        self.children_mut().get_mut(index)
    }

    /// Leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.content {
            NodeContent::Mesh(_) => 1,
            NodeContent::Group(children) => children.iter().map(SceneNode::leaf_count).sum(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        match &self.content {
            NodeContent::Mesh(mesh) => mesh.triangle_count(),
            NodeContent::Group(children) => children.iter().map(SceneNode::triangle_count).sum(),
        }
    }
}
