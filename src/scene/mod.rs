//! Boundary with the rendering engine and the asset loader.
//!
//! The core never talks to a GPU or a model file directly. It submits
//! geometry through [`RenderEngine`] and toggles model sub-parts through
//! [`ModelParts`]. [`SceneStore`] and [`PartTable`] are in-memory
//! implementations for headless use and tests.

mod overlay;
mod parts;
mod store;

pub use overlay::PitchOverlay;
pub use parts::PartTable;
pub use store::{SceneObject, SceneStore};

use crate::error::Result;
use crate::interaction::ObjectTransform;
use crate::math::{Point3, UnitQuaternion};
use crate::tessellation::TriangleMesh;

slotmap::new_key_type! {
    /// Opaque handle to geometry owned by the rendering engine.
    pub struct MeshHandle;
}

/// RGBA color in linear `[0, 1]` components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from its components.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Unlit color material reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
}

impl Material {
    /// Creates a material with the given color.
    #[must_use]
    pub const fn color(color: Color) -> Self {
        Self { color }
    }
}

/// Built-in shapes the engine can instantiate without a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Cylinder along its local `+Y` axis, centered on its position.
    Cylinder { radius: f64, height: f64 },
    /// Sphere centered on its position.
    Sphere { radius: f64 },
}

/// Position and orientation of a primitive in the model's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point3,
    pub orientation: UnitQuaternion,
}

impl Placement {
    /// Placement at `position` with no rotation.
    #[must_use]
    pub fn at(position: Point3) -> Self {
        Self {
            position,
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// Rendering engine seam.
///
/// Everything submitted is parented under the loaded model, so it follows
/// the model's transform. The engine does not reclaim geometry on its own:
/// every handle must be passed to [`RenderEngine::destroy`] when replaced.
pub trait RenderEngine {
    /// Uploads an indexed triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot create the buffers.
    fn submit_mesh(&mut self, mesh: &TriangleMesh, material: Material) -> Result<MeshHandle>;

    /// Instantiates a built-in primitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot create the primitive.
    fn spawn_primitive(
        &mut self,
        primitive: Primitive,
        placement: Placement,
        material: Material,
    ) -> Result<MeshHandle>;

    /// Moves previously submitted geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unknown.
    fn set_position(&mut self, handle: MeshHandle, position: Point3) -> Result<()>;

    /// Releases previously submitted geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unknown.
    fn destroy(&mut self, handle: MeshHandle) -> Result<()>;

    /// Applies a transform to the loaded model.
    fn set_model_transform(&mut self, transform: &ObjectTransform);
}

/// Named sub-part visibility of a loaded model.
pub trait ModelParts {
    /// Shows or hides every sub-part called `name`, returning how many
    /// parts matched.
    fn set_part_visibility(&mut self, name: &str, visible: bool) -> usize;
}
