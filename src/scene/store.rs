use slotmap::SlotMap;

use crate::error::{Result, SceneError};
use crate::interaction::ObjectTransform;
use crate::math::Point3;
use crate::tessellation::TriangleMesh;

use super::{Material, MeshHandle, Placement, Primitive, RenderEngine};

/// Geometry held by a [`SceneStore`].
#[derive(Debug, Clone)]
pub enum SceneObject {
    /// A submitted triangle mesh.
    Mesh {
        mesh: TriangleMesh,
        material: Material,
    },
    /// A built-in primitive.
    Primitive {
        primitive: Primitive,
        placement: Placement,
        material: Material,
    },
}

/// In-memory rendering engine.
///
/// Owns submitted geometry in an arena keyed by [`MeshHandle`] so that
/// leaked or double-freed handles are observable.
#[derive(Debug, Default)]
pub struct SceneStore {
    objects: SlotMap<MeshHandle, SceneObject>,
    model_transform: Option<ObjectTransform>,
    reject_meshes: bool,
}

impl SceneStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that refuses every [`RenderEngine::submit_mesh`]
    /// call, like an engine that failed to allocate its buffers.
    #[must_use]
    pub fn rejecting_meshes() -> Self {
        Self {
            reject_meshes: true,
            ..Self::default()
        }
    }

    /// Returns the number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no geometry is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the object behind a handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unknown or was destroyed.
    pub fn object(&self, handle: MeshHandle) -> Result<&SceneObject> {
        self.objects
            .get(handle)
            .ok_or_else(|| SceneError::HandleNotFound("mesh").into())
    }

    /// Returns the number of live triangle meshes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.objects
            .values()
            .filter(|o| matches!(o, SceneObject::Mesh { .. }))
            .count()
    }

    /// Returns the number of live primitives of the cylinder kind.
    #[must_use]
    pub fn cylinder_count(&self) -> usize {
        self.objects
            .values()
            .filter(|o| {
                matches!(
                    o,
                    SceneObject::Primitive {
                        primitive: Primitive::Cylinder { .. },
                        ..
                    }
                )
            })
            .count()
    }

    /// Returns the number of live primitives of the sphere kind.
    #[must_use]
    pub fn sphere_count(&self) -> usize {
        self.objects
            .values()
            .filter(|o| {
                matches!(
                    o,
                    SceneObject::Primitive {
                        primitive: Primitive::Sphere { .. },
                        ..
                    }
                )
            })
            .count()
    }

    /// Returns the last transform applied to the model, if any.
    #[must_use]
    pub fn model_transform(&self) -> Option<&ObjectTransform> {
        self.model_transform.as_ref()
    }
}

impl RenderEngine for SceneStore {
    fn submit_mesh(&mut self, mesh: &TriangleMesh, material: Material) -> Result<MeshHandle> {
        if self.reject_meshes {
            return Err(SceneError::Rejected("mesh buffers unavailable".into()).into());
        }
        Ok(self.objects.insert(SceneObject::Mesh {
            mesh: mesh.clone(),
            material,
        }))
    }

    fn spawn_primitive(
        &mut self,
        primitive: Primitive,
        placement: Placement,
        material: Material,
    ) -> Result<MeshHandle> {
        Ok(self.objects.insert(SceneObject::Primitive {
            primitive,
            placement,
            material,
        }))
    }

    fn set_position(&mut self, handle: MeshHandle, position: Point3) -> Result<()> {
        match self.objects.get_mut(handle) {
            Some(SceneObject::Primitive { placement, .. }) => {
                placement.position = position;
                Ok(())
            }
            Some(SceneObject::Mesh { .. }) => Err(SceneError::Rejected(
                "meshes are placed by their vertices".into(),
            )
            .into()),
            None => Err(SceneError::HandleNotFound("mesh").into()),
        }
    }

    fn destroy(&mut self, handle: MeshHandle) -> Result<()> {
        self.objects
            .remove(handle)
            .map(|_| ())
            .ok_or_else(|| SceneError::HandleNotFound("mesh").into())
    }

    fn set_model_transform(&mut self, transform: &ObjectTransform) {
        self.model_transform = Some(*transform);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scene::Color;

    fn red() -> Material {
        Material::color(Color::RED)
    }

    #[test]
    fn submit_and_destroy() {
        let mut store = SceneStore::new();
        let h = store.submit_mesh(&TriangleMesh::default(), red()).unwrap();
        assert_eq!(store.mesh_count(), 1);
        store.destroy(h).unwrap();
        assert!(store.is_empty());
        assert!(store.destroy(h).is_err());
        assert!(store.object(h).is_err());
    }

    #[test]
    fn rejecting_store_refuses_meshes_only() {
        let mut store = SceneStore::rejecting_meshes();
        assert!(store.submit_mesh(&TriangleMesh::default(), red()).is_err());
        let h = store
            .spawn_primitive(
                Primitive::Sphere { radius: 0.1 },
                Placement::at(Point3::origin()),
                red(),
            )
            .unwrap();
        assert_eq!(store.sphere_count(), 1);
        assert!(store.object(h).is_ok());
    }

    #[test]
    fn primitive_moves() {
        let mut store = SceneStore::new();
        let h = store
            .spawn_primitive(
                Primitive::Sphere { radius: 0.1 },
                Placement::at(Point3::origin()),
                red(),
            )
            .unwrap();
        store.set_position(h, Point3::new(1.0, 2.0, 3.0)).unwrap();
        let SceneObject::Primitive { placement, .. } = store.object(h).unwrap() else {
            panic!("expected primitive");
        };
        assert_eq!(placement.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn mesh_cannot_be_moved() {
        let mut store = SceneStore::new();
        let h = store.submit_mesh(&TriangleMesh::default(), red()).unwrap();
        assert!(store.set_position(h, Point3::origin()).is_err());
    }
}
