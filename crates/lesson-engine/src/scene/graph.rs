use crate::paint::Color;

use super::object::{Object3D, ObjectId, ObjectKind};

/// Scene graph root.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    objects: Vec<Object3D>,
    cameras: Vec<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
            objects: Vec::new(),
            cameras: Vec::new(),
        }
    }

    /// Adds an object as a child of the root and returns its id.
    pub fn add(&mut self, object: impl Into<Object3D>) -> ObjectId {
        let object = object.into();
        let id = object.id();
        self.objects.push(object);
        id
    }

    /// Removes an object; `None` if it is not in this scene.
    pub fn remove(&mut self, id: ObjectId) -> Option<Object3D> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Attaches a camera to the root. Attaching twice is a no-op.
    pub fn attach_camera(&mut self, camera: ObjectId) {
        if !self.cameras.contains(&camera) {
            self.cameras.push(camera);
        }
    }

    pub fn has_camera(&self, camera: ObjectId) -> bool {
        self.cameras.contains(&camera)
    }

    pub fn objects(&self) -> &[Object3D] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Visible meshes in draw order (stable by `render_order`).
    pub fn visible_meshes(&self) -> Vec<&Object3D> {
        self.visible_sorted(|o| matches!(o.kind, ObjectKind::Mesh(_)))
    }

    /// Visible line sets in draw order (stable by `render_order`).
    pub fn visible_lines(&self) -> Vec<&Object3D> {
        self.visible_sorted(|o| matches!(o.kind, ObjectKind::Lines(_)))
    }

    fn visible_sorted(&self, keep: impl Fn(&Object3D) -> bool) -> Vec<&Object3D> {
        let mut out: Vec<&Object3D> = self
            .objects
            .iter()
            .filter(|o| o.visible && keep(o))
            .collect();
        out.sort_by_key(|o| o.render_order);
        out
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LineSegments, Mesh};

    #[test]
    fn add_get_remove() {
        let mut scene = Scene::new();
        let id = scene.add(Mesh::default());
        assert!(scene.get(id).is_some());
        assert_eq!(scene.len(), 1);

        assert!(scene.remove(id).is_some());
        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn hidden_objects_are_not_drawn() {
        let mut scene = Scene::new();
        let shown = scene.add(Mesh::default());
        let hidden = scene.add(Mesh::default());
        if let Some(o) = scene.get_mut(hidden) {
            o.visible = false;
        }

        let ids: Vec<_> = scene.visible_meshes().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![shown]);
    }

    #[test]
    fn lines_sort_by_render_order_then_insertion() {
        let mut scene = Scene::new();
        let mut late = Object3D::from(LineSegments::axes(1.0));
        late.render_order = 2;
        let late = scene.add(late);
        let a = scene.add(LineSegments::grid(1.0, 1));
        let b = scene.add(LineSegments::grid(2.0, 2));

        let ids: Vec<_> = scene.visible_lines().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![a, b, late]);
    }

    #[test]
    fn camera_attach_is_idempotent() {
        let mut scene = Scene::new();
        let cam = ObjectId::new();
        scene.attach_camera(cam);
        scene.attach_camera(cam);
        assert!(scene.has_camera(cam));
        assert_eq!(scene.cameras.len(), 1);
    }
}
