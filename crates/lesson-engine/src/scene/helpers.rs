use super::graph::Scene;
use super::lines::LineSegments;
use super::object::{Object3D, ObjectId};

/// Axes + grid overlay whose visibility is toggled as one unit.
///
/// The grid draws first and the axes on top of it. Both start hidden.
#[derive(Debug, Clone, Copy)]
pub struct AxisGridHelper {
    axes: ObjectId,
    grid: ObjectId,
    visible: bool,
}

impl AxisGridHelper {
    /// Adds the helper lines to `scene`, `units` cells across.
    pub fn attach(scene: &mut Scene, units: u32) -> Self {
        let mut axes = Object3D::from(LineSegments::axes(1.0)).with_name("axes-helper");
        axes.render_order = 2;
        axes.visible = false;

        let mut grid =
            Object3D::from(LineSegments::grid(units as f32, units)).with_name("grid-helper");
        grid.render_order = 1;
        grid.visible = false;

        Self {
            axes: scene.add(axes),
            grid: scene.add(grid),
            visible: false,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, scene: &mut Scene, visible: bool) {
        self.visible = visible;
        for id in [self.axes, self.grid] {
            if let Some(object) = scene.get_mut(id) {
                object.visible = visible;
            }
        }
    }

    pub fn axes(&self) -> ObjectId {
        self.axes
    }

    pub fn grid(&self) -> ObjectId {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_both_parts_together() {
        let mut scene = Scene::new();
        let mut helper = AxisGridHelper::attach(&mut scene, 10);
        assert!(scene.visible_lines().is_empty());

        helper.set_visible(&mut scene, true);
        let ids: Vec<_> = scene.visible_lines().iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![helper.grid(), helper.axes()]);

        helper.set_visible(&mut scene, false);
        assert!(!helper.visible());
        assert!(scene.visible_lines().is_empty());
    }
}
