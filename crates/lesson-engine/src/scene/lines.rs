use glam::Vec3;

use crate::paint::Color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineVertex {
    pub position: Vec3,
    pub color: Color,
}

impl LineVertex {
    pub const fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// Independent line segments: vertices `2n` and `2n + 1` form segment `n`.
///
/// Line sets are overlays: they draw after meshes and ignore depth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSegments {
    pub vertices: Vec<LineVertex>,
}

impl LineSegments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, a: Vec3, b: Vec3, color: Color) {
        self.vertices.push(LineVertex::new(a, color));
        self.vertices.push(LineVertex::new(b, color));
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// X (red), Y (green) and Z (blue) axes of length `size` from the origin.
    pub fn axes(size: f32) -> Self {
        let mut lines = Self::new();
        lines.push_segment(Vec3::ZERO, Vec3::X * size, Color::rgb(1.0, 0.0, 0.0));
        lines.push_segment(Vec3::ZERO, Vec3::Y * size, Color::rgb(0.0, 1.0, 0.0));
        lines.push_segment(Vec3::ZERO, Vec3::Z * size, Color::rgb(0.0, 0.0, 1.0));
        lines
    }

    /// Square grid on the XZ plane, `size` across, with `divisions` cells per side.
    ///
    /// The two center lines are drawn brighter than the rest.
    pub fn grid(size: f32, divisions: u32) -> Self {
        let divisions = divisions.max(1);
        let half = size / 2.0;
        let step = size / divisions as f32;
        let center_color = Color::from_hex(0x444444);
        let line_color = Color::from_hex(0x888888);

        let mut lines = Self::new();
        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            let color = if 2 * i == divisions { center_color } else { line_color };
            lines.push_segment(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k), color);
            lines.push_segment(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half), color);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_has_one_segment_per_axis() {
        let axes = LineSegments::axes(2.0);
        assert_eq!(axes.segment_count(), 3);
        assert_eq!(axes.vertices[1].position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn grid_spans_size_with_divisions_plus_one_lines_per_direction() {
        let grid = LineSegments::grid(10.0, 10);
        assert_eq!(grid.segment_count(), 22);
        assert_eq!(grid.vertices[0].position, Vec3::new(-5.0, 0.0, -5.0));
        assert_eq!(grid.vertices.last().map(|v| v.position), Some(Vec3::new(5.0, 0.0, 5.0)));
    }
}
