//! A falling, spinning box integrated in physics-side math and drawn through
//! the render-side scene, synced each frame through the math bridge.

use anyhow::{Context, Result};
use glam::Vec3;
use lesson_engine::core::{Lesson, LessonCtx};
use lesson_engine::lesson::LessonSetup;
use lesson_engine::math::{
    to_physics_quaternion, to_physics_vector, to_render_quaternion, to_render_vector,
    PhysicsVector,
};
use lesson_engine::paint::Color;
use lesson_engine::render::Renderer;
use lesson_engine::scene::{AxisGridHelper, Transform};
use nalgebra::UnitQuaternion;

const GRAVITY: f32 = -9.82;
const FLOOR_Y: f32 = -1.0;
const RESTITUTION: f32 = 0.6;

/// A single rigid box under gravity, bouncing on a floor plane.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: PhysicsVector,
    pub velocity: PhysicsVector,
    pub orientation: UnitQuaternion<f32>,
    /// Radians per second around each axis.
    pub spin: PhysicsVector,
    pub half_height: f32,
}

impl Body {
    /// Builds a body from a render-side transform.
    pub fn from_transform(transform: &Transform, half_height: f32) -> Self {
        Self {
            position: to_physics_vector(transform.position),
            velocity: PhysicsVector::zeros(),
            orientation: UnitQuaternion::from_quaternion(to_physics_quaternion(transform.rotation)),
            spin: PhysicsVector::new(0.0, 1.5, 0.5),
            half_height,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.velocity.y += GRAVITY * dt;
        self.position += self.velocity * dt;

        let floor = FLOOR_Y + self.half_height;
        if self.position.y < floor {
            self.position.y = floor;
            self.velocity.y = -self.velocity.y * RESTITUTION;
        }

        self.orientation = UnitQuaternion::from_scaled_axis(self.spin * dt) * self.orientation;
    }

    /// Copies the body's pose onto a render-side transform.
    pub fn sync(&self, transform: &mut Transform) {
        transform.position = to_render_vector(&self.position);
        transform.rotation = to_render_quaternion(self.orientation.quaternion());
    }
}

#[derive(Debug, Default)]
pub struct PhysicsLesson;

impl<R: Renderer> Lesson<R> for PhysicsLesson {
    fn name(&self) -> &str {
        "physics"
    }

    fn set_up(&mut self, setup: &mut LessonSetup<R>, ctx: LessonCtx<'_, R>) -> Result<()> {
        let LessonCtx {
            setup: setup_ctx,
            scheduler,
            env,
        } = ctx;

        setup.set_up(setup_ctx, true)?;
        let cube = setup.add_cube().context("box needs a scene")?;

        let start = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let mut body = Body::from_transform(&start, 0.5);

        setup
            .with_stage(|stage| {
                let mut helper = AxisGridHelper::attach(&mut stage.scene, 10);
                helper.set_visible(&mut stage.scene, true);
                if let Some(object) = stage.scene.get_mut(cube) {
                    object.transform = start;
                    if let Some(mesh) = object.as_mesh_mut() {
                        mesh.material.color = Color::from_hex(0xdd6633);
                    }
                }
            })
            .context("helpers need a scene")?;

        setup.set_up_orbit_controls(env);

        setup.set_animation(move |scope| {
            body.step(scope.time.dt);
            if let Some(object) = scope.scene.get_mut(cube) {
                body.sync(&mut object.transform);
            }
        });
        setup.start_animation(scheduler);
        Ok(())
    }
}
