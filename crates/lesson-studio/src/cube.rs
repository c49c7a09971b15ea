//! Spinning cube with orbit controls and a debug panel.

use anyhow::{Context, Result};
use glam::{EulerRot, Quat};
use lesson_engine::core::{Lesson, LessonCtx};
use lesson_engine::input::Key;
use lesson_engine::lesson::LessonSetup;
use lesson_engine::paint::Color;
use lesson_engine::render::Renderer;
use lesson_engine::scene::AxisGridHelper;

const WIREFRAME: &str = "wireframe";
const HELPERS: &str = "axes + grid";
const SPEED: &str = "speed";

#[derive(Debug, Default)]
pub struct CubeLesson;

impl<R: Renderer> Lesson<R> for CubeLesson {
    fn name(&self) -> &str {
        "cube"
    }

    fn set_up(&mut self, setup: &mut LessonSetup<R>, ctx: LessonCtx<'_, R>) -> Result<()> {
        let LessonCtx {
            setup: setup_ctx,
            scheduler,
            env,
        } = ctx;

        setup.set_up(setup_ctx, true)?;
        let cube = setup.add_cube().context("cube needs a scene")?;
        let mut helper = setup
            .with_stage(|stage| {
                if let Some(mesh) = stage.scene.get_mut(cube).and_then(|o| o.as_mesh_mut()) {
                    mesh.material.color = Color::from_hex(0x44aa88);
                }
                AxisGridHelper::attach(&mut stage.scene, 10)
            })
            .context("helpers need a scene")?;

        setup.set_up_orbit_controls(env);
        if let Some(panel) = setup.add_gui(env, "cube") {
            panel
                .add_bool(WIREFRAME, false)
                .add_bool(HELPERS, false)
                .add_number(SPEED, 1.0, 0.0, 5.0, 0.1)
                .bind_key(Key::W, WIREFRAME)
                .bind_key(Key::H, HELPERS)
                .bind_nudge(Key::ArrowUp, SPEED, 1)
                .bind_nudge(Key::ArrowDown, SPEED, -1);
        }

        let mut angle = 0.0_f32;
        setup.set_animation(move |scope| {
            let panel = scope.panel;
            let speed = panel.and_then(|p| p.number(SPEED)).unwrap_or(1.0);
            let wireframe = panel.and_then(|p| p.bool(WIREFRAME)).unwrap_or(false);
            let show_helpers = panel.and_then(|p| p.bool(HELPERS)).unwrap_or(false);

            if helper.visible() != show_helpers {
                helper.set_visible(scope.scene, show_helpers);
            }

            angle += scope.time.dt * speed;
            if let Some(object) = scope.scene.get_mut(cube) {
                object.transform.rotation = Quat::from_euler(EulerRot::XYZ, angle, angle, 0.0);
                if let Some(mesh) = object.as_mesh_mut() {
                    mesh.material.wireframe = wireframe;
                }
            }
        });
        setup.start_animation(scheduler);
        Ok(())
    }
}
