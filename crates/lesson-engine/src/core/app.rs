use anyhow::Result;
use winit::event::WindowEvent;

use crate::host::{Environment, FrameScheduler};
use crate::lesson::{LessonConfig, LessonSetup, SetupCtx};
use crate::render::{Renderer, WgpuRenderer};

/// Control directive returned by lesson callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Everything a lesson gets when its surface becomes available.
pub struct LessonCtx<'a, R: Renderer> {
    pub setup: SetupCtx<'a, R>,
    pub scheduler: &'a dyn FrameScheduler,
    pub env: Environment,
}

/// Contract implemented by runnable lessons.
///
/// A lesson builds its scene in `set_up` (usually arming and starting an
/// animation there) and reacts to raw window events if it wants to. The
/// runtime owns the `LessonSetup` and tears it down on close.
pub trait Lesson<R: Renderer = WgpuRenderer> {
    /// Shown in the window title.
    fn name(&self) -> &str;

    fn config(&self) -> LessonConfig {
        LessonConfig::default()
    }

    fn set_up(&mut self, setup: &mut LessonSetup<R>, ctx: LessonCtx<'_, R>) -> Result<()>;

    /// Called for window events, after input has been recorded.
    fn on_window_event(&mut self, setup: &mut LessonSetup<R>, event: &WindowEvent) -> AppControl {
        let _ = (setup, event);
        AppControl::Continue
    }

    /// Called once before the runtime tears the lesson down.
    fn tear_down(&mut self, setup: &mut LessonSetup<R>) {
        let _ = setup;
    }
}
