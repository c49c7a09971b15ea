use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::animation::FrameOutcome;
use crate::core::{AppControl, Lesson, LessonCtx};
use crate::device::GpuInit;
use crate::host::{Environment, WindowEventKind, WindowSignals};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::lesson::{LessonSetup, SetupCtx, SetupError};
use crate::render::{WgpuRenderer, WgpuSurface};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lesson".to_string(),
            initial_size: LogicalSize::new(1000.0, 750.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window, sets `lesson` up in it and runs until it closes.
    pub fn run<L>(config: RuntimeConfig, gpu_init: GpuInit, lesson: L) -> Result<()>
    where
        L: Lesson<WgpuRenderer> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, lesson);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct AppState<L>
where
    L: Lesson<WgpuRenderer> + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    env: Environment,

    lesson: L,
    setup: LessonSetup<WgpuRenderer>,
    signals: WindowSignals,

    window: Option<Arc<Window>>,
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    torn_down: bool,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<L> AppState<L>
where
    L: Lesson<WgpuRenderer> + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, lesson: L) -> Self {
        let setup = LessonSetup::new(lesson.config());
        Self {
            config,
            gpu_init,
            env: Environment::interactive(),
            lesson,
            setup,
            signals: WindowSignals::new(),
            window: None,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            torn_down: false,
            exit_requested: false,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.failure.get_or_insert(error);
        self.shut_down(event_loop);
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        self.tear_down();
        self.exit_requested = true;
        event_loop.exit();
    }

    fn tear_down(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.lesson.tear_down(&mut self.setup);
        self.setup.teardown(&mut self.signals);
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let title = format!("{} - {}", self.config.title, self.lesson.name());
        let attrs = Window::default_attributes()
            .with_title(title)
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        Ok(Arc::new(window))
    }

    fn set_up_lesson(&mut self, window: &Arc<Window>) -> Result<()> {
        let surface = WgpuSurface::new(Arc::clone(window)).with_init(self.gpu_init.clone());
        let ctx = LessonCtx {
            setup: SetupCtx::new(Some(surface), &**window, &mut self.signals),
            scheduler: &**window,
            env: self.env,
        };
        self.lesson.set_up(&mut self.setup, ctx)
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window: &Window) {
        self.setup.handle_input(&self.input_frame);
        self.input_frame.clear();

        if self.setup.frame_pending() {
            let time = self.clock.tick();
            match self.setup.on_frame(time, &self.input_state, window) {
                Ok(FrameOutcome::Rendered | FrameOutcome::Idle) => {}
                Err(e) => self.fail(event_loop, e.context("animation frame failed")),
            }
            return;
        }

        if let Err(e) = self.setup.play() {
            if matches!(e.downcast_ref::<SetupError>(), Some(SetupError::NotSetUp)) {
                log::debug!("redraw before setup; nothing to draw");
            } else {
                self.fail(event_loop, e.context("still frame failed"));
            }
        }
    }
}

impl<L> ApplicationHandler for AppState<L>
where
    L: Lesson<WgpuRenderer> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(w) => w,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };
        self.window = Some(Arc::clone(&window));

        if let Err(e) = self.set_up_lesson(&window) {
            self.fail(event_loop, e.context("lesson setup failed"));
            return;
        }
        self.clock.reset();

        // First frame is the OS's initial redraw unless an animation already asked.
        if !self.setup.frame_pending() {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Frames are requested by the animation chain, never by the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&window, &event) {
            self.input_state.apply_event(&mut self.input_frame, &ev);
        }

        if self.lesson.on_window_event(&mut self.setup, &event) == AppControl::Exit {
            self.shut_down(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.signals.emit(WindowEventKind::Resize, &*window);
                if !self.setup.frame_pending() {
                    window.request_redraw();
                }
            }

            WindowEvent::Focused(focused) => {
                let kind = if *focused {
                    WindowEventKind::Focus
                } else {
                    WindowEventKind::Blur
                };
                self.signals.emit(kind, &*window);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, &window),

            _ => {
                // Still lessons redraw only when input actually moved something.
                if !self.input_frame.is_empty() && !self.setup.frame_pending() {
                    window.request_redraw();
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.tear_down();
    }
}
