use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;

use crate::animation::{AnimationDriver, FrameOutcome, FrameScope};
use crate::controls::{CameraControls, OrbitControls};
use crate::coords::{clamp_pixel_ratio, Sizing};
use crate::debug::{DebugPanel, PanelSlot};
use crate::host::{
    Environment, FrameScheduler, HostWindow, ListenerHandle, WindowEventKind, WindowListener,
    WindowListeners, WindowSignals,
};
use crate::input::{InputFrame, InputState};
use crate::render::Renderer;
use crate::scene::{BasicMaterial, BoxGeometry, Mesh, Object3D, ObjectId};
use crate::stage::Stage;
use crate::time::FrameTime;

use super::{LessonConfig, SetupError};

/// What `LessonSetup::set_up` needs from the host.
pub struct SetupCtx<'a, R: Renderer> {
    /// `None` until the host has a drawable surface.
    pub surface: Option<R::Surface>,
    pub host: &'a dyn HostWindow,
    pub signals: &'a mut WindowSignals,
}

impl<'a, R: Renderer> SetupCtx<'a, R> {
    pub fn new(
        surface: Option<R::Surface>,
        host: &'a dyn HostWindow,
        signals: &'a mut WindowSignals,
    ) -> Self {
        Self {
            surface,
            host,
            signals,
        }
    }
}

/// One lesson's renderer, scene, camera and the lifecycle around them.
///
/// The stage and sizing are shared with the resize listener, which runs from
/// the host's signal registry rather than through `&mut self`.
pub struct LessonSetup<R: Renderer> {
    config: LessonConfig,
    sizing: Rc<Cell<Sizing>>,
    stage: Rc<RefCell<Option<Stage<R>>>>,
    listeners: WindowListeners,
    controls: Option<OrbitControls>,
    panel: PanelSlot,
    driver: AnimationDriver,
    cube: Option<ObjectId>,
}

impl<R: Renderer> Default for LessonSetup<R> {
    fn default() -> Self {
        Self::new(LessonConfig::default())
    }
}

impl<R: Renderer> LessonSetup<R> {
    pub fn new(config: LessonConfig) -> Self {
        let sizing = config.fallback_sizing;
        Self {
            config,
            sizing: Rc::new(Cell::new(sizing)),
            stage: Rc::new(RefCell::new(None)),
            listeners: WindowListeners::new(),
            controls: None,
            panel: PanelSlot::new(),
            driver: AnimationDriver::new(),
            cube: None,
        }
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    /// Reads the host's current logical inner size.
    pub fn compute_sizing(host: &dyn HostWindow) -> Sizing {
        host.inner_sizing()
    }

    /// Sizing last computed at setup or by the resize listener.
    pub fn sizing(&self) -> Sizing {
        self.sizing.get()
    }

    pub fn is_set_up(&self) -> bool {
        self.stage.borrow().is_some()
    }

    /// Runs `f` against the stage, if setup has happened.
    pub fn with_stage<T>(&self, f: impl FnOnce(&mut Stage<R>) -> T) -> Option<T> {
        let mut slot = self.stage.borrow_mut();
        slot.as_mut().map(f)
    }

    /// Registers the resize listener, removing the one installed before.
    pub fn install_resize_listener(&mut self, signals: &mut WindowSignals) -> ListenerHandle {
        let handle = self
            .listeners
            .replace(signals, WindowEventKind::Resize, self.resize_listener());
        log::info!("resize listener installed");
        handle
    }

    /// Removes the resize listener; no-op if none is installed.
    pub fn remove_resize_listener(&mut self, signals: &mut WindowSignals) -> bool {
        let removed = self.listeners.remove(signals, WindowEventKind::Resize);
        if removed {
            log::info!("resize listener removed");
        } else {
            log::debug!("no resize listener to remove");
        }
        removed
    }

    fn resize_listener(&self) -> WindowListener {
        let sizing = Rc::clone(&self.sizing);
        let stage = Rc::clone(&self.stage);
        let max_pixel_ratio = self.config.max_pixel_ratio;

        Box::new(move |host: &dyn HostWindow| {
            let next = host.inner_sizing();
            sizing.set(next);

            let ratio = clamp_pixel_ratio(host.device_pixel_ratio(), max_pixel_ratio);
            match stage.try_borrow_mut() {
                Ok(mut slot) => {
                    if let Some(stage) = slot.as_mut() {
                        stage.apply_resize(next, ratio);
                    }
                }
                Err(_) => log::debug!(
                    "stage busy; resize to {}x{} not applied",
                    next.width,
                    next.height
                ),
            }
        })
    }

    /// Builds renderer, scene and camera.
    ///
    /// With `enable_resize`, the host size is read and the resize listener
    /// installed before the renderer exists, so it starts at the right size.
    /// Otherwise the last known sizing is used. Calling this again replaces
    /// the stage.
    pub fn set_up(&mut self, ctx: SetupCtx<'_, R>, enable_resize: bool) -> Result<()> {
        let SetupCtx {
            surface,
            host,
            signals,
        } = ctx;

        let Some(surface) = surface else {
            log::error!("lesson setup attempted before a drawing surface exists");
            return Err(SetupError::SurfaceUnavailable.into());
        };

        let had_listener = self.listeners.get(WindowEventKind::Resize).is_some();
        if enable_resize {
            let measured = Self::compute_sizing(host);
            if measured.is_empty() {
                log::debug!(
                    "host reports {}x{}; keeping {}x{}",
                    measured.width,
                    measured.height,
                    self.sizing().width,
                    self.sizing().height
                );
            } else {
                self.sizing.set(measured);
            }
            self.install_resize_listener(signals);
        }

        let sizing = self.sizing();
        let mut stage = match Stage::<R>::build(surface, sizing, &self.config) {
            Ok(stage) => stage,
            Err(e) => {
                if enable_resize && !had_listener {
                    self.remove_resize_listener(signals);
                }
                return Err(e.context("failed to create renderer"));
            }
        };

        let ratio = clamp_pixel_ratio(host.device_pixel_ratio(), self.config.max_pixel_ratio);
        stage.renderer.set_pixel_ratio(ratio);

        *self.stage.borrow_mut() = Some(stage);
        self.cube = None;
        log::info!(
            "lesson set up at {}x{} (aspect {:.4})",
            sizing.width,
            sizing.height,
            sizing.aspect()
        );
        Ok(())
    }

    /// Adds orbit controls with damping. Skipped before setup and when the
    /// environment is not interactive.
    pub fn set_up_orbit_controls(&mut self, env: Environment) -> bool {
        if !env.interactive {
            log::debug!("orbit controls skipped: environment is headless");
            return false;
        }
        if !self.is_set_up() {
            log::debug!("orbit controls skipped: lesson not set up");
            return false;
        }

        let mut controls = OrbitControls::new();
        controls.enable_damping = true;
        self.controls = Some(controls);
        log::info!("orbit controls enabled");
        true
    }

    pub fn controls(&self) -> Option<&OrbitControls> {
        self.controls.as_ref()
    }

    pub fn controls_mut(&mut self) -> Option<&mut OrbitControls> {
        self.controls.as_mut()
    }

    /// Adds a unit cube with a basic material. Returns `None` before setup.
    pub fn add_cube(&mut self) -> Option<ObjectId> {
        let id = self.with_stage(|stage| {
            let cube = Mesh::new(BoxGeometry::default(), BasicMaterial::default());
            stage.scene.add(Object3D::from(cube).with_name("cube"))
        })?;
        self.cube = Some(id);
        Some(id)
    }

    /// The cube added by `add_cube`, if any.
    pub fn cube(&self) -> Option<ObjectId> {
        self.cube
    }

    /// Creates the lesson's debug panel, disposing the previous one.
    pub fn add_gui(&mut self, env: Environment, name: &str) -> Option<&mut DebugPanel> {
        self.panel.create(env, name)
    }

    pub fn panel(&self) -> Option<&DebugPanel> {
        self.panel.get()
    }

    pub fn panel_mut(&mut self) -> Option<&mut DebugPanel> {
        self.panel.get_mut()
    }

    pub fn panels_live(&self) -> u64 {
        self.panel.live()
    }

    /// Arms the animation callback, replacing any previous one.
    pub fn set_animation(&mut self, callback: impl FnMut(&mut FrameScope<'_>) + 'static) {
        self.driver.arm(callback);
    }

    /// Disarms the animation; the next delivered frame does nothing.
    pub fn clear_animation(&mut self) {
        self.driver.disarm();
    }

    /// Starts the frame chain. Returns `false` when nothing was requested.
    pub fn start_animation(&mut self, scheduler: &dyn FrameScheduler) -> bool {
        self.driver.start(scheduler)
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_armed()
    }

    /// True while the animation chain is waiting on a frame.
    pub fn frame_pending(&self) -> bool {
        self.driver.is_pending()
    }

    /// Renders one frame without scheduling another.
    pub fn play(&mut self) -> Result<()> {
        let mut slot = self.stage.borrow_mut();
        let stage = slot.as_mut().ok_or(SetupError::NotSetUp)?;
        if let Some(controls) = self.controls.as_mut() {
            controls.update(&mut stage.camera);
        }
        stage.render()
    }

    /// Runs one delivered frame of the animation chain.
    pub fn on_frame(
        &mut self,
        time: FrameTime,
        input: &InputState,
        scheduler: &dyn FrameScheduler,
    ) -> Result<FrameOutcome> {
        let mut slot = self.stage.borrow_mut();
        let Some(stage) = slot.as_mut() else {
            self.driver.drop_delivery();
            return Ok(FrameOutcome::Idle);
        };
        let controls = self.controls.as_mut().map(|c| c as &mut dyn CameraControls);
        self.driver
            .frame(time, stage, controls, input, self.panel.get(), scheduler)
    }

    /// Feeds accumulated input into orbit controls and panel key bindings.
    ///
    /// Returns `true` if anything reacted, i.e. the view may have changed.
    pub fn handle_input(&mut self, frame: &InputFrame) -> bool {
        let mut changed = false;

        if let Some(controls) = self.controls.as_mut() {
            let (dx, dy) = frame.drag;
            if dx != 0.0 || dy != 0.0 {
                controls.rotate_by_pixels(dx, dy, self.sizing.get().height as f32);
                changed = true;
            }
            if frame.wheel != 0.0 {
                controls.zoom_by_wheel(frame.wheel);
                changed = true;
            }
        }

        if let Some(panel) = self.panel.get_mut() {
            for key in &frame.keys_pressed {
                if let Some((label, value)) = panel.handle_key(*key) {
                    log::info!("{label}: {value}");
                    changed = true;
                }
            }
        }

        changed
    }

    /// Removes every listener this lesson registered, disposes the panel
    /// and disarms the animation. Safe to call repeatedly.
    pub fn teardown(&mut self, signals: &mut WindowSignals) {
        let removed = self.listeners.remove_all(signals);
        let disposed = self.panel.dispose();
        let was_armed = self.driver.is_armed();
        self.driver.disarm();
        self.controls = None;

        if removed > 0 || disposed || was_armed {
            log::info!("lesson torn down ({removed} listeners removed)");
        } else {
            log::debug!("teardown: nothing to release");
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::input::Key;
    use crate::testing::{
        frame_time, CountingScheduler, FakeHost, RecordingRenderer, RecordingSurface, RendererCall,
    };

    type Setup = LessonSetup<RecordingRenderer>;

    fn set_up(setup: &mut Setup, host: &FakeHost, signals: &mut WindowSignals) -> Result<()> {
        let ctx = SetupCtx::new(Some(RecordingSurface::default()), host, signals);
        setup.set_up(ctx, true)
    }

    fn ready(host: &FakeHost, signals: &mut WindowSignals) -> Setup {
        let mut setup = Setup::default();
        set_up(&mut setup, host, signals).expect("recording renderer never fails");
        setup
    }

    #[test]
    fn aspect_matches_host_size_exactly() {
        for (w, h) in [(800, 600), (1, 1000), (1920, 1080), (333, 777)] {
            let host = FakeHost::new(w, h, 1.0);
            let mut signals = WindowSignals::new();
            let setup = ready(&host, &mut signals);

            assert_eq!(Setup::compute_sizing(&host), Sizing::new(w, h));
            assert_eq!(setup.with_stage(|s| s.camera.aspect), Some(w as f32 / h as f32));
        }
    }

    #[test]
    fn resize_scenario_keeps_ratio_and_clamps_pixel_ratio() {
        let host = FakeHost::new(800, 600, 3.0);
        let mut signals = WindowSignals::new();
        let setup = ready(&host, &mut signals);

        assert_eq!(setup.with_stage(|s| s.camera.aspect), Some(800.0 / 600.0));
        assert_eq!(setup.with_stage(|s| s.renderer.pixel_ratio()), Some(2.0));

        host.set_size(1024, 768);
        assert_eq!(signals.emit(WindowEventKind::Resize, &host), 1);

        assert_eq!(setup.sizing(), Sizing::new(1024, 768));
        setup.with_stage(|s| {
            assert_eq!(s.camera.aspect, 1024.0 / 768.0);
            assert_eq!(s.renderer.size(), Sizing::new(1024, 768));
            assert_eq!(s.renderer.pixel_ratio(), 2.0);
        });

        host.set_dpr(1.5);
        signals.emit(WindowEventKind::Resize, &host);
        assert_eq!(setup.with_stage(|s| s.renderer.pixel_ratio()), Some(1.5));
    }

    #[test]
    fn installing_twice_leaves_one_listener() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let mut setup = ready(&host, &mut signals);

        setup.install_resize_listener(&mut signals);
        setup.install_resize_listener(&mut signals);
        assert_eq!(signals.listener_count(WindowEventKind::Resize), 1);

        host.set_size(640, 480);
        signals.emit(WindowEventKind::Resize, &host);
        let calls = setup.with_stage(|s| s.renderer.calls()).unwrap_or_default();
        let resizes = calls.iter().filter(|c| matches!(c, RendererCall::SetSize(_))).count();
        assert_eq!(resizes, 1);
    }

    #[test]
    fn repeated_setup_does_not_accumulate_listeners() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let mut setup = ready(&host, &mut signals);

        set_up(&mut setup, &host, &mut signals).expect("second setup");
        assert_eq!(signals.listener_count(WindowEventKind::Resize), 1);
    }

    #[test]
    fn missing_surface_fails_without_side_effects() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let mut setup = Setup::default();

        let err = setup
            .set_up(SetupCtx::new(None, &host, &mut signals), true)
            .expect_err("no surface");

        assert_eq!(err.downcast_ref::<SetupError>(), Some(&SetupError::SurfaceUnavailable));
        assert_eq!(signals.listener_count(WindowEventKind::Resize), 0);
        assert!(!setup.is_set_up());
    }

    #[test]
    fn renderer_failure_rolls_back_listener() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let mut setup = Setup::default();

        let ctx = SetupCtx::new(Some(RecordingSurface::failing()), &host, &mut signals);
        assert!(setup.set_up(ctx, true).is_err());
        assert_eq!(signals.listener_count(WindowEventKind::Resize), 0);
        assert!(!setup.is_set_up());
    }

    #[test]
    fn setup_without_resize_uses_fallback_sizing() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let mut setup = Setup::default();

        let ctx = SetupCtx::new(Some(RecordingSurface::default()), &host, &mut signals);
        setup.set_up(ctx, false).expect("setup");

        assert_eq!(signals.listener_count(WindowEventKind::Resize), 0);
        assert_eq!(setup.with_stage(|s| s.renderer.size()), Some(Sizing::new(1000, 750)));
    }

    #[test]
    fn zero_size_resize_is_stored_but_not_applied() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let setup = ready(&host, &mut signals);

        host.set_size(0, 0);
        signals.emit(WindowEventKind::Resize, &host);

        assert_eq!(setup.sizing(), Sizing::new(0, 0));
        assert_eq!(setup.with_stage(|s| s.camera.aspect), Some(800.0 / 600.0));
        assert_eq!(setup.with_stage(|s| s.renderer.size()), Some(Sizing::new(800, 600)));
    }

    #[test]
    fn arm_disarm_start_requests_no_frame() {
        let scheduler = CountingScheduler::new();
        let mut setup = Setup::default();

        setup.set_animation(|_| {});
        setup.clear_animation();

        assert!(!setup.start_animation(&scheduler));
        assert_eq!(scheduler.count(), 0);
    }

    #[test]
    fn teardown_twice_behaves_like_once() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let mut setup = ready(&host, &mut signals);
        setup.add_gui(Environment::interactive(), "gui");
        setup.set_animation(|_| {});

        setup.teardown(&mut signals);
        setup.teardown(&mut signals);

        assert_eq!(signals.listener_count(WindowEventKind::Resize), 0);
        assert_eq!(setup.panels_live(), 0);
        assert!(!setup.is_animating());
    }

    #[test]
    fn teardown_before_setup_is_harmless() {
        let mut signals = WindowSignals::new();
        let mut setup = Setup::default();
        setup.teardown(&mut signals);
        assert!(!setup.is_set_up());
    }

    #[test]
    fn two_guis_leave_one_live() {
        let mut setup = Setup::default();
        setup.add_gui(Environment::interactive(), "first");
        setup.add_gui(Environment::interactive(), "second");
        assert_eq!(setup.panels_live(), 1);
    }

    #[test]
    fn play_before_setup_reports_not_set_up() {
        let mut setup = Setup::default();
        let err = setup.play().expect_err("no stage");
        assert_eq!(err.downcast_ref::<SetupError>(), Some(&SetupError::NotSetUp));
    }

    #[test]
    fn cube_is_added_to_scene() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let mut setup = ready(&host, &mut signals);

        let id = setup.add_cube().expect("set up");
        assert_eq!(setup.cube(), Some(id));
        assert_eq!(
            setup.with_stage(|s| s.scene.get(id).and_then(|o| o.as_mesh()).map(|m| m.geometry)),
            Some(Some(BoxGeometry::new(1.0, 1.0, 1.0)))
        );
    }

    #[test]
    fn orbit_controls_need_setup_and_interactivity() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();

        let mut fresh = Setup::default();
        assert!(!fresh.set_up_orbit_controls(Environment::interactive()));

        let mut setup = ready(&host, &mut signals);
        assert!(!setup.set_up_orbit_controls(Environment::headless()));
        assert!(setup.set_up_orbit_controls(Environment::interactive()));
        assert!(setup.controls().is_some_and(|c| c.enable_damping));
    }

    #[test]
    fn drag_input_orbits_camera_on_next_frame() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let scheduler = CountingScheduler::new();
        let mut setup = ready(&host, &mut signals);
        setup.set_up_orbit_controls(Environment::interactive());
        setup.set_animation(|_| {});
        setup.start_animation(&scheduler);

        let mut frame = InputFrame::default();
        frame.drag = (200.0, 0.0);
        assert!(setup.handle_input(&frame));

        let outcome = setup
            .on_frame(frame_time(1), &InputState::default(), &scheduler)
            .expect("render");
        assert_eq!(outcome, FrameOutcome::Rendered);

        let position = setup.with_stage(|s| s.camera.position).unwrap_or_default();
        assert!((position.length() - 3.0).abs() < 1e-4);
        assert!(position.x.abs() > 1e-3);
        assert_eq!(setup.with_stage(|s| s.camera.target), Some(Vec3::ZERO));
    }

    #[test]
    fn panel_keys_toggle_bound_controls() {
        let mut setup = Setup::default();
        if let Some(panel) = setup.add_gui(Environment::interactive(), "gui") {
            panel.add_bool("wireframe", false).bind_key(Key::W, "wireframe");
        }

        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::W);

        assert!(setup.handle_input(&frame));
        assert_eq!(setup.panel().and_then(|p| p.bool("wireframe")), Some(true));
    }

    #[test]
    fn panel_arrow_keys_nudge_numbers() {
        let mut setup = Setup::default();
        if let Some(panel) = setup.add_gui(Environment::interactive(), "gui") {
            panel
                .add_number("speed", 1.0, 0.0, 5.0, 0.5)
                .bind_nudge(Key::ArrowUp, "speed", 1);
        }

        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::ArrowUp);

        assert!(setup.handle_input(&frame));
        assert_eq!(setup.panel().and_then(|p| p.number("speed")), Some(1.5));
    }

    #[test]
    fn frame_before_setup_is_idle() {
        let scheduler = CountingScheduler::new();
        let mut setup = Setup::default();
        setup.set_animation(|_| {});
        setup.start_animation(&scheduler);

        let outcome = setup.on_frame(frame_time(1), &InputState::default(), &scheduler);
        assert_eq!(outcome.ok(), Some(FrameOutcome::Idle));
        assert!(!setup.frame_pending());
    }

    #[test]
    fn chain_starts_after_a_delivery_that_beat_setup() {
        let host = FakeHost::new(800, 600, 1.0);
        let mut signals = WindowSignals::new();
        let scheduler = CountingScheduler::new();
        let mut setup = Setup::default();
        setup.set_animation(|_| {});
        assert!(setup.start_animation(&scheduler));

        let early = setup.on_frame(frame_time(1), &InputState::default(), &scheduler);
        assert_eq!(early.ok(), Some(FrameOutcome::Idle));

        set_up(&mut setup, &host, &mut signals).expect("setup");
        assert!(setup.start_animation(&scheduler));
        assert_eq!(scheduler.count(), 2);

        let outcome = setup.on_frame(frame_time(2), &InputState::default(), &scheduler);
        assert_eq!(outcome.ok(), Some(FrameOutcome::Rendered));
        assert_eq!(scheduler.count(), 3);
    }
}
