//! The application shell: window, event loop and the per-frame pipeline.
//!
//! One [`SceneApp`] instance owns every demo. The per-frame ordering is
//! fixed: animation first, then camera, then draw, so each presented frame is
//! internally consistent.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use cgmath::Vector3;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::config::SceneConfig;
use crate::error::ConfigError;
use crate::frame::{Clock, DoubleClickTracker, FrameScheduler};
use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use crate::gfx::RenderSurface;
use crate::host::{toggle_fullscreen, Viewport, WinitHost};
use crate::scene::{Animator, ContentLoader, Scene};
use crate::ui::{draw_debug_panel, BindingTable, UiManager};

pub struct SceneApp {
    event_loop: Option<EventLoop<()>>,
    state: AppState,
}

struct AppState {
    title: String,
    window: Option<Arc<Window>>,
    surface: Option<RenderSurface>,
    ui: Option<UiManager>,
    host: Option<WinitHost>,
    scene: Scene,
    bindings: BindingTable,
    camera: CameraManager,
    animator: Animator,
    clock: Clock,
    scheduler: FrameScheduler,
    double_click: DoubleClickTracker,
    content: Option<ContentLoader>,
}

impl SceneApp {
    /// Builds the app from a configuration. Binding validation happens here,
    /// before any window exists.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        let state = AppState::from_config(config)?;
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        Ok(Self {
            event_loop: Some(event_loop),
            state,
        })
    }

    /// Runs the event loop until the window closes (consumes self).
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self.state)
            .context("event loop failed")?;
        Ok(())
    }
}

impl AppState {
    /// Window-free part of app construction, where configuration errors are
    /// caught.
    fn from_config(config: SceneConfig) -> Result<Self, ConfigError> {
        let scene = config.build_scene();
        let bindings = BindingTable::new(config.bindings)?;

        let mut camera = OrbitCamera::new(
            config.camera.distance,
            config.camera.pitch,
            config.camera.yaw,
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        );
        camera.lock_distance(config.camera.distance);
        let controller = CameraController::new(config.camera.rotate_multiplier);

        Ok(Self {
            title: config.title,
            window: None,
            surface: None,
            ui: None,
            host: None,
            scene,
            bindings,
            camera: CameraManager::new(camera, controller),
            animator: Animator::new(),
            clock: Clock::new(),
            scheduler: FrameScheduler::new(),
            double_click: DoubleClickTracker::new(),
            content: config.content,
        })
    }

    /// Resolves the deferred content loader and attaches its nodes. A failed
    /// load leaves the scene as constructed.
    fn load_content(&mut self) {
        let Some(loader) = self.content.take() else {
            return;
        };
        let label = loader.label().to_string();

        match loader.run_blocking() {
            Ok(content) => {
                log::info!(
                    "loaded content `{}`: {} animated, {} root nodes",
                    label,
                    content.animated.len(),
                    content.root.len()
                );
                let mut animated = content.animated;
                if let Some(group) = self.scene.animated_group_mut() {
                    for node in animated.drain(..) {
                        group.add(node);
                    }
                }
                // No animated group in the tree: fall through to the root.
                for node in animated {
                    self.scene.root.add(node);
                }
                for node in content.root {
                    self.scene.root.add(node);
                }
            }
            Err(err) => {
                log::error!("failed to load content `{}`: {err:#}", label);
            }
        }
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        self.camera
            .camera
            .resize_projection(viewport.width, viewport.height);

        let scale_factor = self
            .window
            .as_ref()
            .map_or(1.0, |window| window.scale_factor());
        let (render_width, render_height) = viewport.render_size(scale_factor);

        if let Some(surface) = self.surface.as_mut() {
            surface.resize(render_width, render_height);
        }
        if let Some(ui) = self.ui.as_mut() {
            ui.update_display_size(render_width, render_height);
        }
    }

    fn handle_redraw(&mut self) {
        if !self.scheduler.begin_frame() {
            return;
        }

        let elapsed = self.clock.elapsed_seconds();
        if let Some(group) = self.scene.animated_group_mut() {
            self.animator.advance(group, elapsed);
        }

        self.camera.update();
        self.camera.camera.update_view_proj();

        let (Some(window), Some(surface), Some(ui)) = (
            self.window.as_ref(),
            self.surface.as_mut(),
            self.ui.as_mut(),
        ) else {
            return;
        };

        // Panel edits land before the draw so they show up the same frame.
        let scene = &mut self.scene;
        let bindings = &self.bindings;
        ui.update_logic(window, |frame_ui| {
            draw_debug_panel(frame_ui, scene, bindings);
        });

        surface.render_frame(
            scene,
            self.camera.camera.uniform,
            |device, queue, encoder, color_attachment| {
                ui.render_display_only(device, queue, encoder, color_attachment);
            },
        );
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1200, 800));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());
        self.host = Some(WinitHost::new(window.clone()));

        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height);
        let (width, height) = viewport.render_size(window.scale_factor());
        self.camera
            .camera
            .resize_projection(viewport.width, viewport.height);

        let window_clone = window.clone();
        let surface =
            pollster::block_on(async move { RenderSurface::new(window_clone, width, height).await });

        let mut ui = UiManager::new(surface.device(), surface.queue(), surface.surface_format(), &window);
        ui.update_display_size(width, height);

        self.surface = Some(surface);
        self.ui = Some(ui);

        self.load_content();
        self.scheduler.start();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };

        // UI gets first refusal on input events.
        if let Some(ui) = self.ui.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    self.scheduler.stop();
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.double_click.register(Instant::now()) {
                    if let Some(host) = self.host.as_mut() {
                        toggle_fullscreen(host);
                    }
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.handle_resize(width, height);
            }
            WindowEvent::CloseRequested => {
                self.scheduler.stop();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.handle_redraw();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // The camera never sees input the panel owns.
        if self.ui.as_ref().is_some_and(|ui| ui.wants_input()) {
            return;
        }

        self.camera.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            if self.scheduler.is_running() {
                window.request_redraw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraConfig, SceneConfig};
    use crate::ui::{ParamBinding, SliderRange};

    fn minimal_config(bindings: Vec<ParamBinding>) -> SceneConfig {
        SceneConfig {
            title: "test".to_string(),
            background: [0.0; 3],
            camera: CameraConfig::default(),
            meshes: Vec::new(),
            lights: Vec::new(),
            bindings,
            content: None,
        }
    }

    #[test]
    fn test_invalid_bindings_rejected_at_construction() {
        let config = minimal_config(vec![ParamBinding::slider(
            "bad",
            "Bad",
            SliderRange::new(1.0, -1.0, 0.1),
            |_| None,
            |_, _| {},
        )]);
        assert!(matches!(
            AppState::from_config(config),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_camera_distance_is_locked() {
        let state = AppState::from_config(minimal_config(Vec::new())).unwrap();
        let mut camera = state.camera.camera;
        camera.add_distance(-2.0);
        assert_eq!(camera.distance, 5.0);

        camera.add_distance(3.0);
        assert_eq!(camera.distance, 5.0);
    }

    #[test]
    fn test_scheduler_starts_stopped() {
        let mut state = AppState::from_config(minimal_config(Vec::new())).unwrap();
        assert!(!state.scheduler.is_running());
        // A redraw before resume must not advance the animation.
        state.handle_redraw();
        assert_eq!(state.animator.frames(), 0);
    }

    #[test]
    fn test_content_failure_leaves_scene_unchanged() {
        let mut config = minimal_config(Vec::new());
        config.content = Some(ContentLoader::from_fn("broken", || {
            anyhow::bail!("asset missing")
        }));
        let mut state = AppState::from_config(config).unwrap();
        let before = state.scene.mesh_count();
        state.load_content();
        assert_eq!(state.scene.mesh_count(), before);
        assert!(state.content.is_none());
    }
}
