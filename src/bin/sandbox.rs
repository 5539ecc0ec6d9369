//! Pyramid Builder - Voxel Sandbox
//!
//! Windowed front end for the sandbox engine. Drawing is left to an external
//! renderer; this binary drives input, the frame loop and the window title.
//!
//! Run with: `cargo run --bin sandbox [config.json]`
//!
//! Controls:
//! - Click: capture the pointer
//! - WASD: Move
//! - Space / Shift: Fly up / down
//! - 1-6: Select block type
//! - R: Rotate stairs
//! - Left mouse: Place block
//! - Right mouse: Remove block
//! - ESC: Release the pointer (ESC again to exit)

use std::sync::Arc;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use voxel_sandbox_engine::input::{self, CursorAction};
use voxel_sandbox_engine::{FrameLoop, Sandbox, SandboxConfig, SystemClock};

// ============================================================================
// INPUT MAPPING
// ============================================================================

fn map_key(key: KeyCode) -> input::KeyCode {
    match key {
        KeyCode::KeyW => input::KeyCode::W,
        KeyCode::KeyA => input::KeyCode::A,
        KeyCode::KeyS => input::KeyCode::S,
        KeyCode::KeyD => input::KeyCode::D,
        KeyCode::Space => input::KeyCode::Space,
        KeyCode::ShiftLeft => input::KeyCode::ShiftLeft,
        KeyCode::ShiftRight => input::KeyCode::ShiftRight,
        KeyCode::KeyR => input::KeyCode::R,
        KeyCode::Digit1 => input::KeyCode::Digit1,
        KeyCode::Digit2 => input::KeyCode::Digit2,
        KeyCode::Digit3 => input::KeyCode::Digit3,
        KeyCode::Digit4 => input::KeyCode::Digit4,
        KeyCode::Digit5 => input::KeyCode::Digit5,
        KeyCode::Digit6 => input::KeyCode::Digit6,
        KeyCode::Digit7 => input::KeyCode::Digit7,
        KeyCode::Digit8 => input::KeyCode::Digit8,
        KeyCode::Digit9 => input::KeyCode::Digit9,
        KeyCode::Escape => input::KeyCode::Escape,
        _ => input::KeyCode::Unknown,
    }
}

fn map_button(button: MouseButton) -> input::MouseButton {
    match button {
        MouseButton::Left => input::MouseButton::Left,
        MouseButton::Middle => input::MouseButton::Middle,
        MouseButton::Right => input::MouseButton::Right,
        MouseButton::Back => input::MouseButton::Other(3),
        MouseButton::Forward => input::MouseButton::Other(4),
        MouseButton::Other(id) => input::MouseButton::Other(id),
    }
}

// ============================================================================
// APPLICATION
// ============================================================================

struct SandboxApp {
    window: Option<Arc<Window>>,
    sandbox: Sandbox,
    frames: FrameLoop<SystemClock>,
    title: String,
}

impl SandboxApp {
    fn new(sandbox: Sandbox) -> Self {
        let frames = FrameLoop::system(sandbox.config().max_frame_delta);
        Self {
            window: None,
            sandbox,
            frames,
            title: String::new(),
        }
    }

    /// Pushes the pointer lock state to the window if it changed.
    fn apply_cursor_state(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let pointer = self.sandbox.pointer_mut();
        if !pointer.is_dirty() {
            return;
        }

        if pointer.should_cursor_be_grabbed() {
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                if let Err(err) = window.set_cursor_grab(CursorGrabMode::Confined) {
                    log::warn!("[Sandbox] Cursor grab failed: {}", err);
                }
            }
        } else if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("[Sandbox] Cursor release failed: {}", err);
        }
        window.set_cursor_visible(pointer.should_cursor_be_visible());
        pointer.clear_dirty();
    }

    fn update_title(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let title = format!(
            "{} | {:.0} fps",
            self.sandbox.status_text(),
            self.frames.fps()
        );
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title("Pyramid Builder")
            .with_inner_size(PhysicalSize::new(1280, 720));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                self.sandbox
                    .camera_mut()
                    .projection
                    .resize(size.width, size.height);
                self.window = Some(Arc::new(window));
                self.apply_cursor_state();
            }
            Err(err) => {
                log::error!("[Sandbox] Failed to create window: {}", err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    // Escape with the pointer already free closes the window
                    if key == KeyCode::Escape
                        && pressed
                        && !event.repeat
                        && !self.sandbox.pointer().is_locked()
                    {
                        event_loop.exit();
                        return;
                    }
                    self.sandbox.handle_key(map_key(key), pressed);
                    self.apply_cursor_state();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let outcome = self
                    .sandbox
                    .handle_mouse_button(map_button(button), state == ElementState::Pressed);
                log::trace!("[Sandbox] {:?} -> {:?}", button, outcome);
                self.apply_cursor_state();
            }

            WindowEvent::Focused(focused) => {
                if focused {
                    if self.sandbox.handle_focus_gained() == CursorAction::ApplyState {
                        self.apply_cursor_state();
                    }
                } else {
                    self.sandbox.handle_focus_lost();
                }
            }

            WindowEvent::Resized(size) => {
                self.sandbox
                    .camera_mut()
                    .projection
                    .resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                self.frames.step(&mut self.sandbox);
                self.update_title();
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.sandbox
                .handle_mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::load(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => SandboxConfig::default(),
    };
    let sandbox = Sandbox::new(config).context("starting sandbox")?;

    log::info!("[Sandbox] Click to capture the pointer, ESC to release it");
    for slot in sandbox.hotbar() {
        log::info!("[Sandbox]   {}: {}", slot.key, slot.label);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = SandboxApp::new(sandbox);
    event_loop.run_app(&mut app)?;
    Ok(())
}
