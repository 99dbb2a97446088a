use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};
use crate::device::GpuInit;
use crate::input::{
    InputTracker, Key, KeyEvent, KeyState, Modifiers, MouseButton, MouseButtonState,
    PointerButtonEvent, PointerMoveEvent, RawEvent, TextEvent, WheelDelta,
};
use crate::surface::{NativeSurface, Surface};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    pub title: String,
    /// Initial drawable size in pixels.
    pub initial_size: (u32, u32),
    pub resizable: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: "sigil".to_string(),
            initial_size: (800, 600),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
///
/// Drives a single-window winit event loop: translates platform events
/// into [`RawEvent`]s, queues them on the surface, and calls
/// [`App::on_frame`] once per redraw.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: SurfaceConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut driver = Driver::new(config, gpu_init, app);

        event_loop
            .run_app(&mut driver)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct Driver<A>
where
    A: App + 'static,
{
    config: SurfaceConfig,
    gpu_init: GpuInit,
    app: A,

    tracker: InputTracker,
    surface: Option<Rc<RefCell<NativeSurface>>>,
    exit_requested: bool,
}

impl<A> Driver<A>
where
    A: App + 'static,
{
    fn new(config: SurfaceConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            tracker: InputTracker::default(),
            surface: None,
            exit_requested: false,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (w, h) = self.config.initial_size;
        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(w.max(1), h.max(1)))
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let surface = NativeSurface::new(window, self.gpu_init.clone())?;
        let surface = Rc::new(RefCell::new(surface));

        self.app
            .on_surface_ready(Rc::clone(&surface))
            .context("application rejected the surface")?;

        self.surface = Some(surface);
        Ok(())
    }

    fn surface_closed(&self) -> bool {
        self.surface
            .as_ref()
            .is_none_or(|s| !s.borrow().is_open())
    }
}

impl<A> ApplicationHandler for Driver<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            log::error!("failed to create surface: {e:#}");
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        if let Some(surface) = &self.surface {
            surface.borrow().request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested || self.surface_closed() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; invalidation-based scheduling can come later.
        if let Some(surface) = &self.surface {
            surface.borrow().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(surface) = self.surface.clone() else {
            return;
        };

        // Queue translated input; the borrow must end before on_frame,
        // which re-enters the surface through the application.
        {
            let mut s = surface.borrow_mut();

            if let Some(ev) = translate_input_event(&self.tracker, &event) {
                self.tracker.apply_event(&ev);
                s.push_event(ev);
            }

            match &event {
                WindowEvent::CloseRequested => {
                    s.push_event(RawEvent::CloseRequested);
                }

                WindowEvent::Resized(new_size) => {
                    s.handle_resize(new_size.width, new_size.height);
                    s.push_event(RawEvent::Resized {
                        width: new_size.width,
                        height: new_size.height,
                    });
                }

                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = s.size();
                    s.handle_resize(size.x as u32, size.y as u32);
                }

                _ => {}
            }
        }

        if let WindowEvent::RedrawRequested = &event {
            if self.app.on_frame() == AppControl::Exit {
                self.exit_requested = true;
            }
        }

        if self.exit_requested || self.surface_closed() {
            event_loop.exit();
        }
    }
}

fn translate_input_event(tracker: &InputTracker, event: &WindowEvent) -> Option<RawEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            let ms: ModifiersState = m.state();
            Some(RawEvent::ModifiersChanged(map_modifiers(ms)))
        }

        WindowEvent::Focused(f) => Some(RawEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(RawEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(RawEvent::PointerMoved(
            PointerMoveEvent {
                x: position.x as f32,
                y: position.y as f32,
            },
        )),

        WindowEvent::MouseInput { state, button, .. } => {
            let state = match state {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };

            // winit button events carry no position; use the tracked one.
            let (x, y) = tracker.pointer_or_origin();

            Some(RawEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state,
                x,
                y,
                modifiers: tracker.modifiers,
            }))
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => WheelDelta::Line { x: *x, y: *y },
                MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixel {
                    x: p.x as f32,
                    y: p.y as f32,
                },
            };
            Some(RawEvent::Wheel {
                delta,
                modifiers: tracker.modifiers,
            })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            let (key, code) = map_key(event.physical_key);

            Some(RawEvent::Key(KeyEvent {
                key,
                state,
                modifiers: tracker.modifiers,
                code,
                repeat: event.repeat,
            }))
        }

        WindowEvent::Ime(ime) => match ime {
            winit::event::Ime::Commit(text) if !text.is_empty() => {
                Some(RawEvent::Text(TextEvent { text: text.clone() }))
            }
            _ => None,
        },

        _ => None,
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Space => Key::Space,

                KeyCode::Insert => Key::Insert,
                KeyCode::Delete => Key::Delete,
                KeyCode::Home => Key::Home,
                KeyCode::End => Key::End,
                KeyCode::PageUp => Key::PageUp,
                KeyCode::PageDown => Key::PageDown,

                KeyCode::ArrowUp => Key::ArrowUp,
                KeyCode::ArrowDown => Key::ArrowDown,
                KeyCode::ArrowLeft => Key::ArrowLeft,
                KeyCode::ArrowRight => Key::ArrowRight,

                KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
                KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
                KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
                KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

                KeyCode::KeyA => Key::A,
                KeyCode::KeyB => Key::B,
                KeyCode::KeyC => Key::C,
                KeyCode::KeyD => Key::D,
                KeyCode::KeyE => Key::E,
                KeyCode::KeyF => Key::F,
                KeyCode::KeyG => Key::G,
                KeyCode::KeyH => Key::H,
                KeyCode::KeyI => Key::I,
                KeyCode::KeyJ => Key::J,
                KeyCode::KeyK => Key::K,
                KeyCode::KeyL => Key::L,
                KeyCode::KeyM => Key::M,
                KeyCode::KeyN => Key::N,
                KeyCode::KeyO => Key::O,
                KeyCode::KeyP => Key::P,
                KeyCode::KeyQ => Key::Q,
                KeyCode::KeyR => Key::R,
                KeyCode::KeyS => Key::S,
                KeyCode::KeyT => Key::T,
                KeyCode::KeyU => Key::U,
                KeyCode::KeyV => Key::V,
                KeyCode::KeyW => Key::W,
                KeyCode::KeyX => Key::X,
                KeyCode::KeyY => Key::Y,
                KeyCode::KeyZ => Key::Z,

                KeyCode::Digit0 => Key::Digit0,
                KeyCode::Digit1 => Key::Digit1,
                KeyCode::Digit2 => Key::Digit2,
                KeyCode::Digit3 => Key::Digit3,
                KeyCode::Digit4 => Key::Digit4,
                KeyCode::Digit5 => Key::Digit5,
                KeyCode::Digit6 => Key::Digit6,
                KeyCode::Digit7 => Key::Digit7,
                KeyCode::Digit8 => Key::Digit8,
                KeyCode::Digit9 => Key::Digit9,

                KeyCode::F1 => Key::F1,
                KeyCode::F2 => Key::F2,
                KeyCode::F3 => Key::F3,
                KeyCode::F4 => Key::F4,
                KeyCode::F5 => Key::F5,
                KeyCode::F6 => Key::F6,
                KeyCode::F7 => Key::F7,
                KeyCode::F8 => Key::F8,
                KeyCode::F9 => Key::F9,
                KeyCode::F10 => Key::F10,
                KeyCode::F11 => Key::F11,
                KeyCode::F12 => Key::F12,

                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}
