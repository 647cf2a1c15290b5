use editcam_input::{InputSnapshot, Key, MouseButton};
use winit::{
    event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::config::InputConfig;

/// Accumulates winit events between frames and hands out one snapshot per frame.
pub struct InputCollector {
    cfg: InputConfig,
    frame: InputSnapshot,
}

impl InputCollector {
    pub fn new(cfg: InputConfig) -> Self {
        Self {
            cfg,
            frame: InputSnapshot::default(),
        }
    }

    /// Snapshot of everything seen since the last call. Held state carries over.
    pub fn take_frame(&mut self) -> InputSnapshot {
        let out = self.frame;
        self.frame = out.carry_over();
        out
    }

    pub fn on_key(&mut self, key: Key, pressed: bool, repeat: bool) {
        if repeat {
            return;
        }
        let f = &mut self.frame;
        if pressed {
            if !f.keys_down.contains(key) {
                f.keys_pressed.insert(key);
            }
            f.keys_down.insert(key);
        } else {
            if f.keys_down.contains(key) {
                f.keys_released.insert(key);
            }
            f.keys_down.remove(key);
        }
    }

    pub fn on_button(&mut self, button: MouseButton, pressed: bool) {
        let f = &mut self.frame;
        if pressed {
            if !f.buttons_down.contains(button) {
                f.buttons_pressed.insert(button);
            }
            f.buttons_down.insert(button);
        } else {
            if f.buttons_down.contains(button) {
                f.buttons_released.insert(button);
            }
            f.buttons_down.remove(button);
        }
    }

    /// Raw device motion (+y down), stored as axis units with +y up.
    pub fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        let s = self.cfg.mouse_delta_scale;
        self.frame.mouse_delta.x += dx as f32 * s;
        self.frame.mouse_delta.y -= dy as f32 * s;
    }

    pub fn on_wheel_lines(&mut self, lines: f32) {
        self.frame.scroll += lines * self.cfg.scroll_line_scale;
    }

    pub fn on_wheel_pixels(&mut self, pixels: f64) {
        self.frame.scroll += pixels as f32 * self.cfg.scroll_pixel_scale;
    }

    /// Everything held is released; the release edges are reported next frame.
    pub fn on_focus_lost(&mut self) {
        let f = &mut self.frame;
        f.keys_released = f.keys_released.union(f.keys_down);
        f.buttons_released = f.buttons_released.union(f.buttons_down);
        f.keys_down.clear();
        f.buttons_down.clear();
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = map_key(code) {
                        self.on_key(key, event.state == ElementState::Pressed, event.repeat);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = map_button(*button) {
                    self.on_button(button, *state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.on_wheel_lines(*y),
                MouseScrollDelta::PixelDelta(pos) => self.on_wheel_pixels(pos.y),
            },
            WindowEvent::Focused(false) => self.on_focus_lost(),
            _ => {}
        }
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.on_mouse_motion(delta.0, delta.1);
        }
    }
}

pub fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    use winit::event::MouseButton as W;
    match button {
        W::Left => Some(MouseButton::Left),
        W::Right => Some(MouseButton::Right),
        W::Middle => Some(MouseButton::Middle),
        W::Back => Some(MouseButton::Back),
        W::Forward => Some(MouseButton::Forward),
        W::Other(_) => None,
    }
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
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
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ShiftRight => Key::RightShift,
        KeyCode::ControlLeft => Key::LeftControl,
        KeyCode::ControlRight => Key::RightControl,
        KeyCode::AltLeft => Key::LeftAlt,
        KeyCode::AltRight => Key::RightAlt,
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
        _ => return None,
    };
    Some(key)
}
