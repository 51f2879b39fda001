//! Normalized pointer state fed to the interaction pass once per frame.

use bitflags::bitflags;

use crate::geometry::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

bitflags! {
    /// Set of mouse buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

/// Pointer state for one frame.
///
/// `position` is in logical pixels relative to the viewport's top-left corner;
/// it is multiplied by `device_pixel_ratio` to reach viewport pixels.
/// `pressed`/`released` hold the buttons that changed this frame, `held` the
/// buttons currently down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub position: Vec2,
    pub pressed: MouseButtons,
    pub released: MouseButtons,
    pub held: MouseButtons,
    pub scroll_delta: Vec2,
    pub device_pixel_ratio: f32,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            pressed: MouseButtons::empty(),
            released: MouseButtons::empty(),
            held: MouseButtons::empty(),
            scroll_delta: Vec2::ZERO,
            device_pixel_ratio: 1.0,
        }
    }
}

impl PointerInput {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Default::default()
        }
    }

    /// Move the pointer, keeping held buttons and clearing per-frame edges.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
        self.pressed = MouseButtons::empty();
        self.released = MouseButtons::empty();
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn press(&mut self, button: MouseButton) {
        self.pressed |= button.into();
        self.held |= button.into();
    }

    pub fn release(&mut self, button: MouseButton) {
        self.released |= button.into();
        self.held.remove(button.into());
    }

    pub fn scroll(&mut self, dx: f32, dy: f32) {
        self.scroll_delta = self.scroll_delta + Vec2::new(dx, dy);
    }

    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(button.into())
    }

    pub fn just_released(&self, button: MouseButton) -> bool {
        self.released.contains(button.into())
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(button.into())
    }

    /// Pointer position in viewport pixels.
    pub fn physical_position(&self) -> Vec2 {
        let ratio = if self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        Vec2::new(self.position.x * ratio, self.position.y * ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_edges() {
        let mut input = PointerInput::at(10.0, 10.0);
        input.press(MouseButton::Left);
        assert!(input.just_pressed(MouseButton::Left));
        assert!(input.is_held(MouseButton::Left));

        input.move_to(12.0, 10.0);
        assert!(!input.just_pressed(MouseButton::Left));
        assert!(input.is_held(MouseButton::Left));

        input.release(MouseButton::Left);
        assert!(input.just_released(MouseButton::Left));
        assert!(!input.is_held(MouseButton::Left));
    }

    #[test]
    fn test_physical_position_uses_pixel_ratio() {
        let mut input = PointerInput::at(10.0, 20.0);
        input.device_pixel_ratio = 2.0;
        assert_eq!(input.physical_position(), Vec2::new(20.0, 40.0));

        input.device_pixel_ratio = 0.0;
        assert_eq!(input.physical_position(), Vec2::new(10.0, 20.0));
    }
}
