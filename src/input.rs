//! Input handling
//!
//! Action-based input: the scene never checks key codes directly, it asks for
//! actions. Keyboard is the primary device; touch/mouse presses on the left or
//! right half of the window act as brake/accelerate for mobile-style control.

use macroquad::prelude::*;

/// Everything the animation can be told to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Speed the truck up (Right arrow, or press the right half of the screen)
    Accelerate,
    /// Slow the truck down (Left arrow, or press the left half of the screen)
    Brake,
    /// Toggle the radio on/off (R)
    RadioToggle,
    /// Skip to the next radio track (M)
    RadioNext,
}

/// Per-frame snapshot of the actions the scene cares about
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub accelerate: bool,
    pub brake: bool,
    pub radio_toggle: bool,
    pub radio_next: bool,
}

pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Check if an action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        match action {
            Action::Accelerate => is_key_down(KeyCode::Right) || pointer_half(PointerHalf::Right),
            Action::Brake => is_key_down(KeyCode::Left) || pointer_half(PointerHalf::Left),
            Action::RadioToggle => is_key_down(KeyCode::R),
            Action::RadioNext => is_key_down(KeyCode::M),
        }
    }

    /// Check if an action was pressed this frame (edge-triggered)
    pub fn action_pressed(&self, action: Action) -> bool {
        match action {
            Action::Accelerate => is_key_pressed(KeyCode::Right),
            Action::Brake => is_key_pressed(KeyCode::Left),
            Action::RadioToggle => is_key_pressed(KeyCode::R),
            Action::RadioNext => is_key_pressed(KeyCode::M),
        }
    }

    /// Sample all actions for this frame
    pub fn frame(&self) -> FrameInput {
        FrameInput {
            accelerate: self.action_down(Action::Accelerate),
            brake: self.action_down(Action::Brake),
            radio_toggle: self.action_pressed(Action::RadioToggle),
            radio_next: self.action_pressed(Action::RadioNext),
        }
    }
}

#[derive(Clone, Copy)]
enum PointerHalf {
    Left,
    Right,
}

/// True if a touch or mouse press is active on the given half of the window
fn pointer_half(half: PointerHalf) -> bool {
    let mid = screen_width() * 0.5;
    let hit = |x: f32| match half {
        PointerHalf::Left => x < mid,
        PointerHalf::Right => x >= mid,
    };

    for touch in touches() {
        if matches!(touch.phase, TouchPhase::Started | TouchPhase::Moved | TouchPhase::Stationary)
            && hit(touch.position.x)
        {
            return true;
        }
    }
    if is_mouse_button_down(MouseButton::Left) {
        return hit(mouse_position().0);
    }
    false
}
