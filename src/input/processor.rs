//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the only transient input state (whether the
//! primary pointer is held) and sits between raw window events and the
//! engine's [`execute`](crate::engine::HelixEngine::execute) method.

use super::event::InputEvent;
use crate::engine::EngineCommand;
use crate::rotation::{Direction, RotationInput};

/// Converts raw window events into [`EngineCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Whether the primary pointer is currently held.
    pointer_pressed: bool,
}

impl InputProcessor {
    /// Processor with the pointer released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the primary pointer is held.
    #[must_use]
    pub fn pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<EngineCommand> {
        match event {
            InputEvent::Wheel { delta_y } => {
                if !delta_y.is_finite() {
                    return None;
                }
                Some(EngineCommand::Rotate {
                    input: RotationInput::from_wheel(delta_y),
                })
            }
            InputEvent::PointerButton { pressed } => self.handle_button(pressed),
            InputEvent::PointerMoved { y, viewport_height } => {
                self.handle_moved(y, viewport_height)
            }
            InputEvent::LinkHover { link, entered } => Some(if entered {
                EngineCommand::HoverLink { link }
            } else {
                EngineCommand::LeaveLink { link }
            }),
            InputEvent::Focus { focused } => Some(if focused {
                EngineCommand::Resume
            } else {
                EngineCommand::Pause
            }),
        }
    }

    fn handle_button(&mut self, pressed: bool) -> Option<EngineCommand> {
        let was_pressed = std::mem::replace(&mut self.pointer_pressed, pressed);
        // Only a release that ends a press settles the rotation.
        (was_pressed && !pressed).then_some(EngineCommand::ReleaseDrag)
    }

    fn handle_moved(&mut self, y: f32, viewport_height: f32) -> Option<EngineCommand> {
        if !self.pointer_pressed || !y.is_finite() || !viewport_height.is_finite() {
            return None;
        }
        let direction = if y - viewport_height * 0.5 <= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };
        Some(EngineCommand::Drag { direction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_maps_sign_to_direction() {
        let mut processor = InputProcessor::new();
        let up = processor.handle_event(InputEvent::Wheel { delta_y: 0.0 });
        assert!(matches!(
            up,
            Some(EngineCommand::Rotate { input }) if input.direction == Direction::Up
        ));
        let down = processor.handle_event(InputEvent::Wheel { delta_y: -4.0 });
        assert!(matches!(
            down,
            Some(EngineCommand::Rotate { input }) if input.direction == Direction::Down
        ));
        assert_eq!(
            processor.handle_event(InputEvent::Wheel { delta_y: f32::NAN }),
            None
        );
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.handle_event(InputEvent::PointerMoved {
                y: 10.0,
                viewport_height: 100.0
            }),
            None
        );
    }

    #[test]
    fn drag_direction_from_viewport_half() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.handle_event(InputEvent::PointerButton { pressed: true }),
            None
        );
        assert!(processor.pointer_pressed());
        let moved = |y| InputEvent::PointerMoved {
            y,
            viewport_height: 100.0,
        };
        assert_eq!(
            processor.handle_event(moved(20.0)),
            Some(EngineCommand::Drag {
                direction: Direction::Up
            })
        );
        assert_eq!(
            processor.handle_event(moved(50.0)),
            Some(EngineCommand::Drag {
                direction: Direction::Up
            })
        );
        assert_eq!(
            processor.handle_event(moved(80.0)),
            Some(EngineCommand::Drag {
                direction: Direction::Down
            })
        );
    }

    #[test]
    fn release_only_after_press() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.handle_event(InputEvent::PointerButton { pressed: false }),
            None
        );
        let _ = processor.handle_event(InputEvent::PointerButton { pressed: true });
        assert_eq!(
            processor.handle_event(InputEvent::PointerButton { pressed: false }),
            Some(EngineCommand::ReleaseDrag)
        );
        assert!(!processor.pointer_pressed());
    }

    #[test]
    fn hover_and_focus() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            processor.handle_event(InputEvent::LinkHover {
                link: 3,
                entered: true
            }),
            Some(EngineCommand::HoverLink { link: 3 })
        );
        assert_eq!(
            processor.handle_event(InputEvent::LinkHover {
                link: 3,
                entered: false
            }),
            Some(EngineCommand::LeaveLink { link: 3 })
        );
        assert_eq!(
            processor.handle_event(InputEvent::Focus { focused: false }),
            Some(EngineCommand::Pause)
        );
        assert_eq!(
            processor.handle_event(InputEvent::Focus { focused: true }),
            Some(EngineCommand::Resume)
        );
    }
}
