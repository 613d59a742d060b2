/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`EngineCommand`](crate::engine::EngineCommand)
/// values.
///
/// # Example
///
/// ```ignore
/// let cmd = processor.handle_event(InputEvent::Wheel { delta_y: -3.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Scroll wheel.
    Wheel {
        /// Vertical scroll amount; non-negative turns the assembly up.
        delta_y: f32,
    },
    /// Primary pointer pressed or released.
    PointerButton {
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Pointer moved.
    PointerMoved {
        /// Vertical position in viewport pixels (0 at the top).
        y: f32,
        /// Viewport height in pixels.
        viewport_height: f32,
    },
    /// Pointer entered or left a link label.
    LinkHover {
        /// Position of the link in the link set.
        link: usize,
        /// `true` on enter, `false` on leave.
        entered: bool,
    },
    /// Host surface focus changed.
    Focus {
        /// Whether the surface now has focus.
        focused: bool,
    },
}
