//! Platform-agnostic input handling.
//!
//! Host code translates window events into [`InputEvent`]s and feeds them
//! to an [`InputProcessor`], which turns them into engine commands.

mod event;
mod processor;

pub use event::InputEvent;
pub use processor::InputProcessor;
