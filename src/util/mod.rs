//! Shared utilities for the engine.

pub mod easing;
