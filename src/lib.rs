// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural double-helix point cloud with orbit animation, link
//! highlighting, marker flights and inertial rotation.
//!
//! The crate owns the state and motion of the cloud; rasterization, label
//! markup and window handling belong to the host.
//!
//! # Key entry points
//!
//! - [`engine::HelixEngine`] - owns every component and ticks them in order
//! - [`field::PointField`] - deterministic procedural point generation
//! - [`orbit::OrbitParams`] - the pure per-frame orbit function
//! - [`links::LinkRegistry`] - link selection and color mutation
//! - [`animation::FlightAnimator`] - loop-once keyframe flights
//! - [`rotation::RotationController`] - input-driven rotation rate
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Each tick advances rotation, then orbit time, then flights, then flushes
//! point colors, and returns an [`engine::FrameOutput`]. The orbit formula
//! also exists as a WGSL module that renderers compose into their own
//! shaders; [`gpu::OrbitKernel`] evaluates it in a compute pass so host and
//! device results can be compared.

pub mod animation;
pub mod engine;
pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod links;
pub mod options;
pub mod orbit;
pub mod rotation;
pub mod util;

pub use engine::{EngineCommand, FrameOutput, HelixEngine};
pub use error::HelixError;
pub use input::InputEvent;
pub use options::Options;
