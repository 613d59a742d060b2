//! GPU side of the orbit evaluator.
//!
//! Provides headless device acquisition, WGSL composition via naga-oil, and
//! the compute kernel that evaluates the orbit formula on the device.

/// wgpu device and queue acquisition.
pub mod context;
/// Compute kernel evaluating every point at a broadcast time.
pub mod orbit_kernel;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;

pub use context::{GpuContext, GpuContextError};
pub use orbit_kernel::{OrbitKernel, OrbitUniform};
pub use shader_composer::ShaderComposer;
