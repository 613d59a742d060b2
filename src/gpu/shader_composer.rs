use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage, ShaderType,
};
use std::borrow::Cow;

use super::context::GpuContextError;

/// Shared orbit module (`helix::orbit`).
pub const ORBIT_MODULE: &str = include_str!("../../assets/shaders/modules/orbit.wgsl");
/// Compute entry evaluating every point at a broadcast time.
pub const ORBIT_EVAL: &str = include_str!("../../assets/shaders/compute/orbit_eval.wgsl");

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

const SHARED_MODULES: &[ModuleDef] = &[ModuleDef {
    source: ORBIT_MODULE,
    file_path: "modules/orbit.wgsl",
}];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with `#import` support.
///
/// Pre-loads all shared WGSL modules at construction time. Consuming shaders use
/// `#import helix::module_name` to pull in shared code; a renderer's vertex
/// program imports `helix::orbit` the same way the compute kernel does. The
/// composer produces `naga::Module` IR directly, skipping WGSL re-parse at
/// runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// [`GpuContextError::ShaderComposition`] if a shared module fails to
    /// parse.
    pub fn new() -> Result<Self, GpuContextError> {
        let mut composer = Composer::default();

        // Register shared modules in dependency order.
        for m in SHARED_MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| GpuContextError::ShaderComposition {
                    file_path: m.file_path.to_owned(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import` directives)
    /// into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// [`GpuContextError::ShaderComposition`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, GpuContextError> {
        let naga_module = self.compose_naga(source, file_path)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu shader module.
    /// Useful for testing shader composition without a GPU device.
    ///
    /// # Errors
    ///
    /// [`GpuContextError::ShaderComposition`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, GpuContextError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| GpuContextError::ShaderComposition {
                file_path: file_path.to_owned(),
                message: e.to_string(),
            })
    }
}
