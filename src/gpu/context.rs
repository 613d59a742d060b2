use std::fmt;

/// Errors from GPU device acquisition and compute readback.
#[derive(Debug)]
pub enum GpuContextError {
    /// No compatible GPU adapter found.
    AdapterRequest(wgpu::RequestAdapterError),
    /// GPU device request failed (limits or features not met).
    DeviceRequest(wgpu::RequestDeviceError),
    /// Mapping a readback buffer failed.
    BufferMap(wgpu::BufferAsyncError),
    /// The map callback was dropped without reporting.
    MapCallbackDropped,
    /// Waiting on the device failed.
    Poll(wgpu::PollError),
    /// naga-oil could not register or compose a shader.
    ShaderComposition {
        /// Shader file the failure was reported for.
        file_path: String,
        /// Composer message.
        message: String,
    },
}

impl fmt::Display for GpuContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdapterRequest(e) => {
                write!(f, "no compatible GPU adapter found: {e}")
            }
            Self::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            Self::BufferMap(e) => write!(f, "buffer map failed: {e}"),
            Self::MapCallbackDropped => {
                write!(f, "buffer map callback dropped before completion")
            }
            Self::Poll(e) => write!(f, "device poll failed: {e}"),
            Self::ShaderComposition { file_path, message } => {
                write!(f, "failed to compose shader '{file_path}': {message}")
            }
        }
    }
}

impl std::error::Error for GpuContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::BufferMap(e) => Some(e),
            Self::Poll(e) => Some(e),
            Self::MapCallbackDropped | Self::ShaderComposition { .. } => None,
        }
    }
}

/// Owns the wgpu device and queue used for compute work.
pub struct GpuContext {
    /// The wgpu logical device.
    pub device: wgpu::Device,
    /// The wgpu command queue.
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Acquire a device with no presentation surface.
    ///
    /// # Errors
    ///
    /// Returns `GpuContextError` if no adapter is available or the device
    /// request fails.
    pub async fn headless() -> Result<Self, GpuContextError> {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(GpuContextError::AdapterRequest)?;

        let info = adapter.get_info();
        log::info!("compute adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Helix Compute Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                ..Default::default()
            })
            .await
            .map_err(GpuContextError::DeviceRequest)?;

        Ok(Self { device, queue })
    }

    /// Wrap an externally-owned device and queue, e.g. the renderer's.
    #[must_use]
    pub fn from_device(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }
}
