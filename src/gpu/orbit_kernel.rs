//! Device-side orbit evaluation.
//!
//! Uploads the field's [`GpuPoint`]s once, then evaluates every point at a
//! broadcast time in a compute pass and reads the homogeneous positions
//! back. Host code can compare the result against
//! [`OrbitParams::evaluate_homogeneous`].

use glam::Vec4;
use wgpu::util::DeviceExt;

use super::context::{GpuContext, GpuContextError};
use super::shader_composer::{ShaderComposer, ORBIT_EVAL};
use crate::error::HelixError;
use crate::field::GpuPoint;
use crate::orbit::OrbitParams;

const WORKGROUP_SIZE: u32 = 64;

/// Uniform block of `compute/orbit_eval.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OrbitUniform {
    /// Broadcast time.
    pub time: f32,
    /// Axial drift frequency.
    pub drift_speed: f32,
    /// Radius pulse frequency.
    pub pulse_speed: f32,
    /// Spin frequency.
    pub spin_speed: f32,
    /// Number of points to evaluate.
    pub count: u32,
    /// Padding to 16 bytes.
    pub _pad: [u32; 3],
}

impl OrbitUniform {
    /// Uniform for `count` points of `orbit` at time `t`.
    #[must_use]
    pub fn new(orbit: &OrbitParams, t: f32, count: u32) -> Self {
        Self {
            time: t,
            drift_speed: orbit.drift_speed,
            pulse_speed: orbit.pulse_speed,
            spin_speed: orbit.spin_speed,
            count,
            _pad: [0; 3],
        }
    }
}

/// Compute pipeline plus the buffers for one point field.
pub struct OrbitKernel {
    pipeline: wgpu::ComputePipeline,
    bind_group: wgpu::BindGroup,
    uniform: wgpu::Buffer,
    output: wgpu::Buffer,
    staging: wgpu::Buffer,
    count: u32,
}

impl OrbitKernel {
    /// Build the pipeline and upload `points`.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidConfiguration`] for an empty or oversized point
    /// list, [`HelixError::Gpu`] if the shader fails to compose.
    pub fn new(
        context: &GpuContext,
        composer: &mut ShaderComposer,
        points: &[GpuPoint],
    ) -> Result<Self, HelixError> {
        if points.is_empty() {
            return Err(HelixError::InvalidConfiguration(
                "orbit kernel needs at least one point".to_owned(),
            ));
        }
        let count = u32::try_from(points.len()).map_err(|_| {
            HelixError::InvalidConfiguration(format!(
                "{} points exceed the kernel's u32 index range",
                points.len()
            ))
        })?;
        let device = &context.device;

        let module = composer.compose(
            device,
            "Orbit Eval Shader",
            ORBIT_EVAL,
            "compute/orbit_eval.wgsl",
        )?;

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Orbit Eval Bind Group Layout"),
            entries: &[
                storage_entry(0, true),
                storage_entry(1, false),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Orbit Eval Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Orbit Eval Pipeline"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let input = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Orbit Points Buffer"),
            contents: bytemuck::cast_slice(points),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Orbit Uniform Buffer"),
            contents: bytemuck::bytes_of(&OrbitUniform::new(
                &OrbitParams::default(),
                0.0,
                count,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let output_size = u64::from(count) * size_of::<[f32; 4]>() as wgpu::BufferAddress;
        let output = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Orbit Positions Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Orbit Readback Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Orbit Eval Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: input.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform.as_entire_binding(),
                },
            ],
        });

        log::debug!("orbit kernel ready for {count} points");

        Ok(Self {
            pipeline,
            bind_group,
            uniform,
            output,
            staging,
            count,
        })
    }

    /// Number of points evaluated per dispatch.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Evaluate every point at `t` and read the positions back (`w = 1`).
    ///
    /// Blocks until the device has finished.
    ///
    /// # Errors
    ///
    /// [`HelixError::InvalidTime`] for non-finite `t`, [`HelixError::Gpu`]
    /// if the readback fails.
    pub fn evaluate(
        &self,
        context: &GpuContext,
        orbit: &OrbitParams,
        t: f32,
    ) -> Result<Vec<Vec4>, HelixError> {
        if !t.is_finite() {
            return Err(HelixError::InvalidTime(t));
        }
        let device = &context.device;
        context.queue.write_buffer(
            &self.uniform,
            0,
            bytemuck::bytes_of(&OrbitUniform::new(orbit, t, self.count)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Orbit Eval Encoder"),
        });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Orbit Eval Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.dispatch_workgroups(self.count.div_ceil(WORKGROUP_SIZE), 1, 1);
        }
        encoder.copy_buffer_to_buffer(&self.output, 0, &self.staging, 0, self.output.size());
        let _ = context.queue.submit(std::iter::once(encoder.finish()));

        let slice = self.staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device
            .poll(wgpu::PollType::Wait)
            .map_err(GpuContextError::Poll)?;
        rx.recv()
            .map_err(|_| GpuContextError::MapCallbackDropped)?
            .map_err(GpuContextError::BufferMap)?;

        let positions = {
            let data = slice.get_mapped_range();
            bytemuck::cast_slice::<u8, [f32; 4]>(&data)
                .iter()
                .map(|v| Vec4::from_array(*v))
                .collect()
        };
        self.staging.unmap();
        Ok(positions)
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
