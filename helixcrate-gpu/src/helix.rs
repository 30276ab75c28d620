//! GPU helix generation
//!
//! [`HelixPipeline`] compiles the helix kernel once and records dispatches
//! into caller-owned storage buffers. The same buffer can then be bound as a
//! vertex buffer (see [`helix_vertex_layout`](crate::helix_vertex_layout)).

use bytemuck::{Pod, Zeroable};
use helixcrate_core::{helix_indices, workgroup_count, Error, HelixMesh, HelixParams, HelixVertex, Result, WORKGROUP_SIZE};

use crate::GpuContext;

const HELIX_SHADER: &str = include_str!("shaders/helix.wgsl");

/// Uniform block mirroring the WGSL `HelixParams` struct
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct HelixUniform {
    pub radius1: f32,
    pub radius2: f32,
    pub height: f32,
    pub num_twists: f32,
    pub num_steps: u32,
    pub _padding: [u32; 3],
}

impl From<&HelixParams> for HelixUniform {
    fn from(params: &HelixParams) -> Self {
        Self {
            radius1: params.radius1,
            radius2: params.radius2,
            height: params.height,
            num_twists: params.num_twists,
            num_steps: params.num_steps,
            _padding: [0; 3],
        }
    }
}

/// Reject output buffers the device cannot allocate or bind as storage
fn check_buffer_limits(gpu: &GpuContext, num_steps: u32, bytes: u64) -> Result<()> {
    let limits = gpu.device.limits();
    let max_bytes = limits
        .max_buffer_size
        .min(limits.max_storage_buffer_binding_size as u64);
    if bytes > max_bytes {
        return Err(Error::InvalidParams(format!(
            "{} steps need a {} byte vertex buffer, device allows {}",
            num_steps, bytes, max_bytes
        )));
    }
    Ok(())
}

/// Compiled helix compute pipeline
pub struct HelixPipeline {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    workgroup_size: u32,
}

impl HelixPipeline {
    /// Compile the kernel with the default workgroup size of 64
    pub fn new(gpu: &GpuContext) -> Result<Self> {
        Self::with_workgroup_size(gpu, WORKGROUP_SIZE)
    }

    /// Compile the kernel with a custom workgroup size
    pub fn with_workgroup_size(gpu: &GpuContext, workgroup_size: u32) -> Result<Self> {
        let limits = gpu.device.limits();
        let max_size = limits
            .max_compute_workgroup_size_x
            .min(limits.max_compute_invocations_per_workgroup);
        if workgroup_size == 0 || workgroup_size > max_size {
            return Err(Error::InvalidParams(format!(
                "workgroup size must be in 1..={}, got {}",
                max_size, workgroup_size
            )));
        }

        let shader_source = HELIX_SHADER.replace("WORKGROUP_SIZE", &workgroup_size.to_string());
        let shader = gpu.create_shader_module("Helix Compute", &shader_source);

        let bind_group_layout = gpu.create_bind_group_layout(
            "Helix Generation",
            &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        );

        let pipeline_layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Helix Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = gpu.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Helix Generation Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        });

        log::debug!("Compiled helix pipeline with workgroup size {}", workgroup_size);

        Ok(Self {
            pipeline,
            bind_group_layout,
            workgroup_size,
        })
    }

    /// Invocations per workgroup
    pub fn workgroup_size(&self) -> u32 {
        self.workgroup_size
    }

    /// Groups needed to cover every index of `params`
    pub fn workgroups_for(&self, params: &HelixParams) -> u32 {
        workgroup_count(params.num_steps, self.workgroup_size)
    }

    /// Allocate a vertex buffer sized exactly for `params`.
    ///
    /// Usable as compute storage, as a vertex buffer, and as a copy source.
    pub fn create_vertex_buffer(&self, gpu: &GpuContext, params: &HelixParams) -> Result<wgpu::Buffer> {
        params.validate()?;
        let bytes = (params.vertex_count() * HelixVertex::SIZE) as u64;
        check_buffer_limits(gpu, params.num_steps, bytes)?;
        Ok(gpu.create_buffer(
            "Helix Vertices",
            bytes,
            wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::VERTEX
                | wgpu::BufferUsages::COPY_SRC
                | wgpu::BufferUsages::COPY_DST,
        ))
    }

    /// Upload the triangle-list topology joining the two strands
    pub fn create_index_buffer(&self, gpu: &GpuContext, num_steps: u32) -> wgpu::Buffer {
        gpu.create_buffer_init(
            "Helix Indices",
            &helix_indices(num_steps),
            wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_SRC,
        )
    }

    /// Record one helix dispatch into `encoder`.
    ///
    /// Nothing runs until the encoder is submitted. `buffer` must have
    /// `STORAGE` usage and hold at least `params.vertex_count()` vertices.
    pub fn encode(
        &self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        params: &HelixParams,
        buffer: &wgpu::Buffer,
    ) -> Result<()> {
        params.validate()?;

        let required = params.vertex_count();
        let actual = (buffer.size() / HelixVertex::SIZE as u64) as usize;
        if actual < required {
            return Err(Error::BufferTooSmall { required, actual });
        }
        if !buffer.usage().contains(wgpu::BufferUsages::STORAGE) {
            return Err(Error::Gpu("Helix output buffer needs STORAGE usage".to_string()));
        }
        // The whole buffer is bound, so its full size must fit the binding limit
        check_buffer_limits(gpu, params.num_steps, buffer.size())?;

        let workgroups = self.workgroups_for(params);
        let max_groups = gpu.device.limits().max_compute_workgroups_per_dimension;
        if workgroups > max_groups {
            return Err(Error::InvalidParams(format!(
                "{} steps need {} workgroups, device allows {}",
                params.num_steps, workgroups, max_groups
            )));
        }

        let params_buffer = gpu.create_buffer_init(
            "Helix Params",
            &[HelixUniform::from(params)],
            wgpu::BufferUsages::UNIFORM,
        );

        let bind_group = gpu.create_bind_group(
            "Helix Generation",
            &self.bind_group_layout,
            &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        );

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Helix Generation Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(workgroups, 1, 1);
        }

        log::debug!(
            "GPU dispatch: {} workgroups x {} invocations for {} steps",
            workgroups,
            self.workgroup_size,
            params.num_steps
        );

        Ok(())
    }

    /// Record and submit one helix dispatch into `buffer`
    pub fn dispatch(&self, gpu: &GpuContext, params: &HelixParams, buffer: &wgpu::Buffer) -> Result<()> {
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Helix Generation"),
        });
        self.encode(gpu, &mut encoder, params, buffer)?;
        gpu.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Generate into a fresh buffer and read the vertices back
    pub async fn generate(&self, gpu: &GpuContext, params: &HelixParams) -> Result<Vec<HelixVertex>> {
        let buffer = self.create_vertex_buffer(gpu, params)?;
        self.dispatch(gpu, params, &buffer)?;
        gpu.read_buffer(&buffer, params.vertex_count()).await
    }
}

/// GPU-accelerated helix generation with the default workgroup size
pub async fn gpu_generate_helix(gpu_context: &GpuContext, params: &HelixParams) -> Result<HelixMesh> {
    let pipeline = HelixPipeline::new(gpu_context)?;
    let vertices = pipeline.generate(gpu_context, params).await?;
    HelixMesh::from_vertices(params, vertices)
}
