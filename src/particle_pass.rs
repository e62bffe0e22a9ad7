//! Additive point sprites for the particle field.
//!
//! Each particle is an instanced camera-facing quad sized in world units. The field's
//! positions never change after composition, so the instance buffer is uploaded once and
//! only the field's model matrix is rewritten per frame.

use glam::Mat4;

use crate::color::Color;
use crate::gpu::GpuContext;
use crate::mesh_pass::{DEPTH_FORMAT, MeshPass};
use crate::particles::ParticleField;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ParticleInstance {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    /// Instances for a field, with colors converted to linear light.
    pub fn from_field(field: &ParticleField) -> Vec<Self> {
        field
            .positions()
            .iter()
            .zip(field.colors())
            .map(|(&position, &[r, g, b])| Self {
                position,
                color: Color::rgb(r, g, b).to_linear().to_rgb(),
            })
            .collect()
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FieldUniforms {
    model: [[f32; 4]; 4],
    params: [f32; 4],
}

pub const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Draws one particle field per frame.
pub struct ParticlePass {
    pipeline: wgpu::RenderPipeline,
    field_buffer: wgpu::Buffer,
    field_bind_group: wgpu::BindGroup,
    instances: Option<(wgpu::Buffer, u32)>,
}

impl ParticlePass {
    /// Shares the mesh pass's scene bind group layout so both read the same camera slot.
    pub fn new(gpu: &GpuContext, mesh_pass: &MeshPass) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particles.wgsl").into()),
        });

        let field_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Field Uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let field_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Particle Field Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let field_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Field Bind Group"),
            layout: &field_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: field_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[mesh_pass.scene_layout(), &field_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[ParticleInstance::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(ADDITIVE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            field_buffer,
            field_bind_group,
            instances: None,
        }
    }

    /// Uploads the instance buffer on first use and writes the field's transform.
    pub fn prepare(&mut self, gpu: &GpuContext, field: &ParticleField, model: Mat4) {
        if self.instances.is_none() && !field.is_empty() {
            use wgpu::util::DeviceExt;

            let instances = ParticleInstance::from_field(field);
            let buffer = gpu
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Particle Instances"),
                    contents: bytemuck::cast_slice(&instances),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            log::debug!("[particles] uploaded {} instances", instances.len());
            self.instances = Some((buffer, instances.len() as u32));
        }

        let uniforms = FieldUniforms {
            model: model.to_cols_array_2d(),
            params: [field.size, field.opacity, 0.0, 0.0],
        };
        gpu.queue
            .write_buffer(&self.field_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    pub fn render(&self, mesh_pass: &MeshPass, render_pass: &mut wgpu::RenderPass, scene_slot: u32) {
        let Some((buffer, count)) = &self.instances else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, mesh_pass.scene_bind_group(), &[mesh_pass.scene_offset(scene_slot)]);
        render_pass.set_bind_group(1, &self.field_bind_group, &[]);
        render_pass.set_vertex_buffer(0, buffer.slice(..));
        render_pass.draw(0..6, 0..*count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn instances_mirror_the_field() {
        let field = ParticleField::generate(&mut StdRng::seed_from_u64(2), 50, 10.0);
        let instances = ParticleInstance::from_field(&field);
        assert_eq!(instances.len(), 50);
        assert_eq!(instances[7].position, field.positions()[7]);
        for inst in &instances {
            assert_eq!(inst.color[2], 1.0);
        }
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 24);
    }
}
