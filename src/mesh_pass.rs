//! Lit mesh rendering with depth testing.
//!
//! Two bind groups, both read with dynamic offsets so a whole frame's uniforms are written
//! before the encoder runs:
//! - **Group 0**: per-stage [`SceneUniforms`] (camera, ambient, fog, up to
//!   [`MAX_LIGHTS`] positional lights)
//! - **Group 1**: per-draw [`ModelUniforms`] (model and normal matrices, material)
//!
//! Opaque draws write depth; transparent draws blend over them without writing depth.

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::gpu::GpuContext;
use crate::material::MaterialSpec;
use crate::mesh::{Mesh, Vertex3d};
use crate::scene::{Light, Lighting, MAX_LIGHTS};

/// Offset granularity for dynamic uniform slots; the wgpu default alignment.
pub const UNIFORM_ALIGN: u64 = 256;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const SCENE_SLOT: u64 = 512;
const LIGHT_POINT: f32 = 1.0;
const LIGHT_SPOT: f32 = 2.0;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// xyz position, w = kind (0 unused, 1 point, 2 spot).
    pub position: [f32; 4],
    /// rgb color, w = intensity.
    pub color: [f32; 4],
    /// Spot direction, w = cosine of the cone half-angle.
    pub direction: [f32; 4],
}

impl LightUniform {
    fn from_light(light: &Light) -> Self {
        match *light {
            Light::Ambient { .. } => Self::default(),
            Light::Point {
                color,
                intensity,
                position,
            } => {
                let c = color.to_linear();
                Self {
                    position: position.extend(LIGHT_POINT).to_array(),
                    color: [c.r, c.g, c.b, intensity],
                    direction: [0.0; 4],
                }
            }
            Light::Spot {
                color,
                intensity,
                position,
                target,
                angle,
            } => {
                let c = color.to_linear();
                let dir = (target - position).normalize_or(Vec3::NEG_Y);
                Self {
                    position: position.extend(LIGHT_SPOT).to_array(),
                    color: [c.r, c.g, c.b, intensity],
                    direction: dir.extend(angle.cos()).to_array(),
                }
            }
        }
    }
}

/// Camera and lighting for one stage.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// Summed ambient light.
    pub ambient: [f32; 4],
    /// rgb fog color, w = exp² density (0 disables fog).
    pub fog: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
    pub light_count: u32,
    pub _pad: [u32; 3],
}

impl SceneUniforms {
    pub fn new(camera: &Camera, aspect: f32, lighting: &Lighting) -> Self {
        let view = camera.view_matrix();
        let proj = camera.projection_matrix(aspect);

        let mut lights = [LightUniform::default(); MAX_LIGHTS];
        let mut light_count = 0;
        for (slot, light) in lights.iter_mut().zip(lighting.positional()) {
            *slot = LightUniform::from_light(light);
            light_count += 1;
        }

        let ambient = lighting.ambient().to_linear();
        let fog = lighting.fog.map_or([0.0; 4], |fog| {
            let c = fog.color.to_linear();
            [c.r, c.g, c.b, fog.density]
        });

        Self {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            ambient: [ambient.r, ambient.g, ambient.b, 1.0],
            fog,
            lights,
            light_count,
            _pad: [0; 3],
        }
    }
}

/// Transform and material for one draw.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`.
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb base color, w = effective alpha.
    pub base_color: [f32; 4],
    /// rgb emissive (already scaled by intensity), w = shininess.
    pub emissive: [f32; 4],
    /// x = shading mode (0 phong, 1 flat, 2 unlit).
    pub params: [u32; 4],
}

impl ModelUniforms {
    pub fn new(model: Mat4, material: &MaterialSpec) -> Self {
        let base = material.base_color.to_linear();
        let emissive = material
            .emissive_color
            .to_linear()
            .scaled(material.emissive_intensity);
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            base_color: [base.r, base.g, base.b, material.effective_alpha()],
            emissive: [emissive.r, emissive.g, emissive.b, material.shininess],
            params: [material.shading.shader_flag(), 0, 0, 0],
        }
    }
}

/// Rounds `size` up to the dynamic offset alignment.
pub fn aligned(size: u64, align: u64) -> u64 {
    size.div_ceil(align) * align
}

/// One mesh draw, referencing slots already written with [`MeshPass::write_frame`].
#[derive(Clone, Copy, Debug)]
pub struct DrawCall<'a> {
    pub mesh: &'a Mesh,
    pub model_slot: u32,
    pub transparent: bool,
}

/// A growable uniform buffer read through a dynamic offset.
struct DynamicUniforms {
    label: &'static str,
    stride: u64,
    capacity: u64,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl DynamicUniforms {
    fn new(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        label: &'static str,
        stride: u64,
        binding_size: u64,
        capacity: u64,
    ) -> Self {
        let (buffer, bind_group) = Self::allocate(gpu, layout, label, stride, binding_size, capacity);
        Self {
            label,
            stride,
            capacity,
            buffer,
            bind_group,
        }
    }

    fn allocate(
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        label: &'static str,
        stride: u64,
        binding_size: u64,
        capacity: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(binding_size),
                }),
            }],
        });
        (buffer, bind_group)
    }

    /// Writes `items` into consecutive slots, growing the buffer if needed.
    fn write<T: bytemuck::Pod>(
        &mut self,
        gpu: &GpuContext,
        layout: &wgpu::BindGroupLayout,
        items: &[T],
    ) {
        if items.is_empty() {
            return;
        }
        let needed = items.len() as u64;
        if needed > self.capacity {
            let capacity = needed.next_power_of_two();
            log::debug!("[mesh] growing {} to {} slots", self.label, capacity);
            let binding_size = std::mem::size_of::<T>() as u64;
            let (buffer, bind_group) =
                Self::allocate(gpu, layout, self.label, self.stride, binding_size, capacity);
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = capacity;
        }

        let mut bytes = vec![0u8; (self.stride * needed) as usize];
        for (i, item) in items.iter().enumerate() {
            let start = i * self.stride as usize;
            let raw = bytemuck::bytes_of(item);
            bytes[start..start + raw.len()].copy_from_slice(raw);
        }
        gpu.queue.write_buffer(&self.buffer, 0, &bytes);
    }

    fn offset(&self, slot: u32) -> u32 {
        (slot as u64 * self.stride) as u32
    }
}

fn uniform_layout(gpu: &GpuContext, label: &str, min_size: u64) -> wgpu::BindGroupLayout {
    gpu.device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(min_size),
                },
                count: None,
            }],
        })
}

/// Renders lit meshes into the current render pass.
pub struct MeshPass {
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    scene_layout: wgpu::BindGroupLayout,
    model_layout: wgpu::BindGroupLayout,
    scenes: DynamicUniforms,
    models: DynamicUniforms,
    pub(crate) depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl MeshPass {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let scene_size = std::mem::size_of::<SceneUniforms>() as u64;
        let model_size = std::mem::size_of::<ModelUniforms>() as u64;
        let scene_layout = uniform_layout(gpu, "Scene Bind Group Layout", scene_size);
        let model_layout = uniform_layout(gpu, "Model Bind Group Layout", model_size);

        let scenes = DynamicUniforms::new(gpu, &scene_layout, "Scene Uniforms", SCENE_SLOT, scene_size, 8);
        let model_stride = aligned(model_size, UNIFORM_ALIGN);
        let models = DynamicUniforms::new(gpu, &model_layout, "Model Uniforms", model_stride, model_size, 128);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&scene_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let pipeline = |label: &str, blend: wgpu::BlendState, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs"),
                    buffers: &[Vertex3d::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.config.format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    front_face: wgpu::FrontFace::Ccw,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };
        let opaque_pipeline = pipeline("Mesh Opaque Pipeline", wgpu::BlendState::REPLACE, true);
        let transparent_pipeline =
            pipeline("Mesh Transparent Pipeline", wgpu::BlendState::ALPHA_BLENDING, false);

        let depth_view = Self::create_depth_view(gpu);

        Self {
            opaque_pipeline,
            transparent_pipeline,
            scene_layout,
            model_layout,
            scenes,
            models,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
        }
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreates the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Uploads every stage's scene uniforms and every draw's model uniforms for the frame.
    pub fn write_frame(&mut self, gpu: &GpuContext, scenes: &[SceneUniforms], models: &[ModelUniforms]) {
        self.scenes.write(gpu, &self.scene_layout, scenes);
        self.models.write(gpu, &self.model_layout, models);
    }

    pub(crate) fn scene_layout(&self) -> &wgpu::BindGroupLayout {
        &self.scene_layout
    }

    pub(crate) fn scene_bind_group(&self) -> &wgpu::BindGroup {
        &self.scenes.bind_group
    }

    pub(crate) fn scene_offset(&self, slot: u32) -> u32 {
        self.scenes.offset(slot)
    }

    /// Draws one stage's meshes; opaque calls must come before transparent ones.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass, scene_slot: u32, draws: &[DrawCall]) {
        render_pass.set_bind_group(0, &self.scenes.bind_group, &[self.scenes.offset(scene_slot)]);

        let mut bound_transparent = None;
        for call in draws {
            if bound_transparent != Some(call.transparent) {
                let pipeline = if call.transparent {
                    &self.transparent_pipeline
                } else {
                    &self.opaque_pipeline
                };
                render_pass.set_pipeline(pipeline);
                bound_transparent = Some(call.transparent);
            }
            render_pass.set_bind_group(1, &self.models.bind_group, &[self.models.offset(call.model_slot)]);
            render_pass.set_vertex_buffer(0, call.mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(call.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..call.mesh.index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::scene::Fog;

    #[test]
    fn uniform_sizes_fit_their_slots() {
        assert!(std::mem::size_of::<SceneUniforms>() as u64 <= SCENE_SLOT);
        assert_eq!(SCENE_SLOT % UNIFORM_ALIGN, 0);
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
        assert_eq!(aligned(std::mem::size_of::<ModelUniforms>() as u64, UNIFORM_ALIGN), 256);
        assert_eq!(aligned(257, 256), 512);
    }

    #[test]
    fn scene_uniforms_pack_lights_and_fog() {
        let lighting = Lighting::new()
            .with(Light::ambient(Color::WHITE, 0.5))
            .with(Light::point(Color::CYAN, 2.0, Vec3::new(10.0, 10.0, 10.0)))
            .with(Light::spot(Color::WHITE, 1.0, Vec3::new(0.0, 20.0, 0.0)))
            .fog(Fog {
                color: Color::BLACK,
                density: 0.0008,
            });
        let u = SceneUniforms::new(&Camera::new(), 1.5, &lighting);
        assert_eq!(u.light_count, 2);
        assert_eq!(u.lights[0].position, [10.0, 10.0, 10.0, LIGHT_POINT]);
        assert_eq!(u.lights[0].color[3], 2.0);
        assert_eq!(u.lights[1].position[3], LIGHT_SPOT);
        assert!((u.lights[1].direction[1] + 1.0).abs() < 1e-6);
        assert_eq!(u.fog[3], 0.0008);
        assert!(u.ambient[0] > 0.0 && u.ambient[0] < 0.5);
    }

    #[test]
    fn model_uniforms_carry_material() {
        let mat = MaterialSpec::phong(Color::WHITE)
            .emissive(Color::WHITE)
            .emissive_intensity(0.5)
            .opacity(0.25)
            .flat();
        let u = ModelUniforms::new(Mat4::from_translation(Vec3::X), &mat);
        assert_eq!(u.base_color, [1.0, 1.0, 1.0, 0.25]);
        assert_eq!(u.emissive[0], 0.5);
        assert_eq!(u.params[0], 1);
        assert_eq!(u.model[3][0], 1.0);
    }
}
