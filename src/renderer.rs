//! Frame rendering for a list of stages.
//!
//! The first full-window stage clears the frame; every stage then gets its own render pass
//! with a fresh depth buffer and a viewport. Inset stages sit in a row along the bottom
//! edge of the window.

use std::cmp::Ordering;

use glam::Vec3;

use crate::color::Color;
use crate::gpu::GpuContext;
use crate::mesh::{MeshCache, MeshId};
use crate::mesh_pass::{DrawCall, MeshPass, ModelUniforms, SceneUniforms};
use crate::particle_pass::ParticlePass;
use crate::scene::Stage;

/// Gap between insets and around the inset row, in pixels.
pub const INSET_MARGIN: f32 = 16.0;
/// Maximum inset height as a fraction of the window height.
pub const INSET_HEIGHT_FRACTION: f32 = 0.28;

/// A rectangle of the surface in pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Where a stage is drawn. `None` if the window is too small to hold it.
pub fn viewport_for(inset: Option<usize>, inset_count: usize, width: u32, height: u32) -> Option<Viewport> {
    let (w, h) = (width as f32, height as f32);
    if w < 1.0 || h < 1.0 {
        return None;
    }
    let Some(slot) = inset else {
        return Some(Viewport {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
        });
    };

    let n = inset_count.max(slot + 1) as f32;
    let inset_w = ((w - INSET_MARGIN * (n + 1.0)) / n).floor();
    let inset_h = (h * INSET_HEIGHT_FRACTION).min(inset_w * 0.75).floor();
    if inset_w < 1.0 || inset_h < 1.0 {
        return None;
    }
    Some(Viewport {
        x: INSET_MARGIN + slot as f32 * (inset_w + INSET_MARGIN),
        y: h - INSET_MARGIN - inset_h,
        width: inset_w,
        height: inset_h,
    })
}

struct PlannedDraw {
    mesh: MeshId,
    slot: u32,
    transparent: bool,
    distance: f32,
}

struct StagePlan {
    viewport: Viewport,
    scene_slot: u32,
    clear: Option<Color>,
    draws: Vec<PlannedDraw>,
    particles: bool,
}

/// Owns the passes and the mesh cache.
pub struct Renderer {
    mesh_pass: MeshPass,
    particle_pass: ParticlePass,
    meshes: MeshCache,
}

impl Renderer {
    pub fn new(gpu: &GpuContext) -> Self {
        let mesh_pass = MeshPass::new(gpu);
        let particle_pass = ParticlePass::new(gpu, &mesh_pass);
        Self {
            mesh_pass,
            particle_pass,
            meshes: MeshCache::new(),
        }
    }

    /// Renders and presents one frame.
    pub fn render<S: Stage + ?Sized>(
        &mut self,
        gpu: &GpuContext,
        stages: &[Box<S>],
    ) -> Result<(), wgpu::SurfaceError> {
        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.mesh_pass.ensure_depth_size(gpu);

        let inset_count = stages
            .iter()
            .filter_map(|s| s.inset())
            .max()
            .map_or(0, |slot| slot + 1);

        let mut scene_uniforms = Vec::with_capacity(stages.len());
        let mut model_uniforms = Vec::new();
        let mut plans = Vec::with_capacity(stages.len());

        for stage in stages {
            let Some(viewport) = viewport_for(stage.inset(), inset_count, gpu.width(), gpu.height())
            else {
                continue;
            };
            let camera = stage.camera();
            let scene_slot = scene_uniforms.len() as u32;
            scene_uniforms.push(SceneUniforms::new(camera, viewport.aspect(), stage.lighting()));

            let mut draws = Vec::new();
            for (matrix, shape) in stage.world_shapes() {
                let material = shape.material().get();
                let mesh = self.meshes.get_or_upload(gpu, shape.kind());
                draws.push(PlannedDraw {
                    mesh,
                    slot: model_uniforms.len() as u32,
                    transparent: material.transparent,
                    distance: camera.position.distance(matrix.transform_point3(Vec3::ZERO)),
                });
                model_uniforms.push(ModelUniforms::new(matrix, &material));
            }
            // opaque in scene order, then transparent far to near
            draws.sort_by(|a, b| {
                a.transparent.cmp(&b.transparent).then_with(|| {
                    if a.transparent {
                        b.distance.total_cmp(&a.distance)
                    } else {
                        Ordering::Equal
                    }
                })
            });

            let particles = match stage.particles() {
                Some((field, model)) => {
                    self.particle_pass.prepare(gpu, field, model);
                    true
                }
                None => false,
            };

            plans.push(StagePlan {
                viewport,
                scene_slot,
                clear: stage.clear_color(),
                draws,
                particles,
            });
        }

        self.mesh_pass
            .write_frame(gpu, &scene_uniforms, &model_uniforms);

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        if plans.is_empty() {
            Self::clear(&mut encoder, &view, Color::BLACK);
        }

        for (index, plan) in plans.iter().enumerate() {
            let load = match (index, plan.clear) {
                (_, Some(color)) => wgpu::LoadOp::Clear(color.to_linear().into()),
                (0, None) => wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                _ => wgpu::LoadOp::Load,
            };
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Stage Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.mesh_pass.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let vp = plan.viewport;
            render_pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);

            let calls: Vec<DrawCall> = plan
                .draws
                .iter()
                .map(|d| DrawCall {
                    mesh: self.meshes.get(d.mesh),
                    model_slot: d.slot,
                    transparent: d.transparent,
                })
                .collect();
            let split = calls.partition_point(|c| !c.transparent);
            let (opaque, transparent) = calls.split_at(split);

            self.mesh_pass.render(&mut render_pass, plan.scene_slot, opaque);
            if plan.particles {
                self.particle_pass
                    .render(&self.mesh_pass, &mut render_pass, plan.scene_slot);
            }
            self.mesh_pass
                .render(&mut render_pass, plan.scene_slot, transparent);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn clear(encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, color: Color) {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color.to_linear().into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_fills_the_window() {
        let vp = viewport_for(None, 4, 1280, 800).unwrap();
        assert_eq!(vp, Viewport { x: 0.0, y: 0.0, width: 1280.0, height: 800.0 });
        assert!(viewport_for(None, 0, 0, 800).is_none());
    }

    #[test]
    fn insets_share_the_bottom_row() {
        let vps: Vec<Viewport> = (0..4)
            .map(|slot| viewport_for(Some(slot), 4, 1280, 800).unwrap())
            .collect();
        for pair in vps.windows(2) {
            assert_eq!(pair[0].y, pair[1].y);
            assert!(pair[0].x + pair[0].width + INSET_MARGIN <= pair[1].x + 1e-3);
        }
        let last = vps[3];
        assert!(last.x + last.width <= 1280.0 - INSET_MARGIN + 1e-3);
        assert!((last.y + last.height - (800.0 - INSET_MARGIN)).abs() < 1e-3);
        assert!(last.height <= 800.0 * INSET_HEIGHT_FRACTION);
    }

    #[test]
    fn tiny_windows_drop_insets() {
        assert!(viewport_for(Some(3), 4, 60, 40).is_none());
    }
}
