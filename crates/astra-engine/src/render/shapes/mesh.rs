use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};
use crate::geom::tess::{self, Triangle};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{logical_clip_to_scissor, premul_alpha_blend, ViewportUniform};

/// Renders `DrawCmd::Rect` and `DrawCmd::Polygon` as colored triangles.
///
/// Every command is triangulated on the CPU each frame (see `geom::tess`)
/// into a single vertex buffer; consecutive items sharing a clip rect are
/// drawn with one call under one scissor rect.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    /// CPU staging reused across frames.
    scratch: MeshBatches,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.scratch.rebuild(draw_list);
        if self.scratch.vertices.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.ensure_vertex_capacity(ctx, self.scratch.vertices.len());

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            let u = ViewportUniform::new(ctx.viewport);
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        let Some(vbo) = self.vertex_vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.scratch.vertices));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("astra mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        for batch in &self.scratch.batches {
            if let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(batch.clip, ctx.viewport, ctx.scale_factor)
            {
                rpass.set_scissor_rect(sx, sy, sw, sh);
                rpass.draw(batch.vertices.clone(), 0..1);
            }
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("astra mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("astra mesh bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(ViewportUniform::binding_size()),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("astra mesh pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("astra mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Fans and strokes produce mixed winding.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings belong to the old layout.
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("astra mesh viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("astra mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(1024);
        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("astra mesh vbo"),
            size: (new_cap * std::mem::size_of::<MeshVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
        log::debug!("mesh vertex buffer grown to {new_cap} vertices");
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct MeshVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// A run of vertices drawn under one scissor rect.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    clip: Option<Rect>,
    vertices: Range<u32>,
}

/// Triangulated draw list, ready for upload.
#[derive(Debug, Default)]
struct MeshBatches {
    vertices: Vec<MeshVertex>,
    batches: Vec<Batch>,
    triangles: Vec<Triangle>,
}

impl MeshBatches {
    fn rebuild(&mut self, draw_list: &mut DrawList) {
        self.vertices.clear();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            let start = self.vertices.len() as u32;
            match &item.cmd {
                DrawCmd::Rect(cmd) => {
                    if cmd.rect.normalized().is_empty() {
                        continue;
                    }
                    for t in tess::rect_triangles(cmd.rect) {
                        push_triangle(&mut self.vertices, &t, cmd.color);
                    }
                }
                DrawCmd::Polygon(cmd) => {
                    if let Some(fill) = cmd.fill {
                        self.triangles.clear();
                        tess::fill_fan(&cmd.points, &mut self.triangles);
                        for t in &self.triangles {
                            push_triangle(&mut self.vertices, t, fill);
                        }
                    }
                    if let Some(border) = cmd.border {
                        self.triangles.clear();
                        tess::stroke_closed(&cmd.points, border.width, &mut self.triangles);
                        for t in &self.triangles {
                            push_triangle(&mut self.vertices, t, border.color);
                        }
                    }
                }
            }
            let end = self.vertices.len() as u32;
            if end == start {
                continue;
            }

            match self.batches.last_mut() {
                Some(last) if last.clip == item.clip_rect && last.vertices.end == start => {
                    last.vertices.end = end;
                }
                _ => self.batches.push(Batch { clip: item.clip_rect, vertices: start..end }),
            }
        }
    }
}

fn push_triangle(out: &mut Vec<MeshVertex>, t: &Triangle, color: Color) {
    let color = color.to_array();
    out.extend(t.iter().map(|p: &Vec2| MeshVertex { pos: [p.x, p.y], color }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::StarShape;
    use crate::scene::{Border, ZIndex};

    fn gold() -> Color {
        Color::from_straight(1.0, 0.8, 0.1, 1.0)
    }

    #[test]
    fn rect_becomes_two_triangles() {
        let mut dl = DrawList::new();
        dl.push_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 4.0, 4.0), gold());
        let mut m = MeshBatches::default();
        m.rebuild(&mut dl);
        assert_eq!(m.vertices.len(), 6);
        assert_eq!(m.batches, vec![Batch { clip: None, vertices: 0..6 }]);
    }

    #[test]
    fn empty_rect_is_skipped() {
        let mut dl = DrawList::new();
        dl.push_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 0.0, 4.0), gold());
        let mut m = MeshBatches::default();
        m.rebuild(&mut dl);
        assert!(m.vertices.is_empty());
        assert!(m.batches.is_empty());
    }

    #[test]
    fn filled_and_stroked_star_emits_both_meshes() {
        let pts = StarShape::default().points(Rect::new(0.0, 0.0, 20.0, 20.0));
        let mut dl = DrawList::new();
        dl.push_polygon(ZIndex::new(0), pts, Some(gold()), Some(Border::new(1.0, gold())));
        let mut m = MeshBatches::default();
        m.rebuild(&mut dl);
        // fan: 10 triangles; stroke: 10 quads + 10 joins, 2 triangles each.
        assert_eq!(m.vertices.len(), (10 + 40) * 3);
    }

    #[test]
    fn clip_changes_split_batches() {
        let mut dl = DrawList::new();
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        dl.push_rect(ZIndex::new(0), r, gold());
        dl.push_rect(ZIndex::new(0), r, gold());
        dl.push_clip(Rect::new(0.0, 0.0, 2.0, 4.0));
        dl.push_rect(ZIndex::new(0), r, gold());
        dl.pop_clip();
        dl.push_rect(ZIndex::new(0), r, gold());

        let mut m = MeshBatches::default();
        m.rebuild(&mut dl);
        let ranges: Vec<_> = m.batches.iter().map(|b| b.vertices.clone()).collect();
        assert_eq!(ranges, vec![0..12, 12..18, 18..24]);
        assert_eq!(m.batches[1].clip, Some(Rect::new(0.0, 0.0, 2.0, 4.0)));
    }
}
