use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget, Shader};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    begin_load_pass, create_projection_ubo, projection_layout_entry, quad_pipeline,
    write_projection, InstanceBuffer, QuadBuffers,
};

/// Solid rectangle renderer.
///
/// Geometry is provided as logical pixels and projected in the vertex shader.
/// Color is expected to be linear premultiplied RGBA (`paint::Color`).
/// All rects in a draw list go out in a single instanced draw call.
pub struct RectRenderer {
    shader: Shader,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,

    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    scratch: Vec<RectInstance>,
}

impl RectRenderer {
    /// Creates a renderer that will compile `shader` on first use.
    pub fn new(shader: Shader) -> Self {
        Self {
            shader,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            projection_ubo: None,
            quad: None,
            instances: InstanceBuffer::default(),
            scratch: Vec::new(),
        }
    }

    /// Renders every `DrawCmd::Rect` in `draw_list` into `target`, in paint order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.scratch.clear();
        self.scratch.extend(draw_list.iter_in_paint_order().filter_map(|item| {
            let DrawCmd::Rect(cmd) = &item.cmd else { return None };
            let r = cmd.rect.normalized();
            (!r.is_empty()).then(|| RectInstance {
                origin: [r.origin.x, r.origin.y],
                size: [r.size.x, r.size.y],
                color: cmd.color.to_array(),
            })
        }));

        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.projection_ubo.as_ref() else { return };
        write_projection(ctx, ubo);

        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "dvd rect"));
        }

        let count = self.scratch.len() as u32;
        let Some(instance_vbo) = self.instances.upload(ctx, "dvd rect instance vbo", &self.scratch)
        else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };

        let mut rpass = begin_load_pass(target, "dvd rect pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..count);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let module = self.shader.create_module(ctx.device);
        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("dvd rect bgl"),
            entries: &[projection_layout_entry()],
        });
        let pipeline = quad_pipeline(
            ctx,
            "dvd rect pipeline",
            &module,
            &bind_group_layout,
            RectInstance::layout(),
        );

        log::debug!("rect pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.projection_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.projection_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = create_projection_ubo(ctx.device, "dvd rect projection ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dvd rect bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        self.projection_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_stride_matches_attributes() {
        // origin (8) + size (8) + color (16)
        assert_eq!(RectInstance::layout().array_stride, 32);
        assert_eq!(RectInstance::ATTRS[2].offset, 16);
    }
}
