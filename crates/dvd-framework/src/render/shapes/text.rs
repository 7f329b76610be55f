use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget, Shader};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    begin_load_pass, create_projection_ubo, projection_layout_entry, quad_pipeline,
    write_projection, InstanceBuffer, QuadBuffers,
};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

// ── atlas packing ─────────────────────────────────────────────────────────

/// Region of the atlas in normalized texture coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
struct AtlasSlot {
    x: u32,
    y: u32,
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer for a square glyph atlas.
///
/// Glyphs fill a row left to right; a glyph that does not fit starts a new row
/// below the tallest glyph of the current one. Once a glyph fails to fit
/// vertically the atlas is marked full and every later request is rejected.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    fn place(&mut self, w: u32, h: u32) -> Option<AtlasSlot> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let (x, y) = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);

        let s = self.size as f32;
        Some(AtlasSlot {
            x,
            y,
            uv_min: [x as f32 / s, y as f32 / s],
            uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
        })
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Keeps a 1024 × 1024 R8Unorm glyph atlas. Glyphs are rasterized on first use
/// via fontdue and cached for the renderer's lifetime, keyed by
/// `GlyphRasterConfig` (font, glyph index, pixel size).
pub struct TextRenderer {
    shader: Shader,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,

    atlas: Option<wgpu::Texture>,
    packer: ShelfPacker,
    warned_full: bool,
    glyph_cache: HashMap<GlyphRasterConfig, AtlasSlot>,

    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
    scratch: Vec<GlyphInstance>,

    layout: Layout<()>,
}

impl TextRenderer {
    /// Creates a renderer that will compile `shader` on first use.
    pub fn new(shader: Shader) -> Self {
        Self {
            shader,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            projection_ubo: None,
            atlas: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            warned_full: false,
            glyph_cache: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::default(),
            scratch: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    /// Renders all `DrawCmd::Text` entries in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        font_system: &FontSystem,
    ) {
        self.ensure_atlas(ctx);
        self.scratch.clear();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            let Some(font) = font_system.get(cmd.font) else {
                log::warn!("TextRenderer: unknown {:?}, skipping", cmd.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x,
                y: cmd.origin.y,
                max_width: cmd.max_width,
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size, 0));

            let color = cmd.color.to_array();
            let glyphs: Vec<_> = self
                .layout
                .glyphs()
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| (g.key, g.x, g.y, g.width as f32, g.height as f32))
                .collect();

            for (key, x, y, w, h) in glyphs {
                let Some(slot) = self.glyph_slot(ctx, font, key) else { continue };
                self.scratch.push(GlyphInstance {
                    dst_min: [x, y],
                    dst_max: [x + w, y + h],
                    uv_min: slot.uv_min,
                    uv_max: slot.uv_max,
                    color,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        let Some(ubo) = self.projection_ubo.as_ref() else { return };
        write_projection(ctx, ubo);

        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "dvd text"));
        }

        let count = self.scratch.len() as u32;
        let Some(instance_vbo) = self.instances.upload(ctx, "dvd text instance vbo", &self.scratch)
        else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };

        let mut rpass = begin_load_pass(target, "dvd text pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..count);
    }

    /// Returns the atlas slot for `key`, rasterizing and uploading it on first use.
    fn glyph_slot(
        &mut self,
        ctx: &RenderCtx<'_>,
        font: &fontdue::Font,
        key: GlyphRasterConfig,
    ) -> Option<AtlasSlot> {
        if let Some(slot) = self.glyph_cache.get(&key) {
            return Some(*slot);
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let (w, h) = (metrics.width as u32, metrics.height as u32);

        let Some(slot) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!(
                    "TextRenderer: glyph atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); \
                     some glyphs will not be rendered"
                );
                self.warned_full = true;
            }
            return None;
        };

        let atlas = self.atlas.as_ref()?;
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: slot.x, y: slot.y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        self.glyph_cache.insert(key, slot);
        Some(slot)
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas.is_some() {
            return;
        }

        self.atlas = Some(ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("dvd text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        }));
        self.packer = ShelfPacker::new(ATLAS_SIZE);
        self.glyph_cache.clear();
        self.bind_group = None;
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let module = self.shader.create_module(ctx.device);
        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("dvd text bgl"),
            entries: &[
                projection_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let pipeline = quad_pipeline(ctx, "dvd text pipeline", &module, &bgl, GlyphInstance::layout());

        log::debug!("text pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.projection_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.projection_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(atlas) = self.atlas.as_ref() else { return };

        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("dvd text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        let ubo = create_projection_ubo(ctx.device, "dvd text projection ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dvd text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        self.projection_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
