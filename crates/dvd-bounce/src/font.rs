use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dvd_framework::coords::Vec2;
use dvd_framework::paint::Color;
use dvd_framework::render::shapes::text::TextRenderer;
use dvd_framework::render::{RenderCtx, RenderTarget, Shader};
use dvd_framework::scene::{DrawList, TextCmd, ZIndex};
use dvd_framework::text::{FontId, FontSystem};

/// Searched in order when no font path is configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Overlay text: one loaded font plus the glyph renderer that draws it.
pub struct FontRenderer {
    fonts: FontSystem,
    font: FontId,
    renderer: TextRenderer,
}

impl FontRenderer {
    /// Loads `path`, or the first system font found when `None`.
    pub fn load(shader: Shader, path: Option<&Path>) -> Result<Self> {
        let mut fonts = FontSystem::new();

        let font = match path {
            Some(p) => fonts
                .load_font_file(p)
                .with_context(|| format!("failed to load font {}", p.display()))?,
            None => {
                let found = SYSTEM_FONTS
                    .iter()
                    .map(PathBuf::from)
                    .find(|p| p.is_file())
                    .context("no system font found; pass --font <path>")?;
                fonts
                    .load_font_file(&found)
                    .with_context(|| format!("failed to load font {}", found.display()))?
            }
        };

        log::info!("font loaded ({} face(s))", fonts.len());

        Ok(Self { fonts, font, renderer: TextRenderer::new(shader) })
    }

    /// Records `text` with its top-left at `origin`.
    pub fn push_text(
        &self,
        list: &mut DrawList,
        z: ZIndex,
        text: impl Into<String>,
        origin: Vec2,
        size: f32,
        color: Color,
    ) {
        list.push_text(z, TextCmd::new(text, self.font, size, origin).with_color(color));
    }

    pub fn measure(&self, text: &str, size: f32) -> Vec2 {
        self.fonts.measure_text(text, self.font, size, None)
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &mut DrawList) {
        self.renderer.render(ctx, target, list, &self.fonts);
    }
}
