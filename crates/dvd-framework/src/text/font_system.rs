use std::path::Path;

use crate::coords::Vec2;

/// Error returned when a font cannot be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font data: {0}")]
    Parse(String),
}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. The system is passed to
/// `TextRenderer::render` each frame so new glyphs can be rasterized on demand.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Reads and parses a font file.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<FontId, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let id = self.load_font(&bytes)?;
        log::debug!("loaded font {} as {id:?}", path.display());
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Computes the bounding box of a laid-out string as `(width, height)`
    /// in logical pixels.
    ///
    /// Width uses the pen position after each glyph rather than the bitmap edge,
    /// so trailing spaces and side bearings are included.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs.iter().map(|g| g.y + g.height as f32).fold(size, f32::max);
        Vec2::new(w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font(b"definitely not a font").unwrap_err();
        assert!(matches!(err, FontLoadError::Parse(_)));
        assert!(fonts.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut fonts = FontSystem::new();
        let err = fonts
            .load_font_file("/nonexistent/dvd-bounce/font.ttf")
            .unwrap_err();
        assert!(matches!(err, FontLoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/dvd-bounce/font.ttf"));
    }

    #[test]
    fn measuring_with_unknown_font_falls_back_to_line_height() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("walls: 3", FontId(0), 20.0, None);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 24.0).abs() < 1e-4);
    }
}
