use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// A run of text laid out from a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Pixel size of the font, logical pixels.
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
    /// Wrap width; `None` keeps the text on one line.
    pub max_width: Option<f32>,
}

impl TextCmd {
    /// White, unwrapped text.
    pub fn new(text: impl Into<String>, font: FontId, size: f32, origin: Vec2) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            color: Color::WHITE,
            origin,
            max_width: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn wrapped(mut self, max_width: f32) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

impl DrawList {
    pub fn push_text(&mut self, z: ZIndex, cmd: TextCmd) {
        if cmd.text.is_empty() {
            return;
        }
        self.push(z, DrawCmd::Text(cmd));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_color_and_wrap() {
        let cmd = TextCmd::new("hits", FontId(0), 20.0, Vec2::new(10.0, 10.0))
            .with_color(Color::BLACK)
            .wrapped(200.0);
        assert_eq!(cmd.color, Color::BLACK);
        assert_eq!(cmd.max_width, Some(200.0));
    }

    #[test]
    fn empty_text_is_not_recorded() {
        let mut list = DrawList::new();
        list.push_text(ZIndex(0), TextCmd::new("", FontId(0), 20.0, Vec2::zero()));
        assert!(list.is_empty());
    }
}
