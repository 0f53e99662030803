//! Renderer seam.
//!
//! The engine never rasterizes anything itself. It calls into a host
//! [`Renderer`] for fills, textures, text and scissor changes, and into a
//! [`TextMetrics`] for sizing text while the tree is being built.
//! [`RecordingRenderer`] captures the calls as [`RenderCommand`]s.

use crate::geometry::{Rect, Vec2};
use crate::style::Color;

/// Opaque handle to a texture owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Drawing operations the engine consumes from the host.
pub trait Renderer {
    /// Called once before the tree is drawn.
    fn begin_frame(&mut self);

    /// Called once after the tree is drawn.
    fn end_frame(&mut self);

    /// Fills a rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color);

    /// Stretches a texture over `bounds`.
    fn draw_texture(&mut self, texture: TextureId, bounds: Rect, tint: Color);

    /// Draws a run of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color);

    /// Restricts drawing to `bounds`, replacing any previous scissor.
    fn begin_clip(&mut self, bounds: Rect);

    /// Removes the scissor entirely.
    fn end_clip(&mut self);
}

/// Text measurement used during layout.
pub trait TextMetrics {
    /// Returns the width and height of `text` at `font_size`.
    fn measure_text(&self, text: &str, font_size: f32) -> Vec2;
}

/// Fixed-advance metrics for monospace fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size.
    pub advance: f32,
    /// Extra space between glyphs, in pixels.
    pub spacing: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.5, spacing: 2.0 }
    }
}

impl TextMetrics for MonospaceMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&self, text: &str, font_size: f32) -> Vec2 {
        let glyphs = text.chars().count() as f32;
        if glyphs == 0.0 {
            return Vec2::new(0.0, font_size);
        }
        let width = glyphs * font_size * self.advance + (glyphs - 1.0) * self.spacing;
        Vec2::new(width, font_size)
    }
}

/// A recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    FillRect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Textured quad.
    Texture {
        /// Texture handle.
        texture: TextureId,
        /// Bounds.
        bounds: Rect,
        /// Tint color.
        tint: Color,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// Top-left position.
        position: Vec2,
        /// Font size.
        font_size: f32,
        /// Text color.
        color: Color,
    },
    /// Scissor set to `bounds`.
    BeginClip {
        /// Effective clip bounds.
        bounds: Rect,
    },
    /// Scissor removed.
    EndClip,
}

/// Renderer that records every call of the current frame.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
    frames: u64,
    in_frame: bool,
}

impl RecordingRenderer {
    /// Creates a new recording renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            frames: 0,
            in_frame: false,
        }
    }

    /// Commands recorded since the last `begin_frame`.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of completed frames.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Text runs of the current frame, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.commands.clear();
        self.in_frame = true;
    }

    fn end_frame(&mut self) {
        if self.in_frame {
            self.frames += 1;
            self.in_frame = false;
        }
    }

    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.commands.push(RenderCommand::FillRect { bounds, color });
    }

    fn draw_texture(&mut self, texture: TextureId, bounds: Rect, tint: Color) {
        self.commands.push(RenderCommand::Texture { texture, bounds, tint });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.commands.push(RenderCommand::Text {
            text: text.to_owned(),
            position,
            font_size,
            color,
        });
    }

    fn begin_clip(&mut self, bounds: Rect) {
        self.commands.push(RenderCommand::BeginClip { bounds });
    }

    fn end_clip(&mut self) {
        self.commands.push(RenderCommand::EndClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_frame() {
        let mut renderer = RecordingRenderer::new();

        renderer.begin_frame();
        renderer.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::WHITE);
        renderer.draw_text("hi", Vec2::ZERO, 20.0, Color::BLACK);
        renderer.end_frame();

        assert_eq!(renderer.frames(), 1);
        assert_eq!(renderer.commands().len(), 2);
        assert_eq!(renderer.texts().collect::<Vec<_>>(), vec!["hi"]);

        renderer.begin_frame();
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_monospace_metrics() {
        let metrics = MonospaceMetrics { advance: 0.5, spacing: 2.0 };

        assert_eq!(metrics.measure_text("", 20.0), Vec2::new(0.0, 20.0));
        assert_eq!(metrics.measure_text(" ", 20.0), Vec2::new(10.0, 20.0));
        assert_eq!(metrics.measure_text("abc", 20.0), Vec2::new(34.0, 20.0));
    }
}
