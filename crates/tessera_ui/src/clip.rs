//! Nested clip regions.
//!
//! Every push is intersected with the current top, so the effective clip is
//! always the intersection of everything on the stack. A stack lives for one
//! draw pass only and must be empty again when the pass returns.

use crate::geometry::{Rect, Vec2};
use crate::render::{Renderer, TextureId};
use crate::style::Color;

/// Stack of effective (already intersected) clip rectangles.
#[derive(Debug, Default)]
pub struct ClipStack {
    stack: Vec<Rect>,
}

impl ClipStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self { stack: Vec::with_capacity(16) }
    }

    /// Pushes `rect` intersected with the current top and returns the
    /// resulting effective clip.
    pub fn push(&mut self, rect: Rect) -> Rect {
        let effective = match self.stack.last() {
            Some(top) => rect.clamped_intersection(top),
            None => rect,
        };
        self.stack.push(effective);
        effective
    }

    /// Discards the top and returns the clip to resume, if any.
    pub fn pop(&mut self) -> Option<Rect> {
        self.stack.pop();
        self.stack.last().copied()
    }

    /// The effective clip.
    #[must_use]
    pub fn current(&self) -> Option<Rect> {
        self.stack.last().copied()
    }

    /// Number of nested clips.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// A renderer paired with the clip stack of the current draw pass.
pub struct Painter<'a> {
    renderer: &'a mut dyn Renderer,
    clip: ClipStack,
}

impl<'a> Painter<'a> {
    /// Starts a draw pass with an empty clip stack.
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self { renderer, clip: ClipStack::new() }
    }

    /// Begins clipping to `rect` intersected with the current clip.
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = self.clip.push(rect);
        self.renderer.begin_clip(effective);
    }

    /// Leaves the innermost clip, resuming the enclosing one or ending
    /// clipping when none is left.
    pub fn pop_clip(&mut self) {
        if self.clip.depth() == 0 {
            tracing::warn!("clip stack underflow");
            return;
        }
        match self.clip.pop() {
            Some(resume) => self.renderer.begin_clip(resume),
            None => self.renderer.end_clip(),
        }
    }

    /// The effective clip.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip.current()
    }

    /// Nesting depth of the clip stack.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clip.depth()
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.renderer.fill_rect(bounds, color);
    }

    /// Draws a texture.
    pub fn draw_texture(&mut self, texture: TextureId, bounds: Rect, tint: Color) {
        self.renderer.draw_texture(texture, bounds, tint);
    }

    /// Draws text.
    pub fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.renderer.draw_text(text, position, font_size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, RenderCommand};

    #[test]
    fn test_clip_stack_intersects() {
        let mut stack = ClipStack::new();
        stack.push(Rect::new(0.0, 0.0, 100.0, 100.0));
        let inner = stack.push(Rect::new(50.0, 50.0, 100.0, 100.0));

        assert_eq!(inner, Rect::new(50.0, 50.0, 50.0, 50.0));
        assert_eq!(stack.pop(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_child_outside_parent_is_empty() {
        let mut stack = ClipStack::new();
        stack.push(Rect::new(0.0, 0.0, 50.0, 50.0));
        let inner = stack.push(Rect::new(200.0, 10.0, 30.0, 30.0));

        assert!(inner.is_empty());
        assert!(inner.width >= 0.0 && inner.height >= 0.0);
    }

    #[test]
    fn test_painter_resumes_and_ends() {
        let mut renderer = RecordingRenderer::new();
        {
            let mut painter = Painter::new(&mut renderer);
            painter.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
            painter.push_clip(Rect::new(5.0, 5.0, 10.0, 10.0));
            painter.pop_clip();
            painter.pop_clip();
            painter.pop_clip();
            assert_eq!(painter.clip_depth(), 0);
        }

        assert_eq!(
            renderer.commands(),
            &[
                RenderCommand::BeginClip { bounds: Rect::new(0.0, 0.0, 10.0, 10.0) },
                RenderCommand::BeginClip { bounds: Rect::new(5.0, 5.0, 5.0, 5.0) },
                RenderCommand::BeginClip { bounds: Rect::new(0.0, 0.0, 10.0, 10.0) },
                RenderCommand::EndClip,
            ]
        );
    }
}
