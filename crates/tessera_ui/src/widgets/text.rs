//! Static text labels.

use crate::clip::Painter;
use crate::config::UiConfig;
use crate::geometry::Vec2;
use crate::style::Color;
use crate::widget::{DrawCtx, NodeId, UiTree, Widget};

/// Horizontal placement of text inside its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Middle,
    /// Flush right.
    Right,
}

/// A single line of text. The node is sized to the measured text and
/// refuses to shrink below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    text: String,
    font_size: f32,
    align: Align,
    color: Color,
}

impl Text {
    /// Creates left-aligned text in the configured font size and colour.
    #[must_use]
    pub fn new(config: &UiConfig, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: config.font_size,
            align: Align::Left,
            color: config.palette.text,
        }
    }

    /// Sets the font size.
    #[must_use]
    pub const fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the alignment.
    #[must_use]
    pub const fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Sets the colour.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Creates a detached node sized to the text.
    pub fn build(self, tree: &mut UiTree, offset: Vec2) -> NodeId {
        let size = tree.measure_text(&self.text, self.font_size);
        tree.create(offset, size, self)
    }

    /// Shorthand for a default-styled label at the origin.
    pub fn label(tree: &mut UiTree, text: impl Into<String>) -> NodeId {
        Self::new(tree.config(), text).build(tree, Vec2::ZERO)
    }

    /// Replaces the text of a text node, growing the node if needed.
    pub fn set_text(tree: &mut UiTree, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        let Some(font_size) = tree.widget::<Self>(id).map(|widget| widget.font_size) else {
            return;
        };
        let measured = tree.measure_text(&text, font_size);
        if let Some(widget) = tree.widget_mut::<Self>(id) {
            widget.text = text;
        }
        if let Some(node) = tree.node_mut(id) {
            node.size = Vec2::new(node.size.x.max(measured.x), node.size.y.max(measured.y));
        }
    }

    /// The text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Font size.
    #[must_use]
    pub const fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl Widget for Text {
    fn draw(&self, ctx: &DrawCtx<'_>, painter: &mut Painter<'_>) {
        let measured = ctx.tree.measure_text(&self.text, self.font_size);
        let slack = (ctx.bounds.width - measured.x).max(0.0);
        let dx = match self.align {
            Align::Left => 0.0,
            Align::Middle => slack / 2.0,
            Align::Right => slack,
        };
        painter.draw_text(&self.text, ctx.bounds.pos() + Vec2::new(dx, 0.0), self.font_size, self.color);
    }

    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, size: Vec2) -> bool {
        tree.set_offset(me, offset);
        let measured = tree.measure_text(&self.text, self.font_size);
        if size.x < measured.x || size.y < measured.y {
            return false;
        }
        tree.set_size(me, size);
        true
    }
}
