//! Colours and style decorators.
//!
//! A decorator is attached to a node and wraps that node's own draw:
//! `draw_below` hooks run in list order before the node draws,
//! `draw_above` hooks run in reverse list order after it. `on_attach`
//! runs once when the decorator is added and is the only place a decorator
//! may change geometry.

use serde::{Deserialize, Serialize};

use crate::clip::Painter;
use crate::geometry::{Rect, Vec2};
use crate::render::TextureId;
use crate::widget::Node;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Off-white used for window surfaces.
    pub const OFF_WHITE: Self = Self::rgb8(245, 245, 245);
    /// Light gray.
    pub const LIGHT_GRAY: Self = Self::rgb8(200, 200, 200);
    /// Mid gray.
    pub const GRAY: Self = Self::rgb8(130, 130, 130);
    /// Dark gray.
    pub const DARK_GRAY: Self = Self::rgb8(80, 80, 80);
    /// Blue.
    pub const BLUE: Self = Self::rgb8(0, 121, 241);
    /// Red.
    pub const RED: Self = Self::rgb8(230, 41, 55);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Channels in RGBA order, as vertex attributes expect them.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Which edges a [`Border`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    /// Top strip.
    pub top: bool,
    /// Bottom strip.
    pub bottom: bool,
    /// Left strip.
    pub left: bool,
    /// Right strip.
    pub right: bool,
}

impl Edges {
    /// All four edges.
    pub const ALL: Self = Self { top: true, bottom: true, left: true, right: true };
}

impl Default for Edges {
    fn default() -> Self {
        Self::ALL
    }
}

/// Edge strips drawn over the node.
///
/// Attaching a border grows the node by `margin` on every side so the
/// strips sit outside the original content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Strip thickness.
    pub margin: f32,
    /// Strip colour.
    pub color: Color,
    /// Enabled edges.
    pub edges: Edges,
}

impl Border {
    /// Creates a border on all four edges.
    #[must_use]
    pub const fn new(margin: f32, color: Color) -> Self {
        Self { margin, color, edges: Edges::ALL }
    }

    fn draw(&self, bounds: Rect, painter: &mut Painter<'_>) {
        let m = self.margin;
        if self.edges.top {
            painter.fill_rect(Rect::new(bounds.x, bounds.y, bounds.width, m), self.color);
        }
        if self.edges.bottom {
            painter.fill_rect(Rect::new(bounds.x, bounds.bottom() - m, bounds.width, m), self.color);
        }
        if self.edges.left {
            painter.fill_rect(Rect::new(bounds.x, bounds.y, m, bounds.height), self.color);
        }
        if self.edges.right {
            painter.fill_rect(Rect::new(bounds.right() - m, bounds.y, m, bounds.height), self.color);
        }
    }
}

/// What a [`Clip`] rectangle is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipAnchor {
    /// Screen coordinates.
    #[default]
    Screen,
    /// The node's own global position.
    Node,
    /// The parent's global position. The clip stays put while the node
    /// moves inside its parent, and follows the parent wherever it goes.
    Parent,
}

/// An explicit clip around the node's own draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    /// Clip rectangle.
    pub view: Rect,
    /// Origin `view` is measured from, resolved at draw time.
    pub anchor: ClipAnchor,
}

impl Clip {
    /// Screen rectangle of the clip for a node at `bounds` whose parent
    /// sits at `parent_origin`.
    #[must_use]
    pub fn resolve(&self, bounds: Rect, parent_origin: Vec2) -> Rect {
        match self.anchor {
            ClipAnchor::Screen => self.view,
            ClipAnchor::Node => self.view.translate(bounds.pos()),
            ClipAnchor::Parent => self.view.translate(parent_origin),
        }
    }
}

/// A style decorator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    /// Opaque fill behind the node.
    Background(Color),
    /// Edge strips in front of the node.
    Border(Border),
    /// Texture stretched to the node's bounds, behind the node.
    Image(TextureId),
    /// Explicit clip rectangle, see [`ClipAnchor`].
    Clip(Clip),
    /// Fixed absolute view rectangle used to window oversized content.
    Scroll(Rect),
}

impl Style {
    /// Runs once when the decorator is attached to `node`.
    pub fn on_attach(&self, node: &mut Node) {
        if let Self::Border(border) = self {
            let m = border.margin;
            node.offset -= Vec2::new(m, m);
            node.size += Vec2::new(2.0 * m, 2.0 * m);
        }
    }

    /// Runs before the node's own draw. `bounds` are the node's global
    /// bounds, `parent_origin` its parent's global position.
    pub fn draw_below(&self, bounds: Rect, parent_origin: Vec2, painter: &mut Painter<'_>) {
        match self {
            Self::Background(color) => painter.fill_rect(bounds, *color),
            Self::Image(texture) => painter.draw_texture(*texture, bounds, Color::WHITE),
            Self::Clip(clip) => painter.push_clip(clip.resolve(bounds, parent_origin)),
            Self::Scroll(view) => painter.push_clip(*view),
            Self::Border(_) => {}
        }
    }

    /// Runs after the node's own draw, in reverse decorator order.
    pub fn draw_above(&self, bounds: Rect, painter: &mut Painter<'_>) {
        match self {
            Self::Border(border) => border.draw(bounds, painter),
            Self::Clip(_) | Self::Scroll(_) => painter.pop_clip(),
            Self::Background(_) | Self::Image(_) => {}
        }
    }
}
