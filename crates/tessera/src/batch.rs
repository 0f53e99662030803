//! Vertex batching for GPU hosts.
//!
//! [`BatchRenderer`] lowers the engine's draw calls to quads and groups
//! consecutive quads that share a scissor rectangle and texture into one
//! [`DrawBatch`]. A host uploads [`BatchRenderer::vertex_bytes`] once per
//! frame and issues one draw per batch. Text runs are set aside for the
//! host's glyph pass.

use tessera_ui::{Color, Rect, Renderer, TextureId, Vec2};

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UiVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UiVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}

/// A run of vertices drawn with one scissor and texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawBatch {
    /// Scissor rectangle, `None` for the whole surface.
    pub scissor: Option<Rect>,
    /// Sampled texture, `None` for flat fills.
    pub texture: Option<TextureId>,
    /// Index of the first vertex.
    pub first: usize,
    /// Number of vertices.
    pub count: usize,
}

/// Text queued for the glyph pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// Top-left position.
    pub position: Vec2,
    /// Font size.
    pub font_size: f32,
    /// Text color.
    pub color: Color,
    /// Scissor in effect when the run was drawn.
    pub scissor: Option<Rect>,
}

/// Renderer that turns a frame into vertex batches.
#[derive(Debug, Default)]
pub struct BatchRenderer {
    vertices: Vec<UiVertex>,
    batches: Vec<DrawBatch>,
    texts: Vec<TextRun>,
    scissor: Option<Rect>,
    frames: u64,
}

impl BatchRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(4096),
            batches: Vec::with_capacity(64),
            texts: Vec::with_capacity(64),
            scissor: None,
            frames: 0,
        }
    }

    /// Vertices of the current frame.
    #[must_use]
    pub fn vertices(&self) -> &[UiVertex] {
        &self.vertices
    }

    /// The vertex buffer as bytes for GPU upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Batches of the current frame, in draw order.
    #[must_use]
    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }

    /// Text runs of the current frame, in draw order.
    #[must_use]
    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Number of completed frames.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    fn scissored_out(&self) -> bool {
        self.scissor.is_some_and(|scissor| scissor.is_empty())
    }

    fn push_quad(&mut self, bounds: Rect, texture: Option<TextureId>, color: Color) {
        if bounds.is_empty() || self.scissored_out() {
            return;
        }
        let c = color.to_array();
        let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
        let first = self.vertices.len();
        self.vertices.extend_from_slice(&[
            UiVertex::new(l, t, 0.0, 0.0, c),
            UiVertex::new(r, t, 1.0, 0.0, c),
            UiVertex::new(r, b, 1.0, 1.0, c),
            UiVertex::new(l, t, 0.0, 0.0, c),
            UiVertex::new(r, b, 1.0, 1.0, c),
            UiVertex::new(l, b, 0.0, 1.0, c),
        ]);

        match self.batches.last_mut() {
            Some(batch) if batch.scissor == self.scissor && batch.texture == texture => batch.count += 6,
            _ => self.batches.push(DrawBatch { scissor: self.scissor, texture, first, count: 6 }),
        }
    }
}

impl Renderer for BatchRenderer {
    fn begin_frame(&mut self) {
        self.vertices.clear();
        self.batches.clear();
        self.texts.clear();
        self.scissor = None;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.push_quad(bounds, None, color);
    }

    fn draw_texture(&mut self, texture: TextureId, bounds: Rect, tint: Color) {
        self.push_quad(bounds, Some(texture), tint);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        if self.scissored_out() {
            return;
        }
        self.texts.push(TextRun { text: text.to_owned(), position, font_size, color, scissor: self.scissor });
    }

    fn begin_clip(&mut self, bounds: Rect) {
        self.scissor = Some(bounds);
    }

    fn end_clip(&mut self) {
        self.scissor = None;
    }
}
