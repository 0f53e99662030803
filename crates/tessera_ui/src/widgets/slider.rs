//! Value slider.

use crate::clip::Painter;
use crate::focus::{DragEvent, DragHandler};
use crate::geometry::{Axis, Rect, Vec2};
use crate::input::MouseButton;
use crate::pointer::PointerHandler;
use crate::style::Style;
use crate::widget::{DrawCtx, NodeId, UiTree, Widget};

/// Called with the new value whenever it changes.
pub type ChangeCallback = Box<dyn FnMut(&mut UiTree, f32)>;

/// A track with a handle whose position encodes a value in `0.0..=1.0`.
///
/// Clicking jumps to the pointer and claims drag focus; dragging follows
/// the pointer until the button is released.
pub struct Slider {
    axis: Axis,
    value: f32,
    on_change: Option<ChangeCallback>,
}

impl Slider {
    /// Creates a slider at zero.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self { axis, value: 0.0, on_change: None }
    }

    /// Sets the initial value.
    #[must_use]
    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value.clamp(0.0, 1.0);
        self
    }

    /// Sets the change callback.
    #[must_use]
    pub fn with_on_change(mut self, on_change: impl FnMut(&mut UiTree, f32) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Creates a detached slider node.
    pub fn build(self, tree: &mut UiTree, offset: Vec2, size: Vec2) -> NodeId {
        let track = tree.config().palette.primary;
        let id = tree.create_empty(offset, size);
        tree.push_style(id, Style::Background(track));
        tree.set_widget(id, self);
        id
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Track axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    fn seek(&mut self, tree: &mut UiTree, me: NodeId, pointer: Vec2) {
        let Some(bounds) = tree.global_bounds(me) else {
            return;
        };
        let length = bounds.size().along(self.axis);
        if length <= 0.0 {
            return;
        }
        let along = (pointer - bounds.pos()).along(self.axis);
        self.value = (along / length).clamp(0.0, 1.0);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(tree, self.value);
        }
    }
}

impl Widget for Slider {
    fn draw(&self, ctx: &DrawCtx<'_>, painter: &mut Painter<'_>) {
        let config = ctx.tree.config();
        let length = ctx.bounds.size().along(self.axis);
        let handle = length * config.slider_handle_scale;
        let start = self.value * (length - handle);
        let pos = ctx.bounds.pos() + Vec2::ZERO.with_along(self.axis, start);
        let size = ctx.bounds.size().with_along(self.axis, handle);
        painter.fill_rect(Rect::from_pos_size(pos, size), config.palette.secondary);
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }

    fn as_draggable(&mut self) -> Option<&mut dyn DragHandler> {
        Some(self)
    }
}

impl PointerHandler for Slider {
    fn on_click(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2, _button: MouseButton) -> bool {
        self.seek(tree, me, position);
        tree.focus_mut().claim_drag(me);
        true
    }
}

impl DragHandler for Slider {
    fn on_drag(&mut self, tree: &mut UiTree, me: NodeId, event: DragEvent) {
        self.seek(tree, me, event.origin + event.delta);
    }
}
