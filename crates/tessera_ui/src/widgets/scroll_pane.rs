//! Vertically scrolling viewport.

use crate::error::UiResult;
use crate::geometry::{Axis, Rect, Vec2};
use crate::input::MouseButton;
use crate::pointer::PointerHandler;
use crate::style::{Clip, ClipAnchor, Style};
use crate::widget::{Node, NodeId, UiTree, Widget};

use super::Slider;

/// Shows a window of a taller view node with a scroll bar beside it.
///
/// The view is clipped to the viewport with a [`Clip`] anchored at the
/// pane, so the clip lands wherever the pane is drawn.
pub struct ScrollPane {
    view: NodeId,
    bar: NodeId,
    viewport: Vec2,
}

impl ScrollPane {
    /// Wraps `view` in a pane showing `viewport` of it. The pane takes over
    /// the view's offset.
    pub fn build(tree: &mut UiTree, view: NodeId, viewport: Vec2) -> UiResult<NodeId> {
        let bar_width = tree.config().scroll_bar_width;
        let offset = tree.node(view).map_or(Vec2::ZERO, |node| node.offset);
        let id = tree.create_empty(offset, Vec2::new(viewport.x + bar_width, viewport.y));
        if let Err(err) = tree.adopt(id, view) {
            tree.remove_node(id);
            return Err(err);
        }
        tree.set_offset(view, Vec2::ZERO);
        let clip = Clip { view: Rect::from_pos_size(Vec2::ZERO, viewport), anchor: ClipAnchor::Parent };
        tree.insert_style(view, Style::Clip(clip), Some(0))?;

        let bar = Slider::new(Axis::Vertical)
            .with_on_change(move |tree, value| {
                let height = tree.node(view).map_or(0.0, |node| node.size.y);
                let overflow = (height - viewport.y).max(0.0);
                tree.set_offset(view, Vec2::new(0.0, -value * overflow));
            })
            .build(tree, Vec2::new(viewport.x, 0.0), Vec2::new(bar_width, viewport.y));
        tree.adopt(id, bar)?;

        tree.set_widget(id, Self { view, bar, viewport });
        Ok(id)
    }

    /// The scrolled node.
    #[must_use]
    pub const fn view(&self) -> NodeId {
        self.view
    }

    /// The scroll bar.
    #[must_use]
    pub const fn bar(&self) -> NodeId {
        self.bar
    }

    fn viewport_bounds(&self, tree: &UiTree, me: NodeId) -> Rect {
        Rect::from_pos_size(tree.global_offset(me), self.viewport)
    }
}

impl Widget for ScrollPane {
    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, size: Vec2) -> bool {
        let bar_width = tree.config().scroll_bar_width;
        self.viewport = Vec2::new((size.x - bar_width).max(0.0), size.y);
        tree.set_geometry(me, offset, size);
        tree.resize(self.bar, Vec2::new(self.viewport.x, 0.0), Vec2::new(bar_width, size.y));
        if let Some(clip) = tree.node_mut(self.view).and_then(Node::clip_mut) {
            clip.view = Rect::from_pos_size(Vec2::ZERO, self.viewport);
        }
        true
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for ScrollPane {
    fn on_click(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2, button: MouseButton) -> bool {
        if self.viewport_bounds(tree, me).contains(position)
            && tree.hit_test(self.view, position)
            && tree.click(self.view, position, button)
        {
            return true;
        }
        tree.hit_test(self.bar, position) && tree.click(self.bar, position, button)
    }

    fn on_hover(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2) -> bool {
        if self.viewport_bounds(tree, me).contains(position)
            && tree.hit_test(self.view, position)
            && tree.hover(self.view, position)
        {
            return true;
        }
        tree.hit_test(self.bar, position) && tree.hover(self.bar, position)
    }
}
