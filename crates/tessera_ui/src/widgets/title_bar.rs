//! Window title bar.

use tracing::warn;

use crate::error::UiResult;
use crate::focus::{DragEvent, DragHandler};
use crate::geometry::Vec2;
use crate::input::MouseButton;
use crate::layout::{Container, Flow};
use crate::pointer::PointerHandler;
use crate::style::Style;
use crate::widget::{NodeId, Role, UiTree, Widget};

use super::{Align, Button, Spacer, Text, Window};

/// Title, spacer and close button on a coloured strip.
///
/// Dragging the bar with the left button moves the nearest enclosing
/// window; the close button closes it.
pub struct TitleBar {
    title: String,
    row: NodeId,
    drag_start: Vec2,
}

impl TitleBar {
    /// Creates a detached title bar.
    pub fn build(tree: &mut UiTree, offset: Vec2, size: Vec2, title: &str) -> UiResult<NodeId> {
        let primary = tree.config().palette.primary;
        let id = tree.create_empty(offset, size);
        tree.push_style(id, Style::Background(primary));
        let row = Self::build_row(tree, id, size, title)?;
        tree.set_widget(id, Self { title: title.to_owned(), row, drag_start: Vec2::ZERO });
        Ok(id)
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    fn build_row(tree: &mut UiTree, me: NodeId, size: Vec2, title: &str) -> UiResult<NodeId> {
        let close_color = tree.config().palette.close;
        let row = Container::fixed(tree, Vec2::ZERO, size, Flow::Horizontal);
        tree.adopt(me, row)?;

        let title = Text::label(tree, title);
        let close_label = Text::new(tree.config(), "X").with_align(Align::Middle).build(tree, Vec2::ZERO);
        let close = Button::build(tree, close_label, close_color, |tree, event| {
            match tree.nearest_ancestor(event.node, Role::Window) {
                Some(window) => {
                    Window::close(tree, window);
                }
                None => warn!(node = %event.node, "close button outside a window"),
            }
        })?;
        let used = tree.node(title).map_or(0.0, |n| n.size.x) + tree.node(close).map_or(0.0, |n| n.size.x);
        let spacer = Spacer::build(tree, Vec2::new((size.x - used).max(0.0), 0.0));

        tree.add_component(row, title, false)?;
        tree.add_component(row, spacer, false)?;
        tree.add_both(row, close, false)?;
        Ok(row)
    }
}

impl Widget for TitleBar {
    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, size: Vec2) -> bool {
        let previous = tree.node(me).map(|node| node.size);
        tree.set_geometry(me, offset, size);
        if previous == Some(size) {
            return true;
        }
        tree.remove_node(self.row);
        match Self::build_row(tree, me, size, &self.title) {
            Ok(row) => {
                self.row = row;
                true
            }
            Err(err) => {
                warn!(node = %me, "title bar rebuild failed: {err}");
                false
            }
        }
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }

    fn as_draggable(&mut self) -> Option<&mut dyn DragHandler> {
        Some(self)
    }
}

impl PointerHandler for TitleBar {
    fn on_click(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2, button: MouseButton) -> bool {
        tree.focus_mut().claim_drag(me);
        if let Some(window) = tree.nearest_ancestor(me, Role::Window) {
            self.drag_start = tree.node(window).map_or(Vec2::ZERO, |node| node.offset);
        }
        tree.dispatch_click(self.row, position, button);
        true
    }

    fn on_hover(&mut self, tree: &mut UiTree, _me: NodeId, position: Vec2) -> bool {
        tree.dispatch_hover(self.row, position);
        true
    }
}

impl DragHandler for TitleBar {
    fn on_drag(&mut self, tree: &mut UiTree, me: NodeId, event: DragEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        match tree.nearest_ancestor(me, Role::Window) {
            Some(window) => tree.set_offset(window, self.drag_start + event.delta),
            None => warn!(node = %me, "title bar dragged outside a window"),
        }
    }
}
