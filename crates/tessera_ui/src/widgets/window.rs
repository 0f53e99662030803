//! Framed, draggable, closable window.

use tracing::warn;

use crate::error::UiResult;
use crate::geometry::Vec2;
use crate::input::MouseButton;
use crate::layout::{Container, Flow};
use crate::pointer::PointerHandler;
use crate::style::{Border, Style};
use crate::widget::{NodeId, Role, UiTree, Widget};

use super::TitleBar;

/// A bordered window: a title bar above a free-form content area.
///
/// Components added to the window node are redirected into the content
/// area. The node carries [`Role::Window`] so its title bar and close
/// button can find it.
pub struct Window {
    frame: NodeId,
    title_bar: NodeId,
    content: NodeId,
}

impl Window {
    /// Creates a detached window.
    pub fn build(tree: &mut UiTree, offset: Vec2, size: Vec2, title: &str) -> UiResult<NodeId> {
        let config = tree.config().clone();
        let id = tree.create_empty(offset, size);
        tree.set_role(id, Role::Window);
        tree.push_style(id, Style::Border(Border::new(config.frame_margin, config.palette.secondary)));
        let size = tree.node(id).map_or(size, |node| node.size);

        let frame = Container::fixed(tree, Vec2::ZERO, size, Flow::Vertical);
        tree.push_style(frame, Style::Background(config.palette.surface));
        let bar_height = config.title_bar_height;
        let title_bar = TitleBar::build(tree, Vec2::ZERO, Vec2::new(size.x, bar_height), title)?;
        let content = Container::fixed(tree, Vec2::ZERO, Vec2::new(size.x, (size.y - bar_height).max(0.0)), Flow::Free);
        tree.add_both(frame, title_bar, false)?;
        tree.add_both(frame, content, false)?;
        tree.adopt(id, frame)?;

        tree.set_content_slot(id, content);
        tree.set_widget(id, Self { frame, title_bar, content });
        Ok(id)
    }

    /// Asks the window's owner to remove it. Returns whether it was removed.
    pub fn close(tree: &mut UiTree, id: NodeId) -> bool {
        let Some(parent) = tree.parent(id) else {
            warn!(node = %id, "window has no owner to close it");
            return false;
        };
        tree.remove_component(parent, id)
    }

    /// The content area.
    #[must_use]
    pub const fn content(&self) -> NodeId {
        self.content
    }

    /// The title bar.
    #[must_use]
    pub const fn title_bar(&self) -> NodeId {
        self.title_bar
    }
}

impl Widget for Window {
    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, size: Vec2) -> bool {
        let bar_height = tree.config().title_bar_height;
        tree.resize(self.title_bar, Vec2::ZERO, Vec2::new(size.x, bar_height));
        tree.resize(
            self.content,
            Vec2::new(0.0, bar_height),
            Vec2::new(size.x, (size.y - bar_height).max(0.0)),
        );
        if !tree.resize(self.frame, Vec2::ZERO, size) {
            return false;
        }
        tree.set_geometry(me, offset, size);
        true
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for Window {
    fn on_click(&mut self, tree: &mut UiTree, _me: NodeId, position: Vec2, button: MouseButton) -> bool {
        tree.click(self.frame, position, button)
    }

    fn on_hover(&mut self, tree: &mut UiTree, _me: NodeId, position: Vec2) -> bool {
        tree.hover(self.frame, position)
    }
}
