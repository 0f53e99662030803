//! Labelled text input.

use crate::error::UiResult;
use crate::geometry::Vec2;
use crate::input::MouseButton;
use crate::layout::{Container, Flow};
use crate::pointer::PointerHandler;
use crate::widget::{NodeId, UiTree, Widget};

use super::{Spacer, Text, TextBox};

/// A label and a text box on one row, separated by a spacer so the box sits
/// flush right.
pub struct Field {
    row: NodeId,
    text_box: NodeId,
}

impl Field {
    /// Creates a detached field of the given size.
    pub fn build(
        tree: &mut UiTree,
        offset: Vec2,
        size: Vec2,
        label: &str,
        cols: usize,
        on_submit: impl FnMut(&mut UiTree, &str) + 'static,
    ) -> UiResult<NodeId> {
        let font_size = tree.config().font_size;
        let id = tree.create_empty(offset, size);
        let row = Container::fixed(tree, Vec2::ZERO, size, Flow::Horizontal);
        tree.adopt(id, row)?;

        let label = Text::label(tree, label);
        let text_box = TextBox::builder(cols).with_on_submit(on_submit).build(tree);
        let used = tree.node(label).map_or(0.0, |n| n.size.x) + tree.node(text_box).map_or(0.0, |n| n.size.x);
        let spacer = Spacer::build(tree, Vec2::new((size.x - used).max(0.0), font_size));

        tree.add_component(row, label, false)?;
        tree.add_component(row, spacer, false)?;
        tree.add_both(row, text_box, false)?;
        tree.set_widget(id, Self { row, text_box });
        Ok(id)
    }

    /// The input part of the field.
    #[must_use]
    pub const fn text_box(&self) -> NodeId {
        self.text_box
    }
}

impl Widget for Field {
    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, _size: Vec2) -> bool {
        tree.set_offset(me, offset);
        true
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for Field {
    fn on_click(&mut self, tree: &mut UiTree, _me: NodeId, position: Vec2, button: MouseButton) -> bool {
        tree.dispatch_click(self.row, position, button)
    }

    fn on_hover(&mut self, tree: &mut UiTree, _me: NodeId, position: Vec2) -> bool {
        tree.dispatch_hover(self.row, position)
    }
}
