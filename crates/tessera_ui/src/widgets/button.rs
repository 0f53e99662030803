//! Clickable wrapper around any node.

use crate::error::UiResult;
use crate::geometry::Vec2;
use crate::input::MouseButton;
use crate::pointer::PointerHandler;
use crate::style::{Color, Style};
use crate::widget::{NodeId, UiTree, Widget};

/// Payload handed to click callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// The clicked node.
    pub node: NodeId,
    /// Pointer position in screen coordinates.
    pub position: Vec2,
    /// Button that was pressed.
    pub button: MouseButton,
}

/// Click callback.
pub type ClickCallback = Box<dyn FnMut(&mut UiTree, &ClickEvent)>;

/// Wraps a content node, paints a background behind it and reports clicks.
///
/// The background switches to the hover colour while the pointer rests on
/// the button. Styles added to the button land on its content.
pub struct Button {
    content: NodeId,
    color: Color,
    on_click: ClickCallback,
}

impl Button {
    /// Wraps `content`, taking over its offset and size.
    pub fn build(
        tree: &mut UiTree,
        content: NodeId,
        color: Color,
        on_click: impl FnMut(&mut UiTree, &ClickEvent) + 'static,
    ) -> UiResult<NodeId> {
        let (offset, size) = tree
            .node(content)
            .map_or((Vec2::ZERO, Vec2::ZERO), |node| (node.offset, node.size));
        let id = tree.create_empty(offset, size);
        if let Err(err) = tree.adopt(id, content) {
            tree.remove_node(id);
            return Err(err);
        }
        tree.set_offset(content, Vec2::ZERO);
        tree.push_style(id, Style::Background(color));
        tree.set_style_target(id, content);
        tree.set_widget(id, Self { content, color, on_click: Box::new(on_click) });
        Ok(id)
    }

    /// The wrapped node.
    #[must_use]
    pub const fn content(&self) -> NodeId {
        self.content
    }
}

impl Widget for Button {
    fn update(&mut self, tree: &mut UiTree, me: NodeId) {
        if let Some(background) = tree.node_mut(me).and_then(|node| node.background_mut()) {
            *background = self.color;
        }
    }

    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, size: Vec2) -> bool {
        tree.set_geometry(me, offset, size);
        tree.resize(self.content, Vec2::ZERO, size);
        true
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for Button {
    fn on_click(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2, button: MouseButton) -> bool {
        (self.on_click)(tree, &ClickEvent { node: me, position, button });
        true
    }

    fn on_hover(&mut self, tree: &mut UiTree, me: NodeId, _position: Vec2) -> bool {
        let hover = tree.config().palette.hover;
        if let Some(background) = tree.node_mut(me).and_then(|node| node.background_mut()) {
            *background = hover;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::config::UiConfig;
    use crate::render::MonospaceMetrics;
    use crate::style::Border;
    use crate::widgets::Text;

    fn tree() -> UiTree {
        UiTree::new(UiConfig::default(), MonospaceMetrics::default())
    }

    fn background(tree: &mut UiTree, id: NodeId) -> Option<Color> {
        tree.node_mut(id).and_then(|node| node.background_mut()).copied()
    }

    #[test]
    fn test_click_runs_callback_with_event() {
        let mut tree = tree();
        let label = Text::new(tree.config(), "OK").build(&mut tree, Vec2::new(4.0, 4.0));
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        let button = Button::build(&mut tree, label, Color::WHITE, move |_, event| sink.set(Some(*event))).unwrap();

        assert_eq!(tree.node(button).unwrap().offset, Vec2::new(4.0, 4.0));
        assert_eq!(tree.node(label).unwrap().offset, Vec2::ZERO);
        assert!(tree.click(button, Vec2::new(5.0, 5.0), MouseButton::Right));
        assert_eq!(
            seen.get(),
            Some(ClickEvent { node: button, position: Vec2::new(5.0, 5.0), button: MouseButton::Right })
        );
    }

    #[test]
    fn test_hover_colour_resets_on_update() {
        let mut tree = tree();
        let label = Text::label(&mut tree, "OK");
        let button = Button::build(&mut tree, label, Color::WHITE, |_, _| {}).unwrap();
        let hover = tree.config().palette.hover;

        tree.hover(button, Vec2::ZERO);
        assert_eq!(background(&mut tree, button), Some(hover));
        tree.update(button);
        assert_eq!(background(&mut tree, button), Some(Color::WHITE));
    }

    #[test]
    fn test_styles_forward_to_content() {
        let mut tree = tree();
        let label = Text::label(&mut tree, "OK");
        let button = Button::build(&mut tree, label, Color::WHITE, |_, _| {}).unwrap();

        tree.add_style(button, Style::Border(Border::new(1.0, Color::BLACK)), None).unwrap();
        assert_eq!(tree.node(button).unwrap().styles().len(), 1);
        assert_eq!(tree.node(label).unwrap().styles().len(), 1);
    }

    #[test]
    fn test_attached_content_is_rejected() {
        let mut tree = tree();
        let label = Text::label(&mut tree, "OK");
        Button::build(&mut tree, label, Color::WHITE, |_, _| {}).unwrap();
        let nodes = tree.len();

        assert!(Button::build(&mut tree, label, Color::WHITE, |_, _| {}).is_err());
        assert_eq!(tree.len(), nodes);
    }
}
