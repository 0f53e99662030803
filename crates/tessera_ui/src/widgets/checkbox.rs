//! Toggle box.

use crate::geometry::Vec2;
use crate::input::MouseButton;
use crate::pointer::PointerHandler;
use crate::style::{Border, Style};
use crate::widget::{NodeId, UiTree, Widget};

/// Called with the new state after every toggle.
pub type ToggleCallback = Box<dyn FnMut(&mut UiTree, bool)>;

/// A framed box filled with the checked colour while checked.
///
/// The frame switches to the highlight colour while hovered.
pub struct CheckBox {
    checked: bool,
    on_toggle: Option<ToggleCallback>,
}

impl CheckBox {
    /// Creates a check box in the given state.
    #[must_use]
    pub fn new(checked: bool) -> Self {
        Self { checked, on_toggle: None }
    }

    /// Sets the toggle callback.
    #[must_use]
    pub fn with_on_toggle(mut self, on_toggle: impl FnMut(&mut UiTree, bool) + 'static) -> Self {
        self.on_toggle = Some(Box::new(on_toggle));
        self
    }

    /// Creates a detached check box node.
    pub fn build(self, tree: &mut UiTree, offset: Vec2, size: Vec2) -> NodeId {
        let palette = tree.config().palette;
        let margin = tree.config().frame_margin;
        let fill = if self.checked { palette.checked } else { palette.surface };
        let id = tree.create_empty(offset, size);
        tree.push_style(id, Style::Background(fill));
        tree.push_style(id, Style::Border(Border::new(margin, palette.secondary)));
        tree.set_widget(id, self);
        id
    }

    /// Current state.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    fn restyle(&self, tree: &mut UiTree, me: NodeId) {
        let palette = tree.config().palette;
        let fill = if self.checked { palette.checked } else { palette.surface };
        let Some(node) = tree.node_mut(me) else {
            return;
        };
        if let Some(background) = node.background_mut() {
            *background = fill;
        }
        if let Some(border) = node.border_mut() {
            border.color = palette.secondary;
        }
    }
}

impl Widget for CheckBox {
    fn update(&mut self, tree: &mut UiTree, me: NodeId) {
        self.restyle(tree, me);
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for CheckBox {
    fn on_click(&mut self, tree: &mut UiTree, me: NodeId, _position: Vec2, _button: MouseButton) -> bool {
        self.checked = !self.checked;
        self.restyle(tree, me);
        if let Some(on_toggle) = self.on_toggle.as_mut() {
            on_toggle(tree, self.checked);
        }
        true
    }

    fn on_hover(&mut self, tree: &mut UiTree, me: NodeId, _position: Vec2) -> bool {
        let highlight = tree.config().palette.highlight;
        if let Some(border) = tree.node_mut(me).and_then(|node| node.border_mut()) {
            border.color = highlight;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::UiConfig;
    use crate::render::MonospaceMetrics;

    #[test]
    fn test_click_toggles_and_reports() {
        let mut tree = UiTree::new(UiConfig::default(), MonospaceMetrics::default());
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let id = CheckBox::new(false)
            .with_on_toggle(move |_, checked| sink.borrow_mut().push(checked))
            .build(&mut tree, Vec2::ZERO, Vec2::new(10.0, 10.0));

        tree.click(id, Vec2::ZERO, MouseButton::Left);
        tree.click(id, Vec2::ZERO, MouseButton::Left);
        tree.click(id, Vec2::ZERO, MouseButton::Left);

        assert_eq!(*states.borrow(), vec![true, false, true]);
        assert_eq!(tree.widget::<CheckBox>(id).map(CheckBox::is_checked), Some(true));
        let checked = tree.config().palette.checked;
        assert_eq!(tree.node_mut(id).and_then(|node| node.background_mut()).copied(), Some(checked));
    }

    #[test]
    fn test_hover_highlights_frame_until_update() {
        let mut tree = UiTree::new(UiConfig::default(), MonospaceMetrics::default());
        let id = CheckBox::new(true).build(&mut tree, Vec2::ZERO, Vec2::new(10.0, 10.0));
        let palette = tree.config().palette;

        tree.hover(id, Vec2::ZERO);
        assert_eq!(tree.node_mut(id).and_then(|node| node.border_mut()).map(|b| b.color), Some(palette.highlight));
        tree.update(id);
        assert_eq!(tree.node_mut(id).and_then(|node| node.border_mut()).map(|b| b.color), Some(palette.secondary));
    }
}
