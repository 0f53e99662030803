//! Pointer routing.
//!
//! Painting runs back to front (ascending z), so the sibling painted last is
//! visually on top. Dispatch therefore runs front to back: listeners are
//! tried by descending z, and on equal z the later-registered child goes
//! first. The first handler that returns true consumes the event.

use crate::geometry::Vec2;
use crate::input::MouseButton;
use crate::widget::{NodeId, UiTree};

/// Pointer capability.
///
/// Handlers default to consuming the event.
pub trait PointerHandler {
    /// Handles a fresh button press inside the node. Returns true if consumed.
    fn on_click(&mut self, _tree: &mut UiTree, _me: NodeId, _position: Vec2, _button: MouseButton) -> bool {
        true
    }

    /// Handles the pointer resting over the node. Returns true if consumed.
    fn on_hover(&mut self, _tree: &mut UiTree, _me: NodeId, _position: Vec2) -> bool {
        true
    }
}

impl UiTree {
    /// True if the node is visible and its global bounds contain `point`.
    #[must_use]
    pub fn hit_test(&self, id: NodeId, point: Vec2) -> bool {
        self.node(id).is_some_and(|node| node.visible)
            && self.global_bounds(id).is_some_and(|bounds| bounds.contains(point))
    }

    /// True if the node's widget exposes the pointer capability.
    pub fn handles_pointer(&mut self, id: NodeId) -> bool {
        self.with_widget(id, |widget, _| widget.as_pointer().is_some())
            .unwrap_or(false)
    }

    /// Invokes the node's click handler without hit-testing.
    ///
    /// Returns false if the node has no pointer capability.
    pub fn click(&mut self, id: NodeId, position: Vec2, button: MouseButton) -> bool {
        self.with_widget(id, |widget, tree| {
            widget
                .as_pointer()
                .is_some_and(|handler| handler.on_click(tree, id, position, button))
        })
        .unwrap_or(false)
    }

    /// Invokes the node's hover handler without hit-testing.
    pub fn hover(&mut self, id: NodeId, position: Vec2) -> bool {
        self.with_widget(id, |widget, tree| {
            widget
                .as_pointer()
                .is_some_and(|handler| handler.on_hover(tree, id, position))
        })
        .unwrap_or(false)
    }

    /// Listeners of `container` in the order they are offered events.
    #[must_use]
    pub fn consume_order(&self, container: NodeId) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = self.listeners(container).iter().rev().copied().collect();
        order.sort_by_key(|&id| std::cmp::Reverse(self.node(id).map_or(0, |node| node.z_index)));
        order
    }

    /// Offers a click to the listeners of `container` front to back.
    ///
    /// Returns true once a listener under the point consumes it.
    pub fn dispatch_click(&mut self, container: NodeId, position: Vec2, button: MouseButton) -> bool {
        for id in self.consume_order(container) {
            if self.hit_test(id, position) && self.click(id, position, button) {
                return true;
            }
        }
        false
    }

    /// Offers hover to the listeners of `container` front to back.
    pub fn dispatch_hover(&mut self, container: NodeId, position: Vec2) -> bool {
        for id in self.consume_order(container) {
            if self.hit_test(id, position) && self.hover(id, position) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::UiConfig;
    use crate::layout::{Container, Flow};
    use crate::render::MonospaceMetrics;
    use crate::widget::Widget;

    struct Probe {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        consume: bool,
    }

    impl Widget for Probe {
        fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
            Some(self)
        }
    }

    impl PointerHandler for Probe {
        fn on_click(&mut self, _: &mut UiTree, _: NodeId, _: Vec2, _: MouseButton) -> bool {
            self.log.borrow_mut().push(self.name);
            self.consume
        }
    }

    fn setup() -> (UiTree, NodeId, Rc<RefCell<Vec<&'static str>>>) {
        let mut tree = UiTree::new(UiConfig::default(), MonospaceMetrics::default());
        let root = Container::fixed(&mut tree, Vec2::ZERO, Vec2::new(200.0, 200.0), Flow::Free);
        (tree, root, Rc::new(RefCell::new(Vec::new())))
    }

    fn probe(tree: &mut UiTree, root: NodeId, log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str, consume: bool) -> NodeId {
        let id = tree.create(
            Vec2::new(10.0, 10.0),
            Vec2::new(50.0, 50.0),
            Probe { name, log: Rc::clone(log), consume },
        );
        tree.add_both(root, id, false).unwrap();
        id
    }

    #[test]
    fn test_higher_z_consumes_first() {
        let (mut tree, root, log) = setup();
        let low = probe(&mut tree, root, &log, "low", true);
        let high = probe(&mut tree, root, &log, "high", true);
        tree.set_z_index(low, 10);
        tree.set_z_index(high, 5);

        assert!(tree.dispatch_click(root, Vec2::new(20.0, 20.0), MouseButton::Left));
        assert_eq!(*log.borrow(), vec!["low"]);
    }

    #[test]
    fn test_equal_z_prefers_later_sibling() {
        let (mut tree, root, log) = setup();
        probe(&mut tree, root, &log, "first", true);
        probe(&mut tree, root, &log, "second", true);

        tree.dispatch_click(root, Vec2::new(20.0, 20.0), MouseButton::Left);
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_unconsumed_click_falls_through() {
        let (mut tree, root, log) = setup();
        probe(&mut tree, root, &log, "below", true);
        probe(&mut tree, root, &log, "above", false);

        assert!(tree.dispatch_click(root, Vec2::new(20.0, 20.0), MouseButton::Left));
        assert_eq!(*log.borrow(), vec!["above", "below"]);
    }

    #[test]
    fn test_miss_and_hidden_are_not_hit() {
        let (mut tree, root, log) = setup();
        let hidden = probe(&mut tree, root, &log, "hidden", true);
        tree.set_visible(hidden, false);

        assert!(!tree.dispatch_click(root, Vec2::new(20.0, 20.0), MouseButton::Left));
        assert!(!tree.dispatch_click(root, Vec2::new(150.0, 150.0), MouseButton::Left));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_hit_test_uses_global_bounds() {
        let (mut tree, root, log) = setup();
        let inner = Container::fixed(&mut tree, Vec2::new(100.0, 100.0), Vec2::new(80.0, 80.0), Flow::Free);
        tree.add_both(root, inner, false).unwrap();
        let leaf = probe(&mut tree, inner, &log, "leaf", true);

        assert!(tree.hit_test(leaf, Vec2::new(115.0, 115.0)));
        assert!(!tree.hit_test(leaf, Vec2::new(15.0, 15.0)));
        assert!(tree.dispatch_click(root, Vec2::new(115.0, 115.0), MouseButton::Left));
        assert_eq!(*log.borrow(), vec!["leaf"]);
    }
}
