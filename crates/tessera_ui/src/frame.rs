//! The per-frame pump.
//!
//! ```text
//! update ─► poll input ─► hover ─► click (+ drag session) ─► drag ─► keys ─► draw
//! ```
//!
//! One pass of each per frame; nothing is queued across frames.

use tracing::trace_span;

use crate::clip::Painter;
use crate::config::UiConfig;
use crate::focus::{DragEvent, KeyEvent, KeyPhase};
use crate::geometry::Vec2;
use crate::input::{InputSource, Key, MouseButton};
use crate::layout::{Container, Flow};
use crate::render::{Renderer, TextMetrics};
use crate::widget::{NodeId, UiTree};

/// The interface: a tree with one root container, driven once per frame.
#[derive(Debug)]
pub struct Ui {
    tree: UiTree,
    root: NodeId,
    frame: u64,
}

impl Ui {
    /// Creates an interface whose free-form root covers `screen`.
    pub fn new(config: UiConfig, screen: Vec2, metrics: impl TextMetrics + 'static) -> Self {
        let mut tree = UiTree::new(config, metrics);
        let root = Container::fixed(&mut tree, Vec2::ZERO, screen, Flow::Free);
        Self { tree, root, frame: 0 }
    }

    /// The root container.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The component tree.
    #[must_use]
    pub const fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// Mutable access to the component tree.
    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    /// Frames run so far.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Runs one frame: update, route input, draw.
    pub fn run_frame(&mut self, input: &mut dyn InputSource, renderer: &mut dyn Renderer) {
        let span = trace_span!("frame", number = self.frame);
        let _enter = span.enter();

        self.tree.update(self.root);

        let key = input.poll_key();
        let pointer = input.pointer_position();
        self.tree.dispatch_hover(self.root, pointer);

        for button in MouseButton::ALL {
            if input.is_button_pressed(button) {
                self.tree.focus_mut().begin_drag(pointer, button);
                self.tree.dispatch_click(self.root, pointer, button);
            }
        }
        self.route_drag(input, pointer);
        self.route_keys(input, key);

        renderer.begin_frame();
        {
            let mut painter = Painter::new(renderer);
            self.tree.draw(self.root, &mut painter);
        }
        renderer.end_frame();

        self.frame += 1;
    }

    fn route_drag(&mut self, input: &dyn InputSource, pointer: Vec2) {
        let Some(session) = self.tree.focus().drag_session() else {
            return;
        };
        if !input.is_button_down(session.button) {
            self.tree.focus_mut().end_drag();
            return;
        }
        if let Some(holder) = self.tree.focus().drag_holder() {
            let event = DragEvent { origin: session.origin, delta: pointer - session.origin, button: session.button };
            self.tree.deliver_drag(holder, event);
        }
    }

    fn route_keys(&mut self, input: &dyn InputSource, key: Option<Key>) {
        let Some(holder) = self.tree.focus().keyboard() else {
            return;
        };
        let modifiers = input.modifiers();
        if let Some(tracked) = self.tree.focus().tracked_key() {
            let event = KeyEvent { key: tracked, modifiers };
            if input.is_key_down(tracked) {
                self.tree.deliver_key(holder, KeyPhase::Held, event);
            } else {
                self.tree.focus_mut().untrack();
                self.tree.deliver_key(holder, KeyPhase::Released, event);
            }
        }
        if let Some(key) = key {
            // The held/released hooks may have moved or dropped focus.
            if let Some(holder) = self.tree.focus().keyboard() {
                self.tree.focus_mut().track(key);
                self.tree.deliver_key(holder, KeyPhase::Pressed, KeyEvent { key, modifiers });
            }
        }
    }
}
