//! Keyboard and drag focus.
//!
//! Two independent singletons: at most one node receives keystrokes and at
//! most one node receives drag deltas. Both are weak references held by the
//! [`FocusManager`]; destroying a node clears whatever focus it held.

use tracing::debug;

use crate::counter::Counter;
use crate::geometry::Vec2;
use crate::input::{Key, Modifiers, MouseButton};
use crate::widget::{NodeId, UiTree};

/// A press that may turn into a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position at the press.
    pub origin: Vec2,
    /// Button that started the session.
    pub button: MouseButton,
}

/// Delivered to the drag holder every frame while its button stays down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    /// Pointer position at the press.
    pub origin: Vec2,
    /// Cumulative movement since the press.
    pub delta: Vec2,
    /// Button being held.
    pub button: MouseButton,
}

/// A key event delivered to the keyboard holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Modifier state when the event was routed.
    pub modifiers: Modifiers,
}

/// Stage of a tracked key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    /// Freshly pressed this frame.
    Pressed,
    /// Still down since an earlier frame.
    Held,
    /// No longer down.
    Released,
}

/// Keyboard capability.
pub trait KeyHandler {
    /// One-shot on the frame the key goes down.
    fn key_pressed(&mut self, _tree: &mut UiTree, _me: NodeId, _event: KeyEvent) {}

    /// Every later frame while the key stays down.
    fn key_held(&mut self, _tree: &mut UiTree, _me: NodeId, _event: KeyEvent) {}

    /// Once, on the first frame the key is found up.
    fn key_released(&mut self, _tree: &mut UiTree, _me: NodeId, _event: KeyEvent) {}

    /// Keyboard focus moved away. A key still held will never be reported
    /// as released to this node.
    fn focus_lost(&mut self, _tree: &mut UiTree, _me: NodeId) {}
}

/// Drag capability.
pub trait DragHandler {
    /// Moves or updates the holder from the cumulative drag.
    fn on_drag(&mut self, tree: &mut UiTree, me: NodeId, event: DragEvent);
}

/// Owner of both focus singletons.
#[derive(Debug, Default)]
pub struct FocusManager {
    keyboard: Option<NodeId>,
    drag: Option<NodeId>,
    session: Option<DragSession>,
    tracked_key: Option<Key>,
}

impl FocusManager {
    /// Creates a manager with nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives keyboard focus to `id`.
    ///
    /// The previous holder is not told; [`UiTree::focus_keyboard`] does that.
    pub fn focus_keyboard(&mut self, id: NodeId) {
        if self.keyboard != Some(id) {
            debug!(node = %id, previous = ?self.keyboard, "keyboard focus moved");
            self.keyboard = Some(id);
            self.tracked_key = None;
        }
    }

    /// Drops keyboard focus.
    pub fn blur_keyboard(&mut self) {
        if let Some(id) = self.keyboard.take() {
            debug!(node = %id, "keyboard focus released");
        }
        self.tracked_key = None;
    }

    /// Current keyboard holder.
    #[must_use]
    pub const fn keyboard(&self) -> Option<NodeId> {
        self.keyboard
    }

    /// True if `id` holds keyboard focus.
    #[must_use]
    pub fn is_keyboard_focused(&self, id: NodeId) -> bool {
        self.keyboard == Some(id)
    }

    /// Makes `id` the receiver of drag deltas for the current press.
    ///
    /// Called from click handlers. The claim lasts until the pressed
    /// button is released or the holder is destroyed.
    pub fn claim_drag(&mut self, id: NodeId) {
        debug!(node = %id, "drag focus claimed");
        self.drag = Some(id);
    }

    /// Current drag holder.
    #[must_use]
    pub const fn drag_holder(&self) -> Option<NodeId> {
        self.drag
    }

    /// The active press, if any.
    #[must_use]
    pub const fn drag_session(&self) -> Option<DragSession> {
        self.session
    }

    /// Key currently tracked for held/released events.
    #[must_use]
    pub const fn tracked_key(&self) -> Option<Key> {
        self.tracked_key
    }

    pub(crate) fn begin_drag(&mut self, origin: Vec2, button: MouseButton) {
        self.drag = None;
        self.session = Some(DragSession { origin, button });
    }

    pub(crate) fn end_drag(&mut self) {
        if let Some(id) = self.drag.take() {
            debug!(node = %id, "drag focus released");
        }
        self.session = None;
    }

    pub(crate) fn track(&mut self, key: Key) {
        self.tracked_key = Some(key);
    }

    pub(crate) fn untrack(&mut self) {
        self.tracked_key = None;
    }

    /// Invalidates every reference to a destroyed node.
    pub(crate) fn forget(&mut self, id: NodeId) {
        if self.keyboard == Some(id) {
            debug!(node = %id, "keyboard holder destroyed");
            self.keyboard = None;
            self.tracked_key = None;
        }
        if self.drag == Some(id) {
            debug!(node = %id, "drag holder destroyed");
            self.drag = None;
        }
    }
}

/// Press-then-repeat emulation for a held key.
///
/// A press edits at once. While the key stays held nothing happens until
/// the start delay elapses; the edit then fires once and repeats every
/// repeat-delay frames. Counters only run between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRepeat {
    start: Counter,
    repeat: Counter,
    active: bool,
    repeating: bool,
}

impl KeyRepeat {
    /// Creates an idle repeater.
    #[must_use]
    pub const fn new(start_delay: u32, repeat_delay: u32) -> Self {
        Self {
            start: Counter::new(start_delay, false),
            repeat: Counter::new(repeat_delay, true),
            active: false,
            repeating: false,
        }
    }

    /// Arms the repeater for a freshly pressed key.
    pub fn press(&mut self) {
        self.start.reset();
        self.repeat.reset();
        self.active = true;
        self.repeating = false;
    }

    /// Advances both delays by one frame.
    pub fn tick(&mut self) {
        if self.active {
            self.start.tick();
            self.repeat.tick();
        }
    }

    /// Called each frame the key stays down. Returns true when the edit
    /// should fire again.
    pub fn held(&mut self) -> bool {
        if !self.active {
            return false;
        }
        if self.repeating {
            return self.repeat.count() == 0;
        }
        if self.start.done() {
            self.repeating = true;
            self.repeat.reset();
            return true;
        }
        false
    }

    /// Disarms the repeater and zeroes both delays.
    pub fn release(&mut self) {
        self.start.reset();
        self.repeat.reset();
        self.active = false;
        self.repeating = false;
    }

    /// Frames counted toward the start delay.
    #[must_use]
    pub const fn start_count(&self) -> u32 {
        self.start.count()
    }

    /// Frames counted toward the next repeat.
    #[must_use]
    pub const fn repeat_count(&self) -> u32 {
        self.repeat.count()
    }

    /// True once the start delay has elapsed.
    #[must_use]
    pub const fn is_repeating(&self) -> bool {
        self.repeating
    }
}

impl UiTree {
    /// Gives keyboard focus to `id` and tells the previous holder.
    pub fn focus_keyboard(&mut self, id: NodeId) {
        let previous = self.focus().keyboard();
        self.focus_mut().focus_keyboard(id);
        if let Some(previous) = previous.filter(|&previous| previous != id) {
            self.deliver_focus_lost(previous);
        }
    }

    /// Drops keyboard focus and tells the holder.
    pub fn blur_keyboard(&mut self) {
        let previous = self.focus().keyboard();
        self.focus_mut().blur_keyboard();
        if let Some(previous) = previous {
            self.deliver_focus_lost(previous);
        }
    }

    fn deliver_focus_lost(&mut self, id: NodeId) {
        self.with_widget(id, |widget, tree| {
            if let Some(handler) = widget.as_keyboard() {
                handler.focus_lost(tree, id);
            }
        });
    }

    /// Routes a key event to a node's keyboard capability.
    ///
    /// Returns false if the node has no keyboard capability.
    pub fn deliver_key(&mut self, id: NodeId, phase: KeyPhase, event: KeyEvent) -> bool {
        self.with_widget(id, |widget, tree| {
            let Some(handler) = widget.as_keyboard() else {
                return false;
            };
            match phase {
                KeyPhase::Pressed => handler.key_pressed(tree, id, event),
                KeyPhase::Held => handler.key_held(tree, id, event),
                KeyPhase::Released => handler.key_released(tree, id, event),
            }
            true
        })
        .unwrap_or(false)
    }

    /// Routes a drag event to a node's drag capability.
    pub fn deliver_drag(&mut self, id: NodeId, event: DragEvent) -> bool {
        self.with_widget(id, |widget, tree| {
            let Some(handler) = widget.as_draggable() else {
                return false;
            };
            handler.on_drag(tree, id, event);
            true
        })
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames_with_edits(repeater: &mut KeyRepeat, frames: u32) -> Vec<u32> {
        let mut edits = Vec::new();
        for frame in 0..frames {
            repeater.tick();
            if frame == 0 {
                repeater.press();
                edits.push(frame);
            } else if repeater.held() {
                edits.push(frame);
            }
        }
        edits
    }

    #[test]
    fn test_key_repeat_cadence() {
        let mut repeater = KeyRepeat::new(15, 12);
        assert_eq!(frames_with_edits(&mut repeater, 50), vec![0, 15, 27, 39]);
    }

    #[test]
    fn test_release_zeroes_counters() {
        let mut repeater = KeyRepeat::new(15, 12);
        frames_with_edits(&mut repeater, 20);
        assert!(repeater.is_repeating());

        repeater.release();
        repeater.tick();
        assert_eq!(repeater.start_count(), 0);
        assert_eq!(repeater.repeat_count(), 0);
        assert!(!repeater.held());
    }

    #[test]
    fn test_forget_clears_only_matching_holder() {
        let mut focus = FocusManager::new();
        focus.focus_keyboard(NodeId::new(1));
        focus.begin_drag(Vec2::ZERO, MouseButton::Left);
        focus.claim_drag(NodeId::new(2));

        focus.forget(NodeId::new(2));
        assert_eq!(focus.keyboard(), Some(NodeId::new(1)));
        assert_eq!(focus.drag_holder(), None);
        assert!(focus.drag_session().is_some());

        focus.end_drag();
        assert_eq!(focus.drag_session(), None);
    }

    #[test]
    fn test_refocus_drops_tracked_key() {
        let mut focus = FocusManager::new();
        focus.focus_keyboard(NodeId::new(1));
        focus.track(Key::Char('A'));
        focus.focus_keyboard(NodeId::new(1));
        assert_eq!(focus.tracked_key(), Some(Key::Char('A')));

        focus.focus_keyboard(NodeId::new(2));
        assert_eq!(focus.tracked_key(), None);
    }
}
