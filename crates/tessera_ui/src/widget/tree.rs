//! Node arena.
//!
//! The tree exclusively owns every node. Parent links are plain ids used for
//! offset composition and ancestor queries, never for lifetime: a node lives
//! until its owner removes it, and removal cascades to its whole subtree.

use std::collections::HashMap;

use tracing::warn;

use crate::clip::Painter;
use crate::config::UiConfig;
use crate::error::{UiError, UiResult};
use crate::focus::FocusManager;
use crate::geometry::{Rect, Vec2};
use crate::render::TextMetrics;
use crate::style::Style;

use super::{DrawCtx, Node, NodeId, Role, Widget};

/// Owns every node of the interface.
pub struct UiTree {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
    focus: FocusManager,
    config: UiConfig,
    metrics: Box<dyn TextMetrics>,
}

impl UiTree {
    /// Creates an empty tree.
    pub fn new(config: UiConfig, metrics: impl TextMetrics + 'static) -> Self {
        Self {
            nodes: HashMap::with_capacity(256),
            next_id: 1,
            focus: FocusManager::new(),
            config,
            metrics: Box::new(metrics),
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Creates a detached node driven by `widget`.
    pub fn create(&mut self, offset: Vec2, size: Vec2, widget: impl Widget) -> NodeId {
        let id = self.create_empty(offset, size);
        self.set_widget(id, widget);
        id
    }

    /// Creates a detached node with no behaviour yet.
    ///
    /// Composite widgets use this to attach decorators and internal children
    /// before installing themselves with [`UiTree::set_widget`].
    pub fn create_empty(&mut self, offset: Vec2, size: Vec2) -> NodeId {
        let id = self.next_id();
        self.nodes.insert(id, Node::new(id, offset, size));
        id
    }

    /// Installs or replaces the behaviour of a node.
    pub fn set_widget(&mut self, id: NodeId, widget: impl Widget) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.widget = Some(Box::new(widget));
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Gets a node by ID.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Gets mutable access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Typed access to a node's widget.
    #[must_use]
    pub fn widget<T: Widget>(&self, id: NodeId) -> Option<&T> {
        let widget: &dyn Widget = self.nodes.get(&id)?.widget.as_deref()?;
        widget.as_any().downcast_ref::<T>()
    }

    /// Typed mutable access to a node's widget.
    pub fn widget_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        let widget: &mut dyn Widget = self.nodes.get_mut(&id)?.widget.as_deref_mut()?;
        widget.as_any_mut().downcast_mut::<T>()
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Measures text with the tree's metrics.
    #[must_use]
    pub fn measure_text(&self, text: &str, font_size: f32) -> Vec2 {
        self.metrics.measure_text(text, font_size)
    }

    /// Focus state.
    #[must_use]
    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    /// Mutable focus state.
    pub fn focus_mut(&mut self) -> &mut FocusManager {
        &mut self.focus
    }

    /// The owning node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id)?.parent
    }

    /// Owned children in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |node| node.children.as_slice())
    }

    /// Pointer listeners in registration order.
    #[must_use]
    pub fn listeners(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |node| node.listeners.as_slice())
    }

    /// Sum of the node's offset and the offsets of all its ancestors.
    ///
    /// Recomputed on every call so moving an ancestor moves every descendant.
    #[must_use]
    pub fn global_offset(&self, id: NodeId) -> Vec2 {
        let mut total = Vec2::ZERO;
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            total += node.offset;
            current = node.parent.and_then(|parent| self.nodes.get(&parent));
        }
        total
    }

    /// Bounds of the node in screen coordinates.
    #[must_use]
    pub fn global_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        Some(Rect::from_pos_size(self.global_offset(id), node.size))
    }

    /// Nearest strict ancestor exposing `role`.
    #[must_use]
    pub fn nearest_ancestor(&self, id: NodeId, role: Role) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            let node = self.nodes.get(&ancestor)?;
            if node.role == role {
                return Some(ancestor);
            }
            current = node.parent;
        }
        None
    }

    /// True if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Moves a node relative to its parent.
    pub fn set_offset(&mut self, id: NodeId, offset: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.offset = offset;
        }
    }

    /// Sets a node's size without consulting its widget.
    pub fn set_size(&mut self, id: NodeId, size: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.size = size;
        }
    }

    /// Sets offset and size without consulting the widget.
    pub fn set_geometry(&mut self, id: NodeId, offset: Vec2, size: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.offset = offset;
            node.size = size;
        }
    }

    /// Sets the paint and dispatch priority.
    pub fn set_z_index(&mut self, id: NodeId, z_index: i32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.z_index = z_index;
        }
    }

    /// Shows or hides a node.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.visible = visible;
        }
    }

    /// Sets the structural role ancestors are searched for.
    pub fn set_role(&mut self, id: NodeId, role: Role) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.role = role;
        }
    }

    /// Redirects children added to `id` into `slot`.
    pub fn set_content_slot(&mut self, id: NodeId, slot: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.content_slot = Some(slot);
        }
    }

    /// Forwards styles added to `id` to `target`.
    pub fn set_style_target(&mut self, id: NodeId, target: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.style_target = Some(target);
        }
    }

    /// Asks the node's widget to change geometry. Returns false if refused.
    ///
    /// Nodes without a widget accept any geometry. A widget that is running
    /// one of its own hooks cannot be consulted, so the request is refused.
    pub fn resize(&mut self, id: NodeId, offset: Vec2, size: Vec2) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if node.busy {
            warn!(%id, "resize refused: widget is inside one of its own hooks");
            return false;
        }
        if node.widget.is_none() {
            self.set_geometry(id, offset, size);
            return true;
        }
        self.with_widget(id, |widget, tree| widget.resize(tree, id, offset, size))
            .unwrap_or(false)
    }

    /// Attaches a decorator at `position` (appended when `None`).
    ///
    /// Follows the node's style target, if one is set.
    pub fn add_style(&mut self, id: NodeId, style: Style, position: Option<usize>) -> UiResult<()> {
        let node = self.nodes.get(&id).ok_or(UiError::UnknownNode(id))?;
        let target = node.style_target.unwrap_or(id);
        self.insert_style(target, style, position)
    }

    /// Attaches a decorator to exactly this node, running its attach hook.
    pub(crate) fn insert_style(&mut self, id: NodeId, style: Style, position: Option<usize>) -> UiResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(UiError::UnknownNode(id))?;
        style.on_attach(node);
        match position {
            Some(index) => {
                let index = index.min(node.styles.len());
                node.styles.insert(index, style);
            }
            None => node.styles.push(style),
        }
        Ok(())
    }

    /// Appends a decorator to a node built by the caller.
    pub(crate) fn push_style(&mut self, id: NodeId, style: Style) {
        if let Some(node) = self.nodes.get_mut(&id) {
            style.on_attach(node);
            node.styles.push(style);
        }
    }

    /// Makes `child` an internally owned part of `parent` without layout.
    pub fn adopt(&mut self, parent: NodeId, child: NodeId) -> UiResult<()> {
        self.check_attachable(parent, child)?;
        self.attach(parent, child);
        Ok(())
    }

    pub(crate) fn check_attachable(&self, parent: NodeId, child: NodeId) -> UiResult<()> {
        if !self.contains(parent) {
            return Err(UiError::UnknownNode(parent));
        }
        let node = self.nodes.get(&child).ok_or(UiError::UnknownNode(child))?;
        if let Some(owner) = node.parent {
            return Err(UiError::AlreadyAttached { node: child, parent: owner });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(UiError::WouldCycle { node: child, parent });
        }
        Ok(())
    }

    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    /// Detaches a node from its owner and destroys it with its subtree.
    ///
    /// Returns false if the node does not exist.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get(&id).map(|node| node.parent) else {
            return false;
        };
        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.children.retain(|&child| child != id);
            parent.listeners.retain(|&listener| listener != id);
        }
        self.destroy(id);
        true
    }

    /// Drops a node, its decorators and its subtree, invalidating any focus
    /// held by them.
    pub(crate) fn destroy(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        self.focus.forget(id);
        for child in node.children {
            self.destroy(child);
        }
    }

    /// Runs `f` with the node's widget detached so it can borrow the tree.
    ///
    /// The widget is put back afterwards unless its node was destroyed in
    /// the meantime. Returns `None` if the node has no widget, including
    /// when it is already detached further up the call stack.
    pub(crate) fn with_widget<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(&id)?;
        let mut widget = node.widget.take()?;
        node.busy = true;
        let out = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.widget = Some(widget);
            node.busy = false;
        }
        Some(out)
    }

    /// Advances timers for the node and, recursively, its children.
    pub fn update(&mut self, id: NodeId) {
        self.with_widget(id, |widget, tree| widget.update(tree, id));
        for child in self.children(id).to_vec() {
            self.update(child);
        }
    }

    /// Children sorted for painting: ascending z, insertion order on ties.
    #[must_use]
    pub fn paint_order(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = self.children(id).to_vec();
        order.sort_by_key(|child| self.nodes.get(child).map_or(0, |node| node.z_index));
        order
    }

    /// Draws the node and its subtree.
    ///
    /// The node's bounds are pushed as a clip, decorators wrap the widget's
    /// own draw and the children, and the clip is popped before returning.
    pub fn draw(&self, id: NodeId, painter: &mut Painter<'_>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let origin = self.global_offset(id);
        let parent_origin = origin - node.offset;
        let bounds = Rect::from_pos_size(origin, node.size);
        let depth = painter.clip_depth();

        painter.push_clip(bounds);
        for style in &node.styles {
            style.draw_below(bounds, parent_origin, painter);
        }
        if let Some(widget) = &node.widget {
            widget.draw(&DrawCtx { tree: self, id, bounds }, painter);
        }
        for child in self.paint_order(id) {
            self.draw(child, painter);
        }
        for style in node.styles.iter().rev() {
            style.draw_above(bounds, painter);
        }
        painter.pop_clip();

        debug_assert_eq!(painter.clip_depth(), depth, "unbalanced clip stack below {id}");
    }
}

impl std::fmt::Debug for UiTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiTree")
            .field("nodes", &self.nodes.len())
            .field("next_id", &self.next_id)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}
