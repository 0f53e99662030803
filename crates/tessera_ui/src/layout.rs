//! Layout containers.
//!
//! A container owns an ordered list of children and, separately, the
//! pointer listeners it forwards events to. Two strategies exist:
//!
//! - [`Sizing::Fixed`]: the container's size is set up front. Children are
//!   packed edge-to-edge along the flow axis and stretched to the cross
//!   axis. Overflow is only detected on an explicit resize.
//! - [`Sizing::Auto`]: the container starts empty and grows to the union
//!   of its children on every append.
//!
//! [`Flow::Free`] places nothing; callers set child offsets directly.

use tracing::warn;

use crate::error::{UiError, UiResult};
use crate::geometry::{Axis, Vec2};
use crate::input::MouseButton;
use crate::pointer::PointerHandler;
use crate::widget::{NodeId, UiTree, Widget};

/// Direction children are packed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// No automatic placement.
    Free,
}

impl Flow {
    /// Packing axis, if any.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Horizontal => Some(Axis::Horizontal),
            Self::Vertical => Some(Axis::Vertical),
            Self::Free => None,
        }
    }
}

/// How a container's own size is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Preset bounds.
    Fixed,
    /// Grows to fit its children.
    Auto,
}

/// Layout strategy of a container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Packing direction.
    pub flow: Flow,
    /// Sizing strategy.
    pub sizing: Sizing,
}

/// Behaviour of a plain container: forwards pointer events to its listeners
/// and guards its geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Container;

impl Container {
    /// Creates a detached fixed-bounds container.
    pub fn fixed(tree: &mut UiTree, offset: Vec2, size: Vec2, flow: Flow) -> NodeId {
        Self::with_layout(tree, offset, size, Layout { flow, sizing: Sizing::Fixed })
    }

    /// Creates a detached auto-growing container.
    pub fn auto(tree: &mut UiTree, offset: Vec2, flow: Flow) -> NodeId {
        Self::with_layout(tree, offset, Vec2::ZERO, Layout { flow, sizing: Sizing::Auto })
    }

    fn with_layout(tree: &mut UiTree, offset: Vec2, size: Vec2, layout: Layout) -> NodeId {
        let id = tree.create(offset, size, Self);
        if let Some(node) = tree.node_mut(id) {
            node.layout = Some(layout);
        }
        id
    }
}

impl Widget for Container {
    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, size: Vec2) -> bool {
        let Some(layout) = tree.node(me).and_then(|node| node.layout) else {
            tree.set_geometry(me, offset, size);
            return true;
        };
        match layout.sizing {
            Sizing::Fixed => {
                if let Some(axis) = layout.flow.axis() {
                    if size.along(axis) < tree.occupied_extent(me, axis) {
                        return false;
                    }
                }
                tree.set_geometry(me, offset, size);
                true
            }
            Sizing::Auto => {
                if size != Vec2::ZERO {
                    return false;
                }
                tree.set_offset(me, offset);
                true
            }
        }
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for Container {
    fn on_click(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2, button: MouseButton) -> bool {
        tree.dispatch_click(me, position, button)
    }

    fn on_hover(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2) -> bool {
        tree.dispatch_hover(me, position)
    }
}

impl UiTree {
    /// Follows content-slot redirection to the node that actually holds
    /// children for `id`.
    #[must_use]
    pub fn resolve_container(&self, id: NodeId) -> NodeId {
        let mut current = id;
        for _ in 0..self.len() {
            match self.node(current).and_then(|node| node.content_slot) {
                Some(slot) if slot != current => current = slot,
                _ => break,
            }
        }
        current
    }

    /// Far edge of the furthest child along `axis`.
    #[must_use]
    pub fn occupied_extent(&self, id: NodeId, axis: Axis) -> f32 {
        self.children(id)
            .iter()
            .filter_map(|&child| self.node(child))
            .map(|node| node.offset.along(axis) + node.size.along(axis))
            .fold(0.0, f32::max)
    }

    /// Places `child` inside `target` and takes ownership of it.
    ///
    /// Configuration errors are logged and returned; the tree is left
    /// untouched when one occurs.
    pub fn add_component(&mut self, target: NodeId, child: NodeId, fill: bool) -> UiResult<()> {
        let result = self.place(target, child, fill).map(|_| ());
        if let Err(err) = &result {
            warn!(%target, %child, "add_component failed: {err}");
        }
        result
    }

    /// Places `child` and also registers it as a pointer listener.
    pub fn add_both(&mut self, target: NodeId, child: NodeId, fill: bool) -> UiResult<()> {
        let result = self.place_listener(target, child, fill);
        if let Err(err) = &result {
            warn!(%target, %child, "add_both failed: {err}");
        }
        result
    }

    /// Registers an already-placed node as a pointer listener of `target`.
    pub fn add_listener(&mut self, target: NodeId, listener: NodeId) -> UiResult<()> {
        let result = self.register_listener(target, listener);
        if let Err(err) = &result {
            warn!(%target, %listener, "add_listener failed: {err}");
        }
        result
    }

    /// Removes and destroys a child of `target`. Returns whether it was found.
    pub fn remove_component(&mut self, target: NodeId, id: NodeId) -> bool {
        let container = self.resolve_container(target);
        if self.node(container).is_some_and(|node| node.layout.is_none()) {
            warn!(%target, %id, "remove_component on a node that is not a container");
            return false;
        }
        if !self.children(container).contains(&id) {
            return false;
        }
        self.remove_node(id)
    }

    /// Destroys every child and listener of `target`.
    pub fn clear(&mut self, target: NodeId) {
        let container = self.resolve_container(target);
        let Some(node) = self.node_mut(container) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        node.listeners.clear();
        for child in children {
            self.destroy(child);
        }
    }

    fn place_listener(&mut self, target: NodeId, child: NodeId, fill: bool) -> UiResult<()> {
        self.require_pointer(child)?;
        let container = self.place(target, child, fill)?;
        self.listen(container, child);
        Ok(())
    }

    fn register_listener(&mut self, target: NodeId, listener: NodeId) -> UiResult<()> {
        self.require_pointer(listener)?;
        let container = self.resolve_container(target);
        if !self.contains(container) {
            return Err(UiError::UnknownNode(container));
        }
        self.listen(container, listener);
        Ok(())
    }

    fn require_pointer(&mut self, id: NodeId) -> UiResult<()> {
        if !self.contains(id) {
            return Err(UiError::UnknownNode(id));
        }
        if self.handles_pointer(id) {
            Ok(())
        } else {
            Err(UiError::NotPointerCapable(id))
        }
    }

    fn listen(&mut self, container: NodeId, listener: NodeId) {
        if let Some(node) = self.node_mut(container) {
            if !node.listeners.contains(&listener) {
                node.listeners.push(listener);
            }
        }
    }

    /// Validates, positions and attaches `child`. Returns the container
    /// that received it.
    fn place(&mut self, target: NodeId, child: NodeId, fill: bool) -> UiResult<NodeId> {
        let container = self.resolve_container(target);
        let node = self.node(container).ok_or(UiError::UnknownNode(container))?;
        let layout = node.layout.ok_or(UiError::NotAContainer(container))?;
        let container_size = node.size;
        let axis = layout.flow.axis();
        if layout.sizing == Sizing::Auto && axis.is_none() {
            return Err(UiError::MissingFlowAxis(container));
        }
        self.check_attachable(container, child)?;

        let Some(axis) = axis else {
            self.attach(container, child);
            return Ok(container);
        };

        let start = self
            .children(container)
            .last()
            .and_then(|&last| self.node(last))
            .map_or(0.0, |last| last.offset.along(axis) + last.size.along(axis));
        let child_size = self.node(child).map_or(Vec2::ZERO, |node| node.size);
        let offset = Vec2::ZERO.with_along(axis, start);

        match layout.sizing {
            Sizing::Fixed => {
                let cross = axis.cross();
                let size = child_size.with_along(cross, container_size.along(cross));
                self.attach(container, child);
                if !self.resize(child, offset, size) {
                    warn!(%container, %child, "child refused its flow slot");
                    self.set_offset(child, offset);
                }
                if fill {
                    let extent = self.node(child).map_or(0.0, |node| node.size.along(axis));
                    self.set_size(container, container_size.with_along(axis, start + extent));
                }
            }
            Sizing::Auto => {
                self.attach(container, child);
                self.set_offset(child, offset);
                let union = Vec2::new(
                    self.occupied_extent(container, Axis::Horizontal),
                    self.occupied_extent(container, Axis::Vertical),
                );
                self.set_size(container, union);
            }
        }
        Ok(container)
    }
}
