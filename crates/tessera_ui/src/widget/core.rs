//! Core node types and the widget capability trait.

use std::any::Any;
use std::fmt;

use crate::clip::Painter;
use crate::focus::{DragHandler, KeyHandler};
use crate::geometry::{Rect, Vec2};
use crate::layout::Layout;
use crate::pointer::PointerHandler;
use crate::style::{Border, Clip, Color, Style};

use super::UiTree;

/// Unique identifier for a node. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Creates a new node ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural role a node exposes to its descendants.
///
/// Roles live on the node rather than the widget so they stay queryable
/// while the widget is running one of its own hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// No special role.
    #[default]
    Generic,
    /// A top-level window; title bars and close buttons look for this.
    Window,
}

/// A positioned, sized, drawable unit of the tree.
pub struct Node {
    pub(crate) id: NodeId,
    /// Offset relative to the parent.
    pub offset: Vec2,
    /// Width and height.
    pub size: Vec2,
    /// Paint and dispatch priority among siblings.
    pub z_index: i32,
    /// Hidden nodes are neither drawn nor hit.
    pub visible: bool,
    pub(crate) styles: Vec<Style>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) listeners: Vec<NodeId>,
    pub(crate) layout: Option<Layout>,
    pub(crate) role: Role,
    pub(crate) content_slot: Option<NodeId>,
    pub(crate) style_target: Option<NodeId>,
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Set while the widget is detached to run one of its own hooks.
    pub(crate) busy: bool,
}

impl Node {
    /// Creates a detached node with no behaviour.
    #[must_use]
    pub fn new(id: NodeId, offset: Vec2, size: Vec2) -> Self {
        Self {
            id,
            offset,
            size,
            z_index: 0,
            visible: true,
            styles: Vec::new(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
            layout: None,
            role: Role::Generic,
            content_slot: None,
            style_target: None,
            widget: None,
            busy: false,
        }
    }

    /// The node's id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The owning node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Attached decorators in paint order.
    #[must_use]
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Layout strategy, for container nodes.
    #[must_use]
    pub const fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// Structural role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Node that children added here are redirected to.
    #[must_use]
    pub const fn content_slot(&self) -> Option<NodeId> {
        self.content_slot
    }

    /// Colour of the first background decorator.
    pub fn background_mut(&mut self) -> Option<&mut Color> {
        self.styles.iter_mut().find_map(|style| match style {
            Style::Background(color) => Some(color),
            _ => None,
        })
    }

    /// The first border decorator.
    pub fn border_mut(&mut self) -> Option<&mut Border> {
        self.styles.iter_mut().find_map(|style| match style {
            Style::Border(border) => Some(border),
            _ => None,
        })
    }

    /// The first clip decorator.
    pub fn clip_mut(&mut self) -> Option<&mut Clip> {
        self.styles.iter_mut().find_map(|style| match style {
            Style::Clip(clip) => Some(clip),
            _ => None,
        })
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("z_index", &self.z_index)
            .field("visible", &self.visible)
            .field("styles", &self.styles)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("listeners", &self.listeners)
            .field("layout", &self.layout)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Everything a widget may read while drawing itself.
pub struct DrawCtx<'a> {
    /// The tree being drawn.
    pub tree: &'a UiTree,
    /// The node being drawn.
    pub id: NodeId,
    /// Its global bounds.
    pub bounds: Rect,
}

/// Upcast helper so callers can reach the concrete widget type.
pub trait AsAny: Any {
    /// Returns `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Returns `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to a node.
///
/// Every method has a default, so a widget implements only what it needs.
/// Optional capabilities are discovered through the `as_*` queries; the
/// tree checks for a capability before invoking it.
///
/// While one of the `&mut self` hooks runs, the widget is detached from its
/// node, which lets the hook take `&mut UiTree`. Hooks may therefore
/// restructure the tree, including removing their own node.
pub trait Widget: AsAny {
    /// Draws the widget's own content. Children are drawn by the tree afterwards.
    fn draw(&self, _ctx: &DrawCtx<'_>, _painter: &mut Painter<'_>) {}

    /// Advances timers. Called once per frame before input is routed.
    fn update(&mut self, _tree: &mut UiTree, _me: NodeId) {}

    /// Attempts a geometry change. Returns false if it was refused.
    fn resize(&mut self, tree: &mut UiTree, me: NodeId, offset: Vec2, size: Vec2) -> bool {
        tree.set_geometry(me, offset, size);
        true
    }

    /// Pointer capability.
    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        None
    }

    /// Keyboard capability.
    fn as_keyboard(&mut self) -> Option<&mut dyn KeyHandler> {
        None
    }

    /// Drag capability.
    fn as_draggable(&mut self) -> Option<&mut dyn DragHandler> {
        None
    }
}
