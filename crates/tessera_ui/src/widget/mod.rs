//! Component tree.
//!
//! Nodes live in a [`UiTree`] arena; their behaviour is a boxed [`Widget`].

mod core;
mod tree;

pub use self::core::{AsAny, DrawCtx, Node, NodeId, Role, Widget};
pub use self::tree::UiTree;
