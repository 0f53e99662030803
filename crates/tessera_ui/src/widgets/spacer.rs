//! Invisible filler.

use crate::geometry::Vec2;
use crate::widget::{NodeId, UiTree, Widget};

/// Takes up room in a flow and draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spacer;

impl Spacer {
    /// Creates a detached spacer.
    pub fn build(tree: &mut UiTree, size: Vec2) -> NodeId {
        tree.create(Vec2::ZERO, size, Self)
    }
}

impl Widget for Spacer {}
