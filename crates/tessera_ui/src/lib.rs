//! # Tessera UI
//!
//! Retained-mode widget engine: a tree of positioned nodes, decorated by
//! composable styles, laid out by simple flow rules and driven by a single
//! per-frame pump.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      FRAME PUMP                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  update → input → hover/click → drag → keys → draw       │
//! │               ↓           ↓        ↓      ↓      ↓       │
//! │          InputSource   z-desc   drag   keyboard  z-asc   │
//! │                        dispatch focus  focus     paint   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nodes live in a [`UiTree`] arena and are addressed by [`NodeId`]. Their
//! behaviour is a boxed [`Widget`] exposing optional pointer, keyboard and
//! drag capabilities. The renderer and the input device stay outside the
//! crate behind the [`Renderer`], [`TextMetrics`] and [`InputSource`] traits.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clip;
pub mod config;
pub mod counter;
pub mod error;
pub mod focus;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod pointer;
pub mod render;
pub mod style;
pub mod text_edit;
pub mod widget;
pub mod widgets;

pub use clip::{ClipStack, Painter};
pub use config::{Palette, UiConfig};
pub use counter::Counter;
pub use error::{UiError, UiResult};
pub use focus::{DragEvent, DragHandler, FocusManager, KeyEvent, KeyHandler, KeyPhase, KeyRepeat};
pub use frame::Ui;
pub use geometry::{Axis, Rect, Vec2};
pub use input::{InputSource, InputState, Key, Modifiers, MouseButton};
pub use layout::{Container, Flow, Layout, Sizing};
pub use pointer::PointerHandler;
pub use render::{MonospaceMetrics, RecordingRenderer, RenderCommand, Renderer, TextMetrics, TextureId};
pub use style::{Border, Clip, ClipAnchor, Color, Edges, Style};
pub use text_edit::{EditAction, TextEdit};
pub use widget::{DrawCtx, Node, NodeId, Role, UiTree, Widget};
