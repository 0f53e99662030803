//! Widgets composed from nodes, decorators and containers.

mod button;
mod checkbox;
mod field;
mod scroll_pane;
mod slider;
mod spacer;
mod text;
mod text_box;
mod title_bar;
mod window;

pub use button::{Button, ClickCallback, ClickEvent};
pub use checkbox::{CheckBox, ToggleCallback};
pub use field::Field;
pub use scroll_pane::ScrollPane;
pub use slider::{ChangeCallback, Slider};
pub use spacer::Spacer;
pub use text::{Align, Text};
pub use text_box::{SubmitCallback, TextBox, TextBoxBuilder};
pub use title_bar::TitleBar;
pub use window::Window;
