//! Engine configuration.
//!
//! Every tunable constant of the widgets lives here. The host builds a
//! [`UiConfig`] (or deserializes one with whatever format it already uses)
//! and hands it to [`crate::Ui::new`].

use serde::{Deserialize, Serialize};

use crate::style::Color;

/// Colours used by the built-in widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Window and text box surfaces.
    pub surface: Color,
    /// Title bars and slider tracks.
    pub primary: Color,
    /// Borders and slider handles.
    pub secondary: Color,
    /// Button background while hovered.
    pub hover: Color,
    /// Checked check box fill.
    pub checked: Color,
    /// Check box border while hovered.
    pub highlight: Color,
    /// Close button background.
    pub close: Color,
    /// Default text colour.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            surface: Color::OFF_WHITE,
            primary: Color::LIGHT_GRAY,
            secondary: Color::DARK_GRAY,
            hover: Color::GRAY,
            checked: Color::BLUE,
            highlight: Color::BLACK,
            close: Color::RED,
            text: Color::BLACK,
        }
    }
}

/// Configuration for the widget engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Frames between repeated edits while a key stays held.
    pub key_repeat_delay: u32,
    /// Frames a key must be held before it starts repeating.
    pub key_start_delay: u32,
    /// Length of one caret blink cycle, in frames.
    pub caret_blink_period: u32,
    /// Frames of each blink cycle during which the caret is shown.
    pub caret_visible_frames: u32,
    /// Height of window title bars.
    pub title_bar_height: f32,
    /// Default font size.
    pub font_size: f32,
    /// Extra advance per column in text boxes.
    pub text_box_padding: f32,
    /// Horizontal inset of text inside text boxes.
    pub text_box_inset: f32,
    /// Border thickness of framed widgets.
    pub frame_margin: f32,
    /// Width of scroll pane scroll bars.
    pub scroll_bar_width: f32,
    /// Slider handle length as a fraction of the track.
    pub slider_handle_scale: f32,
    /// Widget colours.
    pub palette: Palette,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            key_repeat_delay: 12,
            key_start_delay: 15,
            caret_blink_period: 60,
            caret_visible_frames: 30,
            title_bar_height: 20.0,
            font_size: 20.0,
            text_box_padding: 2.0,
            text_box_inset: 5.0,
            frame_margin: 2.0,
            scroll_bar_width: 10.0,
            slider_handle_scale: 0.1,
            palette: Palette::default(),
        }
    }
}
