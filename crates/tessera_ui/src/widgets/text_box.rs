//! Single-line text input.

use crate::clip::Painter;
use crate::counter::Counter;
use crate::focus::{KeyEvent, KeyHandler, KeyRepeat};
use crate::geometry::{Rect, Vec2};
use crate::input::MouseButton;
use crate::pointer::PointerHandler;
use crate::style::{Border, Color, Style};
use crate::text_edit::{EditAction, TextEdit};
use crate::widget::{DrawCtx, NodeId, UiTree, Widget};

use super::Text;

/// Called with the current text when enter is pressed.
pub type SubmitCallback = Box<dyn FnMut(&mut UiTree, &str)>;

/// Keyboard-focusable text input with a blinking caret and key repeat.
pub struct TextBox {
    edit: TextEdit,
    label: NodeId,
    font_size: f32,
    color: Color,
    blink: Counter,
    visible_frames: u32,
    repeat: KeyRepeat,
    reset_on_enter: bool,
    on_submit: Option<SubmitCallback>,
}

/// Builder for [`TextBox`].
pub struct TextBoxBuilder {
    cols: usize,
    offset: Vec2,
    font_size: Option<f32>,
    text: String,
    color: Option<Color>,
    reset_on_enter: bool,
    on_submit: Option<SubmitCallback>,
}

impl TextBoxBuilder {
    /// Sets the offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the font size.
    #[must_use]
    pub const fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets the initial text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the text colour.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Clears the field after every submit.
    #[must_use]
    pub const fn with_reset_on_enter(mut self, reset: bool) -> Self {
        self.reset_on_enter = reset;
        self
    }

    /// Sets the submit callback.
    #[must_use]
    pub fn with_on_submit(mut self, on_submit: impl FnMut(&mut UiTree, &str) + 'static) -> Self {
        self.on_submit = Some(Box::new(on_submit));
        self
    }

    /// Creates a detached text box node.
    pub fn build(self, tree: &mut UiTree) -> NodeId {
        let config = tree.config().clone();
        let font_size = self.font_size.unwrap_or(config.font_size);
        let color = self.color.unwrap_or(config.palette.text);
        let edit = TextEdit::with_text(self.cols, &self.text);

        let glyph = tree.measure_text(" ", font_size).x;
        #[allow(clippy::cast_precision_loss)]
        let width = (glyph + config.text_box_padding) * self.cols as f32 + config.text_box_inset;
        let id = tree.create_empty(self.offset, Vec2::new(width, font_size));
        tree.push_style(id, Style::Background(config.palette.surface));
        tree.push_style(id, Style::Border(Border::new(config.frame_margin, config.palette.secondary)));

        let label = Text::new(&config, edit.text())
            .with_font_size(font_size)
            .with_color(color)
            .build(tree, Vec2::new(config.text_box_inset, 0.0));
        if let Err(err) = tree.adopt(id, label) {
            tracing::warn!(node = %id, "text box label not attached: {err}");
        }

        tree.set_widget(
            id,
            TextBox {
                edit,
                label,
                font_size,
                color,
                blink: Counter::new(config.caret_blink_period, true),
                visible_frames: config.caret_visible_frames,
                repeat: KeyRepeat::new(config.key_start_delay, config.key_repeat_delay),
                reset_on_enter: self.reset_on_enter,
                on_submit: self.on_submit,
            },
        );
        id
    }
}

impl TextBox {
    /// Starts building a text box holding at most `cols` characters.
    #[must_use]
    pub fn builder(cols: usize) -> TextBoxBuilder {
        TextBoxBuilder {
            cols,
            offset: Vec2::ZERO,
            font_size: None,
            text: String::new(),
            color: None,
            reset_on_enter: false,
            on_submit: None,
        }
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        self.edit.text()
    }

    /// Caret position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.edit.cursor()
    }

    /// The key repeat state.
    #[must_use]
    pub const fn key_repeat(&self) -> &KeyRepeat {
        &self.repeat
    }

    fn column_width(&self, tree: &UiTree) -> f32 {
        tree.measure_text(" ", self.font_size).x + tree.config().text_box_padding
    }

    fn handle(&mut self, tree: &mut UiTree, event: KeyEvent) {
        self.blink.reset();
        match self.edit.apply(event.key, event.modifiers) {
            EditAction::Edited => Text::set_text(tree, self.label, self.edit.text()),
            EditAction::Submitted => {
                let text = self.edit.text().to_owned();
                if let Some(on_submit) = self.on_submit.as_mut() {
                    on_submit(tree, &text);
                }
                if self.reset_on_enter {
                    self.edit.clear();
                    Text::set_text(tree, self.label, "");
                }
            }
            EditAction::CursorMoved | EditAction::Ignored => {}
        }
    }
}

impl Widget for TextBox {
    fn draw(&self, ctx: &DrawCtx<'_>, painter: &mut Painter<'_>) {
        if !ctx.tree.focus().is_keyboard_focused(ctx.id) || self.blink.count() >= self.visible_frames {
            return;
        }
        let config = ctx.tree.config();
        #[allow(clippy::cast_precision_loss)]
        let x = ctx.bounds.x + self.column_width(ctx.tree) * self.edit.cursor() as f32 + config.text_box_inset;
        painter.fill_rect(Rect::new(x, ctx.bounds.y, 1.0, self.font_size), self.color);
    }

    fn update(&mut self, _tree: &mut UiTree, _me: NodeId) {
        self.blink.tick();
        self.repeat.tick();
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }

    fn as_keyboard(&mut self) -> Option<&mut dyn KeyHandler> {
        Some(self)
    }
}

impl PointerHandler for TextBox {
    fn on_click(&mut self, tree: &mut UiTree, me: NodeId, position: Vec2, _button: MouseButton) -> bool {
        let origin = tree.global_offset(me).x + tree.config().text_box_inset;
        let column = self.column_width(tree);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let nearest = ((position.x - origin + column / 2.0) / column).max(0.0) as usize;
        self.edit.set_cursor(nearest);
        self.blink.reset();
        tree.focus_keyboard(me);
        true
    }
}

impl KeyHandler for TextBox {
    fn key_pressed(&mut self, tree: &mut UiTree, _me: NodeId, event: KeyEvent) {
        self.handle(tree, event);
        self.repeat.press();
    }

    fn key_held(&mut self, tree: &mut UiTree, _me: NodeId, event: KeyEvent) {
        if self.repeat.held() {
            self.handle(tree, event);
        }
    }

    fn key_released(&mut self, _tree: &mut UiTree, _me: NodeId, _event: KeyEvent) {
        self.repeat.release();
    }

    fn focus_lost(&mut self, _tree: &mut UiTree, _me: NodeId) {
        self.repeat.release();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::UiConfig;
    use crate::focus::KeyPhase;
    use crate::input::{Key, Modifiers};
    use crate::render::MonospaceMetrics;

    fn tree() -> UiTree {
        UiTree::new(UiConfig::default(), MonospaceMetrics::default())
    }

    fn key(tree: &mut UiTree, id: NodeId, phase: KeyPhase, key: Key) {
        tree.deliver_key(id, phase, KeyEvent { key, modifiers: Modifiers::default() });
    }

    #[test]
    fn test_size_follows_columns() {
        let mut tree = tree();
        let id = TextBox::builder(10).build(&mut tree);
        // (10 glyph + 2 padding) * 10 cols + 5 inset, then 2 border on each side
        assert_eq!(tree.node(id).unwrap().size, Vec2::new(129.0, 24.0));
    }

    #[test]
    fn test_typing_updates_label() {
        let mut tree = tree();
        let id = TextBox::builder(8).build(&mut tree);
        key(&mut tree, id, KeyPhase::Pressed, Key::Char('H'));
        key(&mut tree, id, KeyPhase::Released, Key::Char('H'));
        key(&mut tree, id, KeyPhase::Pressed, Key::Char('I'));

        let label = tree.children(id)[0];
        assert_eq!(tree.widget::<TextBox>(id).map(TextBox::text), Some("hi"));
        assert_eq!(tree.widget::<Text>(label).map(Text::text), Some("hi"));
    }

    #[test]
    fn test_submit_and_reset() {
        let mut tree = tree();
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        let id = TextBox::builder(8)
            .with_text("go")
            .with_reset_on_enter(true)
            .with_on_submit(move |_, text| sink.borrow_mut().push(text.to_owned()))
            .build(&mut tree);

        key(&mut tree, id, KeyPhase::Pressed, Key::Enter);
        assert_eq!(*submitted.borrow(), vec!["go".to_owned()]);
        assert_eq!(tree.widget::<TextBox>(id).map(TextBox::text), Some(""));
    }

    #[test]
    fn test_click_places_caret_and_focuses() {
        let mut tree = tree();
        let id = TextBox::builder(8).with_text("abcd").build(&mut tree);
        // Border shifted the node to -2; text starts at -2 + 5 = 3; columns are 12 wide.
        assert!(tree.click(id, Vec2::new(3.0 + 12.0 * 2.0 + 1.0, 5.0), MouseButton::Left));
        assert_eq!(tree.widget::<TextBox>(id).map(TextBox::cursor), Some(2));
        assert!(tree.focus().is_keyboard_focused(id));

        tree.click(id, Vec2::new(500.0, 5.0), MouseButton::Left);
        assert_eq!(tree.widget::<TextBox>(id).map(TextBox::cursor), Some(4));
    }

    #[test]
    fn test_losing_focus_mid_hold_disarms_repeat() {
        let mut tree = tree();
        let first = TextBox::builder(8).build(&mut tree);
        let second = TextBox::builder(8).with_offset(Vec2::new(0.0, 40.0)).build(&mut tree);
        tree.focus_keyboard(first);

        key(&mut tree, first, KeyPhase::Pressed, Key::Char('A'));
        for _ in 0..20 {
            tree.update(first);
            key(&mut tree, first, KeyPhase::Held, Key::Char('A'));
        }
        assert!(tree.widget::<TextBox>(first).unwrap().key_repeat().is_repeating());

        tree.focus_keyboard(second);
        for _ in 0..5 {
            tree.update(first);
        }
        let repeat = tree.widget::<TextBox>(first).unwrap().key_repeat();
        assert_eq!((repeat.start_count(), repeat.repeat_count()), (0, 0));
        assert!(!repeat.is_repeating());
    }
}
