//! Integration test for the frame pump.
//!
//! Drives a whole interface through `Ui::run_frame` with scripted input and
//! checks what reaches the widgets and the renderer.

use std::cell::RefCell;
use std::rc::Rc;

use tessera_ui::widgets::{CheckBox, Slider, TextBox};
use tessera_ui::{
    Axis, Color, Container, DrawCtx, Flow, InputState, Key, MonospaceMetrics, MouseButton, NodeId, Painter,
    PointerHandler, Rect, RecordingRenderer, RenderCommand, Ui, UiConfig, UiTree, Vec2, Widget,
};

struct Harness {
    ui: Ui,
    input: InputState,
    renderer: RecordingRenderer,
}

impl Harness {
    fn new() -> Self {
        Self {
            ui: Ui::new(UiConfig::default(), Vec2::new(800.0, 600.0), MonospaceMetrics::default()),
            input: InputState::new(),
            renderer: RecordingRenderer::new(),
        }
    }

    fn frame(&mut self) {
        self.ui.run_frame(&mut self.input, &mut self.renderer);
        self.input.begin_frame();
    }

    fn click(&mut self, x: f32, y: f32) {
        self.input.set_mouse_pos(x, y);
        self.input.mouse_button_down(MouseButton::Left);
        self.frame();
        self.input.mouse_button_up(MouseButton::Left);
        self.frame();
    }

    fn add(&mut self, id: NodeId) {
        let root = self.ui.root();
        self.ui.tree_mut().add_both(root, id, false).unwrap();
    }
}

/// Paints a solid block and logs the clicks it receives.
struct Block {
    name: &'static str,
    color: Color,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl Widget for Block {
    fn draw(&self, ctx: &DrawCtx<'_>, painter: &mut Painter<'_>) {
        painter.fill_rect(ctx.bounds, self.color);
    }

    fn as_pointer(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for Block {
    fn on_click(&mut self, _tree: &mut UiTree, _me: NodeId, _position: Vec2, _button: MouseButton) -> bool {
        self.log.borrow_mut().push(self.name);
        true
    }
}

fn block(tree: &mut UiTree, name: &'static str, color: Color, log: &Rc<RefCell<Vec<&'static str>>>) -> NodeId {
    tree.create(
        Vec2::new(100.0, 100.0),
        Vec2::new(50.0, 50.0),
        Block { name, color, log: Rc::clone(log) },
    )
}

#[test]
fn test_held_key_edits_at_start_then_repeat_delay() {
    let mut h = Harness::new();
    let text_box = TextBox::builder(50).with_offset(Vec2::new(10.0, 10.0)).build(h.ui.tree_mut());
    h.add(text_box);

    h.click(20.0, 20.0);
    assert!(h.ui.tree().focus().is_keyboard_focused(text_box));

    h.input.key_down(Key::Char('a'));
    let mut edits = Vec::new();
    let mut previous = 0;
    for frame in 0..50 {
        h.frame();
        let len = h.ui.tree().widget::<TextBox>(text_box).unwrap().text().len();
        if len > previous {
            edits.push(frame);
            previous = len;
        }
    }
    assert_eq!(edits, vec![0, 15, 27, 39]);
    assert_eq!(h.ui.tree().widget::<TextBox>(text_box).unwrap().text(), "aaaa");

    h.input.key_up(Key::Char('a'));
    h.frame();
    let repeat = *h.ui.tree().widget::<TextBox>(text_box).unwrap().key_repeat();
    assert_eq!(repeat.start_count(), 0);
    assert_eq!(repeat.repeat_count(), 0);
    assert_eq!(h.ui.tree().focus().tracked_key(), None);

    // Idle frames leave the counters alone.
    for _ in 0..5 {
        h.frame();
    }
    let repeat = *h.ui.tree().widget::<TextBox>(text_box).unwrap().key_repeat();
    assert_eq!(repeat.start_count(), 0);
}

#[test]
fn test_focus_change_mid_hold_stops_old_box_repeating() {
    let mut h = Harness::new();
    let first = TextBox::builder(20).with_offset(Vec2::new(10.0, 10.0)).build(h.ui.tree_mut());
    let second = TextBox::builder(20).with_offset(Vec2::new(10.0, 60.0)).build(h.ui.tree_mut());
    h.add(first);
    h.add(second);

    h.click(20.0, 20.0);
    h.input.key_down(Key::Char('a'));
    for _ in 0..20 {
        h.frame();
    }
    assert!(h.ui.tree().widget::<TextBox>(first).unwrap().key_repeat().is_repeating());

    // The key stays down while focus moves.
    h.click(20.0, 70.0);
    assert!(h.ui.tree().focus().is_keyboard_focused(second));
    let typed = h.ui.tree().widget::<TextBox>(first).unwrap().text().len();

    for _ in 0..30 {
        h.frame();
    }
    let old = h.ui.tree().widget::<TextBox>(first).unwrap();
    assert_eq!(old.text().len(), typed);
    assert_eq!(old.key_repeat().start_count(), 0);
    assert_eq!(old.key_repeat().repeat_count(), 0);
    assert!(!old.key_repeat().is_repeating());
    assert_eq!(h.ui.tree().widget::<TextBox>(second).unwrap().text(), "");
}

#[test]
fn test_keys_without_focus_are_dropped() {
    let mut h = Harness::new();
    let text_box = TextBox::builder(10).with_offset(Vec2::new(10.0, 10.0)).build(h.ui.tree_mut());
    h.add(text_box);

    h.input.key_down(Key::Char('x'));
    h.frame();
    h.input.key_up(Key::Char('x'));
    h.frame();

    assert_eq!(h.ui.tree().widget::<TextBox>(text_box).unwrap().text(), "");
}

#[test]
fn test_dispatch_follows_z_not_registration_order() {
    for reversed in [false, true] {
        let mut h = Harness::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let tree = h.ui.tree_mut();
        let front = block(tree, "front", Color::RED, &log);
        let back = block(tree, "back", Color::BLUE, &log);
        tree.set_z_index(front, 10);
        tree.set_z_index(back, 5);
        if reversed {
            h.add(back);
            h.add(front);
        } else {
            h.add(front);
            h.add(back);
        }

        h.click(120.0, 120.0);
        assert_eq!(*log.borrow(), vec!["front"]);

        // The z 10 block is painted after the z 5 block.
        let fills: Vec<Color> = h
            .renderer
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::FillRect { bounds, color } if *bounds == Rect::new(100.0, 100.0, 50.0, 50.0) => {
                    Some(*color)
                }
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Color::BLUE, Color::RED]);
    }
}

#[test]
fn test_child_outside_parent_gets_empty_clip() {
    let mut h = Harness::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let tree = h.ui.tree_mut();
    let parent = Container::fixed(tree, Vec2::new(10.0, 10.0), Vec2::new(50.0, 50.0), Flow::Free);
    let child = block(tree, "child", Color::RED, &log);
    tree.add_component(parent, child, false).unwrap();
    h.add(parent);

    h.frame();
    let clips: Vec<Rect> = h
        .renderer
        .commands()
        .iter()
        .filter_map(|command| match command {
            RenderCommand::BeginClip { bounds } => Some(*bounds),
            _ => None,
        })
        .collect();

    assert!(clips.iter().all(|clip| clip.width >= 0.0 && clip.height >= 0.0));
    assert!(clips.iter().any(Rect::is_empty));
    assert_eq!(h.renderer.commands().last(), Some(&RenderCommand::EndClip));
    assert_eq!(h.renderer.frames(), 1);
}

#[test]
fn test_moving_ancestor_moves_descendants() {
    let mut h = Harness::new();
    let tree = h.ui.tree_mut();
    let outer = Container::fixed(tree, Vec2::new(10.0, 10.0), Vec2::new(300.0, 300.0), Flow::Free);
    let inner = Container::fixed(tree, Vec2::new(20.0, 20.0), Vec2::new(100.0, 100.0), Flow::Free);
    let check = CheckBox::new(false).build(tree, Vec2::new(5.0, 5.0), Vec2::new(20.0, 20.0));
    tree.add_both(inner, check, false).unwrap();
    tree.add_both(outer, inner, false).unwrap();
    h.add(outer);

    // The border pulls the check box out by its margin.
    assert_eq!(h.ui.tree().global_offset(check), Vec2::new(33.0, 33.0));
    h.ui.tree_mut().set_offset(outer, Vec2::new(110.0, 60.0));
    assert_eq!(h.ui.tree().global_offset(check), Vec2::new(133.0, 83.0));

    h.click(140.0, 90.0);
    assert!(h.ui.tree().widget::<CheckBox>(check).unwrap().is_checked());
}

#[test]
fn test_slider_drag_ends_on_release() {
    let mut h = Harness::new();
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    let slider = Slider::new(Axis::Horizontal)
        .with_on_change(move |_, value| sink.borrow_mut().push(value))
        .build(h.ui.tree_mut(), Vec2::new(100.0, 100.0), Vec2::new(100.0, 10.0));
    h.add(slider);

    h.input.set_mouse_pos(100.0, 105.0);
    h.input.mouse_button_down(MouseButton::Left);
    h.frame();
    assert_eq!(h.ui.tree().focus().drag_holder(), Some(slider));

    h.input.set_mouse_pos(150.0, 300.0);
    h.frame();
    let value = h.ui.tree().widget::<Slider>(slider).unwrap().value();
    assert!((value - 0.5).abs() < 1e-4, "value {value}");

    h.input.set_mouse_pos(500.0, 105.0);
    h.frame();
    assert_eq!(h.ui.tree().widget::<Slider>(slider).unwrap().value(), 1.0);

    h.input.mouse_button_up(MouseButton::Left);
    h.frame();
    assert_eq!(h.ui.tree().focus().drag_holder(), None);
    assert!(h.ui.tree().focus().drag_session().is_none());

    // Moving after release no longer drags.
    let reported = values.borrow().len();
    h.input.set_mouse_pos(120.0, 105.0);
    h.frame();
    assert_eq!(values.borrow().len(), reported);
}
