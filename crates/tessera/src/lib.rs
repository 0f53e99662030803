//! # Tessera
//!
//! Facade over [`tessera_ui`] plus the sample scene used by the
//! `tessera_demo` binary.
//!
//! ## Modules
//!
//! - [`tessera_ui`]: node arena, decorators, layout, routing and widgets
//! - [`batch`]: lowers draw calls to vertex batches for GPU upload
//! - [`scene`]: a settings window exercising every widget

pub use tessera_ui::*;

pub mod batch;

/// Sample scene.
pub mod scene {
    use tracing::{info, warn};

    use tessera_ui::widgets::{CheckBox, Field, ScrollPane, Slider, Text, Window};
    use tessera_ui::{Axis, Container, Flow, NodeId, Ui, UiResult, Vec2};

    /// Handles to the interesting nodes of the demo scene.
    #[derive(Debug, Clone, Copy)]
    pub struct DemoScene {
        /// The settings window.
        pub window: NodeId,
        /// Name entry field.
        pub field: NodeId,
        /// Toggle.
        pub check: NodeId,
        /// Volume slider.
        pub slider: NodeId,
        /// Scrolled submission log.
        pub scroll: NodeId,
        /// Auto-growing list inside the scroll pane.
        pub log: NodeId,
    }

    /// Builds a window holding a field, a check box, a slider and a scrolled
    /// log that collects every submitted line.
    pub fn build_demo_scene(ui: &mut Ui) -> UiResult<DemoScene> {
        let root = ui.root();
        let tree = ui.tree_mut();
        let window = Window::build(tree, Vec2::new(40.0, 40.0), Vec2::new(420.0, 320.0), "Settings")?;

        let log = Container::auto(tree, Vec2::ZERO, Flow::Vertical);
        let field = Field::build(tree, Vec2::new(10.0, 10.0), Vec2::new(390.0, 24.0), "Name", 16, move |tree, text| {
            info!(text, "line submitted");
            let line = Text::label(tree, text);
            if let Err(err) = tree.add_component(log, line, false) {
                warn!("dropping submitted line: {err}");
                tree.remove_node(line);
            }
        })?;

        let check = CheckBox::new(false)
            .with_on_toggle(|_, checked| info!(checked, "toggled"))
            .build(tree, Vec2::new(10.0, 50.0), Vec2::new(16.0, 16.0));
        let slider = Slider::new(Axis::Horizontal)
            .with_value(0.5)
            .with_on_change(|_, value| info!(value, "volume changed"))
            .build(tree, Vec2::new(40.0, 52.0), Vec2::new(200.0, 12.0));

        for line in ["ready", "type a name and press enter"] {
            let label = Text::label(tree, line);
            tree.add_component(log, label, false)?;
        }
        tree.set_offset(log, Vec2::new(10.0, 80.0));
        let scroll = ScrollPane::build(tree, log, Vec2::new(300.0, 150.0))?;

        for id in [field, check, slider, scroll] {
            tree.add_both(window, id, false)?;
        }
        tree.add_both(root, window, false)?;

        Ok(DemoScene { window, field, check, slider, scroll, log })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use tessera_ui::widgets::TextBox;
        use tessera_ui::{Key, KeyEvent, KeyPhase, Modifiers, MonospaceMetrics, UiConfig};

        fn ui() -> Ui {
            Ui::new(UiConfig::default(), Vec2::new(800.0, 600.0), MonospaceMetrics::default())
        }

        #[test]
        fn test_scene_lands_in_window_content() {
            let mut ui = ui();
            let scene = build_demo_scene(&mut ui).unwrap();
            let tree = ui.tree();
            let content = tree.widget::<Window>(scene.window).unwrap().content();

            for id in [scene.field, scene.check, scene.slider, scene.scroll] {
                assert_eq!(tree.parent(id), Some(content));
                assert!(tree.listeners(content).contains(&id));
            }
            assert_eq!(tree.parent(scene.log), Some(scene.scroll));
        }

        #[test]
        fn test_submitted_line_grows_log() {
            let mut ui = ui();
            let scene = build_demo_scene(&mut ui).unwrap();
            let tree = ui.tree_mut();
            let text_box = tree.widget::<Field>(scene.field).unwrap().text_box();
            let height = tree.node(scene.log).unwrap().size.y;

            for key in [Key::Char('h'), Key::Char('i'), Key::Enter] {
                tree.deliver_key(text_box, KeyPhase::Pressed, KeyEvent { key, modifiers: Modifiers::default() });
            }

            assert_eq!(tree.widget::<TextBox>(text_box).unwrap().text(), "hi");
            assert_eq!(tree.children(scene.log).len(), 3);
            assert!(tree.node(scene.log).unwrap().size.y > height);
        }
    }
}
