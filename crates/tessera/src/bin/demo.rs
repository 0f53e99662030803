//! # Tessera demo
//!
//! Builds the settings scene and drives it headlessly with a scripted
//! session: focus the name field, type, submit, tick the check box, drag
//! the slider and finally close the window. Each frame is lowered to vertex
//! batches and summarised through `tracing`.
//!
//! Run with: `RUST_LOG=tessera_ui=debug cargo run --bin tessera_demo`

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use tessera::batch::BatchRenderer;
use tessera::scene::build_demo_scene;
use tessera::widgets::{Button, Field, Window};
use tessera::{InputState, Key, MonospaceMetrics, MouseButton, NodeId, Ui, UiConfig, UiTree, Vec2, Widget};

/// Our crates log at info, everything else at warn.
const DEFAULT_FILTER: &str = "warn,tessera=info,tessera_ui=info,tessera_demo=info";

fn init_logging() {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = std::env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }
    let format = fmt::format().compact().with_line_number(true);
    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(fmt::layer().event_format(format));
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("unable to install log subscriber: {err}");
    }
}

struct Session {
    ui: Ui,
    input: InputState,
    renderer: BatchRenderer,
}

impl Session {
    fn frame(&mut self) {
        self.ui.run_frame(&mut self.input, &mut self.renderer);
        self.input.begin_frame();
    }

    fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }

    fn press(&mut self, at: Vec2) {
        self.input.set_mouse_pos(at.x, at.y);
        self.input.mouse_button_down(MouseButton::Left);
        self.frame();
    }

    fn release(&mut self) {
        self.input.mouse_button_up(MouseButton::Left);
        self.frame();
    }

    fn tap_key(&mut self, key: Key) {
        self.input.key_down(key);
        self.frame();
        self.input.key_up(key);
        self.frame();
    }

    fn centre_of(&self, id: NodeId) -> Option<Vec2> {
        let bounds = self.ui.tree().global_bounds(id)?;
        Some(Vec2::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0))
    }

    fn summarise(&self, stage: &str) {
        let texts: Vec<&str> = self.renderer.texts().iter().map(|run| run.text.as_str()).collect();
        info!(
            stage,
            frame = self.ui.frame(),
            nodes = self.ui.tree().len(),
            batches = self.renderer.batches().len(),
            vertices = self.renderer.vertices().len(),
            upload_bytes = self.renderer.vertex_bytes().len(),
            "{texts:?}"
        );
    }
}

fn find<T: Widget>(tree: &UiTree, from: NodeId) -> Option<NodeId> {
    if tree.widget::<T>(from).is_some() {
        return Some(from);
    }
    tree.children(from).iter().find_map(|&child| find::<T>(tree, child))
}

fn main() {
    init_logging();

    let mut ui = Ui::new(UiConfig::default(), Vec2::new(800.0, 600.0), MonospaceMetrics::default());
    let scene = match build_demo_scene(&mut ui) {
        Ok(scene) => scene,
        Err(err) => {
            error!("scene construction failed: {err}");
            return;
        }
    };
    let mut session = Session { ui, input: InputState::new(), renderer: BatchRenderer::new() };
    session.frame();
    session.summarise("built");

    let text_box = session.ui.tree().widget::<Field>(scene.field).map(Field::text_box);
    if let Some(at) = text_box.and_then(|id| session.centre_of(id)) {
        session.press(at);
        session.release();
        for c in "tessera".chars() {
            session.tap_key(Key::Char(c));
        }
        session.tap_key(Key::Enter);
        session.summarise("submitted");
    }

    if let Some(at) = session.centre_of(scene.check) {
        session.press(at);
        session.release();
    }

    if let Some(at) = session.centre_of(scene.slider) {
        session.press(at);
        session.input.set_mouse_pos(at.x + 60.0, at.y);
        session.frames(3);
        session.release();
        session.summarise("adjusted");
    }

    let close = session
        .ui
        .tree()
        .widget::<Window>(scene.window)
        .map(Window::title_bar)
        .and_then(|bar| find::<Button>(session.ui.tree(), bar));
    if let Some(at) = close.and_then(|id| session.centre_of(id)) {
        session.press(at);
        session.release();
    }
    session.summarise("closed");
}
