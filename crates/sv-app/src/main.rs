//! Main application entry point

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use parking_lot::Mutex;
use tracing::{error, info};

use sv_core::{ImageStack, ViewerConfig};
use sv_data::{demo_stack, load_csv_dir, DemoStackParams};
use sv_render::Scene;
use sv_ui::{ScenePainter, Theme};
use sv_views::ImageStackViewer;

mod args;

use args::Args;

/// Scroll distance, in points, that counts as one step
const SCROLL_STEP: f32 = 40.0;

/// Main application state
struct StackViewApp {
    painter: ScenePainter,
    viewer: Option<Arc<ImageStackViewer>>,
    config: ViewerConfig,
    theme: Theme,
    /// Name of the loaded stack, shown in the status bar
    source: String,
    error: Option<String>,
    scroll: f32,
}

impl StackViewApp {
    fn new(cc: &eframe::CreationContext<'_>, args: Args) -> Self {
        let theme = if args.dark { Theme::dark() } else { Theme::default() };
        sv_ui::apply_theme(&cc.egui_ctx, &theme);

        let mut app = Self {
            painter: ScenePainter::new(Arc::new(Mutex::new(Scene::new()))),
            viewer: None,
            config: ViewerConfig::default(),
            theme,
            source: String::new(),
            error: None,
            scroll: 0.0,
        };

        if let Some(path) = &args.config {
            app.load_config(path);
        }
        match &args.stack_dir {
            Some(dir) => app.open_dir(dir),
            None => app.open_demo(),
        }
        app
    }

    fn load_config(&mut self, path: &Path) {
        match ViewerConfig::load(path) {
            Ok(config) => {
                info!("loaded viewer config from {}", path.display());
                self.config = config;
            }
            Err(e) => self.report(format!("Failed to load {}: {}", path.display(), e)),
        }
    }

    fn open_dir(&mut self, dir: &Path) {
        match load_csv_dir(dir) {
            Ok(stack) => self.show_stack(stack, dir.display().to_string()),
            Err(e) => self.report(format!("Failed to open {}: {}", dir.display(), e)),
        }
    }

    fn open_demo(&mut self) {
        match demo_stack(DemoStackParams::default()) {
            Ok(stack) => self.show_stack(stack, "demo stack".to_string()),
            Err(e) => self.report(format!("Failed to build demo stack: {}", e)),
        }
    }

    /// Replace whatever is on screen with a fresh viewer over `stack`
    fn show_stack(&mut self, stack: ImageStack, source: String) {
        let painter = ScenePainter::new(Arc::new(Mutex::new(Scene::new())));
        match ImageStackViewer::from_stack(painter.surface(), stack, self.config.clone()) {
            Ok(viewer) => {
                info!("showing {}", source);
                self.painter = painter;
                self.viewer = Some(viewer);
                self.source = source;
                self.error = None;
            }
            Err(e) => self.report(format!("Failed to show {}: {}", source, e)),
        }
    }

    fn report(&mut self, message: String) {
        error!("{}", message);
        self.error = Some(message);
    }

    /// Arrow keys and the scroll wheel step through the stack
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let Some(viewer) = self.viewer.clone() else {
            return;
        };
        let selector = viewer.selector();

        let (forward, backward, scroll) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::ArrowDown),
                i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::ArrowUp),
                i.scroll_delta.y,
            )
        });

        if forward {
            selector.step_forward();
        }
        if backward {
            selector.step_backward();
        }

        self.scroll += scroll;
        while self.scroll <= -SCROLL_STEP {
            self.scroll += SCROLL_STEP;
            selector.step_forward();
        }
        while self.scroll >= SCROLL_STEP {
            self.scroll -= SCROLL_STEP;
            selector.step_backward();
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open folder...").clicked() {
                        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                            self.open_dir(&dir);
                        }
                        ui.close_menu();
                    }

                    if ui.button("Load config...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Viewer config", &["json"])
                            .pick_file()
                        {
                            self.load_config(&path);
                            self.reload();
                        }
                        ui.close_menu();
                    }

                    if ui.button("Demo stack").clicked() {
                        self.open_demo();
                        ui.close_menu();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }

    /// Rebuild the current viewer so a new config takes effect
    fn reload(&mut self) {
        if let Some(viewer) = self.viewer.take() {
            let stack = viewer.stack().clone();
            let source = self.source.clone();
            self.show_stack(stack, source);
            if self.viewer.is_none() {
                self.viewer = Some(viewer);
            }
        }
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(error) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(230, 80, 80), error.as_str());
                } else if let Some(viewer) = &self.viewer {
                    let (rows, cols) = viewer.stack().slice_shape();
                    let (min, max) = viewer.color_range();
                    ui.label(format!(
                        "{}  |  slice {}/{}  |  {}x{}  |  range {:.3} .. {:.3}",
                        self.source,
                        viewer.current_index() + 1,
                        viewer.stack().len(),
                        rows,
                        cols,
                        min,
                        max
                    ));
                }
            });
        });
    }
}

impl eframe::App for StackViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.menu_bar(ctx);
        self.status_bar(ctx);
        self.handle_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.painter.show(ui, &self.theme);
        });
    }
}

fn main() -> Result<()> {
    // Honors RUST_LOG, e.g. RUST_LOG=sv_core=debug
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if let Some(dir) = &args.stack_dir {
        if !dir.is_dir() {
            anyhow::bail!("{} is not a directory", dir.display());
        }
    }

    info!("Starting image stack viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 400.0]),
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Image Stack Viewer",
        options,
        Box::new(move |cc| Box::new(StackViewApp::new(cc, args))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
