//! egui painter for a retained scene
//!
//! Each frame the painter snapshots the [`Scene`], paints it into the space
//! it is given and routes clicks and drags back through
//! [`dispatch_pointer`]. The scene lock is never held while handlers run.

use std::sync::Arc;

use egui::{
    Color32, ColorImage, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, TextureHandle,
    TextureOptions, Ui,
};
use parking_lot::Mutex;
use sv_render::{
    colorize, colormap_color, dispatch_pointer, legend_ticks, normalize, ColormapKind, FilledRect,
    ImageLayer, PointerKind, Scene, SharedSurface, TextItem,
};
use tracing::trace;

use crate::theme::Theme;

/// Figure height at which scene font sizes are used unscaled
const REFERENCE_HEIGHT: f32 = 480.0;
const LEGEND_STEPS: usize = 64;
const LEGEND_TICKS: usize = 5;

pub struct ScenePainter {
    scene: Arc<Mutex<Scene>>,
    surface: SharedSurface,
    texture: Option<TextureHandle>,
    texture_generation: u64,
}

impl ScenePainter {
    pub fn new(scene: Arc<Mutex<Scene>>) -> Self {
        let surface: SharedSurface = scene.clone();
        Self {
            scene,
            surface,
            texture: None,
            texture_generation: 0,
        }
    }

    /// Surface the widgets should draw into
    pub fn surface(&self) -> SharedSurface {
        self.surface.clone()
    }

    /// Paint the scene into all of the available space and handle input
    pub fn show(&mut self, ui: &mut Ui, theme: &Theme) -> Response {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let frame = response.rect;

        let cached = self.texture.as_ref().map(|_| self.texture_generation);
        let (rects, texts, image) = {
            let mut scene = self.scene.lock();
            if scene.take_redraw_request() {
                ui.ctx().request_repaint();
            }
            (
                scene.rects().to_vec(),
                scene.texts().to_vec(),
                image_frame(scene.image(), cached),
            )
        };

        painter.rect_filled(frame, 0.0, theme.figure_background);
        if let Some(image) = image {
            self.paint_image(ui.ctx(), &painter, frame, image, theme);
        }
        paint_rects(&painter, frame, &rects, response.hover_pos(), theme);
        paint_texts(&painter, frame, &texts, &rects, theme);

        self.route_pointer(&response, frame);
        response
    }

    fn route_pointer(&self, response: &Response, frame: Rect) {
        let kind = if response.dragged() {
            PointerKind::Drag
        } else if response.clicked() {
            PointerKind::Press
        } else {
            return;
        };

        if let Some(pos) = response.interact_pointer_pos() {
            let point = to_normalized(frame, pos);
            let handled = dispatch_pointer(&self.surface, point, kind);
            trace!("{:?} at {:?}, handled: {}", kind, point, handled);
        }
    }

    fn paint_image(
        &mut self,
        ctx: &egui::Context,
        painter: &Painter,
        frame: Rect,
        image: ImageFrame,
        theme: &Theme,
    ) {
        let (rows, cols) = image.dims;
        let region = fit_aspect(to_screen_rect(frame, image.region), rows, cols);

        if let Some(pixels) = image.pixels {
            match &mut self.texture {
                Some(texture) => texture.set(pixels, TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ctx.load_texture("image-slice", pixels, TextureOptions::NEAREST))
                }
            }
            self.texture_generation = image.generation;
        }

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
            painter.image(texture.id(), region, uv, Color32::WHITE);
        }
        painter.rect_stroke(region, 0.0, Stroke::new(1.0, theme.frame_color));

        if let Some(legend) = image.legend {
            paint_legend(
                painter,
                frame,
                to_screen_rect(frame, legend),
                image.colormap,
                image.legend_range,
                theme,
            );
        }
    }
}

/// What the painter needs from the image layer for one frame.
///
/// Pixels are only colorized when the layer changed since the texture was
/// last uploaded.
struct ImageFrame {
    region: Rect,
    legend: Option<Rect>,
    colormap: ColormapKind,
    legend_range: (f64, f64),
    dims: (usize, usize),
    generation: u64,
    pixels: Option<ColorImage>,
}

/// Snapshot `layer` without copying its raster. `cached` is the generation
/// of the uploaded texture, if any.
fn image_frame(layer: &ImageLayer, cached: Option<u64>) -> Option<ImageFrame> {
    let raster = layer.raster.as_ref()?;
    let (rows, cols) = raster.dim();

    let pixels = (cached != Some(layer.generation)).then(|| {
        let (min, max) = layer.color_range;
        let rgba = colorize(raster.view(), layer.colormap, min, max);
        ColorImage::from_rgba_unmultiplied([cols, rows], &rgba)
    });

    Some(ImageFrame {
        region: layer.region,
        legend: layer.legend,
        colormap: layer.colormap,
        legend_range: layer.legend_range,
        dims: (rows, cols),
        generation: layer.generation,
        pixels,
    })
}

fn paint_legend(
    painter: &Painter,
    frame: Rect,
    legend: Rect,
    colormap: ColormapKind,
    (min, max): (f64, f64),
    theme: &Theme,
) {
    let step = legend.height() / LEGEND_STEPS as f32;
    for i in 0..LEGEND_STEPS {
        let t = (i as f64 + 0.5) / LEGEND_STEPS as f64;
        let bottom = legend.bottom() - step * i as f32;
        let strip = Rect::from_min_max(
            egui::pos2(legend.left(), bottom - step),
            egui::pos2(legend.right(), bottom),
        );
        painter.rect_filled(strip, 0.0, colormap_color(colormap, t));
    }
    painter.rect_stroke(legend, 0.0, Stroke::new(1.0, theme.frame_color));

    let font = FontId::proportional(10.0 * text_scale(frame));
    for value in legend_ticks(min, max, LEGEND_TICKS) {
        let y = legend.bottom() - normalize(value, min, max) as f32 * legend.height();
        painter.line_segment(
            [egui::pos2(legend.right(), y), egui::pos2(legend.right() + 4.0, y)],
            Stroke::new(1.0, theme.frame_color),
        );
        painter.text(
            egui::pos2(legend.right() + 6.0, y),
            egui::Align2::LEFT_CENTER,
            format_tick(value),
            font.clone(),
            theme.figure_text,
        );
    }
}

fn paint_rects(
    painter: &Painter,
    frame: Rect,
    rects: &[FilledRect],
    hover: Option<Pos2>,
    theme: &Theme,
) {
    for rect in rects {
        let region = to_screen_rect(frame, rect.region);
        let hovered = hover.map_or(false, |pos| region.contains(pos));
        let fill = match rect.hover_fill {
            Some(hover_fill) if hovered => hover_fill,
            _ => rect.fill,
        };
        painter.rect_filled(region, 0.0, fill);
        painter.rect_stroke(region, 0.0, Stroke::new(0.5, theme.frame_color));
    }
}

fn paint_texts(
    painter: &Painter,
    frame: Rect,
    texts: &[TextItem],
    rects: &[FilledRect],
    theme: &Theme,
) {
    let scale = text_scale(frame);
    for text in texts {
        // Labels sitting on a filled rect are colored against that fill
        let color = rects
            .iter()
            .rev()
            .find(|r| r.region.contains(text.anchor))
            .map_or(theme.figure_text, |r| contrast_text_color(r.fill));
        painter.text(
            to_screen(frame, text.anchor),
            text.align,
            &text.text,
            FontId::proportional(text.size * scale),
            color,
        );
    }
}

/// Normalized figure point to screen space
pub fn to_screen(frame: Rect, point: Pos2) -> Pos2 {
    frame.min + point.to_vec2() * frame.size()
}

/// Screen point to normalized figure coordinates
pub fn to_normalized(frame: Rect, pos: Pos2) -> Pos2 {
    let size = frame.size();
    let offset = pos - frame.min;
    egui::pos2(
        if size.x > 0.0 { offset.x / size.x } else { 0.0 },
        if size.y > 0.0 { offset.y / size.y } else { 0.0 },
    )
}

pub fn to_screen_rect(frame: Rect, region: Rect) -> Rect {
    Rect::from_min_max(to_screen(frame, region.min), to_screen(frame, region.max))
}

/// Largest rect inside `region` with square pixels for a `rows` x `cols`
/// raster, centered
pub fn fit_aspect(region: Rect, rows: usize, cols: usize) -> Rect {
    if rows == 0 || cols == 0 {
        return region;
    }
    let pixel = (region.width() / cols as f32).min(region.height() / rows as f32);
    Rect::from_center_size(
        region.center(),
        egui::vec2(pixel * cols as f32, pixel * rows as f32),
    )
}

/// Black or white, whichever reads better on `fill`
pub fn contrast_text_color(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn text_scale(frame: Rect) -> f32 {
    (frame.height() / REFERENCE_HEIGHT).clamp(0.75, 2.0)
}

fn format_tick(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1000.0 || (magnitude > 0.0 && magnitude < 1e-3) {
        format!("{:.2e}", value)
    } else if magnitude >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}
