use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
    /// Background of the figure area, behind the image and slider
    pub figure_background: Color32,
    /// Frame around the image and color bar
    pub frame_color: Color32,
    /// Text drawn straight onto the figure background
    pub figure_text: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Figure Light".to_string(),
            dark_mode: false,
            figure_background: Color32::WHITE,
            frame_color: Color32::BLACK,
            figure_text: Color32::BLACK,
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Figure Dark".to_string(),
            dark_mode: true,
            figure_background: Color32::from_rgb(31, 31, 31),
            frame_color: Color32::from_rgb(160, 160, 160),
            figure_text: Color32::from_rgb(220, 220, 220),
        }
    }
}

/// Apply the application theme to the window chrome
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    let accent_color = Color32::from_rgb(100, 150, 250);

    visuals.panel_fill = theme.figure_background;
    visuals.window_fill = theme.figure_background;

    for widgets in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widgets.rounding = Rounding::same(4.0);
    }
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color);

    visuals.selection.bg_fill = accent_color.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color);
    visuals.hyperlink_color = accent_color;

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}
