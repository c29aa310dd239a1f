// src/theme.rs
// Palette and spacing for the three upload forms. configure_style runs once
// at startup; panels pull colours from the constants below.
use egui::{Color32, Context, CornerRadius, Stroke, Style, Visuals};
use egui::style::WidgetVisuals;

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb( 70, 190, 200);
const ACCENT_DIM:        Color32 = Color32::from_rgb( 35, 105, 115);

const PANEL_BG:          Color32 = Color32::from_rgb( 22,  24,  28);
const INPUT_BG:          Color32 = Color32::from_rgb( 16,  17,  20);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 30,  33,  39);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 41,  45,  53);

const TEXT:              Color32 = Color32::from_rgb(215, 220, 228);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(125, 132, 146);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 58,  63,  74);

// Banners and the progress bar.
pub const SUCCESS:       Color32 = Color32::from_rgb( 80, 190, 120);
pub const SUCCESS_BG:    Color32 = Color32::from_rgb( 30,  60,  40);
pub const ERROR:         Color32 = Color32::from_rgb(200,  80,  80);
pub const ERROR_BG:      Color32 = Color32::from_rgb( 60,  25,  25);
pub const TRACK_BG:      Color32 = Color32::from_rgb( 35,  37,  43);
pub const TRACK_FG:      Color32 = ACCENT;

const RADIUS: CornerRadius = CornerRadius::same(3);

fn widget(bg: Color32, border: Color32, fg: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill:       bg,
        weak_bg_fill:  bg,
        bg_stroke:     Stroke::new(1.0, border),
        fg_stroke:     Stroke::new(1.0, fg),
        corner_radius: RADIUS,
        expansion:     0.0,
    }
}

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    // Label/input rows: roomy vertically, wide DragValues for parameters.
    style.spacing.item_spacing     = egui::vec2(8.0, 7.0);
    style.spacing.button_padding   = egui::vec2(12.0, 5.0);
    style.spacing.interact_size.x  = 72.0;
    style.spacing.combo_width      = 110.0;
    style.spacing.indent           = 16.0;
    style.spacing.scroll.bar_width = 8.0;

    let mut v = Visuals::dark();
    v.panel_fill       = PANEL_BG;
    v.window_fill      = DARK_BG_2;
    v.extreme_bg_color = INPUT_BG;
    v.faint_bg_color   = DARK_BG_2;
    v.window_stroke    = Stroke::new(1.0, DARK_BORDER);
    v.selection.bg_fill = ACCENT_DIM;
    v.selection.stroke  = Stroke::new(1.0, TEXT);

    v.widgets.noninteractive = widget(DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM);
    v.widgets.inactive       = widget(DARK_BG_3, DARK_BORDER, TEXT);
    v.widgets.hovered        = widget(DARK_BG_3, ACCENT_DIM, ACCENT);
    v.widgets.active         = widget(ACCENT_DIM, ACCENT, Color32::WHITE);
    v.widgets.open           = widget(DARK_BG_3, ACCENT_DIM, ACCENT);
    v.override_text_color    = Some(TEXT);
    v.window_corner_radius   = RADIUS;
    v.menu_corner_radius     = RADIUS;

    style.visuals = v;
    ctx.set_style(style);
}
