// crates/motionlab-ui/src/modules/widgets.rs
//
// Building blocks shared by the three upload panels: file row, parameter
// rows, progress/banners, action buttons.
//
// Every widget edits a local copy and pushes a FormCommand on change; the
// form state itself is only mutated in app.rs. Parameter rows send the raw
// text the user produced so it goes through the store's coercion like any
// other input.

use std::ops::RangeInclusive;

use egui::{Color32, Margin, RichText, Stroke, Ui};

use motionlab_core::commands::FormCommand;
use motionlab_core::file::{SelectedFile, VIDEO_EXTENSIONS};
use motionlab_core::helpers::units::format_bytes;
use motionlab_core::params::{
    ParamValue, ParameterRecord, ProcessAlgo, Resolution, ResolutionSlot, COMMON_RESOLUTIONS,
};
use motionlab_core::session::SessionState;
use motionlab_core::upload_types::FormKind;

use crate::helpers::format::fit_file_name;
use crate::theme::{
    ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, ERROR, ERROR_BG, SUCCESS,
    SUCCESS_BG, TRACK_BG, TRACK_FG,
};

// ── Field tables ──────────────────────────────────────────────────────────────

/// One numeric input: wire field name, label and DragValue tuning.
pub struct NumberField {
    pub field:    &'static str,
    pub label:    &'static str,
    pub speed:    f64,
    pub range:    RangeInclusive<f64>,
    pub decimals: usize,
}

impl NumberField {
    pub const fn new(
        field:    &'static str,
        label:    &'static str,
        speed:    f64,
        range:    RangeInclusive<f64>,
        decimals: usize,
    ) -> Self {
        Self { field, label, speed, range, decimals }
    }
}

fn number_value<R: ParameterRecord>(record: &R, field: &str) -> Option<f64> {
    record.scalar_fields().into_iter().find_map(|(name, value)| match value {
        ParamValue::Number(n) if name == field => Some(n),
        _ => None,
    })
}

// ── Section chrome ────────────────────────────────────────────────────────────

pub fn section_label(ui: &mut Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(text).size(11.0).strong().color(DARK_TEXT_DIM));
    ui.add_space(2.0);
}

/// Panel header: title on the left, Reset on the right.
pub fn header(ui: &mut Ui, title: &str, form: FormKind, can_reset: bool, cmd: &mut Vec<FormCommand>) {
    egui::Frame::new()
        .fill(DARK_BG_2)
        .inner_margin(Margin { left: 8, right: 8, top: 6, bottom: 6 })
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(title).size(13.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let reset_btn = egui::Button::new(
                        RichText::new("🔄 Reset").size(10.0).color(DARK_TEXT_DIM),
                    )
                    .fill(DARK_BG_3)
                    .stroke(Stroke::new(1.0, DARK_BORDER))
                    .min_size(egui::vec2(62.0, 20.0));

                    let tip = if can_reset {
                        "Restore every parameter of this form to its default"
                    } else {
                        "Wait for the upload to finish"
                    };
                    if ui.add_enabled(can_reset, reset_btn).on_hover_text(tip).clicked() {
                        cmd.push(FormCommand::ResetParams(form));
                    }
                });
            });
        });
}

// ── File ──────────────────────────────────────────────────────────────────────

pub fn file_row(
    ui:       &mut Ui,
    form:     FormKind,
    selected: Option<&SelectedFile>,
    enabled:  bool,
    cmd:      &mut Vec<FormCommand>,
) {
    ui.horizontal(|ui| {
        let pick = ui.add_enabled(enabled, egui::Button::new("📂 Choose video…"));
        if pick.clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Video", VIDEO_EXTENSIONS)
                .add_filter("All files", &["*"])
                .pick_file()
            {
                cmd.push(FormCommand::SelectFile { form, path });
            }
        }

        match selected {
            Some(file) => {
                let width = ui.available_width() - 70.0;
                ui.label(RichText::new(fit_file_name(&file.name, width)).color(ACCENT))
                    .on_hover_text(file.path.display().to_string());
                ui.label(
                    RichText::new(format_bytes(file.size)).size(10.0).color(DARK_TEXT_DIM),
                );
            }
            None => {
                ui.label(
                    RichText::new("No file selected (drop one on the window)")
                        .size(11.0)
                        .color(DARK_TEXT_DIM),
                );
            }
        }
    });
}

// ── Parameters ────────────────────────────────────────────────────────────────

/// Two-column grid of numeric inputs backed by `record`.
pub fn number_grid<R: ParameterRecord>(
    ui:     &mut Ui,
    id:     &str,
    form:   FormKind,
    record: &R,
    fields: &[NumberField],
    cmd:    &mut Vec<FormCommand>,
) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for f in fields {
                let Some(current) = number_value(record, f.field) else {
                    log::warn!("[ui] {} has no numeric field {}", form.label(), f.field);
                    continue;
                };
                ui.label(f.label);
                let mut v = current;
                let resp = ui.add(
                    egui::DragValue::new(&mut v)
                        .speed(f.speed)
                        .range(f.range.clone())
                        .max_decimals(f.decimals),
                );
                if resp.changed() && v != current {
                    cmd.push(FormCommand::UpdateParam { form, field: f.field, raw: v.to_string() });
                }
                ui.end_row();
            }
        });
}

pub fn flag_row(
    ui:      &mut Ui,
    form:    FormKind,
    label:   &str,
    field:   &'static str,
    current: bool,
    cmd:     &mut Vec<FormCommand>,
) {
    let mut v = current;
    if ui.checkbox(&mut v, label).changed() {
        cmd.push(FormCommand::UpdateParam { form, field, raw: v.to_string() });
    }
}

/// Preset ComboBox plus free width × height inputs for one resolution pair.
pub fn resolution_row(
    ui:      &mut Ui,
    form:    FormKind,
    label:   &str,
    slot:    ResolutionSlot,
    current: Resolution,
    cmd:     &mut Vec<FormCommand>,
) {
    let mut next = current;
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt((form, slot.field_name()))
            .selected_text(current.to_string())
            .width(110.0)
            .show_ui(ui, |ui| {
                for &r in COMMON_RESOLUTIONS {
                    ui.selectable_value(&mut next, r, r.to_string());
                }
            });
        ui.add(egui::DragValue::new(&mut next.width).range(1..=16_384).suffix(" w"));
        ui.label("×");
        ui.add(egui::DragValue::new(&mut next.height).range(1..=16_384).suffix(" h"));
    });
    if next != current {
        cmd.push(FormCommand::UpdateResolution { form, slot, raw: next.to_string() });
    }
}

pub fn algo_row(
    ui:      &mut Ui,
    form:    FormKind,
    label:   &str,
    current: ProcessAlgo,
    cmd:     &mut Vec<FormCommand>,
) {
    let mut next = current;
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt((form, "algo"))
            .selected_text(current.label())
            .width(200.0)
            .show_ui(ui, |ui| {
                for &algo in ProcessAlgo::ALL {
                    ui.selectable_value(&mut next, algo, algo.label());
                }
            });
    });
    if next != current {
        cmd.push(FormCommand::SetProcessAlgo { form, algo: next });
    }
}

// ── Upload + status ───────────────────────────────────────────────────────────

pub fn upload_button(ui: &mut Ui, form: FormKind, label: &str, enabled: bool, cmd: &mut Vec<FormCommand>) {
    let btn = egui::Button::new(RichText::new(label).size(12.0).strong())
        .fill(if enabled { DARK_BG_3 } else { DARK_BG_2 })
        .stroke(Stroke::new(1.0, if enabled { ACCENT } else { DARK_BORDER }))
        .min_size(egui::vec2(ui.available_width(), 30.0));
    if ui.add_enabled(enabled, btn).clicked() {
        cmd.push(FormCommand::Upload(form));
    }
}

/// Progress bar while uploading; success or error banner otherwise.
pub fn session_view(ui: &mut Ui, form: FormKind, session: &SessionState, cmd: &mut Vec<FormCommand>) {
    if session.is_uploading() {
        if let Some(status) = session.status_message() {
            ui.label(RichText::new(status).size(11.0).color(DARK_TEXT_DIM));
        }
        progress_bar(ui, session.progress());
        return;
    }
    if let Some(msg) = session.success_message() {
        banner(ui, form, msg, SUCCESS, SUCCESS_BG, cmd);
    } else if let Some(msg) = session.error_message() {
        banner(ui, form, msg, ERROR, ERROR_BG, cmd);
    }
}

fn progress_bar(ui: &mut Ui, pct: u8) {
    let fraction = f32::from(pct) / 100.0;
    ui.horizontal(|ui| {
        let (bar_rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width() - 44.0, 8.0),
            egui::Sense::hover(),
        );
        let p = ui.painter();
        p.rect_filled(bar_rect, 4.0, TRACK_BG);
        if fraction > 0.0 {
            let mut fill = bar_rect;
            fill.max.x = bar_rect.min.x + bar_rect.width() * fraction;
            p.rect_filled(fill, 4.0, TRACK_FG);
        }
        ui.label(RichText::new(format!("{pct}%")).size(11.0).strong().color(TRACK_FG));
    });
}

fn banner(ui: &mut Ui, form: FormKind, msg: &str, fg: Color32, bg: Color32, cmd: &mut Vec<FormCommand>) {
    egui::Frame::new()
        .fill(bg)
        .stroke(Stroke::new(1.0, fg))
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.add(egui::Label::new(RichText::new(msg).size(11.0).color(fg)).wrap());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                        cmd.push(FormCommand::DismissMessages(form));
                    }
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use motionlab_core::params::{ProcessingParameters, VideoParams};

    #[test]
    fn number_value_reads_scalars_by_name() {
        let p = VideoParams::default();
        assert_eq!(number_value(&p, "frame_rate"), Some(30.0));
        assert_eq!(number_value(&p, "ruler_length"), Some(30.0));
        assert_eq!(number_value(&p, "nope"), None);
    }

    #[test]
    fn flags_are_not_numbers() {
        let p = ProcessingParameters::default();
        assert_eq!(number_value(&p, "adjust_for_resolution"), None);
        assert_eq!(number_value(&p, "try"), Some(0.0));
    }
}
