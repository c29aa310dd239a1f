// crates/motionlab-ui/src/modules/legacy.rs
//
// Quick upload against the older `/upload` endpoint. Superseded by the
// motion panel; kept for services that only expose the legacy route. Same
// UploadForm pipeline, smaller parameter set, no calibration sync.

use egui::{RichText, Ui};

use motionlab_core::commands::FormCommand;
use motionlab_core::state::FormsState;
use motionlab_core::upload_types::FormKind;

use super::widgets::{self, NumberField};
use super::UploadPanel;
use crate::theme::DARK_TEXT_DIM;

const FIELDS: &[NumberField] = &[
    NumberField::new("active_scale",      "Scale (cm/px)",        0.0001, 0.0..=100.0,    5),
    NumberField::new("brightness_thresh", "Brightness threshold", 0.01,   0.0..=1.0,      3),
    NumberField::new("event_thresh",      "Event threshold",      0.01,   0.0..=1.0,      3),
    NumberField::new("neighborhood",      "Neighborhood (px)",    1.0,    0.0..=10_000.0, 0),
];

pub struct LegacyModule;

impl UploadPanel for LegacyModule {
    fn kind(&self) -> FormKind {
        FormKind::Legacy
    }

    fn ui(&mut self, ui: &mut Ui, state: &FormsState, cmd: &mut Vec<FormCommand>) {
        let form = &state.legacy;
        let kind = self.kind();
        let uploading = form.session().is_uploading();
        let params = form.params.get();

        widgets::header(ui, "⚡ Quick upload", kind, !uploading, cmd);
        ui.label(
            RichText::new("Legacy endpoint. Prefer Quantify Motion for new analyses.")
                .size(10.0)
                .color(DARK_TEXT_DIM),
        );

        widgets::section_label(ui, "Video");
        widgets::file_row(ui, kind, form.selected_file(), !uploading, cmd);

        widgets::section_label(ui, "Analysis");
        ui.add_enabled_ui(!uploading, |ui| {
            widgets::algo_row(ui, kind, "Motion type", params.motion_type, cmd);
            ui.add_space(4.0);
            widgets::number_grid(ui, "legacy_fields", kind, params, FIELDS, cmd);
        });

        ui.add_space(12.0);
        widgets::upload_button(ui, kind, "Upload", !uploading, cmd);
        ui.add_space(6.0);
        widgets::session_view(ui, kind, form.session(), cmd);
    }
}
