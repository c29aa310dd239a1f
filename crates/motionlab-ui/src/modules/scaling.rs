// crates/motionlab-ui/src/modules/scaling.rs
//
// Scale calibration: film a ruler of known length at a known distance, get
// back the centimetres-per-pixel factor. A successful result is pushed into
// the motion panel (see FormsState::accept_scale).

use egui::{RichText, Ui};

use motionlab_core::commands::FormCommand;
use motionlab_core::params::ResolutionSlot;
use motionlab_core::state::FormsState;
use motionlab_core::upload_types::FormKind;

use super::widgets::{self, NumberField};
use super::UploadPanel;
use crate::theme::DARK_TEXT_DIM;

const FIELDS: &[NumberField] = &[
    NumberField::new("frame_rate",   "Frame rate (fps)",  0.5, 1.0..=1000.0,   2),
    NumberField::new("distance",     "Distance (cm)",     1.0, 0.0..=100_000.0, 2),
    NumberField::new("ruler_length", "Ruler length (cm)", 0.5, 0.0..=10_000.0, 2),
];

pub struct ScalingModule;

impl UploadPanel for ScalingModule {
    fn kind(&self) -> FormKind {
        FormKind::Scaling
    }

    fn ui(&mut self, ui: &mut Ui, state: &FormsState, cmd: &mut Vec<FormCommand>) {
        let form = &state.scaling;
        let kind = self.kind();
        let uploading = form.session().is_uploading();
        let params = form.params.get();

        widgets::header(ui, "📏 Scale calibration", kind, !uploading, cmd);
        ui.label(
            RichText::new("Upload a video of a ruler to compute the cm/px scale used by motion analysis.")
                .size(10.0)
                .color(DARK_TEXT_DIM),
        );

        widgets::section_label(ui, "Video");
        widgets::file_row(ui, kind, form.selected_file(), !uploading, cmd);

        widgets::section_label(ui, "Recording");
        ui.add_enabled_ui(!uploading, |ui| {
            widgets::number_grid(ui, "scaling_fields", kind, params, FIELDS, cmd);
            widgets::resolution_row(ui, kind, "Resolution", ResolutionSlot::Frame, params.resolution, cmd);
        });

        ui.add_space(12.0);
        widgets::upload_button(ui, kind, "Find scaling", !uploading, cmd);
        ui.add_space(6.0);
        widgets::session_view(ui, kind, form.session(), cmd);
    }
}
