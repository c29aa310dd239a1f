// crates/motionlab-ui/src/modules/motion.rs
//
// Motion quantification: the main analysis form. Posts the video and the full
// ProcessingParameters set to `/motion-analysis` and receives an annotated
// video back.
//
// The calibration section mirrors the last scale calibration. Those values
// are written by FormsState::accept_scale, never by this panel; the user can
// still override them by hand until the next calibration arrives.

use egui::{RichText, Ui};

use motionlab_core::commands::FormCommand;
use motionlab_core::params::ResolutionSlot;
use motionlab_core::state::FormsState;
use motionlab_core::upload_types::FormKind;

use super::widgets::{self, NumberField};
use super::UploadPanel;
use crate::theme::{ACCENT, DARK_TEXT_DIM};

const RECORDING: &[NumberField] = &[
    NumberField::new("frame_rate", "Frame rate (fps)", 0.5, 1.0..=1000.0,    2),
    NumberField::new("distance",   "Distance (cm)",    1.0, 0.0..=100_000.0, 2),
];

const CALIBRATION: &[NumberField] = &[
    NumberField::new("active_scale",       "Scale (cm/px)",     0.0001, 0.0..=100.0,     5),
    NumberField::new("scale_fps",          "Frame rate (fps)",  0.5,    1.0..=1000.0,    2),
    NumberField::new("scale_dist",         "Distance (cm)",     1.0,    0.0..=100_000.0, 2),
    NumberField::new("scale_ruler_length", "Ruler length (cm)", 0.5,    0.0..=10_000.0,  2),
];

const DETECTION: &[NumberField] = &[
    NumberField::new("brightness_thresh", "Brightness threshold", 0.01, 0.0..=1.0,      3),
    NumberField::new("event_thresh",      "Event threshold",      0.01, 0.0..=1.0,      3),
    NumberField::new("neighborhood",      "Neighborhood (px)",    1.0,  0.0..=10_000.0, 0),
];

const BOUNDING_BOX: &[NumberField] = &[
    NumberField::new("tlx", "Top-left x",     1.0, 0.0..=16_384.0, 0),
    NumberField::new("tly", "Top-left y",     1.0, 0.0..=16_384.0, 0),
    NumberField::new("trx", "Top-right x",    1.0, 0.0..=16_384.0, 0),
    NumberField::new("try", "Top-right y",    1.0, 0.0..=16_384.0, 0),
    NumberField::new("blx", "Bottom-left x",  1.0, 0.0..=16_384.0, 0),
    NumberField::new("bly", "Bottom-left y",  1.0, 0.0..=16_384.0, 0),
    NumberField::new("brx", "Bottom-right x", 1.0, 0.0..=16_384.0, 0),
    NumberField::new("bry", "Bottom-right y", 1.0, 0.0..=16_384.0, 0),
];

pub struct MotionModule;

impl UploadPanel for MotionModule {
    fn kind(&self) -> FormKind {
        FormKind::Motion
    }

    fn ui(&mut self, ui: &mut Ui, state: &FormsState, cmd: &mut Vec<FormCommand>) {
        let form = &state.motion;
        let kind = self.kind();
        let uploading = form.session().is_uploading();
        let params = form.params.get();

        widgets::header(ui, "🎯 Motion quantification", kind, !uploading, cmd);

        widgets::section_label(ui, "Video");
        widgets::file_row(ui, kind, form.selected_file(), !uploading, cmd);

        ui.add_enabled_ui(!uploading, |ui| {
            widgets::section_label(ui, "Algorithm");
            widgets::algo_row(ui, kind, "Processing", params.processing_algo, cmd);

            widgets::section_label(ui, "Recording");
            widgets::number_grid(ui, "motion_recording", kind, params, RECORDING, cmd);
            widgets::resolution_row(ui, kind, "Resolution", ResolutionSlot::Frame, params.resolution, cmd);
            widgets::flag_row(
                ui, kind, "Adjust for resolution", "adjust_for_resolution",
                params.adjust_for_resolution, cmd,
            );

            widgets::section_label(ui, "Calibration");
            match state.sync.scale() {
                Some(scale) => ui.label(
                    RichText::new(format!("↳ from last scale calibration: {scale} cm/px"))
                        .size(10.0)
                        .color(ACCENT),
                ),
                None => ui.label(
                    RichText::new("Run Find Scaling to fill these in automatically.")
                        .size(10.0)
                        .color(DARK_TEXT_DIM),
                ),
            };
            widgets::number_grid(ui, "motion_calibration", kind, params, CALIBRATION, cmd);
            widgets::resolution_row(ui, kind, "Resolution", ResolutionSlot::Scale, params.scale_res, cmd);

            widgets::section_label(ui, "Detection");
            widgets::number_grid(ui, "motion_detection", kind, params, DETECTION, cmd);

            if params.processing_algo.uses_bounding_box() {
                widgets::section_label(ui, "Bounding box (px)");
                widgets::number_grid(ui, "motion_bbox", kind, params, BOUNDING_BOX, cmd);
            }
        });

        ui.add_space(12.0);
        widgets::upload_button(ui, kind, "Quantify motion", !uploading, cmd);
        ui.add_space(6.0);
        widgets::session_view(ui, kind, form.session(), cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motionlab_core::params::ProcessingParameters;

    #[test]
    fn bounding_box_table_matches_corner_fields() {
        let fields: Vec<_> = BOUNDING_BOX.iter().map(|f| f.field).collect();
        assert_eq!(fields, ProcessingParameters::CORNER_FIELDS);
    }
}
