// crates/motionlab-core/src/commands.rs
//
// Every user action in MotionLab is expressed as a FormCommand.
// Panels emit these; app.rs processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in app.rs.

use std::path::PathBuf;

use crate::params::{ProcessAlgo, ResolutionSlot};
use crate::sync::ScaleResult;
use crate::upload_types::FormKind;

#[derive(Debug, Clone)]
pub enum FormCommand {
    // ── File ─────────────────────────────────────────────────────────────────
    SelectFile { form: FormKind, path: PathBuf },

    // ── Parameters ───────────────────────────────────────────────────────────
    /// Raw text for one scalar field; coerced by the form's ParameterStore.
    UpdateParam { form: FormKind, field: &'static str, raw: String },
    /// `"<w>x<h>"` for one resolution pair.
    UpdateResolution { form: FormKind, slot: ResolutionSlot, raw: String },
    SetProcessAlgo { form: FormKind, algo: ProcessAlgo },
    ResetParams(FormKind),

    // ── Upload ───────────────────────────────────────────────────────────────
    Upload(FormKind),
    DismissMessages(FormKind),

    // ── Results ──────────────────────────────────────────────────────────────
    /// Emitted after a successful scale calibration; consumed by the motion form.
    ScaleComputed(ScaleResult),
    /// A processed video is waiting in `path`; move it to where the user wants it.
    SaveVideo { form: FormKind, path: PathBuf, download_name: String },
}
