// crates/motionlab-ui/src/modules/mod.rs
//
// Panel registry. To add a new upload form:
//   1. Add a FormKind variant and its record in motionlab-core
//   2. Create modules/myform.rs implementing UploadPanel
//   3. Add `pub mod myform;` below and one field + tab in app.rs

pub mod legacy;
pub mod motion;
pub mod scaling;
pub mod widgets;

use egui::Ui;
use motionlab_core::commands::FormCommand;
use motionlab_core::state::FormsState;
use motionlab_core::upload_types::FormKind;

/// Every upload panel implements this trait.
/// Panels read state and emit commands. They never mutate state directly.
pub trait UploadPanel {
    fn kind(&self) -> FormKind;

    fn name(&self) -> &'static str {
        self.kind().label()
    }

    fn ui(&mut self, ui: &mut Ui, state: &FormsState, cmd: &mut Vec<FormCommand>);
}
