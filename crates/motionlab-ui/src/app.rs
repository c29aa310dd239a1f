// src/app.rs (motionlab-ui)
use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use rfd::FileDialog;

use motionlab_core::commands::FormCommand;
use motionlab_core::file::{mime_for_path, FileCandidate};
use motionlab_core::form::{UploadForm, VIDEO_SUCCESS_MESSAGE};
use motionlab_core::params::ParameterRecord;
use motionlab_core::state::FormsState;
use motionlab_core::upload_types::FormKind;
use motionlab_net::{ServiceConfig, UploadWorker};

use crate::context::AppContext;
use crate::helpers::delivery;
use crate::modules::{
    UploadPanel,
    legacy::LegacyModule,
    motion::MotionModule,
    scaling::ScalingModule,
};
use crate::theme::{configure_style, ACCENT, DARK_TEXT_DIM};

/// Run `$body` with `$f` bound to the form of kind `$kind`. The three forms
/// have different record types, so this expands to one arm per form.
macro_rules! with_form {
    ($state:expr, $kind:expr, |$f:ident| $body:expr) => {
        match $kind {
            FormKind::Scaling => { let $f = &mut $state.scaling; $body }
            FormKind::Motion  => { let $f = &mut $state.motion;  $body }
            FormKind::Legacy  => { let $f = &mut $state.legacy;  $body }
        }
    };
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct MotionLabApp {
    state:        FormsState,
    context:      AppContext,
    active:       FormKind,
    scaling:      ScalingModule,
    motion:       MotionModule,
    legacy:       LegacyModule,
    /// Commands emitted by panels each frame, processed after the UI pass
    pending_cmds: Vec<FormCommand>,
}

impl MotionLabApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode. Prevents egui overwriting our theme on OS light/dark changes.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let worker = UploadWorker::new(ServiceConfig::load());

        Self {
            state:        FormsState::default(),
            context:      AppContext::new(worker),
            active:       FormKind::Scaling,
            scaling:      ScalingModule,
            motion:       MotionModule,
            legacy:       LegacyModule,
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: FormCommand) {
        match cmd {
            // ── File ─────────────────────────────────────────────────────────
            FormCommand::SelectFile { form, path } => {
                let candidate = candidate_for(path);
                let result = with_form!(self.state, form, |f| f.select_file(candidate));
                if let Err(e) = result {
                    log::info!("[form] {form:?} rejected file: {e}");
                }
            }

            // ── Parameters ───────────────────────────────────────────────────
            FormCommand::UpdateParam { form, field, raw } => {
                let result = with_form!(self.state, form, |f| f.params.update(field, &raw));
                if let Err(e) = result {
                    log::warn!("[form] {form:?}: {e}");
                }
            }
            FormCommand::UpdateResolution { form, slot, raw } => {
                let result = with_form!(self.state, form, |f| f.params.update_resolution(slot, &raw));
                if let Err(e) = result {
                    log::warn!("[form] {form:?}: {e}");
                }
            }
            FormCommand::SetProcessAlgo { form, algo } => match form {
                FormKind::Motion  => self.state.motion.params.edit(|p| p.processing_algo = algo),
                FormKind::Legacy  => self.state.legacy.params.edit(|p| p.motion_type = algo),
                FormKind::Scaling => log::warn!("[form] scaling form has no algorithm choice"),
            },
            FormCommand::ResetParams(form) => {
                with_form!(self.state, form, |f| f.params.reset());
            }

            // ── Upload ───────────────────────────────────────────────────────
            FormCommand::Upload(form) => {
                let result = with_form!(self.state, form, |f| f.begin_upload());
                match result {
                    Ok(request) => self.context.worker.start(request),
                    Err(e) => log::info!("[form] {form:?} upload refused: {e}"),
                }
            }
            FormCommand::DismissMessages(form) => {
                with_form!(self.state, form, |f| f.dismiss_messages());
            }

            // ── Results ──────────────────────────────────────────────────────
            FormCommand::ScaleComputed(result) => {
                let scale = result.scale;
                if self.state.accept_scale(result) {
                    log::info!("[sync] motion parameters updated from scale {scale}");
                } else {
                    log::debug!("[sync] scale {scale} changed nothing");
                }
            }
            FormCommand::SaveVideo { form, path, download_name } => {
                let dir = self.context.worker.config().download_dir.clone();
                with_form!(self.state, form, |f| deliver_video(f, &path, &download_name, dir));
            }
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        // One file per form; the last one dropped wins.
        if let Some(path) = files.into_iter().filter_map(|f| f.path).last() {
            self.pending_cmds.push(FormCommand::SelectFile { form: self.active, path });
        }
    }

    fn tab_bar(&mut self, ui: &mut egui::Ui) {
        for kind in FormKind::ALL {
            let label = if self.state.is_uploading(kind) {
                format!("{} ⏳", kind.label())
            } else {
                kind.label().to_string()
            };
            ui.selectable_value(&mut self.active, kind, label);
        }
    }
}

/// Build a candidate for `path`. An unreadable file still gets a candidate
/// (size 0) so the usual validation message and upload error apply.
fn candidate_for(path: PathBuf) -> FileCandidate {
    FileCandidate::from_path(&path).unwrap_or_else(|e| {
        log::warn!("[form] cannot read {}: {e}", path.display());
        let name = path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let mime_type = mime_for_path(&path).to_string();
        FileCandidate { path, name, mime_type, size: 0 }
    })
}

/// Move a finished video to the download dir, or ask where to put it.
fn deliver_video<R: ParameterRecord>(
    form:          &mut UploadForm<R>,
    temp:          &std::path::Path,
    download_name: &str,
    download_dir:  Option<PathBuf>,
) {
    let dest = match download_dir {
        Some(dir) => Some(delivery::free_destination(&dir, download_name)),
        None => FileDialog::new()
            .set_file_name(download_name)
            .add_filter("AVI video", &["avi"])
            .save_file(),
    };

    let Some(dest) = dest else {
        log::info!("[delivery] save cancelled, discarding {}", temp.display());
        delivery::discard(temp);
        form.report_delivery_error("Video was processed but not saved");
        return;
    };

    match delivery::move_video(temp, &dest) {
        Ok(()) => {
            log::info!("[delivery] saved {}", dest.display());
            form.report_delivered(format!("{VIDEO_SUCCESS_MESSAGE} Saved to {}", dest.display()));
        }
        Err(e) => {
            log::warn!("[delivery] {e:#}");
            form.report_delivery_error(format!("Could not save the video: {e}"));
        }
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for MotionLabApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.worker.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        let follow_up = self.context.ingest_upload_events(&mut self.state, ctx);
        self.pending_cmds.extend(follow_up);

        egui::TopBottomPanel::top("top_panel")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("🎞 MotionLab")
                            .strong().size(15.0).color(ACCENT),
                    );
                    ui.separator();
                    self.tab_bar(ui);
                });
            });

        egui::TopBottomPanel::bottom("status_panel")
            .exact_height(22.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Service: {}", self.context.worker.config().base_url))
                            .size(10.0)
                            .color(DARK_TEXT_DIM),
                    );
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let panel: &mut dyn UploadPanel = match self.active {
                        FormKind::Scaling => &mut self.scaling,
                        FormKind::Motion  => &mut self.motion,
                        FormKind::Legacy  => &mut self.legacy,
                    };
                    // Per-panel id scope so widget state never leaks between tabs.
                    ui.push_id(panel.name(), |ui| {
                        panel.ui(ui, &self.state, &mut self.pending_cmds);
                    });
                });
        });

        // ── Process commands emitted this frame ──────────────────────────────
        let cmds: Vec<FormCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // Progress arrives on a channel, not as input; keep polling while busy.
        if self.state.any_uploading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
