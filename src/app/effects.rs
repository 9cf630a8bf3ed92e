use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::FileWatcher;

impl App {
    pub(super) fn make_file_watcher(path: &Path) -> notify::Result<FileWatcher> {
        FileWatcher::new(path, Duration::from_millis(200))
    }

    /// Apply the side effects a message implies after the pure update
    /// has run. Disk I/O and watcher lifecycle live here, never in
    /// `update`.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    match Self::make_file_watcher(&model.file_path) {
                        Ok(watcher) => {
                            *file_watcher = Some(watcher);
                            model.show_toast(ToastLevel::Info, "Watching file changes");
                        }
                        Err(err) => {
                            model.watch_enabled = false;
                            *file_watcher = None;
                            model.show_toast(
                                ToastLevel::Warning,
                                format!("Watch unavailable: {err}"),
                            );
                            debug!(path = %model.file_path.display(), %err, "watcher failed");
                        }
                    }
                } else {
                    *file_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::Save => {
                Self::save_sheet(model);
            }
            Message::ForceReload => {
                // An active session owns its cell's content; reloading
                // underneath it would tear that ownership.
                if model.editing() {
                    model.show_toast(ToastLevel::Warning, "Finish editing before reloading");
                    return;
                }
                if let Err(err) = model.reload_from_disk() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
                    debug!(path = %model.file_path.display(), %err, "reload failed");
                } else {
                    model.show_toast(ToastLevel::Info, "Reloaded");
                }
            }
            Message::FileChanged => {
                if model.editing() || model.dirty {
                    model.show_toast(
                        ToastLevel::Warning,
                        "File changed on disk; press r to reload (discards your changes)",
                    );
                    return;
                }
                if let Err(err) = model.reload_from_disk() {
                    model.show_toast(ToastLevel::Error, format!("Reload failed: {err}"));
                } else {
                    model.show_toast(ToastLevel::Info, "Reloaded (changed on disk)");
                }
            }
            _ => {}
        }
    }

    fn save_sheet(model: &mut Model) {
        if model.read_only {
            model.show_toast(ToastLevel::Warning, "Read-only mode");
            return;
        }
        match crate::sheet::save(&model.file_path, &model.sheet) {
            Ok(()) => {
                model.dirty = false;
                model.show_toast(ToastLevel::Info, "Saved");
            }
            Err(err) => {
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                debug!(path = %model.file_path.display(), %err, "save failed");
            }
        }
    }
}
