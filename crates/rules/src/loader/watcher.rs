//! Filesystem event handler for the notify watcher (hot-reload).

use std::fs;
use std::path::Path;

use notify::event::{CreateKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use tracing::{info, warn};

use super::core::{is_dotfile, is_yaml, parse_record, ChangeHook, RecordMap};

/// Handle a single filesystem event from the notify watcher.
pub(super) fn handle_fs_event(event: &Event, records: &RecordMap, on_change: Option<&ChangeHook>) {
    for path in &event.paths {
        // Skip dotfiles and anything that is not YAML
        if !is_yaml(path) || is_dotfile(path) {
            continue;
        }

        match &event.kind {
            EventKind::Create(CreateKind::File)
            | EventKind::Create(CreateKind::Any)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Modify(ModifyKind::Name(_)) => {
                // A rename reports both the old and the new name.
                if path.exists() {
                    upsert_from_file(path, records, on_change);
                } else {
                    remove_by_path(path, records, on_change);
                }
            }
            EventKind::Remove(RemoveKind::File) | EventKind::Remove(RemoveKind::Any) => {
                remove_by_path(path, records, on_change);
            }
            _ => {}
        }
    }
}

fn upsert_from_file(path: &Path, records: &RecordMap, on_change: Option<&ChangeHook>) {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file during hot-reload");
            return;
        }
    };

    match parse_record(&contents) {
        Ok(record) => {
            info!(
                schedule_id = %record.id,
                location_id = %record.location_id,
                path = %path.display(),
                "hot-reloaded schedule"
            );
            let new_location = record.location_id.clone();
            let previous = records
                .write()
                .expect("records lock poisoned")
                .insert(path.to_path_buf(), record);

            if let Some(hook) = on_change {
                if let Some(prev) = previous.filter(|p| p.location_id != new_location) {
                    hook(&prev.location_id);
                }
                hook(&new_location);
            }
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to parse schedule during hot-reload, keeping previous version"
            );
        }
    }
}

fn remove_by_path(path: &Path, records: &RecordMap, on_change: Option<&ChangeHook>) {
    let removed = records.write().expect("records lock poisoned").remove(path);
    if let Some(record) = removed {
        info!(
            schedule_id = %record.id,
            location_id = %record.location_id,
            path = %path.display(),
            "removed schedule after file deletion"
        );
        if let Some(hook) = on_change {
            hook(&record.location_id);
        }
    }
}
