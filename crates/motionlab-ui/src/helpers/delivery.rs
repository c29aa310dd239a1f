// crates/motionlab-ui/src/helpers/delivery.rs
//
// Hand a processed video (already on disk in the temp dir) to the user.
//
// The worker streams the reply into a temp file, so delivery is a move, not a
// download. rename() is tried first; across filesystems it fails and we fall
// back to copy + remove.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Move `from` to `to`, replacing anything already at `to`.
pub fn move_video(from: &Path, to: &Path) -> anyhow::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)
        .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
    if let Err(e) = std::fs::remove_file(from) {
        log::warn!("[delivery] could not remove {}: {e}", from.display());
    }
    Ok(())
}

/// `dir/name`, or `dir/<stem> (n).<ext>` for the first free `n` when taken.
/// Used for unattended saves into the configured download directory.
pub fn free_destination(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }
    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 => (&name[..i], &name[i..]),
        _                => (name, ""),
    };
    (1..)
        .map(|n| dir.join(format!("{stem} ({n}){ext}")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Drop a temp video the user declined to save.
pub fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        log::warn!("[delivery] could not remove {}: {e}", path.display());
    }
}
