// crates/motionlab-core/src/helpers/units.rs
//
// Small numeric helpers shared by the session state machine, the progress
// reader in motionlab-net and the UI labels.

/// Upload percentage, `round(100 * loaded / total)`, clamped to `0..=100`.
///
/// `None` when the total is unknown (zero).
///
/// ```
/// use motionlab_core::helpers::units::percent;
/// assert_eq!(percent(0, 200),   Some(0));
/// assert_eq!(percent(1, 200),   Some(1));   // 0.5 rounds away from zero
/// assert_eq!(percent(200, 200), Some(100));
/// assert_eq!(percent(5, 0),     None);
/// ```
pub fn percent(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (100.0 * loaded as f64 / total as f64).round();
    Some(pct.clamp(0.0, 100.0) as u8)
}

/// Format a byte count for display.
///
/// | Range      | Example    |
/// |------------|------------|
/// | ≥ 1 GiB    | `1.2 GB`   |
/// | ≥ 1 MiB    | `10.0 MB`  |
/// | ≥ 1 KiB    | `4.0 KB`   |
/// | < 1 KiB    | `512 B`    |
///
/// ```
/// use motionlab_core::helpers::units::format_bytes;
/// assert_eq!(format_bytes(512),              "512 B");
/// assert_eq!(format_bytes(10 * 1024 * 1024), "10.0 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let b = bytes as f64;
    if b >= GB {
        format!("{:.1} GB", b / GB)
    } else if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_monotonic_in_loaded() {
        let total = 10 * 1024 * 1024;
        let mut last = 0;
        for loaded in (0..=total).step_by(65_536) {
            let p = percent(loaded, total).unwrap();
            assert!(p >= last);
            assert!(p <= 100);
            last = p;
        }
    }

    #[test]
    fn percent_overshoot_is_clamped() {
        assert_eq!(percent(300, 200), Some(100));
    }
}
