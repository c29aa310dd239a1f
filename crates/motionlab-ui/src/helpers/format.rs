// crates/motionlab-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in motionlab-core.
//
// Byte-size and percent math lives in motionlab_core::helpers::units. This
// module only shapes strings for a fixed amount of screen space.

/// Truncates `text` to fit within `max_px` using a per-character width
/// heuristic (12px proportional ≈ 7 px/char average). Appends "…" when
/// truncated. Avoids egui font measurement, which requires `&mut Fonts`.
pub fn fit_label(text: &str, max_px: f32) -> String {
    const AVG_CHAR_PX: f32 = 7.0;
    const ELLIPSIS: &str = "…";
    let max_chars = (max_px / AVG_CHAR_PX).max(0.0) as usize;
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    // Reserve one slot for the ellipsis character itself.
    let keep = max_chars.saturating_sub(1);
    text.chars().take(keep).collect::<String>() + ELLIPSIS
}

/// Like `fit_label`, but keeps the extension visible: "very_long_na….mp4".
/// File names are recognised by their tail as often as by their head.
pub fn fit_file_name(name: &str, max_px: f32) -> String {
    let Some(dot) = name.rfind('.').filter(|&i| i > 0) else {
        return fit_label(name, max_px);
    };
    let (stem, ext) = name.split_at(dot);
    let ext_px = ext.chars().count() as f32 * 7.0;
    if fit_label(name, max_px) == name || ext_px >= max_px {
        return fit_label(name, max_px);
    }
    fit_label(stem, max_px - ext_px) + ext
}
