// crates/motionlab-core/src/params.rs
//
// Parameter records for the three upload forms.
//
// A record is a flat set of named scalars (numbers or flags) plus up to two
// resolution pairs. Records are only ever edited through `ParameterStore`,
// which coerces raw text first; the `ParameterRecord` trait exposes just
// enough for the store to do that generically.
//
// Wire format:
//   form_fields() flattens a record into (name, value) text pairs. Resolution
//   pairs become `<prefix>_width` / `<prefix>_height`; there is no nesting on
//   the wire.

use std::fmt;

use crate::error::ValidationError;
use crate::upload_types::FormField;

// ── Scalar values ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
}

impl fmt::Display for ParamValue {
    /// `30.0` prints as `30`, `0.08152` as `0.08152`, flags as `true`/`false`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Flag(b)   => write!(f, "{b}"),
        }
    }
}

/// Mutable handle to one scalar slot of a record.
pub enum ScalarMut<'a> {
    Number(&'a mut f64),
    Flag(&'a mut bool),
}

// ── Resolution ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width:  u32,
    pub height: u32,
}

impl Resolution {
    pub const HD: Resolution = Resolution { width: 1280, height: 720 };

    /// Parse `"<width>x<height>"`. Both halves must be whole numbers.
    ///
    /// ```
    /// use motionlab_core::params::Resolution;
    /// assert_eq!(Resolution::parse("1920x1080"), Some(Resolution { width: 1920, height: 1080 }));
    /// assert_eq!(Resolution::parse("1920xabc"), None);
    /// assert_eq!(Resolution::parse("abc"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Resolution> {
        let (w, h) = raw.trim().split_once('x')?;
        let width  = w.trim().parse().ok()?;
        let height = h.trim().parse().ok()?;
        Some(Resolution { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Choices offered by the resolution pickers.
pub const COMMON_RESOLUTIONS: &[Resolution] = &[
    Resolution { width: 640,  height: 480  },
    Resolution { width: 1280, height: 720  },
    Resolution { width: 1920, height: 1080 },
    Resolution { width: 2560, height: 1440 },
    Resolution { width: 3840, height: 2160 },
];

/// Which of a record's resolution pairs a value targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolutionSlot {
    /// Resolution of the video being analysed (`resolution`).
    Frame,
    /// Resolution the scale was calibrated at (`scale_res`).
    Scale,
}

impl ResolutionSlot {
    pub fn field_name(self) -> &'static str {
        match self {
            ResolutionSlot::Frame => "resolution",
            ResolutionSlot::Scale => "scale_res",
        }
    }

    pub fn from_field(field: &str) -> Option<ResolutionSlot> {
        match field {
            "resolution" => Some(ResolutionSlot::Frame),
            "scale_res"  => Some(ResolutionSlot::Scale),
            _            => None,
        }
    }

    /// Names of the two flat fields this pair expands to on the wire.
    pub fn wire_names(self) -> (&'static str, &'static str) {
        match self {
            ResolutionSlot::Frame => ("resolution_width", "resolution_height"),
            ResolutionSlot::Scale => ("scale_res_width",  "scale_res_height"),
        }
    }
}

// ── Motion algorithm choice ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessAlgo {
    SparseWithBoundingBox,
    Sparse,
    Dense,
}

impl ProcessAlgo {
    pub const ALL: &'static [ProcessAlgo] =
        &[ProcessAlgo::SparseWithBoundingBox, ProcessAlgo::Sparse, ProcessAlgo::Dense];

    /// Exact string the analysis service expects.
    pub fn label(self) -> &'static str {
        match self {
            ProcessAlgo::SparseWithBoundingBox => "Sparse with bounding box",
            ProcessAlgo::Sparse                => "Sparse",
            ProcessAlgo::Dense                 => "Dense",
        }
    }

    pub fn uses_bounding_box(self) -> bool {
        self == ProcessAlgo::SparseWithBoundingBox
    }
}

// ── Record trait ──────────────────────────────────────────────────────────────

pub trait ParameterRecord: Clone + PartialEq + Default + fmt::Debug {
    /// Every scalar field, in wire order.
    fn scalar_fields(&self) -> Vec<(&'static str, ParamValue)>;

    fn scalar_mut(&mut self, field: &str) -> Option<ScalarMut<'_>>;

    fn resolution(&self, _slot: ResolutionSlot) -> Option<Resolution> {
        None
    }

    fn resolution_mut(&mut self, _slot: ResolutionSlot) -> Option<&mut Resolution> {
        None
    }

    /// Fields that are neither scalars nor resolutions (e.g. the algorithm
    /// choice). Sent before the scalars.
    fn option_fields(&self) -> Vec<FormField> {
        Vec::new()
    }

    /// Type-checked scalar write. Leaves the record untouched on error.
    fn set_scalar(&mut self, field: &str, value: ParamValue) -> Result<(), ValidationError> {
        match (self.scalar_mut(field), value) {
            (None, _) => Err(ValidationError::UnknownField(field.to_string())),
            (Some(ScalarMut::Number(slot)), ParamValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(ValidationError::Unparsable {
                        field: field.to_string(),
                        raw:   n.to_string(),
                    });
                }
                *slot = n;
                Ok(())
            }
            (Some(ScalarMut::Flag(slot)), ParamValue::Flag(b)) => {
                *slot = b;
                Ok(())
            }
            (Some(ScalarMut::Number(_)), ParamValue::Flag(_)) => Err(ValidationError::TypeMismatch {
                field:    field.to_string(),
                expected: "number",
            }),
            (Some(ScalarMut::Flag(_)), ParamValue::Number(_)) => Err(ValidationError::TypeMismatch {
                field:    field.to_string(),
                expected: "true/false",
            }),
        }
    }

    /// Flattened wire fields: option fields, expanded resolution pairs, then
    /// every scalar under its own name.
    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = self.option_fields();
        for slot in [ResolutionSlot::Frame, ResolutionSlot::Scale] {
            if let Some(res) = self.resolution(slot) {
                let (w, h) = slot.wire_names();
                fields.push(FormField::new(w, res.width.to_string()));
                fields.push(FormField::new(h, res.height.to_string()));
            }
        }
        fields.extend(
            self.scalar_fields()
                .into_iter()
                .map(|(name, value)| FormField::new(name, value.to_string())),
        );
        fields
    }
}

// ── Scale calibration record ──────────────────────────────────────────────────

/// Parameters of the scale calibration video (ruler filmed at a known distance).
#[derive(Clone, Debug, PartialEq)]
pub struct VideoParams {
    pub frame_rate:   f64,
    pub distance:     f64,
    pub ruler_length: f64,
    pub resolution:   Resolution,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            frame_rate:   30.0,
            distance:     100.0,
            ruler_length: 30.0,
            resolution:   Resolution::HD,
        }
    }
}

impl ParameterRecord for VideoParams {
    fn scalar_fields(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("frame_rate",   ParamValue::Number(self.frame_rate)),
            ("distance",     ParamValue::Number(self.distance)),
            ("ruler_length", ParamValue::Number(self.ruler_length)),
        ]
    }

    fn scalar_mut(&mut self, field: &str) -> Option<ScalarMut<'_>> {
        let slot = match field {
            "frame_rate"   => &mut self.frame_rate,
            "distance"     => &mut self.distance,
            "ruler_length" => &mut self.ruler_length,
            _              => return None,
        };
        Some(ScalarMut::Number(slot))
    }

    fn resolution(&self, slot: ResolutionSlot) -> Option<Resolution> {
        (slot == ResolutionSlot::Frame).then_some(self.resolution)
    }

    fn resolution_mut(&mut self, slot: ResolutionSlot) -> Option<&mut Resolution> {
        (slot == ResolutionSlot::Frame).then_some(&mut self.resolution)
    }
}

// ── Motion quantification record ──────────────────────────────────────────────

/// Full parameter set for `/motion-analysis`.
///
/// The eight corner fields describe the bounding box used by the
/// "Sparse with bounding box" algorithm (top-left, top-right, bottom-left,
/// bottom-right, in pixels of the analysed video).
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessingParameters {
    pub processing_algo:       ProcessAlgo,
    pub active_scale:          f64,
    pub brightness_thresh:     f64,
    pub event_thresh:          f64,
    pub neighborhood:          f64,
    pub frame_rate:            f64,
    pub distance:              f64,
    pub resolution:            Resolution,
    pub scale_fps:             f64,
    pub scale_res:             Resolution,
    pub scale_dist:            f64,
    pub scale_ruler_length:    f64,
    pub adjust_for_resolution: bool,
    pub tlx:   f64,
    pub tly:   f64,
    pub trx:   f64,
    pub r#try: f64,
    pub blx:   f64,
    pub bly:   f64,
    pub brx:   f64,
    pub bry:   f64,
}

impl Default for ProcessingParameters {
    fn default() -> Self {
        Self {
            processing_algo:       ProcessAlgo::SparseWithBoundingBox,
            active_scale:          0.08152,
            brightness_thresh:     0.15,
            event_thresh:          0.5,
            neighborhood:          50.0,
            frame_rate:            30.0,
            distance:              100.0,
            resolution:            Resolution::HD,
            scale_fps:             30.0,
            scale_res:             Resolution::HD,
            scale_dist:            100.0,
            scale_ruler_length:    30.0,
            adjust_for_resolution: false,
            tlx:   250.0,
            tly:   0.0,
            trx:   1100.0,
            r#try: 0.0,
            blx:   250.0,
            bly:   680.0,
            brx:   1100.0,
            bry:   680.0,
        }
    }
}

impl ProcessingParameters {
    /// Bounding-box corner fields, in display order.
    pub const CORNER_FIELDS: [&'static str; 8] =
        ["tlx", "tly", "trx", "try", "blx", "bly", "brx", "bry"];
}

impl ParameterRecord for ProcessingParameters {
    fn scalar_fields(&self) -> Vec<(&'static str, ParamValue)> {
        use ParamValue::{Flag, Number};
        vec![
            ("active_scale",          Number(self.active_scale)),
            ("brightness_thresh",     Number(self.brightness_thresh)),
            ("event_thresh",          Number(self.event_thresh)),
            ("neighborhood",          Number(self.neighborhood)),
            ("frame_rate",            Number(self.frame_rate)),
            ("distance",              Number(self.distance)),
            ("scale_fps",             Number(self.scale_fps)),
            ("scale_dist",            Number(self.scale_dist)),
            ("scale_ruler_length",    Number(self.scale_ruler_length)),
            ("adjust_for_resolution", Flag(self.adjust_for_resolution)),
            ("tlx",                   Number(self.tlx)),
            ("tly",                   Number(self.tly)),
            ("trx",                   Number(self.trx)),
            ("try",                   Number(self.r#try)),
            ("blx",                   Number(self.blx)),
            ("bly",                   Number(self.bly)),
            ("brx",                   Number(self.brx)),
            ("bry",                   Number(self.bry)),
        ]
    }

    fn scalar_mut(&mut self, field: &str) -> Option<ScalarMut<'_>> {
        if field == "adjust_for_resolution" {
            return Some(ScalarMut::Flag(&mut self.adjust_for_resolution));
        }
        let slot = match field {
            "active_scale"       => &mut self.active_scale,
            "brightness_thresh"  => &mut self.brightness_thresh,
            "event_thresh"       => &mut self.event_thresh,
            "neighborhood"       => &mut self.neighborhood,
            "frame_rate"         => &mut self.frame_rate,
            "distance"           => &mut self.distance,
            "scale_fps"          => &mut self.scale_fps,
            "scale_dist"         => &mut self.scale_dist,
            "scale_ruler_length" => &mut self.scale_ruler_length,
            "tlx"                => &mut self.tlx,
            "tly"                => &mut self.tly,
            "trx"                => &mut self.trx,
            "try"                => &mut self.r#try,
            "blx"                => &mut self.blx,
            "bly"                => &mut self.bly,
            "brx"                => &mut self.brx,
            "bry"                => &mut self.bry,
            _                    => return None,
        };
        Some(ScalarMut::Number(slot))
    }

    fn resolution(&self, slot: ResolutionSlot) -> Option<Resolution> {
        Some(match slot {
            ResolutionSlot::Frame => self.resolution,
            ResolutionSlot::Scale => self.scale_res,
        })
    }

    fn resolution_mut(&mut self, slot: ResolutionSlot) -> Option<&mut Resolution> {
        Some(match slot {
            ResolutionSlot::Frame => &mut self.resolution,
            ResolutionSlot::Scale => &mut self.scale_res,
        })
    }

    fn option_fields(&self) -> Vec<FormField> {
        vec![FormField::new("processing_algo", self.processing_algo.label())]
    }

    /// The analysis service has read the calibration resolution under both
    /// `scale_res_*` and `scale_resolution_*`; send both spellings.
    fn form_fields(&self) -> Vec<FormField> {
        let mut fields = self.option_fields();
        fields.push(FormField::new("resolution_width",  self.resolution.width.to_string()));
        fields.push(FormField::new("resolution_height", self.resolution.height.to_string()));
        fields.push(FormField::new("scale_resolution_width",  self.scale_res.width.to_string()));
        fields.push(FormField::new("scale_resolution_height", self.scale_res.height.to_string()));
        fields.push(FormField::new("scale_res_width",  self.scale_res.width.to_string()));
        fields.push(FormField::new("scale_res_height", self.scale_res.height.to_string()));
        fields.extend(
            self.scalar_fields()
                .into_iter()
                .map(|(name, value)| FormField::new(name, value.to_string())),
        );
        fields
    }
}

// ── Legacy quick-upload record ────────────────────────────────────────────────

/// Reduced parameter set for the legacy `/upload` endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct LegacyParameters {
    pub motion_type:       ProcessAlgo,
    pub active_scale:      f64,
    pub brightness_thresh: f64,
    pub event_thresh:      f64,
    pub neighborhood:      f64,
}

impl Default for LegacyParameters {
    fn default() -> Self {
        Self {
            motion_type:       ProcessAlgo::Sparse,
            active_scale:      0.08152,
            brightness_thresh: 0.15,
            event_thresh:      0.5,
            neighborhood:      50.0,
        }
    }
}

impl ParameterRecord for LegacyParameters {
    fn scalar_fields(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("active_scale",      ParamValue::Number(self.active_scale)),
            ("brightness_thresh", ParamValue::Number(self.brightness_thresh)),
            ("event_thresh",      ParamValue::Number(self.event_thresh)),
            ("neighborhood",      ParamValue::Number(self.neighborhood)),
        ]
    }

    fn scalar_mut(&mut self, field: &str) -> Option<ScalarMut<'_>> {
        let slot = match field {
            "active_scale"      => &mut self.active_scale,
            "brightness_thresh" => &mut self.brightness_thresh,
            "event_thresh"      => &mut self.event_thresh,
            "neighborhood"      => &mut self.neighborhood,
            _                   => return None,
        };
        Some(ScalarMut::Number(slot))
    }

    /// The legacy endpoint takes the algorithm as a trailing `motion_type`.
    fn form_fields(&self) -> Vec<FormField> {
        let mut fields: Vec<FormField> = self
            .scalar_fields()
            .into_iter()
            .map(|(name, value)| FormField::new(name, value.to_string()))
            .collect();
        fields.push(FormField::new("motion_type", self.motion_type.label()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(fields: &[FormField]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    fn value<'a>(fields: &'a [FormField], name: &str) -> &'a str {
        fields.iter().find(|f| f.name == name).map(|f| f.value.as_str()).unwrap()
    }

    #[test]
    fn numbers_print_without_trailing_zero() {
        assert_eq!(ParamValue::Number(30.0).to_string(), "30");
        assert_eq!(ParamValue::Number(0.08152).to_string(), "0.08152");
        assert_eq!(ParamValue::Flag(false).to_string(), "false");
    }

    #[test]
    fn video_params_flatten_resolution() {
        let fields = VideoParams::default().form_fields();
        assert_eq!(
            names(&fields),
            ["resolution_width", "resolution_height", "frame_rate", "distance", "ruler_length"],
        );
        assert_eq!(value(&fields, "resolution_width"), "1280");
        assert_eq!(value(&fields, "resolution_height"), "720");
    }

    #[test]
    fn motion_fields_have_no_nesting() {
        let fields = ProcessingParameters::default().form_fields();
        let names = names(&fields);
        assert!(!names.contains(&"resolution"));
        assert!(!names.contains(&"scale_res"));
        assert!(names.contains(&"scale_res_width"));
        assert!(names.contains(&"scale_resolution_height"));
        assert_eq!(value(&fields, "processing_algo"), "Sparse with bounding box");
        assert_eq!(value(&fields, "try"), "0");
        assert_eq!(value(&fields, "adjust_for_resolution"), "false");
    }

    #[test]
    fn legacy_sends_motion_type_last() {
        let fields = LegacyParameters::default().form_fields();
        assert_eq!(fields.last().unwrap().name, "motion_type");
        assert_eq!(fields.last().unwrap().value, "Sparse");
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn set_scalar_rejects_wrong_type() {
        let mut p = ProcessingParameters::default();
        assert!(p.set_scalar("adjust_for_resolution", ParamValue::Number(1.0)).is_err());
        assert!(p.set_scalar("frame_rate", ParamValue::Flag(true)).is_err());
        assert!(p.set_scalar("frame_rate", ParamValue::Number(f64::NAN)).is_err());
        assert_eq!(p, ProcessingParameters::default());
    }

    #[test]
    fn set_scalar_unknown_field() {
        let mut p = VideoParams::default();
        assert_eq!(
            p.set_scalar("shutter", ParamValue::Number(1.0)),
            Err(ValidationError::UnknownField("shutter".into())),
        );
    }

    #[test]
    fn raw_try_field_is_addressable() {
        let mut p = ProcessingParameters::default();
        p.set_scalar("try", ParamValue::Number(12.0)).unwrap();
        assert_eq!(p.r#try, 12.0);
    }
}
