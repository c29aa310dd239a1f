// crates/motionlab-core/src/store.rs
//
// ParameterStore: the editable copy of a record plus its construction-time
// defaults.
//
// All user input arrives as raw text. `coerce` classifies it (flag token,
// finite number, anything else) and the record's own type check decides
// whether the value fits the field. Any rejection leaves the record exactly
// as it was, so a bad keystroke can never corrupt state.

use crate::error::ValidationError;
use crate::params::{ParamValue, ParameterRecord, Resolution, ResolutionSlot};

/// Raw input after classification.
#[derive(Clone, Debug, PartialEq)]
pub enum Coerced {
    Flag(bool),
    /// Always finite.
    Number(f64),
    Text(String),
}

/// Classify raw input: boolean token, then float, then pass-through text.
///
/// The float parse is strict: the whole (trimmed) token must be a number.
/// `NaN` and infinities parse as floats but are not finite, so they fall
/// through to `Text`.
pub fn coerce(raw: &str) -> Coerced {
    let token = raw.trim();
    match token {
        "true"  => return Coerced::Flag(true),
        "false" => return Coerced::Flag(false),
        _       => {}
    }
    match token.parse::<f64>() {
        Ok(n) if n.is_finite() => Coerced::Number(n),
        _                      => Coerced::Text(raw.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct ParameterStore<R: ParameterRecord> {
    current:  R,
    defaults: R,
}

impl<R: ParameterRecord> Default for ParameterStore<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: ParameterRecord> ParameterStore<R> {
    pub fn new(defaults: R) -> Self {
        Self { current: defaults.clone(), defaults }
    }

    pub fn get(&self) -> &R {
        &self.current
    }

    pub fn defaults(&self) -> &R {
        &self.defaults
    }

    /// Update one field from raw text. Resolution fields (`resolution`,
    /// `scale_res`) are routed to `update_resolution`.
    pub fn update(&mut self, field: &str, raw: &str) -> Result<(), ValidationError> {
        if let Some(slot) = ResolutionSlot::from_field(field) {
            return self.update_resolution(slot, raw);
        }
        let value = match coerce(raw) {
            Coerced::Flag(b)   => ParamValue::Flag(b),
            Coerced::Number(n) => ParamValue::Number(n),
            Coerced::Text(raw) => {
                return Err(ValidationError::Unparsable { field: field.to_string(), raw });
            }
        };
        self.current.set_scalar(field, value)
    }

    /// Set both halves of a resolution pair from `"<w>x<h>"`, or neither.
    pub fn update_resolution(&mut self, slot: ResolutionSlot, raw: &str) -> Result<(), ValidationError> {
        let parsed = Resolution::parse(raw)
            .ok_or_else(|| ValidationError::BadResolution(raw.to_string()))?;
        let target = self.current
            .resolution_mut(slot)
            .ok_or_else(|| ValidationError::UnknownField(slot.field_name().to_string()))?;
        *target = parsed;
        Ok(())
    }

    /// Restore the defaults captured at construction.
    pub fn reset(&mut self) {
        self.current = self.defaults.clone();
    }

    /// Wholesale replacement, used by cross-form sync.
    pub fn replace(&mut self, next: R) {
        self.current = next;
    }

    /// Direct access for fields that are not raw-text scalars (algorithm
    /// pickers). Scalar edits should go through `update`.
    pub fn edit(&mut self, f: impl FnOnce(&mut R)) {
        f(&mut self.current);
    }
}
