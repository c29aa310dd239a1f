// crates/motionlab-core/src/sync.rs
//
// Scale calibration → motion quantification hand-off.
//
// The scaling form emits a ScaleResult; the motion form keeps the latest one
// in SyncInputs and folds it into its own record with reconcile(). Data only
// flows that way: nothing is ever sent back to the scaling form.
//
// reconcile() is equality-gated. It returns Some(next) only when the
// candidate differs from the current record, so feeding the same inputs
// twice is a no-op and two forms can never ping-pong updates.

use crate::params::{ProcessingParameters, VideoParams};
use crate::store::ParameterStore;

/// Emitted by the scaling form on a successful `/find-scale` call.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleResult {
    pub scale:  f64,
    pub params: VideoParams,
}

/// Compute the motion record that results from the incoming values, or
/// `None` when nothing would change.
pub fn reconcile(
    current:         &ProcessingParameters,
    incoming_scale:  Option<f64>,
    incoming_params: Option<&VideoParams>,
) -> Option<ProcessingParameters> {
    let mut next = current.clone();

    if let Some(scale) = incoming_scale.filter(|s| s.is_finite()) {
        if scale != current.active_scale {
            next.active_scale = scale;
        }
    }

    if let Some(p) = incoming_params {
        next.frame_rate = p.frame_rate;
        next.distance   = p.distance;
        next.resolution = p.resolution;
        // The calibration video's settings become the scale reference.
        next.scale_fps  = p.frame_rate;
        next.scale_dist = p.distance;
        next.scale_res  = p.resolution;
    }

    (next != *current).then_some(next)
}

/// The last values received from the scaling form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncInputs {
    scale:  Option<f64>,
    params: Option<VideoParams>,
}

impl SyncInputs {
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }

    pub fn params(&self) -> Option<&VideoParams> {
        self.params.as_ref()
    }

    /// Store a new result. Returns true when either input actually changed.
    pub fn push(&mut self, result: ScaleResult) -> bool {
        let changed = self.scale != Some(result.scale) || self.params.as_ref() != Some(&result.params);
        self.scale  = Some(result.scale);
        self.params = Some(result.params);
        changed
    }

    /// Run reconcile against `store` and apply the result. Returns true when
    /// the store was updated.
    pub fn apply_to(&self, store: &mut ParameterStore<ProcessingParameters>) -> bool {
        match reconcile(store.get(), self.scale, self.params.as_ref()) {
            Some(next) => {
                store.replace(next);
                true
            }
            None => false,
        }
    }
}
