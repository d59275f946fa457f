mod consent;
mod progress;
mod roi;
mod slider;
pub mod tween;

pub use consent::{CONSENT_STORAGE_KEY, ConsentDecision, ConsentModeUpdate, PromptOutcome};
pub use progress::{ProgressError, ProgressSession, SessionEnd, StageAdvance, Stages};
pub use roi::{RoiError, RoiMetrics, RoiModel, compute_metrics, round1};
pub use slider::{HIGH_BAND_THRESHOLD, MID_BAND_THRESHOLD, SliderBounds, TrackBand};
pub use tween::{ANIMATION_DURATION, ANIMATION_STEPS, LinearTween, step_interval};
