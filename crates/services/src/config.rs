use std::time::Duration;

use kita_core::model::{RoiError, RoiModel, SliderBounds};

use crate::progress_service::DEFAULT_TIMEOUT;

/// Raw slider range as configured; validated when the calculator mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSettings {
    pub min: u32,
    pub max: u32,
    pub initial: u32,
}

impl Default for SliderSettings {
    fn default() -> Self {
        let bounds = SliderBounds::default();
        Self {
            min: bounds.min(),
            max: bounds.max(),
            initial: bounds.initial(),
        }
    }
}

impl SliderSettings {
    /// # Errors
    ///
    /// Returns `RoiError` if the range is empty or `initial` lies outside it.
    pub fn validate(self) -> Result<SliderBounds, RoiError> {
        SliderBounds::new(self.min, self.max, self.initial)
    }
}

/// Tunables resolved by the binary and handed to services and ui.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteConfig {
    pub loading_timeout: Duration,
    pub roi_model: RoiModel,
    pub slider: SliderSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            loading_timeout: DEFAULT_TIMEOUT,
            roi_model: RoiModel::default(),
            slider: SliderSettings::default(),
        }
    }
}

impl SiteConfig {
    #[must_use]
    pub fn with_loading_timeout(mut self, timeout: Duration) -> Self {
        self.loading_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_slider(mut self, slider: SliderSettings) -> Self {
        self.slider = slider;
        self
    }
}
