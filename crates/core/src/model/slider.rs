use crate::model::roi::RoiError;

/// Input at or above this value paints the track in the mid band.
pub const MID_BAND_THRESHOLD: u32 = 20;
/// Input at or above this value paints the track in the high band.
pub const HIGH_BAND_THRESHOLD: u32 = 50;

const TRACK_REST_COLOR: &str = "#e5e7eb";

/// Color band of the slider track, keyed to the raw input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackBand {
    Low,
    Mid,
    High,
}

impl TrackBand {
    #[must_use]
    pub fn for_value(value: u32) -> Self {
        if value >= HIGH_BAND_THRESHOLD {
            Self::High
        } else if value >= MID_BAND_THRESHOLD {
            Self::Mid
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#f59e0b",
            Self::Mid => "#3b82f6",
            Self::High => "#10b981",
        }
    }
}

/// Configured range of the sales-volume slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderBounds {
    min: u32,
    max: u32,
    initial: u32,
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            initial: 40,
        }
    }
}

impl SliderBounds {
    /// # Errors
    ///
    /// Returns `RoiError::InvalidBounds` if `min >= max`, or
    /// `RoiError::InitialOutOfRange` if `initial` is outside `min..=max`.
    pub fn new(min: u32, max: u32, initial: u32) -> Result<Self, RoiError> {
        if min >= max {
            return Err(RoiError::InvalidBounds { min, max });
        }
        if !(min..=max).contains(&initial) {
            return Err(RoiError::InitialOutOfRange {
                value: initial,
                min,
                max,
            });
        }
        Ok(Self { min, max, initial })
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn initial(&self) -> u32 {
        self.initial
    }

    #[must_use]
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }

    /// Parses raw slider input, clamping into range. Non-numeric input yields `None`.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<u32> {
        let raw = raw.trim();
        if let Ok(value) = raw.parse::<u32>() {
            return Some(self.clamp(value));
        }
        // Range inputs may report fractional strings on some platforms.
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let rounded = value.round().max(0.0) as u32;
                self.clamp(rounded)
            })
    }

    /// Position of `value` along the track as a percentage.
    #[must_use]
    pub fn position_percent(&self, value: u32) -> f64 {
        let value = self.clamp(value);
        f64::from(value - self.min) / f64::from(self.max - self.min) * 100.0
    }

    /// CSS background for the track: filled up to the thumb in the band color.
    #[must_use]
    pub fn track_background(&self, value: u32) -> String {
        let color = TrackBand::for_value(value).color();
        let pct = self.position_percent(value);
        format!(
            "linear-gradient(to right, {color} 0%, {color} {pct:.1}%, {TRACK_REST_COLOR} {pct:.1}%, {TRACK_REST_COLOR} 100%)"
        )
    }
}
