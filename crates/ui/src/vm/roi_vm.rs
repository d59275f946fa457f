use kita_core::model::{
    ANIMATION_STEPS, LinearTween, RoiError, RoiMetrics, RoiModel, SliderBounds,
};
use services::SliderSettings;

/// Validated configuration of a mounted calculator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiCalculatorVm {
    model: RoiModel,
    bounds: SliderBounds,
}

impl RoiCalculatorVm {
    /// # Errors
    ///
    /// Returns `RoiError` if the slider settings are unusable.
    pub fn new(model: RoiModel, slider: SliderSettings) -> Result<Self, RoiError> {
        Ok(Self {
            model,
            bounds: slider.validate()?,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> SliderBounds {
        self.bounds
    }

    #[must_use]
    pub fn display_for(&self, sales: u32) -> RoiDisplay {
        RoiDisplay::from(self.model.compute(sales))
    }
}

/// Numbers currently on screen. Mid-animation values are fractional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoiDisplay {
    pub sales: f64,
    pub hours_without: f64,
    pub hours_with: f64,
    pub hours_saved: f64,
    pub money_saved: f64,
    pub roi_multiple: f64,
}

impl From<RoiMetrics> for RoiDisplay {
    #[allow(clippy::cast_precision_loss)]
    fn from(m: RoiMetrics) -> Self {
        Self {
            sales: f64::from(m.sales),
            hours_without: m.hours_without,
            hours_with: m.hours_with,
            hours_saved: m.hours_saved,
            money_saved: m.money_saved as f64,
            roi_multiple: m.roi_multiple,
        }
    }
}

impl RoiDisplay {
    #[must_use]
    pub fn sales_text(&self) -> String {
        format_whole(self.sales)
    }

    #[must_use]
    pub fn hours_without_text(&self) -> String {
        format!("{:.1}", self.hours_without)
    }

    #[must_use]
    pub fn hours_with_text(&self) -> String {
        format!("{:.1}", self.hours_with)
    }

    #[must_use]
    pub fn hours_saved_text(&self) -> String {
        format!("{:.1}", self.hours_saved)
    }

    #[must_use]
    pub fn money_saved_text(&self) -> String {
        format_whole(self.money_saved)
    }

    #[must_use]
    pub fn roi_multiple_text(&self) -> String {
        format!("{:.1}x", self.roi_multiple)
    }
}

/// Frame-by-frame transition between two displays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiTween {
    from: RoiDisplay,
    to: RoiDisplay,
    steps: u32,
}

impl RoiTween {
    #[must_use]
    pub fn new(from: RoiDisplay, to: RoiDisplay) -> Self {
        Self::with_steps(from, to, ANIMATION_STEPS)
    }

    #[must_use]
    pub fn with_steps(from: RoiDisplay, to: RoiDisplay, steps: u32) -> Self {
        Self {
            from,
            to,
            steps: steps.max(1),
        }
    }

    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Display at frame `step`; the final frame is exactly the target.
    #[must_use]
    pub fn frame(&self, step: u32) -> RoiDisplay {
        if step >= self.steps {
            return self.to;
        }
        let lerp = |from: f64, to: f64| LinearTween::new(from, to, self.steps).value_at(step);
        RoiDisplay {
            sales: lerp(self.from.sales, self.to.sales),
            hours_without: lerp(self.from.hours_without, self.to.hours_without),
            hours_with: lerp(self.from.hours_with, self.to.hours_with),
            hours_saved: lerp(self.from.hours_saved, self.to.hours_saved),
            money_saved: lerp(self.from.money_saved, self.to.money_saved),
            roi_multiple: lerp(self.from.roi_multiple, self.to.roi_multiple),
        }
    }
}

/// Rounds to a whole number and groups thousands with commas.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_whole(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
