use thiserror::Error;

/// Errors raised while configuring the ROI calculator.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RoiError {
    #[error("slider bounds are empty: min {min} must be below max {max}")]
    InvalidBounds { min: u32, max: u32 },
    #[error("initial slider value {value} lies outside {min}..={max}")]
    InitialOutOfRange { value: u32, min: u32, max: u32 },
    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Rounds to one decimal place, the precision every hour figure is shown with.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//
// ─── MODEL ────────────────────────────────────────────────────────────────────
//

/// Constants behind the savings estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiModel {
    minutes_without_tool: f64,
    minutes_with_tool: f64,
    hourly_rate: f64,
    monthly_cost: f64,
}

impl Default for RoiModel {
    fn default() -> Self {
        Self {
            minutes_without_tool: 15.0,
            minutes_with_tool: 0.5,
            hourly_rate: 250.0,
            monthly_cost: 299.0,
        }
    }
}

impl RoiModel {
    /// # Errors
    ///
    /// Returns `RoiError::NonPositive` if any constant is zero, negative or NaN.
    pub fn new(
        minutes_without_tool: f64,
        minutes_with_tool: f64,
        hourly_rate: f64,
        monthly_cost: f64,
    ) -> Result<Self, RoiError> {
        for (field, value) in [
            ("minutes_without_tool", minutes_without_tool),
            ("minutes_with_tool", minutes_with_tool),
            ("hourly_rate", hourly_rate),
            ("monthly_cost", monthly_cost),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(RoiError::NonPositive { field, value });
            }
        }
        Ok(Self {
            minutes_without_tool,
            minutes_with_tool,
            hourly_rate,
            monthly_cost,
        })
    }

    #[must_use]
    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    #[must_use]
    pub fn monthly_cost(&self) -> f64 {
        self.monthly_cost
    }

    /// Derives every displayed figure from the monthly sales volume.
    ///
    /// Hours are rounded to one decimal first; the money figure is computed
    /// from the rounded hours saved so the numbers on screen agree with each
    /// other.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn compute(&self, sales_per_month: u32) -> RoiMetrics {
        let sales = f64::from(sales_per_month);
        let raw_without = sales * self.minutes_without_tool / 60.0;
        let raw_with = sales * self.minutes_with_tool / 60.0;

        let saved_tenths = ((raw_without - raw_with) * 10.0).round().max(0.0);
        let hours_saved = saved_tenths / 10.0;
        let money_saved = (saved_tenths * self.hourly_rate / 10.0).round().max(0.0) as u64;
        #[allow(clippy::cast_precision_loss)]
        let roi_multiple = round1(money_saved as f64 / self.monthly_cost);

        RoiMetrics {
            sales: sales_per_month,
            hours_without: round1(raw_without),
            hours_with: round1(raw_with),
            hours_saved,
            money_saved,
            roi_multiple,
        }
    }
}

/// Computes metrics with the default constants.
#[must_use]
pub fn compute_metrics(sales_per_month: u32) -> RoiMetrics {
    RoiModel::default().compute(sales_per_month)
}

//
// ─── METRICS ──────────────────────────────────────────────────────────────────
//

/// Everything the calculator displays for one input value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoiMetrics {
    pub sales: u32,
    pub hours_without: f64,
    pub hours_with: f64,
    pub hours_saved: f64,
    pub money_saved: u64,
    pub roi_multiple: f64,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
