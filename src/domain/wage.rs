use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::config::settings::{DEFAULT_HOURS_PER_WEEK, DEFAULT_TAKE_HOME_PERCENT};
use crate::utils::format::{format_fixed, format_whole_dollars};

/// Paid weeks per year used to turn an annual salary into an hourly figure.
pub const WEEKS_PER_YEAR: f64 = 52.0;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WageType {
    #[default]
    Hourly,
    Annual,
}

impl WageType {
    /// Label shown next to the wage input.
    pub fn wage_label(&self) -> &'static str {
        match self {
            WageType::Hourly => "Hourly wage ($/hr)",
            WageType::Annual => "Annual salary ($/yr)",
        }
    }
}

/// Immutable wage snapshot the converter works from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WageConfig {
    pub wage_type: WageType,
    pub wage: f64,
    pub hours_per_week: f64,
    pub take_home_percent: f64,
}

impl WageConfig {
    pub fn new(
        wage_type: WageType,
        wage: f64,
        hours_per_week: f64,
        take_home_percent: f64,
    ) -> Self {
        WageConfig {
            wage_type,
            wage,
            hours_per_week,
            take_home_percent,
        }
    }

    // Non-positive or non-finite values behave as if the field were unset.
    fn hours_per_week_or_default(&self) -> f64 {
        positive_or(self.hours_per_week, DEFAULT_HOURS_PER_WEEK)
    }

    fn take_home_fraction(&self) -> f64 {
        positive_or(self.take_home_percent, DEFAULT_TAKE_HOME_PERCENT).min(100.0) / 100.0
    }

    /// Pre-tax hourly figure. 0.0 when no conversion is possible.
    pub fn gross_hourly(&self) -> f64 {
        if !self.wage.is_finite() || self.wage <= 0.0 {
            return 0.0;
        }
        match self.wage_type {
            WageType::Hourly => self.wage,
            WageType::Annual => self.wage / (self.hours_per_week_or_default() * WEEKS_PER_YEAR),
        }
    }

    /// Take-home hourly rate. Exactly 0.0 when `wage <= 0`.
    pub fn effective_hourly_rate(&self) -> f64 {
        self.gross_hourly() * self.take_home_fraction()
    }

    /// Net figures shown alongside the wage settings. `None` when the wage is unusable.
    pub fn summary(&self) -> Option<WageSummary> {
        let gross = self.gross_hourly();
        if gross <= 0.0 {
            return None;
        }
        let take_home = self.take_home_fraction();
        Some(WageSummary {
            effective_hourly: gross * take_home,
            net_annual: gross * self.hours_per_week_or_default() * WEEKS_PER_YEAR * take_home,
        })
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct WageSummary {
    pub effective_hourly: f64,
    pub net_annual: f64,
}

impl WageSummary {
    pub fn hourly_line(&self) -> String {
        format!("Effective hourly: ${}/hr", format_fixed(self.effective_hourly, 2))
    }

    pub fn annual_line(&self) -> String {
        format!("Net annual pay: {}", format_whole_dollars(self.net_annual))
    }
}
