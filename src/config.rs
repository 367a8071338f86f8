// src/config.rs
use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::{fs::File, path::Path};

use crate::tariff::{OffPeakWindow, TariffRule, DEFAULT_RATE_THRESHOLD};

/// Optional YAML settings for the bill parser. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BillConfig {
    /// IANA zone of the meter's wall clock.
    pub timezone: String,
    pub rate_threshold: f64,
    pub off_peak_start: String,
    pub off_peak_end: String,
    pub all_output: String,
    pub filtered_output: String,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/London".into(),
            rate_threshold: DEFAULT_RATE_THRESHOLD,
            off_peak_start: "23:30".into(),
            off_peak_end: "05:30".into(),
            all_output: "all_energy_data.csv".into(),
            filtered_output: "filtered_energy_data.csv".into(),
        }
    }
}

impl BillConfig {
    /// Defaults, or the YAML file at `path` if one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let f = File::open(path)
                    .with_context(|| format!("opening config {}", path.display()))?;
                serde_yaml::from_reader(f)
                    .with_context(|| format!("parsing config {}", path.display()))
            }
        }
    }

    /// Resolve the zone name against the compiled-in tz database.
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("unknown timezone {:?}: {}", self.timezone, e))
    }

    pub fn tariff_rule(&self) -> Result<TariffRule> {
        let window = OffPeakWindow::parse(&self.off_peak_start, &self.off_peak_end)
            .context("invalid off-peak window")?;
        Ok(TariffRule {
            window,
            rate_threshold: self.rate_threshold,
        })
    }
}
