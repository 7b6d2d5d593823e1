// core/src/models.rs
use chrono::NaiveTime;
use clap::ValueEnum;
use serde::Deserialize;
use serde_path_to_error as spte;

use crate::conversions::{mps_to_kmph, time_to_seconds};
use crate::error::{Result, SportError};

pub const DEFAULT_AIR_DENSITY_KGPM3: f64 = 1.293;

fn default_air_density() -> f64 {
    DEFAULT_AIR_DENSITY_KGPM3
}

/// What an omitted `descent_m` resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DescentDefault {
    /// No descent unless one is given.
    #[default]
    Zero,
    /// Start and finish at the same height: descent equals ascent.
    #[value(name = "ascent")]
    MatchAscent,
}

/// Input mapping handed over by a caller (CLI, JSON, Python).
///
/// Unknown keys are ignored, so a superset such as the raw parsed CLI
/// arguments can be passed straight through.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseInput {
    #[serde(default)]
    pub distance_m: Option<f64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(alias = "time")]
    pub elapsed_time: NaiveTime,
    #[serde(alias = "weight_kg")]
    pub mass_kg: f64,
    #[serde(default)]
    pub ascent_m: f64,
    #[serde(default)]
    pub descent_m: Option<f64>,
    #[serde(default = "default_air_density")]
    pub air_density_kgpm3: f64,

    // --- sport specific ---
    #[serde(default, alias = "fraction_spend_drafting")]
    pub fraction_time_drafting: f64,
    /// Constant METs value; replaces the speed table lookup when set.
    #[serde(default, alias = "mets")]
    pub mets_kcal_kg_h: Option<f64>,

    // --- cycling parameter overrides ---
    #[serde(default)]
    pub draft_factor: Option<f64>,
    #[serde(default, alias = "CdA", alias = "cda")]
    pub drag_coefficient_times_frontal_area_m2: Option<f64>,
    #[serde(default)]
    pub efficiency_drive_train: Option<f64>,
    #[serde(default)]
    pub efficiency_human: Option<f64>,
    #[serde(default, alias = "Crr", alias = "crr")]
    pub rolling_resistance_coefficient: Option<f64>,
}

impl Default for ExerciseInput {
    fn default() -> Self {
        Self {
            distance_m: None,
            distance_km: None,
            elapsed_time: NaiveTime::MIN,
            mass_kg: 0.0,
            ascent_m: 0.0,
            descent_m: None,
            air_density_kgpm3: DEFAULT_AIR_DENSITY_KGPM3,
            fraction_time_drafting: 0.0,
            mets_kcal_kg_h: None,
            draft_factor: None,
            drag_coefficient_times_frontal_area_m2: None,
            efficiency_drive_train: None,
            efficiency_human: None,
            rolling_resistance_coefficient: None,
        }
    }
}

impl ExerciseInput {
    /// Decode a JSON object; the error names the key that failed.
    pub fn from_json(txt: &str) -> Result<Self> {
        let mut de = serde_json::Deserializer::from_str(txt);
        spte::deserialize(&mut de).map_err(|e| SportError::Input {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })
    }

    /// Distance in metres; `distance_m` wins over `distance_km`.
    pub fn resolved_distance_m(&self) -> Result<f64> {
        match (self.distance_m, self.distance_km) {
            (Some(m), _) => Ok(m),
            (None, Some(km)) => Ok(km * 1000.0),
            (None, None) => Err(SportError::MissingDistance),
        }
    }

    pub fn to_record(&self, descent_default: DescentDefault) -> Result<ExerciseRecord> {
        let descent_m = match (self.descent_m, descent_default) {
            (Some(d), _) => d,
            (None, DescentDefault::Zero) => 0.0,
            (None, DescentDefault::MatchAscent) => self.ascent_m,
        };

        let record = ExerciseRecord::new(self.resolved_distance_m()?, self.elapsed_time, self.mass_kg)
            .with_ascent(self.ascent_m)
            .with_descent(descent_m)
            .with_air_density(self.air_density_kgpm3);
        record.validate()?;
        Ok(record)
    }
}

/// Raw inputs of one exercise. Derived quantities are computed from these on
/// demand and never stored independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub distance_m: f64,       // m
    pub elapsed_time: NaiveTime,
    pub mass_kg: f64,          // human + equipment
    pub ascent_m: f64,         // m
    pub descent_m: f64,        // m
    pub air_density_kgpm3: f64,
}

impl ExerciseRecord {
    /// Zero elapsed time is accepted here; it only fails once a time
    /// dependent quantity is requested.
    pub fn new(distance_m: f64, elapsed_time: NaiveTime, mass_kg: f64) -> Self {
        Self {
            distance_m,
            elapsed_time,
            mass_kg,
            ascent_m: 0.0,
            descent_m: 0.0,
            air_density_kgpm3: DEFAULT_AIR_DENSITY_KGPM3,
        }
    }

    pub fn with_ascent(mut self, ascent_m: f64) -> Self {
        self.ascent_m = ascent_m;
        self
    }

    pub fn with_descent(mut self, descent_m: f64) -> Self {
        self.descent_m = descent_m;
        self
    }

    pub fn with_air_density(mut self, air_density_kgpm3: f64) -> Self {
        self.air_density_kgpm3 = air_density_kgpm3;
        self
    }

    /// Ascent and descent are totals and must be >= 0; the sign of the
    /// descent work comes from the model, not from the input.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("ascent_m", self.ascent_m), ("descent_m", self.descent_m)] {
            if !(value >= 0.0) {
                return Err(SportError::NegativeElevation { field, value });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    /// Elapsed time in seconds, validated to be > 0.
    pub fn time_s(&self) -> Result<f64> {
        time_to_seconds(self.elapsed_time, true)
    }

    pub fn time_h(&self) -> Result<f64> {
        Ok(self.time_s()? / 3600.0)
    }

    pub fn speed_ms(&self) -> Result<f64> {
        Ok(self.distance_m / self.time_s()?)
    }

    pub fn speed_kmph(&self) -> Result<f64> {
        Ok(mps_to_kmph(self.speed_ms()?))
    }
}
