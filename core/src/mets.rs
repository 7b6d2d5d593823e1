// core/src/mets.rs
//! Energy expenditure from a metabolic equivalent (METs) value.
//!
//! The METs value comes from a [`MetsSource`]: either a constant, or a
//! [`MetsTable`] interpolated on the average speed.

use std::borrow::Cow;

use log::{debug, warn};

use crate::conversions::kcal_to_joules;
use crate::error::{Result, SportError};
use crate::models::ExerciseRecord;
use crate::stats::{BaseStats, ExerciseStats, ResultValue};

/// Measured METs values (kcal/kg/h) at increasing speeds (km/h).
#[derive(Debug, Clone, PartialEq)]
pub struct MetsTable {
    speed_breakpoints_kmph: Cow<'static, [f64]>,
    mets_at_breakpoint: Cow<'static, [f64]>,
}

/// Result of a table lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetsLookup {
    pub mets_kcal_kg_h: f64,
    /// `false` when the speed lies outside the measured range and the
    /// boundary value was used.
    pub in_range: bool,
}

impl MetsTable {
    /// Built-in tables; the invariant is checked by the tests instead of at runtime.
    pub(crate) const fn from_static(speeds: &'static [f64], mets: &'static [f64]) -> Self {
        Self {
            speed_breakpoints_kmph: Cow::Borrowed(speeds),
            mets_at_breakpoint: Cow::Borrowed(mets),
        }
    }

    pub fn new(speed_breakpoints_kmph: Vec<f64>, mets_at_breakpoint: Vec<f64>) -> Result<Self> {
        let table = Self {
            speed_breakpoints_kmph: Cow::Owned(speed_breakpoints_kmph),
            mets_at_breakpoint: Cow::Owned(mets_at_breakpoint),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        let xs = self.speeds();
        if xs.is_empty() {
            return Err(SportError::InvalidMetsTable("table is empty"));
        }
        if xs.len() != self.mets().len() {
            return Err(SportError::InvalidMetsTable(
                "speeds and METs values differ in length",
            ));
        }
        if xs.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(SportError::InvalidMetsTable(
                "speed breakpoints must be strictly increasing",
            ));
        }
        Ok(())
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speed_breakpoints_kmph
    }

    pub fn mets(&self) -> &[f64] {
        &self.mets_at_breakpoint
    }

    /// Lowest and highest speed the table was measured for.
    pub fn range_kmph(&self) -> (f64, f64) {
        let xs = self.speeds();
        (xs[0], xs[xs.len() - 1])
    }

    /// Piecewise-linear lookup, clamped to the boundary values outside the table.
    pub fn lookup(&self, speed_kmph: f64) -> MetsLookup {
        let xs = self.speeds();
        let ys = self.mets();
        let n = xs.len();
        let (first, last) = self.range_kmph();

        if speed_kmph.is_nan() {
            return MetsLookup { mets_kcal_kg_h: f64::NAN, in_range: false };
        }
        if speed_kmph <= first {
            return MetsLookup { mets_kcal_kg_h: ys[0], in_range: speed_kmph == first };
        }
        if speed_kmph >= last {
            return MetsLookup { mets_kcal_kg_h: ys[n - 1], in_range: speed_kmph == last };
        }

        // first < speed < last, so 1 <= i + 1 <= n - 1
        let i = xs.partition_point(|&x| x <= speed_kmph) - 1;
        let t = (speed_kmph - xs[i]) / (xs[i + 1] - xs[i]);
        MetsLookup {
            mets_kcal_kg_h: ys[i] + t * (ys[i + 1] - ys[i]),
            in_range: true,
        }
    }

    /// Like [`lookup`](Self::lookup), but logs a warning when the speed is
    /// outside the measured range.
    pub fn interpolate(&self, speed_kmph: f64) -> f64 {
        let found = self.lookup(speed_kmph);
        if !found.in_range {
            let (lo, hi) = self.range_kmph();
            warn!(
                "The speed {speed_kmph:.2} km/h is out of the range data was collected for. \
                 Values outside {lo} - {hi} km/h may not be accurate."
            );
        }
        found.mets_kcal_kg_h
    }
}

/// Where the METs value of an exercise comes from.
pub trait MetsSource {
    fn mets_kcal_kg_h(&self, base: &BaseStats) -> f64;
}

/// Fixed intensity, independent of speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantMets(pub f64);

impl MetsSource for ConstantMets {
    fn mets_kcal_kg_h(&self, _base: &BaseStats) -> f64 {
        self.0
    }
}

impl MetsSource for MetsTable {
    fn mets_kcal_kg_h(&self, base: &BaseStats) -> f64 {
        self.interpolate(base.speed_kmph)
    }
}

/// Active energy only: one MET (the resting metabolism) is subtracted.
#[inline]
pub fn active_energy_kcal(mets_kcal_kg_h: f64, mass_kg: f64, time_h: f64) -> f64 {
    (mets_kcal_kg_h - 1.0) * mass_kg * time_h
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetsStats {
    pub base: BaseStats,
    pub mets_kcal_kg_h: f64,
    pub energy_kcal: f64,
    pub energy_kj: f64,
}

impl MetsStats {
    pub fn update(record: &ExerciseRecord, source: &dyn MetsSource) -> Result<Self> {
        let base = record.update()?;
        let mets_kcal_kg_h = source.mets_kcal_kg_h(&base);
        let energy_kcal = active_energy_kcal(mets_kcal_kg_h, base.mass_kg, base.time_h);
        let energy_kj = kcal_to_joules(energy_kcal) * 1e-3;
        debug!("METs {mets_kcal_kg_h:.2} kcal/kg/h -> {energy_kcal:.1} kcal");

        Ok(Self { base, mets_kcal_kg_h, energy_kcal, energy_kj })
    }
}

impl ExerciseStats for MetsStats {
    const FIELDS: &'static [&'static str] = &[
        "mass_kg",
        "distance_m",
        "distance_km",
        "elapsed_time",
        "time_s",
        "time_h",
        "ascent_m",
        "descent_m",
        "air_density_kgpm3",
        "speed_ms",
        "speed_kmph",
        "mets_kcal_kg_h",
        "energy_kcal",
        "energy_kj",
    ];

    fn values(&self) -> Vec<ResultValue> {
        let mut out = self.base.values();
        out.extend([
            ResultValue::Number(self.mets_kcal_kg_h),
            ResultValue::Number(self.energy_kcal),
            ResultValue::Number(self.energy_kj),
        ]);
        out
    }
}
