// core/src/physics.rs
//! Cycling work/energy model.
//!
//! Three forces are overcome over the ridden distance: air drag (reduced while
//! drafting), rolling resistance and gravity. Mechanical work is turned into
//! the energy the rider's body spends through human × drivetrain efficiency,
//! and into average power at the pedals through drivetrain efficiency only.
//!
//! Default parameters are the "conventional racing bike" values from
//! <https://www.sheldonbrown.com/rinard/aero/formulas.html>.

use log::debug;

use crate::conversions::{joules_to_kcal, joules_to_kilojoules};
use crate::error::{Result, SportError};
use crate::models::{ExerciseInput, ExerciseRecord};
use crate::stats::{BaseStats, ExerciseStats, ResultValue};

pub const G: f64 = 9.81;                       // gravity (m/s²)
pub const DRAFT_FACTOR: f64 = 0.3;             // drag reduction while drafting
pub const CDA_M2: f64 = 0.39;                  // drag coefficient × frontal area (m²)
pub const ETA_DRIVE_TRAIN: f64 = 0.98;         // pedals → wheel
pub const ETA_HUMAN: f64 = 0.25;               // metabolic → mechanical
pub const CRR: f64 = 0.003;                    // rolling resistance coefficient

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclingParameters {
    pub draft_factor: f64,
    pub drag_coefficient_times_frontal_area_m2: f64,
    pub efficiency_drive_train: f64,
    pub efficiency_human: f64,
    pub rolling_resistance_coefficient: f64,
    /// 0.0 = never drafting, 1.0 = drafting the whole ride.
    pub fraction_time_drafting: f64,
}

impl Default for CyclingParameters {
    fn default() -> Self {
        Self {
            draft_factor: DRAFT_FACTOR,
            drag_coefficient_times_frontal_area_m2: CDA_M2,
            efficiency_drive_train: ETA_DRIVE_TRAIN,
            efficiency_human: ETA_HUMAN,
            rolling_resistance_coefficient: CRR,
            fraction_time_drafting: 0.0,
        }
    }
}

impl CyclingParameters {
    /// Defaults with whatever the input overrides.
    pub fn from_input(input: &ExerciseInput) -> Self {
        let d = Self::default();
        Self {
            draft_factor: input.draft_factor.unwrap_or(d.draft_factor),
            drag_coefficient_times_frontal_area_m2: input
                .drag_coefficient_times_frontal_area_m2
                .unwrap_or(d.drag_coefficient_times_frontal_area_m2),
            efficiency_drive_train: input.efficiency_drive_train.unwrap_or(d.efficiency_drive_train),
            efficiency_human: input.efficiency_human.unwrap_or(d.efficiency_human),
            rolling_resistance_coefficient: input
                .rolling_resistance_coefficient
                .unwrap_or(d.rolling_resistance_coefficient),
            fraction_time_drafting: input.fraction_time_drafting,
        }
    }

    /// Fractions must lie in [0, 1]; efficiencies in (0, 1]; CdA and Crr >= 0.
    pub fn validate(&self) -> Result<()> {
        let f = self.fraction_time_drafting;
        if !(0.0..=1.0).contains(&f) {
            return Err(SportError::InvalidPercentage(format!(
                "fraction_time_drafting = {f} (expected a fraction between 0 and 1)"
            )));
        }

        let check = |name: &'static str, value: f64, ok: bool, expected: &'static str| {
            if ok {
                Ok(())
            } else {
                Err(SportError::InvalidParameter { name, value, expected })
            }
        };
        let eff = |x: f64| x > 0.0 && x <= 1.0;

        let p = self;
        check("draft_factor", p.draft_factor, (0.0..=1.0).contains(&p.draft_factor), "0 <= x <= 1")?;
        check("efficiency_human", p.efficiency_human, eff(p.efficiency_human), "0 < x <= 1")?;
        check("efficiency_drive_train", p.efficiency_drive_train, eff(p.efficiency_drive_train), "0 < x <= 1")?;
        check(
            "drag_coefficient_times_frontal_area_m2",
            p.drag_coefficient_times_frontal_area_m2,
            p.drag_coefficient_times_frontal_area_m2 >= 0.0,
            "x >= 0",
        )?;
        check(
            "rolling_resistance_coefficient",
            p.rolling_resistance_coefficient,
            p.rolling_resistance_coefficient >= 0.0,
            "x >= 0",
        )
    }

    /// Human × drivetrain: metabolic energy per joule at the wheel.
    #[inline]
    pub fn efficiency(&self) -> f64 {
        self.efficiency_human * self.efficiency_drive_train
    }

    #[inline]
    pub fn avg_draft_factor(&self) -> f64 {
        self.draft_factor * self.fraction_time_drafting
    }
}

// ----- force helpers -----

#[inline]
fn drag_force(rho: f64, cda: f64, v_ms: f64, avg_draft_factor: f64) -> f64 {
    0.5 * cda * rho * v_ms * v_ms * (1.0 - avg_draft_factor)
}

#[inline]
fn rolling_force(force_gravity: f64, crr: f64) -> f64 {
    force_gravity * crr
}

/// Work the rider has to deliver at the given efficiency.
///
/// Only the positive components are divided by `efficiency`; the (negative)
/// descent term is added as is, since descending needs no extra effort.
#[inline]
pub fn combined_work(
    work_drag_j: f64,
    work_ascent_j: f64,
    work_roll_j: f64,
    work_descend_j: f64,
    efficiency: f64,
) -> f64 {
    (work_drag_j + work_ascent_j + work_roll_j) / efficiency + work_descend_j
}

#[derive(Debug, Clone, PartialEq)]
pub struct CyclingStats {
    pub base: BaseStats,
    pub params: CyclingParameters,

    // drag
    pub avg_draft_factor: f64,
    pub force_drag: f64,       // N
    pub work_drag_j: f64,
    pub energy_drag_j: f64,
    pub energy_drag_kj: f64,
    pub avg_power_drag_w: f64,

    // gravity
    pub force_gravity: f64,    // N
    pub work_ascent_j: f64,
    pub work_descend_j: f64,   // always <= 0
    pub energy_gravity_j: f64,
    pub energy_gravity_kj: f64,
    pub avg_power_gravity_w: f64,

    // rolling resistance
    pub force_roll: f64,       // N
    pub work_roll_j: f64,
    pub energy_roll_j: f64,
    pub energy_roll_kj: f64,
    pub avg_power_roll_w: f64,

    // totals
    pub work_j: f64,
    pub energy_j: f64,
    pub energy_kj: f64,
    pub energy_kcal: f64,
    pub avg_power_w: f64,
}

impl CyclingStats {
    pub fn update(record: &ExerciseRecord, params: CyclingParameters) -> Result<Self> {
        params.validate()?;
        let base = record.update()?;
        let time_s = base.time_s;
        let eta = params.efficiency();
        let eta_dt = params.efficiency_drive_train;

        let avg_draft_factor = params.avg_draft_factor();
        let force_drag = drag_force(
            base.air_density_kgpm3,
            params.drag_coefficient_times_frontal_area_m2,
            base.speed_ms,
            avg_draft_factor,
        );
        let work_drag_j = base.distance_m * force_drag;

        let force_gravity = base.mass_kg * G;
        let work_ascent_j = base.ascent_m * force_gravity;
        let work_descend_j = -base.descent_m * force_gravity;

        let force_roll = rolling_force(force_gravity, params.rolling_resistance_coefficient);
        let work_roll_j = base.distance_m * force_roll;

        let work_j = combined_work(work_drag_j, work_ascent_j, work_roll_j, work_descend_j, 1.0);
        let energy_j = combined_work(work_drag_j, work_ascent_j, work_roll_j, work_descend_j, eta);

        // Energy per component is what the body spends; gravity only counts the climbing.
        let energy_drag_j = work_drag_j / eta;
        let energy_roll_j = work_roll_j / eta;
        let energy_gravity_j = work_ascent_j / eta;

        // Power at the pedals: drivetrain losses only.
        let avg_power_w =
            combined_work(work_drag_j, work_ascent_j, work_roll_j, work_descend_j, eta_dt) / time_s;
        let avg_power_drag_w = (work_drag_j / eta_dt) / time_s;
        let avg_power_roll_w = (work_roll_j / eta_dt) / time_s;
        let avg_power_gravity_w = ((work_ascent_j / eta_dt) + work_descend_j) / time_s;

        debug!(
            "cycling: drag {force_drag:.2} N, gravity {force_gravity:.1} N, roll {force_roll:.2} N, \
             work {work_j:.0} J, energy {energy_j:.0} J, avg power {avg_power_w:.1} W"
        );

        Ok(Self {
            base,
            params,
            avg_draft_factor,
            force_drag,
            work_drag_j,
            energy_drag_j,
            energy_drag_kj: joules_to_kilojoules(energy_drag_j),
            avg_power_drag_w,
            force_gravity,
            work_ascent_j,
            work_descend_j,
            energy_gravity_j,
            energy_gravity_kj: joules_to_kilojoules(energy_gravity_j),
            avg_power_gravity_w,
            force_roll,
            work_roll_j,
            energy_roll_j,
            energy_roll_kj: joules_to_kilojoules(energy_roll_j),
            avg_power_roll_w,
            work_j,
            energy_j,
            energy_kj: joules_to_kilojoules(energy_j),
            energy_kcal: joules_to_kcal(energy_j),
            avg_power_w,
        })
    }
}

impl ExerciseStats for CyclingStats {
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
        "fraction_time_drafting",
        "draft_factor",
        "drag_coefficient_times_frontal_area_m2",
        "efficiency_human",
        "efficiency_drive_train",
        "rolling_resistance_coefficient",
        "avg_draft_factor",
        "force_drag",
        "work_drag_j",
        "energy_drag_j",
        "energy_drag_kj",
        "avg_power_drag_w",
        "force_gravity",
        "work_ascent_j",
        "work_descend_j",
        "energy_gravity_j",
        "energy_gravity_kj",
        "avg_power_gravity_w",
        "force_roll",
        "work_roll_j",
        "energy_roll_j",
        "energy_roll_kj",
        "avg_power_roll_w",
        "work_j",
        "energy_j",
        "energy_kj",
        "energy_kcal",
        "avg_power_w",
    ];

    fn values(&self) -> Vec<ResultValue> {
        let p = &self.params;
        let mut out = self.base.values();
        out.extend(
            [
                p.fraction_time_drafting,
                p.draft_factor,
                p.drag_coefficient_times_frontal_area_m2,
                p.efficiency_human,
                p.efficiency_drive_train,
                p.rolling_resistance_coefficient,
                self.avg_draft_factor,
                self.force_drag,
                self.work_drag_j,
                self.energy_drag_j,
                self.energy_drag_kj,
                self.avg_power_drag_w,
                self.force_gravity,
                self.work_ascent_j,
                self.work_descend_j,
                self.energy_gravity_j,
                self.energy_gravity_kj,
                self.avg_power_gravity_w,
                self.force_roll,
                self.work_roll_j,
                self.energy_roll_j,
                self.energy_roll_kj,
                self.avg_power_roll_w,
                self.work_j,
                self.energy_j,
                self.energy_kj,
                self.energy_kcal,
                self.avg_power_w,
            ]
            .map(ResultValue::Number),
        );
        out
    }
}
