// core/src/stats.rs
use chrono::NaiveTime;
use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::models::ExerciseRecord;

/// Format used for duration fields in every rendered output.
pub const DURATION_FORMAT: &str = "%H:%M:%S";

/// One value in the flattened result set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultValue {
    Number(f64),
    Duration(NaiveTime),
}

impl ResultValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            Self::Duration(_) => None,
        }
    }
}

impl Serialize for ResultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Number(x) => serializer.serialize_f64(*x),
            Self::Duration(t) => serializer.collect_str(&t.format(DURATION_FORMAT)),
        }
    }
}

/// Computed statistics that can be flattened into a [`Summary`].
///
/// `FIELDS` is the declared output contract of the variant; `values` must
/// return exactly one value per declared name, in the same order.
pub trait ExerciseStats {
    const FIELDS: &'static [&'static str];

    fn values(&self) -> Vec<ResultValue>;

    fn summary(&self) -> Summary {
        Summary::new(Self::FIELDS, self.values())
    }
}

/// Flat, ordered name → value mapping handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    entries: Vec<(&'static str, ResultValue)>,
}

impl Summary {
    fn new(names: &'static [&'static str], values: Vec<ResultValue>) -> Self {
        debug_assert_eq!(names.len(), values.len(), "field list and values out of sync");
        Self { entries: names.iter().copied().zip(values).collect() }
    }

    pub fn get(&self, name: &str) -> Option<ResultValue> {
        self.entries.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }

    /// Numeric field by name; `None` for unknown names and durations.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.as_f64())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ResultValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Quantities every sport shares: raw inputs plus time/speed derivations.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStats {
    pub mass_kg: f64,
    pub distance_m: f64,
    pub distance_km: f64,
    pub elapsed_time: NaiveTime,
    pub time_s: f64,
    pub time_h: f64,
    pub ascent_m: f64,
    pub descent_m: f64,
    pub air_density_kgpm3: f64,
    pub speed_ms: f64,
    pub speed_kmph: f64,
}

impl ExerciseRecord {
    /// Populate the derived base fields. Sport specific layers build on the
    /// result, so this always runs first.
    pub fn update(&self) -> Result<BaseStats> {
        self.validate()?;
        let time_s = self.time_s()?;
        let stats = BaseStats {
            mass_kg: self.mass_kg,
            distance_m: self.distance_m,
            distance_km: self.distance_km(),
            elapsed_time: self.elapsed_time,
            time_s,
            time_h: self.time_h()?,
            ascent_m: self.ascent_m,
            descent_m: self.descent_m,
            air_density_kgpm3: self.air_density_kgpm3,
            speed_ms: self.speed_ms()?,
            speed_kmph: self.speed_kmph()?,
        };
        debug!(
            "base stats: {:.1} m in {} s -> {:.3} m/s ({:.2} km/h)",
            stats.distance_m, stats.time_s, stats.speed_ms, stats.speed_kmph
        );
        Ok(stats)
    }
}

impl ExerciseStats for BaseStats {
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
    ];

    fn values(&self) -> Vec<ResultValue> {
        use ResultValue::{Duration, Number};
        vec![
            Number(self.mass_kg),
            Number(self.distance_m),
            Number(self.distance_km),
            Duration(self.elapsed_time),
            Number(self.time_s),
            Number(self.time_h),
            Number(self.ascent_m),
            Number(self.descent_m),
            Number(self.air_density_kgpm3),
            Number(self.speed_ms),
            Number(self.speed_kmph),
        ]
    }
}
