// core/src/cli.rs
use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};

use crate::error::{Result, SportError};
use crate::mets::MetsStats;
use crate::models::{DescentDefault, ExerciseInput, DEFAULT_AIR_DENSITY_KGPM3};
use crate::parsers::{parse_distance, parse_percentage, parse_time, Distance, DEFAULT_LAP_DISTANCE_KM};
use crate::physics::CyclingStats;
use crate::sports::{self, Sport, SportStats};
use crate::stats::{BaseStats, DURATION_FORMAT};

#[derive(Parser, Debug)]
#[command(name = "sportcalc")]
#[command(version, about = "Calculate the energy consumption of endurance exercises")]
#[command(long_about = "Estimates speed, work, power and energy expenditure from mass, distance and time:
  sportcalc cycling 80 40 1h 300           # 80 kg, 40 km in one hour, 300 m climbing
  sportcalc cycling -d 50% 80 40 01:05:00  # half the ride spent drafting
  sportcalc running 70 10 50min            # METs interpolated on the average speed
  sportcalc speed-skating 75 '25 laps' 0.5h --json")]
pub struct Cli {
    #[command(subcommand)]
    pub sport: SportCommand,
}

#[derive(Subcommand, Debug)]
pub enum SportCommand {
    /// Calculate the energy consumption while cycling
    Cycling {
        #[command(flatten)]
        common: CommonArgs,

        /// Percentage of time spent drafting behind another cyclist (0 = never, 100 = all the time)
        #[arg(short, long, value_parser = parse_percentage, default_value = "0")]
        drafting: f64,
    },
    /// Calculate the energy consumption while running
    Running {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mets: MetsArgs,
    },
    /// Calculate the energy consumption while walking
    Walking {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mets: MetsArgs,
    },
    /// Calculate the energy consumption while speed skating
    #[command(alias = "speedskating")]
    SpeedSkating {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mets: MetsArgs,

        /// Length of one lap in km, used when the distance is given in laps
        #[arg(long, default_value_t = DEFAULT_LAP_DISTANCE_KM)]
        lap_distance_km: f64,
    },
}

/// Arguments shared by every sport.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Total mass of human + equipment in kg
    pub mass_kg: f64,

    /// Distance travelled in km (speed skating also accepts laps, e.g. "25 laps")
    #[arg(value_parser = parse_distance)]
    pub distance: Distance,

    /// Elapsed time: HH:MM:SS, a float with a unit (s/min/h) or a single float in hours
    #[arg(value_parser = parse_time)]
    pub time: NaiveTime,

    /// Total ascent in meters
    #[arg(default_value_t = 0.0)]
    pub ascent_m: f64,

    /// Total descent in meters (default: see --descent-default)
    pub descent_m: Option<f64>,

    /// Air density in kg/m^3
    #[arg(short, long = "air-density-kgpm3", default_value_t = DEFAULT_AIR_DENSITY_KGPM3)]
    pub air_density_kgpm3: f64,

    /// What an omitted descent resolves to
    #[arg(long, value_enum, default_value_t = DescentDefault::Zero)]
    pub descent_default: DescentDefault,

    /// Send the output as a JSON string to stdout
    #[arg(short, long)]
    pub json: bool,

    /// Set the log level
    #[arg(short, long, value_enum, default_value_t = LogLevel::Warning)]
    pub loglevel: LogLevel,
}

#[derive(Args, Debug, Clone)]
pub struct MetsArgs {
    /// Use a fixed METs value (kcal/kg/h) instead of the speed table
    #[arg(long)]
    pub mets: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            // `log` has nothing above error
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

impl SportCommand {
    pub fn sport(&self) -> Sport {
        match self {
            SportCommand::Cycling { .. } => Sport::Cycling,
            SportCommand::Running { .. } => Sport::Running,
            SportCommand::Walking { .. } => Sport::Walking,
            SportCommand::SpeedSkating { .. } => Sport::SpeedSkating,
        }
    }

    pub fn common(&self) -> &CommonArgs {
        match self {
            SportCommand::Cycling { common, .. }
            | SportCommand::Running { common, .. }
            | SportCommand::Walking { common, .. }
            | SportCommand::SpeedSkating { common, .. } => common,
        }
    }

    fn distance_km(&self) -> Result<f64> {
        match (self, self.common().distance) {
            (SportCommand::SpeedSkating { lap_distance_km, .. }, d) => Ok(d.to_km(*lap_distance_km)),
            (_, Distance::Km(km)) => Ok(km),
            (_, Distance::Laps(laps)) => Err(SportError::InvalidDistance(format!(
                "{laps} laps (laps are only supported for speed skating)"
            ))),
        }
    }

    /// Input mapping for the engine.
    pub fn to_input(&self) -> Result<ExerciseInput> {
        let c = self.common();
        let mut input = ExerciseInput {
            distance_km: Some(self.distance_km()?),
            elapsed_time: c.time,
            mass_kg: c.mass_kg,
            ascent_m: c.ascent_m,
            descent_m: c.descent_m,
            air_density_kgpm3: c.air_density_kgpm3,
            ..Default::default()
        };
        match self {
            SportCommand::Cycling { drafting, .. } => input.fraction_time_drafting = drafting * 0.01,
            SportCommand::Running { mets, .. }
            | SportCommand::Walking { mets, .. }
            | SportCommand::SpeedSkating { mets, .. } => input.mets_kcal_kg_h = mets.mets,
        }
        Ok(input)
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        self.sport.common().loglevel.into()
    }
}

/// Parse-free part of the CLI: compute and render.
pub fn run(cli: &Cli) -> Result<String> {
    let sport = cli.sport.sport();
    let common = cli.sport.common();
    let input = cli.sport.to_input()?;
    debug!("arguments: {cli:?}");

    let stats = sports::update(sport, &input, common.descent_default)?;
    if common.json {
        stats.summary().to_json()
    } else {
        Ok(summarize(sport, &stats))
    }
}

/// Human readable summary: inputs first, then the sport specific results.
pub fn summarize(sport: Sport, stats: &SportStats) -> String {
    let (base, results) = match stats {
        SportStats::Cycling(s) => (&s.base, cycling_lines(s)),
        SportStats::Mets(s) => (&s.base, mets_lines(s)),
    };
    let mut lines = inputs_lines(sport, base);
    lines.extend(results);
    lines.join("\n") + "\n"
}

fn inputs_lines(sport: Sport, b: &BaseStats) -> Vec<String> {
    vec![
        format!("--- {sport} ---"),
        format!("Mass:            {:>10.1} kg", b.mass_kg),
        format!("Distance:        {:>10.2} km", b.distance_km),
        format!("Elapsed time:    {:>10}", b.elapsed_time.format(DURATION_FORMAT).to_string()),
        format!("Ascent:          {:>10.0} m", b.ascent_m),
        format!("Descent:         {:>10.0} m", b.descent_m),
        format!("Air density:     {:>10.3} kg/m³", b.air_density_kgpm3),
        String::new(),
        "--- Results ---".to_string(),
        format!("Average speed:   {:>10.1} km/h ({:.2} m/s)", b.speed_kmph, b.speed_ms),
    ]
}

fn mets_lines(s: &MetsStats) -> Vec<String> {
    vec![
        format!("METs:            {:>10.1} kcal/kg/h", s.mets_kcal_kg_h),
        format!("Energy:          {:>10.0} kcal ({:.0} kJ)", s.energy_kcal, s.energy_kj),
    ]
}

fn cycling_lines(s: &CyclingStats) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Drafting:        {:>10.0} % of the time (avg. draft factor {:.3})",
            s.params.fraction_time_drafting * 100.0,
            s.avg_draft_factor
        ),
        String::new(),
        format!("{:<10}{:>12}{:>12}{:>14}{:>16}", "", "Force (N)", "Work (kJ)", "Energy (kJ)", "Avg. power (W)"),
    ];
    let rows = [
        ("Drag", s.force_drag, s.work_drag_j, s.energy_drag_kj, s.avg_power_drag_w),
        ("Rolling", s.force_roll, s.work_roll_j, s.energy_roll_kj, s.avg_power_roll_w),
        (
            "Gravity",
            s.force_gravity,
            s.work_ascent_j + s.work_descend_j,
            s.energy_gravity_kj,
            s.avg_power_gravity_w,
        ),
    ];
    lines.extend(rows.into_iter().map(|(name, force, work_j, energy_kj, power)| {
        format!("{name:<10}{force:>12.1}{:>12.1}{energy_kj:>14.1}{power:>16.1}", work_j / 1000.0)
    }));
    lines.push(format!(
        "{:<10}{:>12}{:>12.1}{:>14.1}{:>16.1}",
        "Total",
        "",
        s.work_j / 1000.0,
        s.energy_kj,
        s.avg_power_w
    ));
    lines.push(String::new());
    lines.push(format!("Energy:          {:>10.0} kcal ({:.0} kJ)", s.energy_kcal, s.energy_kj));
    lines
}
