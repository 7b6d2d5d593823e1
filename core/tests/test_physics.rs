// tests/test_physics.rs
use chrono::NaiveTime;
use sportcalc_core::physics::{combined_work, CyclingParameters, CyclingStats, G};
use sportcalc_core::{ExerciseRecord, ExerciseStats};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

fn ride(ascent_m: f64, descent_m: f64) -> ExerciseRecord {
    ExerciseRecord::new(40_000.0, NaiveTime::from_hms_opt(1, 0, 0).unwrap(), 80.0)
        .with_ascent(ascent_m)
        .with_descent(descent_m)
}

fn drafting(fraction: f64) -> CyclingParameters {
    CyclingParameters { fraction_time_drafting: fraction, ..Default::default() }
}

#[test]
fn no_drafting_uses_full_drag() {
    let s = CyclingStats::update(&ride(0.0, 0.0), drafting(0.0)).unwrap();
    assert_eq!(s.avg_draft_factor, 0.0);

    let v = s.base.speed_ms;
    let undrafted = 0.5 * 0.39 * 1.293 * v * v;
    assert!(close(s.force_drag, undrafted));
    assert!(close(s.work_drag_j, 40_000.0 * undrafted));
}

#[test]
fn full_drafting_cuts_drag_by_draft_factor() {
    let free = CyclingStats::update(&ride(0.0, 0.0), drafting(0.0)).unwrap();
    let sheltered = CyclingStats::update(&ride(0.0, 0.0), drafting(1.0)).unwrap();

    assert!(close(sheltered.avg_draft_factor, 0.3));
    assert!(close(sheltered.force_drag, 0.7 * free.force_drag));
    // drafting does not touch the other components
    assert_eq!(sheltered.force_roll, free.force_roll);
    assert_eq!(sheltered.work_ascent_j, free.work_ascent_j);
}

#[test]
fn descent_is_negative_work() {
    let s = CyclingStats::update(&ride(100.0, 100.0), CyclingParameters::default()).unwrap();

    assert!(close(s.force_gravity, 80.0 * G));
    assert!(close(s.work_ascent_j, 78_480.0));
    assert!(close(s.work_descend_j, -78_480.0));
    // net elevation is zero, so the raw work is drag + roll only
    assert!(close(s.work_j, s.work_drag_j + s.work_roll_j));
}

#[test]
fn efficiency_is_not_applied_to_the_descent() {
    // no drag, no roll: only the elevation terms remain
    let eta = 0.25 * 0.98;
    assert!(close(combined_work(0.0, 78_480.0, 0.0, -78_480.0, 1.0), 0.0));
    assert!(close(
        combined_work(0.0, 78_480.0, 0.0, -78_480.0, eta),
        78_480.0 / eta - 78_480.0
    ));
}

#[test]
fn energy_uses_human_and_drivetrain_efficiency() {
    let s = CyclingStats::update(&ride(100.0, 100.0), CyclingParameters::default()).unwrap();
    let eta = 0.25 * 0.98;

    let expected = (s.work_drag_j + s.work_ascent_j + s.work_roll_j) / eta + s.work_descend_j;
    assert!(close(s.energy_j, expected));
    assert!(close(s.energy_kj, expected / 1000.0));
    assert!(close(s.energy_kcal, expected / 4184.0));

    assert!(close(s.energy_drag_j, s.work_drag_j / eta));
    assert!(close(s.energy_roll_j, s.work_roll_j / eta));
    // gravity energy only counts the climbing
    assert!(close(s.energy_gravity_j, s.work_ascent_j / eta));
    assert!(close(s.energy_gravity_kj, s.energy_gravity_j / 1000.0));
}

#[test]
fn power_at_the_pedals_uses_drivetrain_efficiency_only() {
    let s = CyclingStats::update(&ride(100.0, 100.0), CyclingParameters::default()).unwrap();
    let t = 3600.0;

    assert!(close(s.avg_power_drag_w, s.work_drag_j / 0.98 / t));
    assert!(close(s.avg_power_roll_w, s.work_roll_j / 0.98 / t));
    assert!(close(s.avg_power_gravity_w, (s.work_ascent_j / 0.98 + s.work_descend_j) / t));
    assert!(close(
        s.avg_power_w,
        ((s.work_drag_j + s.work_ascent_j + s.work_roll_j) / 0.98 + s.work_descend_j) / t
    ));
    assert!(close(s.avg_power_w, s.avg_power_drag_w + s.avg_power_roll_w + s.avg_power_gravity_w));
}

#[test]
fn reference_ride_numbers() {
    // 80 kg, 40 km in 1 h, 100 m up and down
    let s = CyclingStats::update(&ride(100.0, 100.0), CyclingParameters::default()).unwrap();

    assert!((s.force_drag - 31.127_777_777).abs() < 1e-6);
    assert!((s.force_roll - 2.3544).abs() < 1e-9);
    assert!((s.work_j - 1_339_287.111_111).abs() < 1e-3);
    assert!((s.energy_kcal - 1_364.322_307_6).abs() < 1e-6);
    assert!((s.avg_power_w - 380.061_426_05).abs() < 1e-6);
}

#[test]
fn zero_time_ride_is_rejected() {
    let record = ExerciseRecord::new(40_000.0, NaiveTime::from_hms_opt(0, 0, 0).unwrap(), 80.0);
    assert!(CyclingStats::update(&record, CyclingParameters::default()).is_err());
}

#[test]
fn summary_follows_declared_cycling_fields() {
    let s = CyclingStats::update(&ride(100.0, 50.0), drafting(0.25)).unwrap();
    let summary = s.summary();

    assert_eq!(summary.names().collect::<Vec<_>>(), CyclingStats::FIELDS.to_vec());
    assert_eq!(summary.number("fraction_time_drafting"), Some(0.25));
    assert_eq!(summary.number("work_descend_j"), Some(s.work_descend_j));
    assert_eq!(summary.number("avg_power_w"), Some(s.avg_power_w));
    // internal constant is not part of the output
    assert_eq!(summary.get("gravity"), None);
}

#[test]
fn descent_work_is_never_positive() {
    let record = ride(0.0, -100.0);
    assert!(CyclingStats::update(&record, CyclingParameters::default()).is_err());

    let s = CyclingStats::update(&ride(0.0, 250.0), CyclingParameters::default()).unwrap();
    assert!(s.work_descend_j <= 0.0);
}

#[test]
fn out_of_range_parameters_are_rejected() {
    assert!(CyclingStats::update(&ride(0.0, 0.0), drafting(1.5)).is_err());
    let p = CyclingParameters { efficiency_drive_train: 1.2, ..Default::default() };
    assert!(p.validate().is_err());
    assert!(CyclingParameters::default().validate().is_ok());
}
