// tests/test_input.rs
use chrono::NaiveTime;
use serde_json::Value;
use sportcalc_core::{compute, compute_json, sports, DescentDefault, ExerciseInput, Sport, SportError, SportStats};

const RIDE: &str = r#"{
    "distance_km": 40.0,
    "elapsed_time": "01:00:00",
    "mass_kg": 80.0,
    "ascent_m": 100.0,
    "loglevel": "warning",
    "json": true
}"#;

#[test]
fn unknown_keys_are_ignored() {
    let input = ExerciseInput::from_json(RIDE).unwrap();
    assert_eq!(input.distance_km, Some(40.0));
    assert_eq!(input.elapsed_time, NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    assert_eq!(input.descent_m, None);
    assert_eq!(input.air_density_kgpm3, 1.293);
    assert_eq!(input.fraction_time_drafting, 0.0);
}

#[test]
fn aliases_are_accepted() {
    let input = ExerciseInput::from_json(
        r#"{"distance_m": 5000, "time": "00:30:00", "weight_kg": 70,
            "fraction_spend_drafting": 0.5, "mets": 9.0, "CdA": 0.3, "crr": 0.004}"#,
    )
    .unwrap();
    assert_eq!(input.mass_kg, 70.0);
    assert_eq!(input.elapsed_time, NaiveTime::from_hms_opt(0, 30, 0).unwrap());
    assert_eq!(input.fraction_time_drafting, 0.5);
    assert_eq!(input.mets_kcal_kg_h, Some(9.0));
    assert_eq!(input.drag_coefficient_times_frontal_area_m2, Some(0.3));
    assert_eq!(input.rolling_resistance_coefficient, Some(0.004));
}

#[test]
fn distance_in_metres_wins_over_kilometres() {
    let input = ExerciseInput { distance_m: Some(1500.0), distance_km: Some(40.0), ..Default::default() };
    assert_eq!(input.resolved_distance_m().unwrap(), 1500.0);

    let input = ExerciseInput { distance_km: Some(2.5), ..Default::default() };
    assert_eq!(input.resolved_distance_m().unwrap(), 2500.0);

    let input = ExerciseInput::default();
    assert!(matches!(input.resolved_distance_m(), Err(SportError::MissingDistance)));
}

#[test]
fn decode_error_names_the_key() {
    let err = ExerciseInput::from_json(r#"{"distance_km": 10, "elapsed_time": "01:00:00", "mass_kg": "heavy"}"#)
        .unwrap_err();
    match err {
        SportError::Input { path, .. } => assert_eq!(path, "mass_kg"),
        other => panic!("unexpected error: {other}"),
    }

    // elapsed time and mass are required
    assert!(ExerciseInput::from_json(r#"{"distance_km": 10}"#).is_err());
}

#[test]
fn omitted_descent_follows_the_chosen_default() {
    let input = ExerciseInput::from_json(RIDE).unwrap();

    let record = input.to_record(DescentDefault::Zero).unwrap();
    assert_eq!(record.descent_m, 0.0);
    assert_eq!(record.ascent_m, 100.0);

    let record = input.to_record(DescentDefault::MatchAscent).unwrap();
    assert_eq!(record.descent_m, 100.0);

    let given = ExerciseInput { descent_m: Some(20.0), ..input };
    assert_eq!(given.to_record(DescentDefault::MatchAscent).unwrap().descent_m, 20.0);
}

#[test]
fn descent_default_changes_the_cycling_energy() {
    let input = ExerciseInput::from_json(RIDE).unwrap();
    let one_way = sports::update(Sport::Cycling, &input, DescentDefault::Zero).unwrap();
    let round_trip = sports::update(Sport::Cycling, &input, DescentDefault::MatchAscent).unwrap();

    let (SportStats::Cycling(a), SportStats::Cycling(b)) = (one_way, round_trip) else {
        panic!("cycling must produce cycling statistics");
    };
    assert_eq!(a.work_descend_j, 0.0);
    assert!((b.work_descend_j + 78_480.0).abs() < 1e-9);
    assert!((a.energy_j - b.energy_j - 78_480.0).abs() < 1e-6);
    // gravity energy counts the climbing only, in both cases
    assert_eq!(a.energy_gravity_j, b.energy_gravity_j);
}

#[test]
fn cycling_overrides_reach_the_model() {
    let input = ExerciseInput { rolling_resistance_coefficient: Some(0.006), ..ExerciseInput::from_json(RIDE).unwrap() };
    let summary = compute(Sport::Cycling, &input).unwrap();
    assert_eq!(summary.number("rolling_resistance_coefficient"), Some(0.006));
    assert!((summary.number("force_roll").unwrap() - 80.0 * 9.81 * 0.006).abs() < 1e-12);
}

#[test]
fn constant_mets_replaces_the_table() {
    let input = ExerciseInput::from_json(
        r#"{"distance_km": 10, "elapsed_time": "01:00:00", "mass_kg": 70, "mets": 11.0}"#,
    )
    .unwrap();
    let summary = compute(Sport::Running, &input).unwrap();
    assert_eq!(summary.number("mets_kcal_kg_h"), Some(11.0));
    assert!((summary.number("energy_kcal").unwrap() - 700.0).abs() < 1e-9);
}

#[test]
fn json_output_is_ordered_and_formats_durations() {
    let out = compute_json(Sport::Cycling, RIDE).unwrap();

    let keys: Vec<&str> = out
        .lines()
        .filter_map(|l| l.trim().strip_prefix('"'))
        .filter_map(|l| l.split('"').next())
        .collect();
    assert_eq!(keys, Sport::Cycling.fields().to_vec());

    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["elapsed_time"], "01:00:00");
    assert_eq!(v["distance_m"], 40_000.0);
    assert_eq!(v["speed_kmph"], 40.0);
    assert!(v["avg_power_w"].as_f64().unwrap() > 0.0);
}

#[test]
fn mets_sports_share_one_field_list() {
    let input = r#"{"distance_km": 5, "elapsed_time": "01:00:00", "mass_kg": 70}"#;
    for sport in [Sport::Running, Sport::Walking, Sport::SpeedSkating] {
        let v: Value = serde_json::from_str(&compute_json(sport, input).unwrap()).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), sport.fields().len(), "{sport}");
        assert!(obj.contains_key("energy_kj"));
        assert!(!obj.contains_key("work_j"));
    }
}

#[test]
fn zero_elapsed_time_fails_the_computation() {
    let err = compute_json(Sport::Walking, r#"{"distance_km": 5, "elapsed_time": "00:00:00", "mass_kg": 70}"#)
        .unwrap_err();
    assert!(matches!(err, SportError::InvalidDuration { seconds: 0 }));
}

#[test]
fn sport_names_round_trip() {
    for sport in Sport::ALL {
        assert_eq!(sport.to_string().parse::<Sport>().unwrap(), sport);
    }
    assert_eq!("speed_skating".parse::<Sport>().unwrap(), Sport::SpeedSkating);
    assert!(matches!("rowing".parse::<Sport>(), Err(SportError::UnknownSport(_))));
}

#[test]
fn drafting_fraction_outside_zero_to_one_is_rejected() {
    for fraction in ["30", "-0.1", "1.01"] {
        let txt = format!(
            r#"{{"distance_km": 40, "elapsed_time": "01:00:00", "mass_kg": 80, "fraction_time_drafting": {fraction}}}"#
        );
        let err = compute_json(Sport::Cycling, &txt).unwrap_err();
        assert!(matches!(err, SportError::InvalidPercentage(_)), "{fraction}: {err}");
    }

    let ok = r#"{"distance_km": 40, "elapsed_time": "01:00:00", "mass_kg": 80, "fraction_time_drafting": 1}"#;
    assert!(compute_json(Sport::Cycling, ok).is_ok());
}

#[test]
fn negative_elevation_is_rejected() {
    let descent = r#"{"distance_km": 40, "elapsed_time": "01:00:00", "mass_kg": 80, "descent_m": -100}"#;
    let err = compute_json(Sport::Cycling, descent).unwrap_err();
    assert!(matches!(err, SportError::NegativeElevation { field: "descent_m", .. }), "{err}");

    let ascent = ExerciseInput { ascent_m: -5.0, ..ExerciseInput::from_json(RIDE).unwrap() };
    assert!(matches!(
        ascent.to_record(DescentDefault::Zero),
        Err(SportError::NegativeElevation { field: "ascent_m", .. })
    ));
    // METs sports share the base record, so they reject it too
    assert!(matches!(
        compute(Sport::Running, &ascent),
        Err(SportError::NegativeElevation { field: "ascent_m", .. })
    ));
}

#[test]
fn cycling_parameter_overrides_are_bounded() {
    let input = ExerciseInput { efficiency_human: Some(0.0), ..ExerciseInput::from_json(RIDE).unwrap() };
    assert!(matches!(
        compute(Sport::Cycling, &input),
        Err(SportError::InvalidParameter { name: "efficiency_human", .. })
    ));

    let input = ExerciseInput { rolling_resistance_coefficient: Some(-0.001), ..ExerciseInput::from_json(RIDE).unwrap() };
    assert!(matches!(
        compute(Sport::Cycling, &input),
        Err(SportError::InvalidParameter { name: "rolling_resistance_coefficient", .. })
    ));
}
