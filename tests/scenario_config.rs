mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use kepler_propagator::constants::MU_EARTH;
use kepler_propagator::prop_errors::PropagationError;
use kepler_propagator::propagator::SamplingMode;
use kepler_propagator::scenario::{FlightTime, Gravity, OrbitSpec, Scenario};
use kepler_propagator::two_body::orbital_period;
use std::f64::consts::PI;

use crate::common::{assert_series_close, assert_series_well_formed};

fn load(path: &str) -> Scenario {
    let text = std::fs::read_to_string(path).unwrap();
    Scenario::from_yaml_str(&text).unwrap()
}

#[test]
fn test_load_moon_lowering_file() {
    let scenario = load("tests/data/moon_lowering.yaml");
    let preset = Scenario::moon_lowering_transfer();

    assert_eq!(scenario.gravity, preset.gravity);
    assert_eq!(scenario.time_of_flight, FlightTime::HohmannHalfPeriod);
    assert_eq!(scenario.sampling, SamplingMode::Custom(101));

    let outcome = scenario.run().unwrap();
    assert_eq!(outcome.series.len(), 100);
    assert_series_well_formed(&outcome.series);
    assert_relative_eq!(
        outcome.elements.eccentricity,
        (66_200.0 - 4_905.0) / (66_200.0 + 4_905.0),
        max_relative = 1e-14
    );
    assert_abs_diff_eq!(outcome.series.last().unwrap().true_anomaly, PI, epsilon = 1e-6);
}

#[test]
fn test_load_explicit_mu_file() {
    let scenario = load("tests/data/custom_mu.yaml");
    assert!(matches!(scenario.gravity, Gravity::Mu(mu) if mu.value() == MU_EARTH));
    assert!(matches!(scenario.orbit, OrbitSpec::Apsides { .. }));

    let outcome = scenario.run().unwrap();
    assert!(outcome.elements.is_circular());
    assert_eq!(outcome.span.t0, 3_600.0);
    assert_relative_eq!(
        outcome.span.time_of_flight,
        2.0 * orbital_period(8_371.0, MU_EARTH).unwrap()
    );
    assert_eq!(outcome.series.len(), SamplingMode::DENSE_SAMPLES - 1);
    for sample in outcome.series.samples() {
        assert_eq!(sample.true_anomaly, sample.mean_anomaly);
    }
}

#[test]
fn test_written_scenario_runs_identically() {
    let scenario = Scenario::earth_moon_transfer();
    let text = scenario.to_yaml_string().unwrap();

    let reloaded = Scenario::from_yaml_str(&text).unwrap();
    assert_series_close(
        &reloaded.run().unwrap().series,
        &scenario.run().unwrap().series,
        0.0,
    );
}

#[test]
fn test_invalid_scenarios() {
    let apsides_swapped = "
name: swapped
gravity:
  body: earth
orbit:
  apsides:
    ra: 8371.0
    rp: 318200.0
time_of_flight: hohmann_half_period
sampling: coarse
";
    let err = Scenario::from_yaml_str(apsides_swapped)
        .unwrap()
        .run()
        .unwrap_err();
    assert_eq!(
        err,
        PropagationError::InvalidApsides {
            ra: 8_371.0,
            rp: 318_200.0
        }
    );

    let one_instant = "
name: too few
gravity:
  body: moon
orbit:
  elements:
    semi_major_axis: 56648.0
    eccentricity: 0.0
time_of_flight:
  seconds: 100.0
sampling:
  custom: 1
";
    let err = Scenario::from_yaml_str(one_instant)
        .unwrap()
        .run()
        .unwrap_err();
    assert_eq!(err, PropagationError::InvalidSampleCount(1));

    let unknown_body = "
name: mars
gravity:
  body: mars
orbit:
  elements:
    semi_major_axis: 5000.0
    eccentricity: 0.0
time_of_flight: hohmann_half_period
sampling: coarse
";
    assert!(matches!(
        Scenario::from_yaml_str(unknown_body),
        Err(PropagationError::ScenarioParse(_))
    ));
}
