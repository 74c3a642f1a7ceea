#![allow(dead_code)]

use approx::assert_relative_eq;
use kepler_propagator::kepler::angle_diff;
use kepler_propagator::propagator::AnomalySeries;

/// Assert two series have the same length and matching samples within `epsilon`.
///
/// Angles are compared through their signed difference, so `0` and `2π⁻` are close.
pub fn assert_series_close(actual: &AnomalySeries, expected: &AnomalySeries, epsilon: f64) {
    assert_eq!(actual.len(), expected.len());

    for (a, e) in actual.samples().zip(expected.samples()) {
        assert_relative_eq!(a.time, e.time, epsilon = epsilon);
        assert!(
            angle_diff(a.mean_anomaly, e.mean_anomaly).abs() <= epsilon,
            "mean anomaly {} vs {}",
            a.mean_anomaly,
            e.mean_anomaly
        );
        assert!(
            angle_diff(a.true_anomaly, e.true_anomaly).abs() <= epsilon,
            "true anomaly {} vs {}",
            a.true_anomaly,
            e.true_anomaly
        );
    }
}

/// Every angle of the series lies in `[0, 2π)` and the times strictly increase.
pub fn assert_series_well_formed(series: &AnomalySeries) {
    let two_pi = std::f64::consts::TAU;
    for sample in series.samples() {
        assert!((0.0..two_pi).contains(&sample.mean_anomaly));
        assert!((0.0..two_pi).contains(&sample.true_anomaly));
    }
    assert!(series.times().windows(2).all(|w| w[0] < w[1]));
}
