use hifitime::Unit;

use crate::constants::{Day, Second};

/// Conversion from elapsed seconds (time since periapsis passage) to days
///
/// Argument
/// --------
/// * `seconds`: elapsed time in seconds
///
/// Return
/// ------
/// * the same duration expressed in days
pub fn seconds_to_days(seconds: Second) -> Day {
    seconds / Unit::Day.in_seconds()
}

/// Conversion from days to elapsed seconds
///
/// Argument
/// --------
/// * `days`: elapsed time in days
///
/// Return
/// ------
/// * the same duration expressed in seconds
pub fn days_to_seconds(days: Day) -> Second {
    days * Unit::Day.in_seconds()
}

/// Evenly spaced instants covering `[start, end]`, both endpoints included
///
/// Arguments
/// ---------
/// * `start`: first instant
/// * `end`: last instant
/// * `count`: number of instants, at least 2
///
/// Return
/// ------
/// * `count` instants; the first is exactly `start` and the last exactly `end`
pub(crate) fn linspace(start: Second, end: Second, count: usize) -> Vec<Second> {
    debug_assert!(count >= 2);
    let step = (end - start) / (count - 1) as f64;

    (0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                start + step * i as f64
            }
        })
        .collect()
}
