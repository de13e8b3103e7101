//! Small helpers shared by event texts and magnitude rolls.

/// Clamp a computed amount into the non-negative `u32` range effects take.
pub fn units(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// `value * percent * tenths / 1000`, rounded toward negative infinity.
///
/// `tenths` is a multiplier in tenths, so 10 means "times one".
pub fn scaled_share(value: i64, percent: u32, tenths: i64) -> i64 {
    value
        .saturating_mul(i64::from(percent))
        .saturating_mul(tenths)
        .div_euclid(1000)
}

/// "1 building was" / "3 buildings were".
pub fn buildings_destroyed(count: usize) -> String {
    if count == 1 {
        "1 building was destroyed".to_owned()
    } else {
        format!("{count} buildings were destroyed")
    }
}
