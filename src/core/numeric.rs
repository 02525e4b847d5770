/// Round to two decimal places, half away from zero
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Linear decay around a target: 1.0 at the target, 0.0 once the absolute
/// deviation reaches the target itself. Never negative.
///
/// Callers must only pass a positive `target`.
#[inline]
pub fn symmetric_decay(actual: f64, target: f64) -> f64 {
    (1.0 - (actual - target).abs() / target).max(0.0)
}

/// Linear decay past an upper bound: 1.0 at or below the bound, 0.0 at twice
/// the bound and beyond.
#[inline]
pub fn overshoot_decay(actual: f64, bound: f64) -> f64 {
    if actual <= bound {
        return 1.0;
    }
    (1.0 - (actual - bound) / bound).max(0.0)
}

/// Fraction of a target reached, saturating at 1.0 and flooring at 0.0
#[inline]
pub fn attainment(actual: f64, target: f64) -> f64 {
    if actual >= target {
        return 1.0;
    }
    (actual / target).max(0.0)
}

/// Share of `max_possible` achieved, as a whole percentage
///
/// Returns 0 when nothing was scorable.
pub fn match_percentage(score: f64, max_possible: f64) -> u32 {
    if max_possible <= 0.0 {
        return 0;
    }
    let pct = (100.0 * score / max_possible).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Parse a user-supplied numeric string such as `"1,200.50"`
///
/// Thousands separators and surrounding whitespace are stripped. Returns
/// `None` for empty or unparseable input and for non-finite values.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
