//! Lenient string conversions. Anything unparsable becomes zero.

/// Empty, missing or the literal `null` (any case).
pub fn is_empty_or_null(s: Option<&str>) -> bool {
    match s {
        None => true,
        Some(s) => s.is_empty() || s.eq_ignore_ascii_case("null"),
    }
}

pub fn str_to_int(s: Option<&str>) -> i64 {
    if is_empty_or_null(s) {
        return 0;
    }
    s.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

pub fn str_to_float(s: Option<&str>) -> f32 {
    if is_empty_or_null(s) {
        return 0.0;
    }
    s.and_then(|s| s.trim().parse().ok()).unwrap_or(0.0)
}
