use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Upper bound on the number of bytes or values a single builtin call may
/// produce.
pub const MAX_OUTPUT_LEN: usize = 1 << 26;

/// Truncates a number towards zero for integer-only operations such as
/// bitwise and shift operators.
///
/// Values beyond the safe integer range saturate and `NaN` becomes `0`, so the
/// operation always has an integer to work with.
///
/// ## Example
/// ```
/// use gust::util::num::truncate_to_i64;
///
/// assert_eq!(truncate_to_i64(6.9), 6);
/// assert_eq!(truncate_to_i64(-6.9), -6);
/// assert_eq!(truncate_to_i64(f64::NAN), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn truncate_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    value.trunc().clamp(-MAX_SAFE_INT, MAX_SAFE_INT) as i64
}

/// Converts an integer result back into a number.
///
/// Results of bitwise operators on truncated inputs stay inside the safe range
/// except for shifts, which may lose precision like any large number does.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a length or index into a number.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Converts a number into a count, such as a repetition count or a chunk
/// size, truncating any fractional part.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` naming `builtin` if the value is
/// negative, `NaN` or infinite.
///
/// ## Example
/// ```
/// use gust::util::num::f64_to_count;
///
/// assert_eq!(f64_to_count(3.7, "*").unwrap(), 3);
/// assert!(f64_to_count(-1.0, "*").is_err());
/// assert!(f64_to_count(f64::INFINITY, "*").is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_count(value: f64, builtin: &'static str) -> EvalResult<usize> {
    if !value.is_finite() || value < 0.0 {
        return Err(RuntimeError::InvalidArgument { builtin,
                                                   details: format!("expected a non-negative count, got {value}") });
    }
    Ok(value.trunc().min(MAX_SAFE_INT) as usize)
}

/// Checks that `count` pieces of `size` each stay within
/// [`MAX_OUTPUT_LEN`], returning `count` unchanged.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` naming `builtin` if the product
/// overflows or exceeds the limit.
///
/// ## Example
/// ```
/// use gust::util::num::bounded_count;
///
/// assert_eq!(bounded_count(2, 1_000, "*").unwrap(), 1_000);
/// assert!(bounded_count(2, 1 << 40, "*").is_err());
/// ```
pub fn bounded_count(size: usize, count: usize, builtin: &'static str) -> EvalResult<usize> {
    match size.max(1).checked_mul(count) {
        Some(total) if total <= MAX_OUTPUT_LEN => Ok(count),
        _ => Err(RuntimeError::InvalidArgument { builtin,
                                                 details: format!("{count} pieces would exceed the output limit of {MAX_OUTPUT_LEN}") }),
    }
}

/// Converts a shift amount into a bit count, clamping it to the width of an
/// `i64` so oversized shifts empty the value instead of wrapping.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn shift_amount(value: i64) -> u32 {
    value.clamp(0, 63) as u32
}
