/// Formats a float in its canonical source form.
///
/// The output is the shortest decimal that parses back to the same `f64`,
/// widened with a single trailing `.0` when the value has no fractional part
/// so that it cannot be mistaken for an integer. Non-finite values and values
/// too large to carry a meaningful fractional digit keep their default form.
///
/// # Parameters
/// - `value`: The float to format.
///
/// # Returns
/// The canonical string form.
///
/// # Example
/// ```
/// use simian::util::num::float_literal;
///
/// assert_eq!(float_literal(2.0), "2.0");
/// assert_eq!(float_literal(2.5), "2.5");
/// assert_eq!(float_literal(0.1), "0.1");
/// ```
#[must_use]
pub fn float_literal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Converts an array index to `usize` if it is non-negative.
///
/// Negative indices have no element to name, so they convert to `None` and
/// the caller treats them like any other out-of-range index.
///
/// # Parameters
/// - `index`: The index value from the program.
///
/// # Returns
/// - `Some(usize)`: The index if non-negative.
/// - `None`: If the index is negative.
///
/// # Example
/// ```
/// use simian::util::num::index_to_usize;
///
/// assert_eq!(index_to_usize(2), Some(2));
/// assert_eq!(index_to_usize(-1), None);
/// ```
#[must_use]
pub fn index_to_usize(index: i64) -> Option<usize> {
    usize::try_from(index).ok()
}

/// Truncates a float to `i64` if the result is representable.
///
/// # Parameters
/// - `value`: The float to truncate.
///
/// # Returns
/// - `Some(i64)`: The truncated value when `value` is finite and its integer
///   part fits in `i64`.
/// - `None`: Otherwise.
///
/// # Example
/// ```
/// use simian::util::num::f64_to_i64_truncated;
///
/// assert_eq!(f64_to_i64_truncated(3.9), Some(3));
/// assert_eq!(f64_to_i64_truncated(-3.9), Some(-3));
/// assert_eq!(f64_to_i64_truncated(f64::NAN), None);
/// assert_eq!(f64_to_i64_truncated(1e300), None);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn f64_to_i64_truncated(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= -(i64::MIN as f64) {
        return None;
    }

    Some(truncated as i64)
}
