//! Formatting helpers for log output.

/// Format a number with thousands separators (commas).
///
/// # Examples
/// ```
/// use geoip_build::utils::format_count_with_separator;
/// assert_eq!(format_count_with_separator(1000), "1,000");
/// assert_eq!(format_count_with_separator(3_453_728), "3,453,728");
/// ```
pub fn format_count_with_separator(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
