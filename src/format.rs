// ---------------------------------------------------------------------------
// human_size
// ---------------------------------------------------------------------------

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Render a byte count as a human-readable magnitude: `"0 B"`, `"1 KB"`,
/// `"1.5 KB"`, `"3.25 GB"`.
///
/// Divides by 1024 until the value drops below 1024, then prints it rounded
/// to at most two decimal places (trailing zeros dropped, whole values bare)
/// with the unit for that magnitude. Pure and total for every `u64`.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
