/// Format an audience count for display.
///
/// `>= 1_000_000` renders with one decimal and `M`, `>= 1_000` with one
/// decimal and `K`, anything smaller as the plain integer. Halves round up
/// (`1250` is `1.3K`).
pub fn format_compact_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{}M", one_decimal(count, 1_000_000))
    } else if count >= 1_000 {
        format!("{}K", one_decimal(count, 1_000))
    } else {
        count.to_string()
    }
}

/// `count / unit` to one decimal place, rounded the way a display of the
/// nearest `f64` would be, except that exact halves round up instead of to
/// even. Only quotients with a power-of-two denominator (`x.25`, `x.75`) are
/// exact halves; `1150 / 1000` is stored below `1.15` and stays `1.1`.
fn one_decimal(count: u64, unit: u64) -> String {
    let count = u128::from(count);
    let unit = u128::from(unit);

    let exact_half = (count * 10) % unit == unit / 2 && (count * 4) % unit == 0;
    if exact_half {
        let tenths = count * 10 / unit + 1;
        return format!("{}.{}", tenths / 10, tenths % 10);
    }

    format!("{:.1}", count as f64 / unit as f64)
}

/// Format a count reported by a platform API as a decimal string.
///
/// Platforms report counts as strings; anything that is not a non-negative
/// integer renders as `"0"`.
pub fn normalize_count(raw: &str) -> String {
    match raw.trim().parse::<u64>() {
        Ok(count) => format_compact_count(count),
        Err(_) => "0".to_string(),
    }
}
