/// Format a metric value the way a locale-aware number display would:
/// thousands grouped with commas, at most three fraction digits.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_grouped() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(999.0), "999");
        assert_eq!(format_value(1000.0), "1,000");
        assert_eq!(format_value(1_402_112_000.0), "1,402,112,000");
        assert_eq!(format_value(-12345.0), "-12,345");
    }

    #[test]
    fn test_fractions_trimmed() {
        assert_eq!(format_value(1234.5), "1,234.5");
        assert_eq!(format_value(0.12345), "0.123");
        assert_eq!(format_value(2.0004), "2");
    }
}
