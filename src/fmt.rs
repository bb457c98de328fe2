pub const CURRENCY: &str = "GH₵";

/// Group the integer digits of a non-negative amount with commas: 12799.2 -> "12,799.20"
fn grouped(abs: f64) -> String {
    let fixed = format!("{:.2}", abs);
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();
    format!("{with_commas}.{dec_part}")
}

/// Format an amount in cedis with thousands separators: GH₵ 3,199.80
pub fn cedis(val: f64) -> String {
    if val < 0.0 {
        format!("-{CURRENCY} {}", grouped(val.abs()))
    } else {
        format!("{CURRENCY} {}", grouped(val))
    }
}

/// Render a deposit fraction as a whole percentage: 0.2 -> "20%"
pub fn percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cedis_formatting() {
        assert_eq!(cedis(3199.8), "GH₵ 3,199.80");
        assert_eq!(cedis(12799.2), "GH₵ 12,799.20");
        assert_eq!(cedis(0.0), "GH₵ 0.00");
        assert_eq!(cedis(1000000.99), "GH₵ 1,000,000.99");
        assert_eq!(cedis(-500.0), "-GH₵ 500.00");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(0.1), "10%");
        assert_eq!(percent(0.3), "30%");
        assert_eq!(percent(0.5), "50%");
    }
}
