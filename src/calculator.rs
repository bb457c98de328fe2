/// Upfront payment and financed remainder for one deposit choice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepositSplit {
    pub deposit: f64,
    pub remaining: f64,
}

/// Extract a number from a display price such as "GH₵ 15,999".
/// Everything except ASCII digits and '.' is dropped, then the longest
/// numeric prefix is read ("1.2.3" is 1.2). No numeric prefix counts as zero.
pub fn parse_price(formatted: &str) -> f64 {
    let digits: String = formatted
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let prefix = match digits.match_indices('.').nth(1) {
        Some((second_dot, _)) => &digits[..second_dot],
        None => digits.as_str(),
    };
    prefix.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Split `price` into deposit and remainder. No fraction selected yet means
/// both amounts are zero.
pub fn split(price: f64, fraction: Option<f64>) -> DepositSplit {
    match fraction {
        None => DepositSplit::default(),
        Some(f) => {
            let deposit = price * f;
            DepositSplit {
                deposit,
                remaining: price - deposit,
            }
        }
    }
}

/// Amount shown next to a single deposit tier.
pub fn tier_amount(price: f64, fraction: f64) -> f64 {
    price * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRACTIONS: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];

    #[test]
    fn parse_price_strips_currency_and_commas() {
        assert_eq!(parse_price("GH₵ 15,999"), 15999.0);
        assert_eq!(parse_price("GH₵ 1,234.50"), 1234.5);
    }

    #[test]
    fn parse_price_degrades_to_zero() {
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("abc"), 0.0);
        assert_eq!(parse_price("."), 0.0);
        assert_eq!(parse_price(".."), 0.0);
    }

    #[test]
    fn parse_price_keeps_longest_numeric_prefix() {
        assert_eq!(parse_price("1.2.3"), 1.2);
        assert_eq!(parse_price("GH₵ 1,234.50 (approx.)"), 1234.5);
        assert_eq!(parse_price("GH₵ 999."), 999.0);
        assert_eq!(parse_price(".5"), 0.5);
    }

    #[test]
    fn no_fraction_means_zero_split() {
        for price in [0.0, 1.0, 15999.0, 25500.0] {
            let s = split(price, None);
            assert_eq!(s.deposit, 0.0);
            assert_eq!(s.remaining, 0.0);
        }
    }

    #[test]
    fn deposit_plus_remaining_is_price() {
        for price in [0.0, 0.01, 3499.0, 15999.0, 25500.0, 1_000_000.0] {
            for f in FRACTIONS {
                let s = split(price, Some(f));
                assert!((s.deposit + s.remaining - price).abs() < 1e-6);
                assert!((s.deposit - price * f).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn twenty_percent_of_iphone() {
        let s = split(parse_price("GH₵ 15,999"), Some(0.2));
        assert!((s.deposit - 3199.8).abs() < 1e-6);
        assert!((s.remaining - 12799.2).abs() < 1e-6);
    }

    #[test]
    fn tier_amount_matches_split_deposit() {
        let price = 22000.0;
        assert_eq!(tier_amount(price, 0.4), split(price, Some(0.4)).deposit);
    }
}
