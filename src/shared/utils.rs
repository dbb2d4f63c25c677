//! Utility functions and helpers

/// Format a price with thousands separators and two decimals: 65432.1 -> "65,432.10"
pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, frac)
}

/// Mask a secret for log output, keeping a short prefix and suffix
pub fn mask_secret(secret: &str) -> String {
    const LEFT: usize = 6;
    const RIGHT: usize = 4;
    if secret.len() <= LEFT + RIGHT + 3 {
        return secret.to_string();
    }
    format!("{}...{}", &secret[..LEFT], &secret[secret.len() - RIGHT..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(65432.1), "65,432.10");
        assert_eq!(format_money(1234567.895), "1,234,567.90");
        assert_eq!(format_money(999.0), "999.00");
        assert_eq!(format_money(0.0), "0.00");
    }

    #[test]
    fn test_format_money_negative() {
        assert_eq!(format_money(-1234.5), "-1,234.50");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdef1234567890wxyz"), "abcdef...wxyz");
        // Too short to mask meaningfully
        assert_eq!(mask_secret("short"), "short");
    }
}
