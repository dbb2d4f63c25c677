//! Variation alerting against the last stored observation

use crate::domain::observation::Observation;

/// A threshold crossing, with the signed change in percent
#[derive(Debug, Clone, PartialEq)]
pub struct VariationAlert {
    pub previous_price: f64,
    pub new_price: f64,
    pub change_pct: f64,
}

impl VariationAlert {
    pub fn is_increase(&self) -> bool {
        self.change_pct >= 0.0
    }
}

/// Compare the freshly fetched USD price against the most recent stored
/// observation. Returns `None` when there is no prior observation, when the
/// previous price is non-positive (the relative change is undefined), or
/// when the change stays below `threshold` (0.05 = 5%).
pub fn check(
    previous: Option<&Observation>,
    new_price: f64,
    threshold: f64,
) -> Option<VariationAlert> {
    let prev = previous?;
    if prev.price_usd <= 0.0 {
        return None;
    }

    let variation = (new_price - prev.price_usd) / prev.price_usd;
    if variation.abs() >= threshold {
        Some(VariationAlert {
            previous_price: prev.price_usd,
            new_price,
            change_pct: variation * 100.0,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn obs(price_usd: f64) -> Observation {
        Observation::new(Utc::now(), price_usd, None)
    }

    #[test]
    fn test_alert_fires_above_threshold() {
        let prev = obs(100.0);
        let alert = check(Some(&prev), 106.0, 0.05).unwrap();
        assert!((alert.change_pct - 6.0).abs() < 1e-9);
        assert!(alert.is_increase());
    }

    #[test]
    fn test_no_alert_below_threshold() {
        let prev = obs(100.0);
        assert_eq!(check(Some(&prev), 104.0, 0.05), None);
    }

    #[test]
    fn test_alert_fires_exactly_at_threshold() {
        let prev = obs(100.0);
        assert!(check(Some(&prev), 105.0, 0.05).is_some());
        assert!(check(Some(&prev), 95.0, 0.05).is_some());
    }

    #[test]
    fn test_drop_gives_negative_percentage() {
        let prev = obs(100.0);
        let alert = check(Some(&prev), 90.0, 0.05).unwrap();
        assert!((alert.change_pct + 10.0).abs() < 1e-9);
        assert!(!alert.is_increase());
    }

    #[test]
    fn test_empty_history_never_alerts() {
        assert_eq!(check(None, 1_000_000.0, 0.05), None);
    }

    #[test]
    fn test_non_positive_previous_price_is_guarded() {
        let prev = obs(0.0);
        assert_eq!(check(Some(&prev), 100.0, 0.05), None);
    }
}
