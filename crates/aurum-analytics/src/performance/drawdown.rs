//! Drawdown of a cumulative return path.

/// Iterates over the drawdown at each period.
///
/// The cumulative value starts at 1.0 and so does the running peak, so an
/// initial loss counts as a drawdown from the starting capital.
fn drawdowns(returns: &[f64]) -> impl Iterator<Item = f64> + '_ {
    let mut cumulative = 1.0_f64;
    let mut peak = 1.0_f64;
    returns.iter().map(move |r| {
        cumulative *= 1.0 + r;
        peak = peak.max(cumulative);
        (peak - cumulative) / peak
    })
}

/// Maximum peak-to-trough decline of the compounded series, as a fraction.
///
/// Always ≥ 0, and 0 for an empty series. For returns above −100% the
/// result also stays below 1.
///
/// ```rust
/// use aurum_analytics::performance::max_drawdown;
///
/// // Up 10%, then down 20%: trough at 0.88 against a peak of 1.10.
/// let dd = max_drawdown(&[0.10, -0.20]);
/// assert!((dd - 0.20).abs() < 1e-12);
/// ```
#[must_use]
pub fn max_drawdown(returns: &[f64]) -> f64 {
    drawdowns(returns).fold(0.0, f64::max)
}

/// Drawdown at every period (the "underwater" curve).
#[must_use]
pub fn drawdown_series(returns: &[f64]) -> Vec<f64> {
    drawdowns(returns).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_max_drawdown_empty() {
        assert_eq!(max_drawdown(&[]), 0.0);
        assert!(drawdown_series(&[]).is_empty());
    }

    #[test]
    fn test_max_drawdown_only_gains() {
        assert_eq!(max_drawdown(&[0.01, 0.02, 0.03]), 0.0);
    }

    #[test]
    fn test_initial_loss_is_a_drawdown() {
        assert_relative_eq!(max_drawdown(&[-0.05, 0.01]), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_max_drawdown_recovers() {
        // 1.0 -> 1.2 -> 0.9 -> 1.35 -> 1.215
        let returns = [0.20, -0.25, 0.50, -0.10];
        assert_relative_eq!(max_drawdown(&returns), 0.25, epsilon = 1e-12);

        let series = drawdown_series(&returns);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], 0.0);
        assert_relative_eq!(series[1], 0.25, epsilon = 1e-12);
        assert_eq!(series[2], 0.0);
        assert_relative_eq!(series[3], 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_total_loss_is_full_drawdown() {
        assert_relative_eq!(max_drawdown(&[0.10, -1.0]), 1.0, epsilon = 1e-12);
    }
}
