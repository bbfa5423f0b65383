use log::warn;
use rust_decimal::Decimal;

/// Adds `value` to `total`, saturating at `Decimal::MAX`/`Decimal::MIN`
/// instead of panicking. `what` names the running total in the warning.
pub fn accumulate(total: &mut Decimal, value: Decimal, what: &str) {
    *total = match total.checked_add(value) {
        Some(sum) => sum,
        None => {
            warn!("{} overflowed while adding {}, saturating", what, value);
            if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }
    };
}

/// `numerator / denominator`, or zero when the denominator is zero or the
/// quotient is not representable.
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        warn!(
            "Ratio {} / {} is not representable, reporting 0",
            numerator, denominator
        );
        Decimal::ZERO
    })
}

/// Sum of `values`, each divided by `scale`, or `None` on overflow.
pub fn checked_scaled_sum(values: &[Decimal], scale: Decimal) -> Option<Decimal> {
    values.iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value.checked_div(scale)?)
    })
}
