use num_bigint::BigUint;

/// Renders a raw integer amount as a decimal string with `decimals`
/// fractional digits, e.g. `123456789` at 6 decimals becomes
/// `"123.456789"`.
///
/// Used for logs and reports only; comparisons always stay on the raw
/// integers.
pub fn format_units(amount: &BigUint, decimals: u32) -> String {
    let digits = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }
    if digits.len() <= decimals {
        format!("0.{digits:0>decimals$}")
    } else {
        let (whole, frac) = digits.split_at(digits.len() - decimals);
        format!("{whole}.{frac}")
    }
}
