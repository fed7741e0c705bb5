use num_bigint::BigUint;
use quotient_common::models::{NormalizedQuote, Quote};

/// Rescales raw quotes to a common decimal base so magnitudes from
/// heterogeneous sources are comparable.
///
/// The common base is the maximum `decimals` across the input quotes, so
/// every amount is only ever multiplied by a power of ten — the conversion
/// is exact relative to each source's native integer representation.
pub fn normalize(quotes: &[Quote]) -> Vec<NormalizedQuote> {
    let scale = quotes
        .iter()
        .map(|quote| quote.decimals)
        .max()
        .unwrap_or(0);

    quotes
        .iter()
        .map(|quote| NormalizedQuote {
            source: quote.source.clone(),
            amount: &quote.raw_amount * BigUint::from(10u32).pow(scale - quote.decimals),
            scale,
        })
        .collect()
}
