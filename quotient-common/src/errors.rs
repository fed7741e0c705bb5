use num_bigint::BigUint;
use thiserror::Error;

/// Errors a quoting backend can fail with.
///
/// Backends are one-shot read paths, so neither variant is retried: the
/// oracle is a point-in-time consistency check, not a resilient production
/// path. Variants:
/// - `BackendUnavailable`: the backend could not be reached or the call
///   failed in transit (network/RPC failure).
/// - `InvalidTrade`: the backend does not support the requested pair or
///   fee tier.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("invalid trade: {0}")]
    InvalidTrade(String),
}

/// Engine-level errors of an equivalence check.
///
/// All of these abort the check for the current trade and propagate to the
/// caller as a failed run; there is no recovery path.
#[derive(Error, Debug)]
pub enum OracleError {
    /// A backend call failed while collecting quotes. Carries the label of
    /// the failing backend so reports can name the source.
    #[error("quote collection failed for backend '{backend}'")]
    Backend {
        backend: String,
        #[source]
        source: QuoteError,
    },

    /// Relative deviation is undefined against a zero-valued baseline.
    /// Signaled explicitly instead of dividing by zero or passing.
    #[error("degenerate comparison: zero-valued baseline against {amount} quoted by '{backend}'")]
    DegenerateComparison { backend: String, amount: BigUint },

    /// A comparison needs at least two quotes to be meaningful.
    #[error("not enough quotes to compare: got {0}, need at least 2")]
    NotEnoughQuotes(usize),

    /// The scenario did not complete within its deadline.
    #[error("scenario '{scenario}' timed out after {after_secs}s")]
    Timeout { scenario: String, after_secs: u64 },

    /// A configured pair references a symbol missing from the token table.
    #[error("unknown token symbol: {0}")]
    UnknownToken(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_names_the_source() {
        let err = OracleError::Backend {
            backend: "lens".to_string(),
            source: QuoteError::BackendUnavailable("connection refused".to_string()),
        };

        assert_eq!(err.to_string(), "quote collection failed for backend 'lens'");
        assert!(std::error::Error::source(&err)
            .unwrap()
            .to_string()
            .contains("connection refused"));
    }
}
