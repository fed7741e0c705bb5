//! Shared models, traits and helpers of the Quotient system.
//!
//! The crate defines the vocabulary every other Quotient crate speaks:
//! tokens and trades, the quotes returned by pricing backends, the exact
//! arithmetic used to compare them, the error taxonomy, and the
//! [`traits::QuoteBackend`] seam behind which concrete backends live.

pub mod display;
pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{OracleError, QuoteError};
pub use traits::QuoteBackend;
