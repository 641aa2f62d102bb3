pub mod series;
pub mod source;

// Re-export for convenient access (e.g. `use crate::market_data::Series`).
pub use series::{prepare, RawBar, Series, MIN_BARS};
pub use source::DataSource;

#[cfg(test)]
pub(crate) mod testing;
