mod engine;
mod market;
mod types;

pub use engine::{PROJECTION_YEARS, TAX_RATE, run_projection};
pub use market::{StockData, lookup_market_data};
pub use types::{Holding, TaxSettings, YearProjection};
