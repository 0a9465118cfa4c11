use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub current_price: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub dividend_growth: Option<f64>,
    pub price_growth: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub payout_frequency: Option<u32>,
    pub reinvest: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TaxSettings {
    pub allowance: f64,
    /// Accepted and round-tripped, but not applied to the simulation.
    pub initial_lump_sum: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    pub year: u32,
    pub gross_dividend: f64,
    pub net_dividend: f64,
    pub tax_paid: f64,
    pub total_portfolio_value: f64,
    pub ticker_breakdown: BTreeMap<String, f64>,
    pub accumulated_shares: BTreeMap<String, f64>,
}
