use std::collections::BTreeMap;

use super::types::{Holding, TaxSettings, YearProjection};

pub const PROJECTION_YEARS: u32 = 30;

/// 25% Abgeltungssteuer plus the 5.5% Solidaritätszuschlag levied on it.
pub const TAX_RATE: f64 = 0.26375;

#[derive(Debug)]
struct SimHolding {
    symbol: String,
    shares: f64,
    price: f64,
    annual_div_per_share: f64,
    dividend_growth: f64,
    price_growth: f64,
    monthly_contribution: f64,
    payout_frequency: u32,
    reinvest: bool,
}

#[derive(Debug)]
struct YearAccumulator {
    gross: f64,
    tax: f64,
    net: f64,
    per_symbol_gross: BTreeMap<String, f64>,
}

impl YearAccumulator {
    fn new(stocks: &[SimHolding]) -> Self {
        Self {
            gross: 0.0,
            tax: 0.0,
            net: 0.0,
            per_symbol_gross: stocks.iter().map(|s| (s.symbol.clone(), 0.0)).collect(),
        }
    }

    fn record_payout(&mut self, symbol: &str, gross: f64, tax: f64) {
        self.gross += gross;
        self.tax += tax;
        self.net += gross - tax;
        *self
            .per_symbol_gross
            .entry(symbol.to_string())
            .or_insert(0.0) += gross;
    }

    fn emit(&self, year: u32, stocks: &[SimHolding]) -> YearProjection {
        // One blended rate across all symbols; true per-symbol allowance use
        // is not tracked.
        let effective_tax_rate = if self.gross > 0.0 {
            self.tax / self.gross
        } else {
            0.0
        };

        let ticker_breakdown = self
            .per_symbol_gross
            .iter()
            .map(|(symbol, gross)| (symbol.clone(), gross * (1.0 - effective_tax_rate)))
            .collect();
        let accumulated_shares = stocks
            .iter()
            .map(|s| (s.symbol.clone(), s.shares))
            .collect();
        let total_portfolio_value = stocks.iter().map(|s| s.shares * s.price).sum();

        YearProjection {
            year,
            gross_dividend: self.gross,
            net_dividend: self.net,
            tax_paid: self.tax,
            total_portfolio_value,
            ticker_breakdown,
            accumulated_shares,
        }
    }

    fn reset(&mut self) {
        self.gross = 0.0;
        self.tax = 0.0;
        self.net = 0.0;
        for gross in self.per_symbol_gross.values_mut() {
            *gross = 0.0;
        }
    }
}

/// Projects the portfolio month by month over the full horizon and returns one
/// aggregate result per simulated year, in order. Pure and deterministic: the
/// same inputs always reproduce the same sequence.
pub fn run_projection(holdings: &[Holding], settings: &TaxSettings) -> Vec<YearProjection> {
    let mut stocks: Vec<SimHolding> = holdings.iter().map(normalize).collect();

    let mut projections = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut accumulator = YearAccumulator::new(&stocks);
    let mut remaining_allowance = settings.allowance;

    let total_months = PROJECTION_YEARS * 12;
    for month in 1..=total_months {
        if month > 1 && (month - 1) % 12 == 0 {
            // First month of a new year: fresh allowance, annual step-up of
            // the per-share dividend and the unit price.
            remaining_allowance = settings.allowance;
            for stock in &mut stocks {
                stock.annual_div_per_share *= 1.0 + stock.dividend_growth / 100.0;
                stock.price *= 1.0 + stock.price_growth / 100.0;
            }
        }

        for stock in &mut stocks {
            // Savings plan buys land before the payout check, so this month's
            // distribution already covers them.
            if stock.monthly_contribution > 0.0 {
                stock.shares += stock.monthly_contribution / stock.price;
            }

            if !pays_in_month(stock.payout_frequency, month) {
                continue;
            }

            let gross_payout =
                stock.shares * (stock.annual_div_per_share / stock.payout_frequency as f64);
            if gross_payout <= 0.0 {
                continue;
            }

            let tax = payout_tax(gross_payout, &mut remaining_allowance);
            let net = gross_payout - tax;

            if stock.reinvest {
                stock.shares += net / stock.price;
            }

            accumulator.record_payout(&stock.symbol, gross_payout, tax);
        }

        if month % 12 == 0 {
            projections.push(accumulator.emit(month / 12, &stocks));
            accumulator.reset();
        }
    }

    projections
}

fn normalize(holding: &Holding) -> SimHolding {
    let price = match holding.current_price {
        Some(p) if p != 0.0 && !p.is_nan() => p,
        _ => 100.0,
    };
    let dividend_yield = holding.dividend_yield.unwrap_or(0.0);
    let dividend_growth = holding.dividend_growth.unwrap_or(0.0);
    // An explicit zero price growth is respected; only an absent value
    // inherits the dividend growth rate.
    let price_growth = holding.price_growth.unwrap_or(dividend_growth);
    let payout_frequency = match holding.payout_frequency {
        Some(f) if f != 0 => f,
        _ => 1,
    };

    SimHolding {
        symbol: holding.symbol.clone(),
        shares: holding.shares,
        price,
        annual_div_per_share: price * dividend_yield / 100.0,
        dividend_growth,
        price_growth,
        monthly_contribution: holding.monthly_contribution.unwrap_or(0.0),
        payout_frequency,
        reinvest: holding.reinvest,
    }
}

fn pays_in_month(frequency: u32, month: u32) -> bool {
    match frequency {
        12 => true,
        4 => month % 3 == 0,
        2 => month % 6 == 0,
        // Annual payers distribute mid-year.
        1 => month % 12 == 6,
        _ => false,
    }
}

/// Allowance is consumed payout by payout, in processing order; once it is
/// gone, the remainder of the year is taxed at the flat rate.
fn payout_tax(gross_payout: f64, remaining_allowance: &mut f64) -> f64 {
    if gross_payout > *remaining_allowance {
        let taxable = gross_payout - *remaining_allowance;
        *remaining_allowance = 0.0;
        taxable * TAX_RATE
    } else {
        *remaining_allowance -= gross_payout;
        0.0
    }
}
