use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockData {
    pub symbol: &'static str,
    pub name: &'static str,
    pub price: f64,
    pub dividend_yield: f64,
    pub dividend_growth: f64,
    pub price_growth: f64,
    pub payout_frequency: u32,
}

const fn stock(
    symbol: &'static str,
    name: &'static str,
    price: f64,
    dividend_yield: f64,
    dividend_growth: f64,
    price_growth: f64,
    payout_frequency: u32,
) -> StockData {
    StockData {
        symbol,
        name,
        price,
        dividend_yield,
        dividend_growth,
        price_growth,
        payout_frequency,
    }
}

/// Offline lookup table for common dividend payers. Prices in EUR.
const MARKET_DB: &[StockData] = &[
    // Monthly payers
    stock("O", "Realty Income", 52.50, 5.8, 3.1, 2.5, 12),
    stock("MAIN", "Main Street Capital", 49.80, 6.1, 3.5, 4.2, 12),
    stock("STAG", "STAG Industrial", 36.20, 4.1, 0.7, 3.0, 12),
    stock("LTC", "LTC Properties", 33.50, 6.8, 0.5, 1.0, 12),
    stock("EPR", "EPR Properties", 42.00, 7.8, 1.5, -1.0, 12),
    stock("ADC", "Agree Realty", 61.00, 4.8, 5.5, 6.0, 12),
    // Quarterly payers, US
    stock("MSFT", "Microsoft Corp.", 405.00, 0.7, 10.2, 15.0, 4),
    stock("AAPL", "Apple Inc.", 175.00, 0.5, 5.8, 12.0, 4),
    stock("JNJ", "Johnson & Johnson", 148.00, 3.2, 5.4, 3.0, 4),
    stock("KO", "Coca-Cola", 59.50, 3.3, 4.5, 4.0, 4),
    stock("PEP", "PepsiCo", 168.00, 3.1, 7.2, 6.0, 4),
    stock("PG", "Procter & Gamble", 162.00, 2.4, 5.1, 5.5, 4),
    stock("MCD", "McDonald's", 275.00, 2.4, 8.0, 7.0, 4),
    stock("SBUX", "Starbucks", 92.00, 2.5, 9.0, 8.0, 4),
    stock("HD", "Home Depot", 360.00, 2.6, 12.0, 9.0, 4),
    stock("LOW", "Lowe's", 235.00, 1.8, 15.0, 10.0, 4),
    stock("AVGO", "Broadcom", 1250.00, 1.6, 12.0, 20.0, 4),
    stock("CSCO", "Cisco Systems", 48.00, 3.3, 2.8, 3.0, 4),
    stock("PFE", "Pfizer", 28.00, 6.0, 2.5, -2.0, 4),
    stock("ABBV", "AbbVie", 175.00, 3.5, 6.5, 8.0, 4),
    stock("MMM", "3M Company", 95.00, 6.2, 0.5, -4.0, 4),
    stock("T", "AT&T", 17.20, 6.4, 0.0, 1.0, 4),
    stock("VZ", "Verizon", 40.50, 6.6, 1.9, 0.5, 4),
    stock("XOM", "Exxon Mobil", 115.00, 3.3, 3.5, 6.0, 4),
    stock("CVX", "Chevron", 155.00, 4.2, 6.0, 4.0, 4),
    stock("V", "Visa", 280.00, 0.7, 15.0, 12.0, 4),
    stock("MA", "Mastercard", 460.00, 0.6, 16.0, 13.0, 4),
    // Annual payers, Germany
    stock("ALV.DE", "Allianz SE", 285.00, 5.0, 5.8, 6.5, 1),
    stock("BAS.DE", "BASF SE", 48.00, 7.1, 1.0, 0.0, 1),
    stock("MUV2.DE", "Münchener Rück", 470.00, 3.2, 5.0, 8.0, 1),
    stock("BMW.DE", "BMW AG", 105.00, 5.8, 9.0, 3.0, 1),
    stock("DTE.DE", "Deutsche Telekom", 22.50, 3.4, 4.0, 5.0, 1),
    stock("DHL.DE", "DHL Group", 39.00, 4.7, 3.5, 3.0, 1),
    stock("SIE.DE", "Siemens AG", 180.00, 2.6, 6.0, 9.0, 1),
    stock("SAP.DE", "SAP SE", 175.00, 1.2, 5.0, 12.0, 1),
    stock("VNA.DE", "Vonovia SE", 27.50, 3.3, 2.0, 2.0, 1),
    stock("MBG.DE", "Mercedes-Benz", 72.00, 7.0, 3.0, 2.0, 1),
    // International
    stock("NESN.SW", "Nestlé", 95.00, 3.1, 2.5, 2.0, 1),
    stock("ROG.SW", "Roche", 230.00, 3.9, 3.0, 1.0, 1),
    stock("NOVN.SW", "Novartis", 90.00, 3.6, 3.5, 3.0, 1),
    stock("SHEL", "Shell", 33.00, 3.8, 4.0, 5.0, 4),
    stock("ASML", "ASML Holding", 900.00, 0.7, 20.0, 18.0, 4),
];

/// Resolves a free-text query to at most one known record: exact symbol match
/// first, then a substring match against symbol or name (so "Allianz" finds
/// ALV.DE). Callers fall back to manual entry on a miss.
pub fn lookup_market_data(query: &str) -> Option<&'static StockData> {
    let clean = query.trim().to_uppercase();
    if clean.is_empty() {
        return None;
    }

    if let Some(found) = MARKET_DB.iter().find(|s| s.symbol == clean) {
        return Some(found);
    }

    MARKET_DB
        .iter()
        .find(|s| s.symbol.contains(&clean) || s.name.to_uppercase().contains(&clean))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_symbol_match_wins() {
        let found = lookup_market_data("MSFT").expect("known symbol");
        assert_eq!(found.name, "Microsoft Corp.");
        assert_eq!(found.payout_frequency, 4);
    }

    #[test]
    fn lookup_is_case_insensitive_and_trims() {
        let found = lookup_market_data("  alv.de ").expect("known symbol");
        assert_eq!(found.symbol, "ALV.DE");
        assert_eq!(found.payout_frequency, 1);
    }

    #[test]
    fn partial_name_match_resolves() {
        let found = lookup_market_data("Allianz").expect("name fragment");
        assert_eq!(found.symbol, "ALV.DE");
    }

    #[test]
    fn short_symbol_prefers_its_exact_entry() {
        // "O" is a substring of almost every entry; the exact match must win.
        let found = lookup_market_data("o").expect("known symbol");
        assert_eq!(found.symbol, "O");
    }

    #[test]
    fn unknown_or_empty_queries_miss() {
        assert!(lookup_market_data("ZZZZ9").is_none());
        assert!(lookup_market_data("   ").is_none());
    }
}
