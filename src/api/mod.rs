use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Holding, TAX_RATE, TaxSettings, YearProjection, lookup_market_data, run_projection};

const DEFAULT_ALLOWANCE: f64 = 1000.0;

/// The persisted portfolio document. Field names match the export format of
/// the original web client (`portfolio` / `pauschbetrag`), with aliases for
/// the plain spellings, so a saved backup file can be posted as-is.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionDocument {
    #[serde(alias = "holdings")]
    portfolio: Vec<HoldingPayload>,
    settings: SettingsPayload,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
struct HoldingPayload {
    // Bookkeeping fields carried for round-trip only; the engine never sees
    // them.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buy_price: Option<f64>,

    symbol: String,
    shares: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dividend_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dividend_growth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_growth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_contribution: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payout_frequency: Option<u32>,
    reinvest: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
struct SettingsPayload {
    #[serde(alias = "allowance", skip_serializing_if = "Option::is_none")]
    pauschbetrag: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_lump_sum: Option<f64>,
}

#[derive(Debug)]
struct ProjectionRequest {
    holdings: Vec<Holding>,
    settings: TaxSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    allowance: f64,
    tax_rate: f64,
    years: Vec<YearProjection>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_request(document: &ProjectionDocument) -> Result<ProjectionRequest, String> {
    if document.portfolio.is_empty() {
        return Err("portfolio must contain at least one holding".to_string());
    }

    let settings = TaxSettings {
        allowance: document.settings.pauschbetrag.unwrap_or(DEFAULT_ALLOWANCE),
        initial_lump_sum: document.settings.initial_lump_sum.unwrap_or(0.0),
    };
    if !settings.allowance.is_finite() || settings.allowance < 0.0 {
        return Err("pauschbetrag must be >= 0".to_string());
    }
    if !settings.initial_lump_sum.is_finite() || settings.initial_lump_sum < 0.0 {
        return Err("initialLumpSum must be >= 0".to_string());
    }

    let mut holdings = Vec::with_capacity(document.portfolio.len());
    for item in &document.portfolio {
        holdings.push(build_holding(item)?);
    }

    Ok(ProjectionRequest { holdings, settings })
}

fn build_holding(item: &HoldingPayload) -> Result<Holding, String> {
    let symbol = item.symbol.trim();
    if symbol.is_empty() {
        return Err("every holding needs a symbol".to_string());
    }

    if !item.shares.is_finite() || item.shares < 0.0 {
        return Err(format!("{symbol}: shares must be >= 0"));
    }
    if let Some(price) = item.current_price {
        if !price.is_finite() || price <= 0.0 {
            return Err(format!("{symbol}: currentPrice must be > 0"));
        }
    }
    if let Some(dividend_yield) = item.dividend_yield {
        if !dividend_yield.is_finite() || dividend_yield < 0.0 {
            return Err(format!("{symbol}: dividendYield must be >= 0"));
        }
    }
    for (field, value) in [
        ("dividendGrowth", item.dividend_growth),
        ("priceGrowth", item.price_growth),
    ] {
        if let Some(rate) = value {
            if !rate.is_finite() || rate <= -100.0 {
                return Err(format!("{symbol}: {field} must be > -100"));
            }
        }
    }
    if let Some(contribution) = item.monthly_contribution {
        if !contribution.is_finite() || contribution < 0.0 {
            return Err(format!("{symbol}: monthlyContribution must be >= 0"));
        }
    }
    if let Some(frequency) = item.payout_frequency {
        if !matches!(frequency, 1 | 2 | 4 | 12) {
            return Err(format!("{symbol}: payoutFrequency must be 1, 2, 4 or 12"));
        }
    }

    Ok(Holding {
        symbol: symbol.to_string(),
        shares: item.shares,
        current_price: item.current_price,
        dividend_yield: item.dividend_yield,
        dividend_growth: item.dividend_growth,
        price_growth: item.price_growth,
        monthly_contribution: item.monthly_contribution,
        payout_frequency: item.payout_frequency,
        reinvest: item.reinvest,
    })
}

/// Runs a saved portfolio document through the engine and returns the year
/// results as pretty JSON. Used by the `project` CLI subcommand.
pub fn project_document(json: &str) -> Result<String, String> {
    let document = serde_json::from_str::<ProjectionDocument>(json)
        .map_err(|e| format!("invalid portfolio document: {e}"))?;
    let request = build_request(&document)?;
    let years = run_projection(&request.holdings, &request.settings);
    serde_json::to_string_pretty(&years).map_err(|e| e.to_string())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/projection", post(projection_handler))
        .route("/api/market", get(market_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("drip HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/projection");

    axum::serve(listener, app).await
}

async fn projection_handler(Json(document): Json<ProjectionDocument>) -> Response {
    let request = match build_request(&document) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let years = run_projection(&request.holdings, &request.settings);
    json_response(
        StatusCode::OK,
        ProjectionResponse {
            allowance: request.settings.allowance,
            tax_rate: TAX_RATE,
            years,
        },
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MarketQuery {
    q: String,
}

async fn market_handler(Query(query): Query<MarketQuery>) -> Response {
    if query.q.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "missing query parameter q");
    }
    match lookup_market_data(&query.q) {
        Some(found) => json_response(StatusCode::OK, found),
        None => error_response(StatusCode::NOT_FOUND, "unknown symbol"),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
