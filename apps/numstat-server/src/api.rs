//! API handlers for the numstat server
//!
//! Provides REST endpoints for:
//! - Mean, median and mode of a `nums` list
//! - All three at once
//! - Health check

use axum::{
    async_trait,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
    Json,
};
use numstat_core::{parse_with, NumberList, ParseError, Summary};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::ServerError;
use crate::AppState;

/// Name of the query parameter carrying the number list
pub const NUMS_PARAM: &str = "nums";

/// Raw `nums` query value. `None` when missing or given more than once.
#[derive(Debug)]
pub struct Nums(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Nums
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!("Unreadable query string: {}", e);
                ServerError::Validation(ParseError::Missing)
            })?;

        let mut values = pairs
            .into_iter()
            .filter(|(key, _)| key == NUMS_PARAM)
            .map(|(_, value)| value);

        let first = values.next();
        if values.next().is_some() {
            return Ok(Nums(None));
        }

        Ok(Nums(first))
    }
}

impl Nums {
    fn parse(self, state: &AppState) -> Result<NumberList, ServerError> {
        Ok(parse_with(self.0.as_deref(), state.parse_mode)?)
    }
}

/// Computed statistic, tagged by operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum StatResult {
    Mean {
        #[serde(serialize_with = "json_number")]
        value: f64,
    },
    Median {
        #[serde(serialize_with = "json_number")]
        value: f64,
    },
    Mode {
        #[serde(serialize_with = "json_number")]
        value: f64,
    },
    All {
        #[serde(serialize_with = "json_number")]
        mean: f64,
        #[serde(serialize_with = "json_number")]
        median: f64,
        #[serde(serialize_with = "json_number")]
        mode: f64,
    },
}

impl From<Summary> for StatResult {
    fn from(summary: Summary) -> Self {
        StatResult::All {
            mean: summary.mean,
            median: summary.median,
            mode: summary.mode,
        }
    }
}

/// Success envelope: `{"response": {...}}`
#[derive(Debug, Serialize)]
pub struct StatResponse {
    pub response: StatResult,
}

fn respond(response: StatResult) -> Json<StatResponse> {
    Json(StatResponse { response })
}

/// Largest integer an IEEE double holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integral values go out as JSON integers (`2`, not `2.0`); non-finite
/// values become `null`.
fn json_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "numstat-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: GET /mean
pub async fn handle_mean(
    State(state): State<AppState>,
    nums: Nums,
) -> Result<Json<StatResponse>, ServerError> {
    let nums = nums.parse(&state)?;
    let value = nums.mean();
    debug!("mean of {} values = {}", nums.len(), value);
    Ok(respond(StatResult::Mean { value }))
}

/// Handler: GET /median
pub async fn handle_median(
    State(state): State<AppState>,
    nums: Nums,
) -> Result<Json<StatResponse>, ServerError> {
    let nums = nums.parse(&state)?;
    let value = nums.median(state.median_order);
    debug!(
        "median ({}) of {} values = {}",
        state.median_order,
        nums.len(),
        value
    );
    Ok(respond(StatResult::Median { value }))
}

/// Handler: GET /mode
pub async fn handle_mode(
    State(state): State<AppState>,
    nums: Nums,
) -> Result<Json<StatResponse>, ServerError> {
    let nums = nums.parse(&state)?;
    let value = nums.mode();
    debug!("mode of {} values = {}", nums.len(), value);
    Ok(respond(StatResult::Mode { value }))
}

/// Handler: GET /all
pub async fn handle_all(
    State(state): State<AppState>,
    nums: Nums,
) -> Result<Json<StatResponse>, ServerError> {
    let nums = nums.parse(&state)?;
    let summary = nums.summary(state.median_order);
    debug!("summary of {} values = {:?}", nums.len(), summary);
    Ok(respond(summary.into()))
}

/// Fallback for unmatched paths and methods
pub async fn handle_not_found() -> ServerError {
    ServerError::NotFound
}
