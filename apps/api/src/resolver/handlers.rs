//! HTTP surface for the result resolver.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::models::analysis::ResumeAnalysis;
use crate::resolver::resolve::{Resolution, Source};
use crate::resolver::share::{encode_share_param, share_param_from_query};
use crate::state::AppState;

/// Wire shape of one resolution outcome. Always served with HTTP 200; the
/// `state` tag is what distinguishes the terminal states.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolutionResponse {
    Ready {
        analysis: ResumeAnalysis,
        source: Source,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
        /// Value for the `data` query parameter of a share link.
        share: String,
    },
    NoData {
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

fn resolution_response(resolution: Resolution) -> ResolutionResponse {
    match resolution {
        Resolution::Ready {
            analysis,
            source,
            warning,
        } => {
            let share = serde_json::to_string(&analysis)
                .map(|raw| encode_share_param(&raw))
                .unwrap_or_default();
            ResolutionResponse::Ready {
                analysis,
                source,
                warning,
                share,
            }
        }
        Resolution::NoData { error } => ResolutionResponse::NoData { error },
    }
}

/// GET /api/analysis
///
/// Runs one resolution pass over the share payload and the two slots. The
/// `data` value is pulled from the raw query so it reaches the resolver still
/// percent-encoded.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<ResolutionResponse> {
    let share_param = query.as_deref().and_then(share_param_from_query);
    let resolution = state.report.resolve_with(share_param);
    Json(resolution_response(resolution))
}

/// POST /api/analysis/reset
/// Clears both slots and returns the report surface to its initial state.
pub async fn handle_reset(State(state): State<AppState>) -> StatusCode {
    state.report.reset();
    StatusCode::NO_CONTENT
}
