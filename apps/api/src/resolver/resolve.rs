//! Multi-source resolution for the analysis report.
//!
//! Three candidate sources are consulted in strict precedence order: the
//! share-link query payload, the session slot, the durable slot. The first
//! source that parses into a full record wins. A failed parse on the first
//! two records a user-visible error and falls through; the durable slot is
//! last-resort and fails silently.

use serde::Serialize;
use tracing::warn;

use crate::models::analysis::ResumeAnalysis;
use crate::resolver::share::decode_share_param;

/// Recorded when the share-link payload cannot be decoded or parsed.
pub const URL_DATA_ERROR: &str = "Invalid analysis data in URL";
/// Recorded when the session slot holds an unreadable record.
pub const SESSION_DATA_ERROR: &str = "Failed to load stored analysis data";

/// Which source supplied the accepted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Percent-encoded payload in the share-link query parameter.
    ShareParam,
    /// Session-scoped slot, written by the latest completed analysis.
    Session,
    /// Durable slot, survives restarts.
    Durable,
    /// Directly from a just-completed submission, not a stored source.
    Fresh,
}

/// Terminal outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// An accepted record. `warning` carries the failure message of a
    /// higher-priority source that was present but unreadable; acceptance
    /// does not clear it.
    Ready {
        analysis: ResumeAnalysis,
        source: Source,
        warning: Option<String>,
    },
    /// No source yielded a record. `error` distinguishes "a source was
    /// present but malformed" from a clean empty state.
    NoData { error: Option<String> },
}

/// Resolves the record to display from the three candidate sources.
///
/// Plain ordered evaluation with early return on the first acceptance. A
/// record is accepted only when it deserializes completely, which requires
/// `overall_score` and `ats_score` to be present and non-null; a score of 0
/// is accepted. When several sources fail, the last recorded failure message
/// wins. No I/O happens here: callers read the slots and pass the contents in.
pub fn resolve(
    share_param: Option<&str>,
    session: Option<&str>,
    durable: Option<&str>,
) -> Resolution {
    let mut error: Option<String> = None;

    if let Some(raw) = non_empty(share_param) {
        match decode_share_param(raw) {
            Ok(decoded) => match ResumeAnalysis::from_json_str(&decoded) {
                Ok(analysis) => {
                    return Resolution::Ready {
                        analysis,
                        source: Source::ShareParam,
                        warning: None,
                    };
                }
                Err(e) => {
                    warn!("Failed to parse share-link payload: {e}");
                    error = Some(URL_DATA_ERROR.to_string());
                }
            },
            Err(e) => {
                warn!("Failed to decode share-link payload: {e}");
                error = Some(URL_DATA_ERROR.to_string());
            }
        }
    }

    if let Some(raw) = non_empty(session) {
        match ResumeAnalysis::from_json_str(raw) {
            Ok(analysis) => {
                return Resolution::Ready {
                    analysis,
                    source: Source::Session,
                    warning: error,
                };
            }
            Err(e) => {
                warn!("Failed to parse session slot: {e}");
                error = Some(SESSION_DATA_ERROR.to_string());
            }
        }
    }

    if let Some(raw) = non_empty(durable) {
        match ResumeAnalysis::from_json_str(raw) {
            Ok(analysis) => {
                return Resolution::Ready {
                    analysis,
                    source: Source::Durable,
                    warning: error,
                };
            }
            Err(e) => {
                warn!("Failed to parse durable slot: {e}");
            }
        }
    }

    Resolution::NoData { error }
}

/// An empty string reads as an absent source.
fn non_empty(source: Option<&str>) -> Option<&str> {
    source.filter(|s| !s.is_empty())
}
