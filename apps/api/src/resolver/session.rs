//! Report session: resolution state plus the two storage slots behind it.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::models::analysis::ResumeAnalysis;
use crate::resolver::resolve::{resolve, Resolution, Source};
use crate::resolver::store::AnalysisStore;

/// Lifecycle of the report surface.
///
/// Loading is the initial state and the state re-entered on reset. A
/// resolution pass moves to Resolved exactly once per trigger; Resolved is
/// terminal until a new submission or a reset restarts the cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportState {
    Loading,
    Resolved(Resolution),
}

/// Shared session for the report surface.
///
/// The lock is std::sync and is never held across an await point. Slot reads
/// and the overwrite-on-accept never interleave within one operation, so no
/// further locking discipline is needed.
pub struct ReportSession {
    session_store: Arc<dyn AnalysisStore>,
    durable_store: Arc<dyn AnalysisStore>,
    state: RwLock<ReportState>,
}

impl ReportSession {
    pub fn new(session_store: Arc<dyn AnalysisStore>, durable_store: Arc<dyn AnalysisStore>) -> Self {
        Self {
            session_store,
            durable_store,
            state: RwLock::new(ReportState::Loading),
        }
    }

    /// Runs one resolution pass over the share payload and the two slots,
    /// records the outcome, and returns it.
    pub fn resolve_with(&self, share_param: Option<&str>) -> Resolution {
        let session = self.session_store.read();
        let durable = self.durable_store.read();

        let resolution = resolve(share_param, session.as_deref(), durable.as_deref());

        *self.state.write().expect("report state lock poisoned") =
            ReportState::Resolved(resolution.clone());
        resolution
    }

    /// Accepts a freshly-analyzed record: both slots are overwritten so the
    /// session and durable sources serve it on future resolutions.
    ///
    /// Slot write failures are logged and swallowed. The caller already holds
    /// the record and must receive it regardless of disk state.
    pub fn accept(&self, analysis: &ResumeAnalysis) {
        match serde_json::to_string(analysis) {
            Ok(serialized) => {
                if let Err(e) = self.session_store.write(&serialized) {
                    warn!("Failed to write session slot: {e:#}");
                }
                if let Err(e) = self.durable_store.write(&serialized) {
                    warn!("Failed to write durable slot: {e:#}");
                }
            }
            Err(e) => warn!("Failed to serialize accepted analysis: {e}"),
        }

        *self.state.write().expect("report state lock poisoned") =
            ReportState::Resolved(Resolution::Ready {
                analysis: analysis.clone(),
                source: Source::Fresh,
                warning: None,
            });
    }

    /// Clears both slots and returns the session to its initial state.
    pub fn reset(&self) {
        info!("Clearing stored analysis state");
        self.session_store.clear();
        self.durable_store.clear();
        *self.state.write().expect("report state lock poisoned") = ReportState::Loading;
    }

    /// Current lifecycle state. Handlers work off resolution values directly;
    /// this is for inspection.
    #[allow(dead_code)]
    pub fn state(&self) -> ReportState {
        self.state.read().expect("report state lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::sample_analysis;
    use crate::resolver::store::MemoryStore;

    struct BrokenStore;

    impl AnalysisStore for BrokenStore {
        fn read(&self) -> Option<String> {
            None
        }

        fn write(&self, _raw: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk full"))
        }

        fn clear(&self) {}
    }

    fn session_with_memory_stores() -> (ReportSession, Arc<MemoryStore>, Arc<MemoryStore>) {
        let session_store = Arc::new(MemoryStore::new());
        let durable_store = Arc::new(MemoryStore::new());
        let session = ReportSession::new(session_store.clone(), durable_store.clone());
        (session, session_store, durable_store)
    }

    #[test]
    fn test_initial_state_is_loading() {
        let (session, _, _) = session_with_memory_stores();
        assert_eq!(session.state(), ReportState::Loading);
    }

    #[test]
    fn test_accept_populates_both_slots() {
        let (session, session_store, durable_store) = session_with_memory_stores();
        let analysis = sample_analysis(90.0, 80.0);

        session.accept(&analysis);

        let stored = session_store.read().unwrap();
        assert_eq!(
            ResumeAnalysis::from_json_str(&stored).unwrap(),
            analysis
        );
        assert_eq!(durable_store.read().unwrap(), stored);
    }

    #[test]
    fn test_accept_sets_ready_state() {
        let (session, _, _) = session_with_memory_stores();
        let analysis = sample_analysis(90.0, 80.0);

        session.accept(&analysis);

        match session.state() {
            ReportState::Resolved(Resolution::Ready {
                analysis: held,
                source,
                warning,
            }) => {
                assert_eq!(held, analysis);
                assert_eq!(source, Source::Fresh);
                assert_eq!(warning, None);
            }
            other => panic!("expected ready state, got {other:?}"),
        }
    }

    #[test]
    fn test_accept_then_resolve_serves_session_slot() {
        let (session, _, _) = session_with_memory_stores();
        let analysis = sample_analysis(90.0, 80.0);
        session.accept(&analysis);

        match session.resolve_with(None) {
            Resolution::Ready {
                analysis: held,
                source,
                ..
            } => {
                assert_eq!(held, analysis);
                assert_eq!(source, Source::Session);
            }
            other => panic!("expected ready, got {other:?}"),
        }
    }

    #[test]
    fn test_accept_overwrites_previous_record() {
        let (session, session_store, durable_store) = session_with_memory_stores();
        session.accept(&sample_analysis(50.0, 40.0));
        session.accept(&sample_analysis(90.0, 80.0));

        let stored = ResumeAnalysis::from_json_str(&session_store.read().unwrap()).unwrap();
        assert_eq!(stored.overall_score, 90.0);
        let durable = ResumeAnalysis::from_json_str(&durable_store.read().unwrap()).unwrap();
        assert_eq!(durable.overall_score, 90.0);
    }

    #[test]
    fn test_reset_clears_both_slots_and_returns_to_loading() {
        let (session, session_store, durable_store) = session_with_memory_stores();
        session.accept(&sample_analysis(90.0, 80.0));

        session.reset();

        assert_eq!(session_store.read(), None);
        assert_eq!(durable_store.read(), None);
        assert_eq!(session.state(), ReportState::Loading);

        // Next pass over the emptied slots ends in a clean no-data state.
        assert_eq!(session.resolve_with(None), Resolution::NoData { error: None });
        assert_eq!(
            session.state(),
            ReportState::Resolved(Resolution::NoData { error: None })
        );
    }

    #[test]
    fn test_resolution_outcome_is_recorded() {
        let (session, _, _) = session_with_memory_stores();
        let resolution = session.resolve_with(None);
        assert_eq!(resolution, Resolution::NoData { error: None });
        assert_eq!(session.state(), ReportState::Resolved(resolution));
    }

    #[test]
    fn test_accept_survives_slot_write_failure() {
        let session = ReportSession::new(Arc::new(BrokenStore), Arc::new(BrokenStore));
        let analysis = sample_analysis(90.0, 80.0);

        session.accept(&analysis);

        match session.state() {
            ReportState::Resolved(Resolution::Ready { analysis: held, .. }) => {
                assert_eq!(held, analysis);
            }
            other => panic!("expected ready state, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_with_share_param_beats_stored_slot() {
        let (session, _, _) = session_with_memory_stores();
        session.accept(&sample_analysis(70.0, 60.0));

        let shared = crate::resolver::share::encode_share_param(
            &serde_json::to_string(&sample_analysis(90.0, 80.0)).unwrap(),
        );

        match session.resolve_with(Some(&shared)) {
            Resolution::Ready {
                analysis, source, ..
            } => {
                assert_eq!(analysis.overall_score, 90.0);
                assert_eq!(source, Source::ShareParam);
            }
            other => panic!("expected ready, got {other:?}"),
        }
    }
}
