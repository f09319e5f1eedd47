use crate::error::EngineError;
use crate::{ComparisonOutcome, InsightsEngine};
use chrono::NaiveDate;
use core_types::RangeSelector;
use tokio::sync::Mutex;

/// What happened to a selection once its comparison finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The comparison finished while it was still the newest selection.
    Applied(ComparisonOutcome),
    /// A newer selection started in the meantime; the result was dropped.
    Superseded,
}

struct ControllerState {
    selection: RangeSelector,
    generation: u64,
    latest: Option<ComparisonOutcome>,
}

/// Holds the user's range selection and re-runs the comparison whenever it
/// changes.
///
/// Selections are last-write-wins: every call to [`RangeController::select`]
/// takes a new generation number, and a comparison is only accepted if its
/// generation is still the newest one when it completes.
pub struct RangeController {
    engine: InsightsEngine,
    state: Mutex<ControllerState>,
}

impl RangeController {
    pub fn new(engine: InsightsEngine, initial: RangeSelector) -> Self {
        Self {
            engine,
            state: Mutex::new(ControllerState {
                selection: initial,
                generation: 0,
                latest: None,
            }),
        }
    }

    /// Replaces the selection and computes its comparison.
    ///
    /// Errors are only returned for the newest selection; a stale failure is
    /// reported as `Superseded` like a stale success.
    pub async fn select(
        &self,
        selector: RangeSelector,
        today: NaiveDate,
    ) -> Result<Selection, EngineError> {
        let ticket = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.selection = selector;
            state.generation
        };

        let result = self.engine.compute_comparison(selector, today).await;

        let mut state = self.state.lock().await;
        if state.generation != ticket {
            tracing::debug!(
                range = %selector,
                ticket,
                newest = state.generation,
                "Discarding superseded comparison."
            );
            return Ok(Selection::Superseded);
        }

        let outcome = result?;
        state.latest = Some(outcome.clone());
        Ok(Selection::Applied(outcome))
    }

    /// Re-runs the comparison for the current selection.
    pub async fn refresh(&self, today: NaiveDate) -> Result<Selection, EngineError> {
        let selector = self.selection().await;
        self.select(selector, today).await
    }

    pub async fn selection(&self) -> RangeSelector {
        self.state.lock().await.selection
    }

    /// The last accepted comparison, if any.
    pub async fn current(&self) -> Option<ComparisonOutcome> {
        self.state.lock().await.latest.clone()
    }
}
