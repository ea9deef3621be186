//! Insight service
//!
//! Evaluates the insight engine against the store, reusing the previous
//! result while neither the store revision nor the date has changed.

use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::debug;

use crate::clock::Clock;
use crate::config::Settings;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::insights::{InsightContext, InsightEngine};
use crate::models::Insight;
use crate::storage::Storage;

struct Cached {
    revision: u64,
    today: NaiveDate,
    insights: Vec<Insight>,
}

/// Service for generating insights
pub struct InsightService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
    settings: &'a Settings,
    engine: InsightEngine,
    cache: Mutex<Option<Cached>>,
}

impl<'a> InsightService<'a> {
    pub fn new(storage: &'a Storage, clock: &'a dyn Clock, settings: &'a Settings) -> Self {
        Self {
            storage,
            clock,
            settings,
            engine: InsightEngine::new().with_order(settings.insight_order),
            cache: Mutex::new(None),
        }
    }

    /// Context for the current store contents and today's date
    pub fn context(&self) -> SpendwiseResult<InsightContext> {
        let snapshot = self.storage.snapshot()?;
        Ok(InsightContext::from_snapshot(
            &snapshot,
            self.clock.today(),
            self.settings.currency_symbol.clone(),
        ))
    }

    /// Current insights, at most `insight_limit` of them
    pub fn insights(&self) -> SpendwiseResult<Vec<Insight>> {
        let revision = self.storage.revision();
        let today = self.clock.today();

        let mut cache = self
            .cache
            .lock()
            .map_err(|e| SpendwiseError::Storage(format!("Insight cache poisoned: {}", e)))?;

        if let Some(cached) = cache.as_ref() {
            if cached.revision == revision && cached.today == today {
                debug!(revision, "Insight cache hit");
                return Ok(cached.insights.clone());
            }
        }

        let ctx = self.context()?;
        let insights = self.engine.evaluate(&ctx, &self.settings.thresholds);
        debug!(revision, count = insights.len(), "Generated insights");

        *cache = Some(Cached {
            revision,
            today,
            insights: insights.clone(),
        });
        Ok(insights)
    }
}
