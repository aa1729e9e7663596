// lib/src/dashboard.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use models::{Disease, HistoryEntry, ModelInputVector, PredictionResult, TestReading};

use crate::errors::DashboardResult;
use crate::predictor::PredictorRegistry;
use crate::report::Report;
use crate::session::Session;

/// The submission pipeline behind every disease page.
#[derive(Debug, Clone)]
pub struct Dashboard {
    predictors: PredictorRegistry,
}

impl Dashboard {
    pub fn new(predictors: PredictorRegistry) -> Self {
        Self { predictors }
    }

    /// Validates the form and runs the model without touching any history.
    pub fn evaluate(
        &self,
        disease: Disease,
        raw: &HashMap<String, String>,
    ) -> DashboardResult<(TestReading, PredictionResult)> {
        let reading = TestReading::parse(disease, raw).map_err(|e| {
            warn!("Rejected {} submission: {}", disease, e);
            e
        })?;
        let input = ModelInputVector::build(&reading);
        debug!("{} input vector: {:?}", disease, input.values());
        let prediction = self.predictors.predict(&input)?;
        Ok((reading, prediction))
    }

    pub fn submit(
        &self,
        session: &mut Session,
        disease: Disease,
        raw: &HashMap<String, String>,
    ) -> DashboardResult<Report> {
        self.submit_at(session, disease, raw, Utc::now())
    }

    /// Runs one submission and records it. A rejected form leaves the
    /// history untouched.
    pub fn submit_at(
        &self,
        session: &mut Session,
        disease: Disease,
        raw: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> DashboardResult<Report> {
        let (reading, prediction) = self.evaluate(disease, raw)?;
        let history = session.history_mut(disease);
        history.append(HistoryEntry::new(&reading, &prediction, now));
        debug!(
            "Session {} {} history now holds {} test(s): {}",
            session.id,
            disease,
            session.history(disease).len(),
            prediction.message
        );
        Ok(Report::build(session.history(disease), Some(&prediction)))
    }

    /// The current view of a disease history without a new submission.
    pub fn report(&self, session: &Session, disease: Disease) -> Report {
        Report::build(session.history(disease), None)
    }
}
