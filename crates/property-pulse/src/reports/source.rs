//! Where raw report payloads come from.
//!
//! The assembler only sees [`ReportSource`]. Any failure to obtain a payload
//! is reported as `None` after logging, never as an error, so one bad report
//! cannot take the rest of a dashboard down with it.

use super::request::{build_request, ReportFilters, ReportKind};
use crate::config::ReportsConfig;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

pub trait ReportSource: Debug {
    fn fetch(&self, kind: ReportKind, filters: &ReportFilters) -> Option<Value>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unable to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Posts report requests to the reporting API over a blocking client with a
/// bounded timeout. Must not be created or dropped on an async runtime thread.
pub struct HttpReportSource {
    endpoint: String,
    api_key: String,
    http_client: Client,
}

impl HttpReportSource {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let http_client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(15)))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            http_client,
        })
    }

    pub fn from_config(config: &ReportsConfig) -> Result<Self, SourceError> {
        Self::new(
            config.report_endpoint(),
            config.api_key.clone(),
            config.timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Debug for HttpReportSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpReportSource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ReportSource for HttpReportSource {
    fn fetch(&self, kind: ReportKind, filters: &ReportFilters) -> Option<Value> {
        let body = build_request(kind, filters);
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("X-Api-Key", &self.api_key)
            .json(&body)
            .send();

        let response = match response {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    report = %kind,
                    property_id = filters.property_id,
                    %error,
                    "report request failed"
                );
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            warn!(
                report = %kind,
                property_id = filters.property_id,
                %status,
                %detail,
                "report request rejected"
            );
            return None;
        }

        match response.json::<Value>() {
            Ok(payload) => {
                debug!(
                    report = %kind,
                    property_id = filters.property_id,
                    "report payload received"
                );
                Some(payload)
            }
            Err(error) => {
                warn!(
                    report = %kind,
                    property_id = filters.property_id,
                    %error,
                    "report payload was not JSON"
                );
                None
            }
        }
    }
}

/// Serves canned payloads, one per report kind, and remembers what it was
/// asked for.
#[derive(Debug, Default)]
pub struct FixtureReportSource {
    overrides: HashMap<ReportKind, Option<Value>>,
    requests: Mutex<Vec<(ReportKind, ReportFilters)>>,
}

impl FixtureReportSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the canned payload for `kind`; `None` simulates a failed fetch.
    pub fn with_payload(mut self, kind: ReportKind, payload: Option<Value>) -> Self {
        self.overrides.insert(kind, payload);
        self
    }

    pub fn requests(&self) -> Vec<(ReportKind, ReportFilters)> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl ReportSource for FixtureReportSource {
    fn fetch(&self, kind: ReportKind, filters: &ReportFilters) -> Option<Value> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((kind, filters.clone()));
        }

        match self.overrides.get(&kind) {
            Some(payload) => payload.clone(),
            None => Some(fixtures::for_kind(kind)),
        }
    }
}

/// Representative payloads for each report, shaped like live responses.
pub mod fixtures {
    use super::{json, ReportKind, Value};

    pub fn for_kind(kind: ReportKind) -> Value {
        match kind {
            ReportKind::BoxScore => box_score(),
            ReportKind::ComparativeDelinquency => comparative_delinquency(),
            ReportKind::ResidentAgedReceivables => resident_aged_receivables(),
            ReportKind::ResidentRetention => resident_retention(),
        }
    }

    fn wrap(report_data: Value) -> Value {
        json!({ "response": { "result": [{ "reportData": report_data }] } })
    }

    pub fn box_score() -> Value {
        wrap(json!({
            "availability": [{
                "total_units": 95,
                "total_rentable_units": 93,
                "excluded_units": 1,
                "percent_occupied": 0.7826,
                "percent_leased": 0.8043,
                "avg_not_exposed_leased_units": 0.7065,
                "occupied_units": 74,
                "notice_rented_units": 6,
                "notice_unrented_units": 3,
                "vacant_units": 12,
                "vacant_rented_units": 5,
                "vacant_unrented_units": 7
            }],
            "property_pulse": [{
                "skips": 1,
                "evictions_completed": 2,
                "move_ins": 9,
                "move_outs": 7
            }],
            "lead_activity": [{
                "new_leads": 42,
                "unique_visits_tours": 18
            }],
            "lead_conversions": [{
                "completed": 11,
                "approved": 8
            }]
        }))
    }

    pub fn comparative_delinquency() -> Value {
        wrap(json!([{
            "amount_due_0": 125000,
            "total_allocations_0": 118500
        }]))
    }

    pub fn resident_aged_receivables() -> Value {
        wrap(json!([
            { "thirty_days": 1250.50, "sixty_days": 840.00, "ninety_days": 410.25 },
            { "thirty_days": 300.00, "sixty_days": 160.75, "ninety_days": 89.50 }
        ]))
    }

    pub fn resident_retention() -> Value {
        wrap(json!([{
            "expiring_leases": 12,
            "renewals": 9
        }]))
    }
}
