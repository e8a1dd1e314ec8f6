use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use property_pulse::config::{ReportsConfig, SourceMode};
use property_pulse::error::AppError;
use property_pulse::reports::{
    DashboardSnapshot, FixtureReportSource, HttpReportSource, ReportSource, SourceError,
    SummaryAssembler,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) reports: Arc<ReportsConfig>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn build_source(
    reports: &ReportsConfig,
    mode: SourceMode,
) -> Result<Box<dyn ReportSource>, SourceError> {
    match mode {
        SourceMode::Live => Ok(Box::new(HttpReportSource::from_config(reports)?)),
        SourceMode::Fixture => Ok(Box::new(FixtureReportSource::new())),
    }
}

/// Assembles a dashboard on the blocking pool. The live source owns a
/// blocking HTTP client, which must never be built or dropped on a runtime
/// worker thread.
pub(crate) async fn assemble_dashboard(
    reports: Arc<ReportsConfig>,
    mode: SourceMode,
    property_id: u64,
    today: NaiveDate,
) -> Result<DashboardSnapshot, AppError> {
    tokio::task::spawn_blocking(move || -> Result<DashboardSnapshot, AppError> {
        let source = build_source(&reports, mode)?;
        Ok(SummaryAssembler::new(source.as_ref(), property_id).dashboard(today))
    })
    .await
    .map_err(|err| AppError::Internal(format!("dashboard assembly task failed: {err}")))?
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::time::Duration;

    pub(crate) fn fixture_reports() -> ReportsConfig {
        ReportsConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            api_key: String::new(),
            timeout: Duration::from_millis(500),
            property_id: 4060,
            timezone: chrono_tz::America::Chicago,
            source: SourceMode::Fixture,
        }
    }

    pub(crate) fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            reports: Arc::new(fixture_reports()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::fixture_reports;
    use super::*;

    #[test]
    fn parse_date_accepts_iso_and_trims() {
        assert_eq!(
            parse_date(" 2026-01-05 "),
            Ok(NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"))
        );
        let message = parse_date("01/05/2026").expect_err("wrong format");
        assert!(message.contains("YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn fixture_mode_assembles_without_network() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
        let snapshot = assemble_dashboard(
            Arc::new(fixture_reports()),
            SourceMode::Fixture,
            4060,
            today,
        )
        .await
        .expect("fixture dashboard");

        assert_eq!(snapshot.property_id, 4060);
        assert_eq!(snapshot.reference_date, today);
        assert_eq!(snapshot.property_summaries.labels().count(), 3);
        assert_eq!(snapshot.retention.expiring_leases, Some(12));
    }

    #[tokio::test]
    async fn unreachable_live_source_degrades_to_absent_values() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
        let snapshot = assemble_dashboard(
            Arc::new(fixture_reports()),
            SourceMode::Live,
            4060,
            today,
        )
        .await
        .expect("dashboard still assembles");

        assert_eq!(snapshot.leads.current_week_new_leads_count, None);
        assert_eq!(snapshot.rent.current_month_total_rent_billed, None);
        assert_eq!(snapshot.delinquency.current_month_delinquency, None);
    }
}
