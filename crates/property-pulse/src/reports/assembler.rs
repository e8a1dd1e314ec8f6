use super::calendar::{three_months_mm_yyyy, weekly_boundaries, MonthLabels, WeekBoundaries};
use super::extractors::{
    extract_box_score, extract_delinquency, extract_rent_metrics, extract_resident_retention,
};
use super::records::{
    DelinquencyForThreeMonths, LeadMetrics, LeadsSummaryForThreeWeeks, PeriodSeries,
    PropertySummary, RentMetrics, RentSummaryForCurrentAndLastTwoMonths,
    ResidentRetentionSummaryForCurrentMonth, UnitsSummary,
};
use super::request::{ReportFilters, ReportKind};
use super::source::ReportSource;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Box score summaries for the current, last and two-ago weekly windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummaries {
    pub property: PeriodSeries<PropertySummary>,
    pub units: PeriodSeries<UnitsSummary>,
    pub leads: LeadsSummaryForThreeWeeks,
}

/// Everything the dashboard shows for one property on one reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub property_id: u64,
    pub reference_date: NaiveDate,
    pub property_summaries: PeriodSeries<PropertySummary>,
    pub unit_summaries: PeriodSeries<UnitsSummary>,
    pub leads: LeadsSummaryForThreeWeeks,
    pub rent: RentSummaryForCurrentAndLastTwoMonths,
    pub delinquency: DelinquencyForThreeMonths,
    pub retention: ResidentRetentionSummaryForCurrentMonth,
}

/// Fetches and extracts each report for one property, sequentially.
#[derive(Debug)]
pub struct SummaryAssembler<'a> {
    source: &'a dyn ReportSource,
    property_id: u64,
}

impl<'a> SummaryAssembler<'a> {
    pub fn new(source: &'a dyn ReportSource, property_id: u64) -> Self {
        Self {
            source,
            property_id,
        }
    }

    pub fn weekly_summaries(&self, today: NaiveDate) -> WeeklySummaries {
        let weeks = weekly_boundaries(today);
        let mut property = PeriodSeries::new();
        let mut units = PeriodSeries::new();
        let mut leads = [LeadMetrics::default(); 3];

        for (slot, window) in weeks.windows().into_iter().enumerate() {
            let filters = ReportFilters::date_range(self.property_id, window.start, window.end);
            let payload = self.source.fetch(ReportKind::BoxScore, &filters);
            let extract = extract_box_score(payload.as_ref());

            property.push(window.label(), extract.property);
            units.push(window.label(), extract.units);
            leads[slot] = extract.leads;
        }
        info!(
            property_id = self.property_id,
            %today,
            "property, unit and lead summaries assembled"
        );

        WeeklySummaries {
            property,
            units,
            leads: leads_for_three_weeks(&weeks, leads),
        }
    }

    pub fn rent_summary(&self, today: NaiveDate) -> RentSummaryForCurrentAndLastTwoMonths {
        let months = three_months_mm_yyyy(today);
        let metrics = months.ordered().map(|label| {
            let filters = ReportFilters::post_month(self.property_id, label);
            let payload = self
                .source
                .fetch(ReportKind::ComparativeDelinquency, &filters);
            extract_rent_metrics(payload.as_ref())
        });
        info!(
            property_id = self.property_id,
            month = %months.current,
            "rent billed/collected summary assembled"
        );

        rent_for_three_months(&months, metrics)
    }

    pub fn delinquency_summary(&self) -> DelinquencyForThreeMonths {
        let filters = ReportFilters::new(self.property_id);
        let payload = self
            .source
            .fetch(ReportKind::ResidentAgedReceivables, &filters);
        let summary = extract_delinquency(payload.as_ref());
        info!(
            property_id = self.property_id,
            "delinquency summary assembled"
        );
        summary
    }

    pub fn retention_summary(&self) -> ResidentRetentionSummaryForCurrentMonth {
        let filters = ReportFilters::new(self.property_id);
        let payload = self.source.fetch(ReportKind::ResidentRetention, &filters);
        let summary = extract_resident_retention(payload.as_ref());
        info!(
            property_id = self.property_id,
            "resident retention summary assembled"
        );
        summary
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardSnapshot {
        let weekly = self.weekly_summaries(today);
        DashboardSnapshot {
            property_id: self.property_id,
            reference_date: today,
            property_summaries: weekly.property,
            unit_summaries: weekly.units,
            leads: weekly.leads,
            rent: self.rent_summary(today),
            delinquency: self.delinquency_summary(),
            retention: self.retention_summary(),
        }
    }
}

/// Combines three weekly funnel slices, ordered current, last, two-ago.
pub fn leads_for_three_weeks(
    weeks: &WeekBoundaries,
    [current, last, two_ago]: [LeadMetrics; 3],
) -> LeadsSummaryForThreeWeeks {
    let [current_week, last_week, two_ago_week] = weeks.windows();
    LeadsSummaryForThreeWeeks {
        current_week_start_date: current_week.start.to_string(),
        current_week_end_date: current_week.end.to_string(),
        current_week_new_leads_count: current.new_leads,
        current_week_tours_count: current.tours,
        current_week_applications_completed_count: current.applications_completed,
        current_week_lease_approved_count: current.lease_approved,

        last_week_start_date: last_week.start.to_string(),
        last_week_end_date: last_week.end.to_string(),
        last_week_new_leads_count: last.new_leads,
        last_week_tours_count: last.tours,
        last_week_applications_completed_count: last.applications_completed,
        last_week_lease_approved_count: last.lease_approved,

        week_before_last_start_date: two_ago_week.start.to_string(),
        week_before_last_end_date: two_ago_week.end.to_string(),
        week_before_last_new_leads_count: two_ago.new_leads,
        week_before_last_tours_count: two_ago.tours,
        week_before_last_applications_completed_count: two_ago.applications_completed,
        week_before_last_lease_approved_count: two_ago.lease_approved,
    }
}

/// Combines three monthly rent slices, ordered current, last, two-ago.
pub fn rent_for_three_months(
    months: &MonthLabels,
    [current, last, two_ago]: [RentMetrics; 3],
) -> RentSummaryForCurrentAndLastTwoMonths {
    RentSummaryForCurrentAndLastTwoMonths {
        current_month_date: months.current.clone(),
        current_month_total_rent_billed: current.billed,
        current_month_total_rent_collected: current.collected,

        last_month_date: months.last.clone(),
        last_month_total_rent_billed: last.billed,
        last_month_total_rent_collected: last.collected,

        month_before_last_date: months.last_to_last.clone(),
        month_before_last_total_rent_billed: two_ago.billed,
        month_before_last_total_rent_collected: two_ago.collected,
    }
}
