//! Request bodies for the `getReportData` r2 method.
//!
//! Templates are built fresh for every call and never shared, so applying a
//! filter set cannot leak into another request.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    BoxScore,
    ComparativeDelinquency,
    ResidentAgedReceivables,
    ResidentRetention,
}

impl ReportKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BoxScore,
            Self::ComparativeDelinquency,
            Self::ResidentAgedReceivables,
            Self::ResidentRetention,
        ]
    }

    pub const fn report_name(self) -> &'static str {
        match self {
            Self::BoxScore => "box_score",
            Self::ComparativeDelinquency => "comparative_delinquency",
            Self::ResidentAgedReceivables => "resident_aged_receivables",
            Self::ResidentRetention => "resident_retention",
        }
    }

    pub const fn report_version(self) -> &'static str {
        match self {
            Self::BoxScore => "4.0",
            Self::ComparativeDelinquency => "2.3",
            Self::ResidentAgedReceivables => "3.5",
            Self::ResidentRetention => "3.1",
        }
    }

    fn template_filters(self) -> Value {
        match self {
            Self::BoxScore => json!({
                "property_group_ids": [],
                "period": {
                    "period_type": "daterange",
                    "daterange-start": "",
                    "daterange-end": "",
                    "allow_future_periods": "true"
                },
                "summarize_by": "property",
                "consolidate_by": "no_consolidation",
                "rows_with_no_data": "0",
                "data_set": ""
            }),
            Self::ComparativeDelinquency => json!({
                "property_group_ids": [],
                "summarize_by": "summarize_by_period",
                "calculate_delinquency_using": "post_month",
                "period": {
                    "period_type": "pm",
                    "pm": "",
                    "allow_future_periods": "true"
                },
                "custom_period_date": { "allow_future_periods": "true" },
                "custom_period": { "period_type": "today", "allow_future_periods": "true" },
                "compare_against_trailing_periods": "0",
                "include_outstanding_delinquency": "0",
                "exclude_write_offs": "0",
                "lease_status_types": ["3", "4", "5"],
                "compare_against_prior_year": "0",
                "include_credit_balances": "0",
                "consolidate_by": "no_consolidation",
                "arrange_by": "0"
            }),
            Self::ResidentAgedReceivables => json!({
                "property_group_ids": [],
                "calculate_delinquency_using": "post_month",
                "period": { "period_type": "currentpm", "allow_future_periods": "false" },
                "custom_period": { "allow_future_periods": "false" },
                "lease_status_type_ids": ["3", "4", "5"],
                "summarize_by": "do_not_summarize",
                "group_by": "group_by_lease",
                "display": "do_not_expand",
                "unpaid_deposit_charges": "0",
                "minimum_unpaid_balance": "",
                "inter_company": "0",
                "lease_occupancy_types": "100",
                "lease_terms": "all",
                "consolidate_by": "no_consolidation",
                "arrange_by_property": 0,
                "subtotals": 0
            }),
            Self::ResidentRetention => json!({
                "property_group_ids": [],
                "period": {
                    "period_type": "currentcm",
                    "allow_future_periods": "1",
                    "trailing_periods": 0,
                    "future_periods": 0
                },
                "summarize_by": "month",
                "consolidate_by": "no_consolidation",
                "lease_status": "all",
                "early_move_out_grace_period": "0",
                "drill_in_column": "",
                "unit_type_id": "",
                "property_floorplan_id": "",
                "month_id": "",
                "year_id": "",
                "previous_summarize_by": ""
            }),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_name())
    }
}

/// Which period a report instance covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodFilter {
    /// The template's own period (current post month or calendar month).
    Default,
    DateRange { start: NaiveDate, end: NaiveDate },
    /// A post month label, `MM/YYYY`.
    PostMonth(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilters {
    pub property_id: u64,
    pub period: PeriodFilter,
}

impl ReportFilters {
    pub fn new(property_id: u64) -> Self {
        Self {
            property_id,
            period: PeriodFilter::Default,
        }
    }

    pub fn date_range(property_id: u64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            property_id,
            period: PeriodFilter::DateRange { start, end },
        }
    }

    pub fn post_month(property_id: u64, label: impl Into<String>) -> Self {
        Self {
            property_id,
            period: PeriodFilter::PostMonth(label.into()),
        }
    }
}

const REQUEST_ID: u32 = 15;

/// Builds the request body for `kind` with `filters` applied. A period filter
/// that does not fit the report kind leaves the template period untouched.
pub fn build_request(kind: ReportKind, filters: &ReportFilters) -> Value {
    let mut report_filters = kind.template_filters();
    report_filters["property_group_ids"] = json!([filters.property_id]);

    match (&filters.period, kind) {
        (PeriodFilter::DateRange { start, end }, ReportKind::BoxScore) => {
            report_filters["period"]["daterange-start"] = json!(start.to_string());
            report_filters["period"]["daterange-end"] = json!(end.to_string());
        }
        (PeriodFilter::PostMonth(label), ReportKind::ComparativeDelinquency) => {
            report_filters["period"]["pm"] = json!(label);
        }
        _ => {}
    }

    json!({
        "auth": { "type": "apikey" },
        "requestId": REQUEST_ID,
        "method": {
            "name": "getReportData",
            "version": "r2",
            "params": {
                "reportName": kind.report_name(),
                "reportVersion": kind.report_version(),
                "filters": report_filters
            }
        }
    })
}
