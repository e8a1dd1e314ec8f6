//! Property reporting: request building, payload retrieval, extraction into
//! flat summary records and assembly of the dashboard snapshot.

pub mod assembler;
pub mod calendar;
pub mod extractors;
pub mod numeric;
pub mod payload;
pub mod records;
pub mod request;
pub mod source;

pub use assembler::{DashboardSnapshot, SummaryAssembler, WeeklySummaries};
pub use calendar::{
    three_months_mm_yyyy, today_in, weekly_boundaries, MonthLabels, PostMonth, WeekBoundaries,
    WeekWindow,
};
pub use records::{
    DelinquencyForThreeMonths, LeadMetrics, LeadsSummaryForThreeWeeks, PeriodEntry, PeriodSeries,
    PropertySummary, RentMetrics, RentSummaryForCurrentAndLastTwoMonths,
    ResidentRetentionSummaryForCurrentMonth, UnitsSummary,
};
pub use request::{build_request, PeriodFilter, ReportFilters, ReportKind};
pub use source::{FixtureReportSource, HttpReportSource, ReportSource, SourceError};
