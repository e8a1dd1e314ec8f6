use serde::{Deserialize, Serialize};

/// Occupancy and leasing snapshot of one property for one weekly window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub total_units: Option<i64>,
    pub total_rentable_units: Option<i64>,
    pub excluded_units: Option<i64>,
    pub occupied_units_percentage: Option<String>,
    pub leased_units_percentage: Option<String>,
    pub trend_percentage: Option<String>,
    /// Skips plus completed evictions; a missing side counts as zero.
    pub evictions_and_skips_occurred: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitsSummary {
    pub count_of_occupied_units: Option<i64>,
    pub count_of_on_notice_rented_units: Option<i64>,
    pub count_of_on_notice_unrented_units: Option<i64>,
    pub count_of_vacant_units: Option<i64>,
    pub count_of_vacant_rented_units: Option<i64>,
    pub count_of_vacant_unrented_units: Option<i64>,
    pub count_of_total_move_ins: Option<i64>,
    pub count_of_total_move_out: Option<i64>,
}

/// Leasing funnel for one weekly window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadMetrics {
    pub new_leads: Option<i64>,
    pub tours: Option<i64>,
    pub applications_completed: Option<i64>,
    pub lease_approved: Option<i64>,
}

/// Leasing funnel across the current, last and two-ago weekly windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadsSummaryForThreeWeeks {
    pub current_week_start_date: String,
    pub current_week_end_date: String,
    pub current_week_new_leads_count: Option<i64>,
    pub current_week_tours_count: Option<i64>,
    pub current_week_applications_completed_count: Option<i64>,
    pub current_week_lease_approved_count: Option<i64>,

    pub last_week_start_date: String,
    pub last_week_end_date: String,
    pub last_week_new_leads_count: Option<i64>,
    pub last_week_tours_count: Option<i64>,
    pub last_week_applications_completed_count: Option<i64>,
    pub last_week_lease_approved_count: Option<i64>,

    pub week_before_last_start_date: String,
    pub week_before_last_end_date: String,
    pub week_before_last_new_leads_count: Option<i64>,
    pub week_before_last_tours_count: Option<i64>,
    pub week_before_last_applications_completed_count: Option<i64>,
    pub week_before_last_lease_approved_count: Option<i64>,
}

/// Billed versus collected rent for one post month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RentMetrics {
    pub billed: Option<i64>,
    pub collected: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentSummaryForCurrentAndLastTwoMonths {
    pub current_month_date: String,
    pub current_month_total_rent_billed: Option<i64>,
    pub current_month_total_rent_collected: Option<i64>,

    pub last_month_date: String,
    pub last_month_total_rent_billed: Option<i64>,
    pub last_month_total_rent_collected: Option<i64>,

    pub month_before_last_date: String,
    pub month_before_last_total_rent_billed: Option<i64>,
    pub month_before_last_total_rent_collected: Option<i64>,
}

/// Aged receivables buckets: 0-30, 30-60 and 60-90 days past due.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelinquencyForThreeMonths {
    pub current_month_delinquency: Option<f64>,
    pub last_month_delinquency: Option<f64>,
    pub month_before_last_delinquency: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResidentRetentionSummaryForCurrentMonth {
    pub expiring_leases: Option<i64>,
    pub renewals: Option<i64>,
}

/// Records keyed by period label, most recent period first. Serializes as a
/// plain list of `{label, summary}` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodSeries<T> {
    entries: Vec<PeriodEntry<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry<T> {
    pub label: String,
    pub summary: T,
}

impl<T> PeriodSeries<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an older period. A label already present is replaced in
    /// place so ordering stays most-recent-first.
    pub fn push(&mut self, label: impl Into<String>, summary: T) {
        let label = label.into();
        match self.entries.iter_mut().find(|entry| entry.label == label) {
            Some(existing) => existing.summary = summary,
            None => self.entries.push(PeriodEntry { label, summary }),
        }
    }

    pub fn latest(&self) -> Option<&PeriodEntry<T>> {
        self.entries.first()
    }

    pub fn get(&self, label: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.summary)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

}

impl<T> Default for PeriodSeries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a PeriodSeries<T> {
    type Item = &'a PeriodEntry<T>;
    type IntoIter = std::slice::Iter<'a, PeriodEntry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
