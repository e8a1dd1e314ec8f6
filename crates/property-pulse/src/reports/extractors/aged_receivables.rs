use crate::reports::numeric::bucket_sum;
use crate::reports::payload::{all_rows, report_data};
use crate::reports::records::DelinquencyForThreeMonths;
use serde_json::Value;

/// Totals the aging buckets over every receivable row.
///
/// A payload that arrived but holds no usable rows totals to zero, since the
/// bucket sums are best-effort. Only a missing payload (the fetch failed)
/// leaves the buckets absent.
pub fn extract_delinquency(payload: Option<&Value>) -> DelinquencyForThreeMonths {
    let Some(payload) = payload else {
        return DelinquencyForThreeMonths::default();
    };

    let rows = all_rows(report_data(payload));
    DelinquencyForThreeMonths {
        current_month_delinquency: Some(bucket_sum(rows, "thirty_days")),
        last_month_delinquency: Some(bucket_sum(rows, "sixty_days")),
        month_before_last_delinquency: Some(bucket_sum(rows, "ninety_days")),
    }
}
