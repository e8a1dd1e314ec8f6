use crate::reports::numeric::to_int_rounding;
use crate::reports::payload::{field, first_row_any_shape, report_data};
use crate::reports::records::ResidentRetentionSummaryForCurrentMonth;
use serde_json::Value;

pub fn extract_resident_retention(
    payload: Option<&Value>,
) -> ResidentRetentionSummaryForCurrentMonth {
    let row = first_row_any_shape(payload.and_then(report_data));
    ResidentRetentionSummaryForCurrentMonth {
        expiring_leases: to_int_rounding(field(row, "expiring_leases")),
        renewals: to_int_rounding(field(row, "renewals")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::source::fixtures;
    use serde_json::json;

    #[test]
    fn reads_first_row() {
        let summary = extract_resident_retention(Some(&fixtures::resident_retention()));
        assert_eq!(summary.expiring_leases, Some(12));
        assert_eq!(summary.renewals, Some(9));
    }

    #[test]
    fn absent_payload_and_fields_stay_absent() {
        assert_eq!(
            extract_resident_retention(None),
            ResidentRetentionSummaryForCurrentMonth::default()
        );
        assert_eq!(
            extract_resident_retention(Some(&json!({}))),
            ResidentRetentionSummaryForCurrentMonth::default()
        );

        let payload = json!({
            "response": { "result": [{ "reportData": [{ "renewals": "4" }] }] }
        });
        let summary = extract_resident_retention(Some(&payload));
        assert_eq!(summary.expiring_leases, None);
        assert_eq!(summary.renewals, Some(4));
    }
}
