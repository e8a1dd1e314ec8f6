use crate::reports::numeric::to_int_rounding;
use crate::reports::payload::{field, first_row_any_shape, report_data};
use crate::reports::records::RentMetrics;
use serde_json::Value;

/// Billed (`amount_due_0`) and collected (`total_allocations_0`) rent for the
/// month the payload was requested for.
pub fn extract_rent_metrics(payload: Option<&Value>) -> RentMetrics {
    let row = first_row_any_shape(payload.and_then(report_data));
    RentMetrics {
        billed: to_int_rounding(field(row, "amount_due_0")),
        collected: to_int_rounding(field(row, "total_allocations_0")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::source::fixtures;
    use serde_json::json;

    fn wrap(report_data: Value) -> Value {
        json!({ "response": { "result": [{ "reportData": report_data }] } })
    }

    #[test]
    fn list_shaped_report_uses_first_row() {
        let metrics = extract_rent_metrics(Some(&fixtures::comparative_delinquency()));
        assert_eq!(
            metrics,
            RentMetrics {
                billed: Some(125000),
                collected: Some(118500),
            }
        );
    }

    #[test]
    fn map_shaped_report_uses_first_list_entry() {
        let payload = wrap(json!({
            "report_title": "Comparative Delinquency",
            "totals": [],
            "periods": [
                { "amount_due_0": "98000.40", "total_allocations_0": 91000.6 },
                { "amount_due_0": 1, "total_allocations_0": 1 }
            ],
            "other": [{ "amount_due_0": 2 }]
        }));
        let metrics = extract_rent_metrics(Some(&payload));
        assert_eq!(metrics.billed, Some(98000));
        assert_eq!(metrics.collected, Some(91001));
    }

    #[test]
    fn unusable_shapes_yield_absent_metrics() {
        for payload in [
            None,
            Some(json!({})),
            Some(wrap(json!([]))),
            Some(wrap(json!({ "periods": [] }))),
            Some(wrap(json!("not rows"))),
        ] {
            assert_eq!(
                extract_rent_metrics(payload.as_ref()),
                RentMetrics::default()
            );
        }
    }

    #[test]
    fn one_bad_field_does_not_hide_the_other() {
        let payload = wrap(json!([{ "amount_due_0": "pending", "total_allocations_0": 500 }]));
        let metrics = extract_rent_metrics(Some(&payload));
        assert_eq!(metrics.billed, None);
        assert_eq!(metrics.collected, Some(500));
    }
}
