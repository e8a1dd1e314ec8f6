//! Coercion of loosely typed report values.
//!
//! Report fields arrive as JSON numbers, numeric strings, blanks, or not at
//! all. Every helper here accepts `Option<&Value>` so a missing key and an
//! explicit `null` read the same way, and none of them panic.
//!
//! Two policies coexist on purpose:
//! * absence propagates (`safe_float`, `to_int_rounding`, `percent_text`):
//!   anything unparseable becomes `None`;
//! * best-effort totals (`bucket_sum`): unparseable entries count as zero.

use serde_json::Value;

/// Parses a number or numeric text. `None` is the not-available sentinel for
/// missing, blank, non-finite or non-numeric input.
pub fn safe_float(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|number| number.is_finite())
}

/// Rounds half away from zero to the nearest integer.
pub fn to_int_rounding(value: Option<&Value>) -> Option<i64> {
    let number = safe_float(value)?.round();
    // i64::MAX is not representable; `as f64` lands on 2^63, one past it.
    if number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return None;
    }
    Some(number as i64)
}

/// Formats a 0-1 ratio as percentage text with two decimals, e.g. `0.7826`
/// becomes `"78.26%"`. Ratios too large to scale are `None`.
pub fn percent_text(ratio: Option<&Value>) -> Option<String> {
    let percent = round2(safe_float(ratio)? * 100.0);
    if !percent.is_finite() {
        return None;
    }
    // `+ 0.0` folds a negative zero into `0.00%`.
    Some(format!("{:.2}%", percent + 0.0))
}

/// Inverse of [`percent_text`]: `"50.00%"` gives `0.5`.
pub fn parse_percent_text(text: &str) -> Option<f64> {
    let number = text.trim().trim_end_matches('%').trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value / 100.0)
}

/// Sums `row[key]` over every row, rounded to two decimals. Rows that are not
/// objects, and entries that are missing or unparseable, contribute zero.
pub fn bucket_sum(rows: &[Value], key: &str) -> f64 {
    let total: f64 = rows
        .iter()
        .filter_map(|row| safe_float(row.get(key)))
        .sum();
    round2(total)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn safe_float_accepts_numbers_and_numeric_text() {
        assert_eq!(safe_float(Some(&json!(42))), Some(42.0));
        assert_eq!(safe_float(Some(&json!(0.25))), Some(0.25));
        assert_eq!(safe_float(Some(&json!(" 17.5 "))), Some(17.5));
    }

    #[test]
    fn safe_float_returns_sentinel_for_unusable_input() {
        assert_eq!(safe_float(None), None);
        assert_eq!(safe_float(Some(&Value::Null)), None);
        assert_eq!(safe_float(Some(&json!(""))), None);
        assert_eq!(safe_float(Some(&json!("   "))), None);
        assert_eq!(safe_float(Some(&json!("NA"))), None);
        assert_eq!(safe_float(Some(&json!("NaN"))), None);
        assert_eq!(safe_float(Some(&json!(true))), None);
        assert_eq!(safe_float(Some(&json!([1]))), None);
    }

    #[test]
    fn to_int_rounding_rounds_to_nearest() {
        assert_eq!(to_int_rounding(Some(&json!(95))), Some(95));
        assert_eq!(to_int_rounding(Some(&json!("93.6"))), Some(94));
        assert_eq!(to_int_rounding(Some(&json!(118500.4))), Some(118500));
        assert_eq!(to_int_rounding(Some(&json!("2.5"))), Some(3));
        assert_eq!(to_int_rounding(Some(&json!("ninety"))), None);
        assert_eq!(to_int_rounding(None), None);
    }

    #[test]
    fn to_int_rounding_rejects_values_outside_i64() {
        assert_eq!(to_int_rounding(Some(&json!(9223372036854775808.0))), None);
        assert_eq!(to_int_rounding(Some(&json!(1e19))), None);
        assert_eq!(
            to_int_rounding(Some(&json!(-9223372036854775808.0))),
            Some(i64::MIN)
        );
        assert_eq!(
            to_int_rounding(Some(&json!(9007199254740992.0))),
            Some(9_007_199_254_740_992)
        );
    }

    #[test]
    fn percent_text_formats_two_decimals() {
        let text = |value: Value| percent_text(Some(&value));
        assert_eq!(text(json!(0.7826)).as_deref(), Some("78.26%"));
        assert_eq!(text(json!(0.5)).as_deref(), Some("50.00%"));
        assert_eq!(text(json!("0.8043")).as_deref(), Some("80.43%"));
        assert_eq!(text(json!(1)).as_deref(), Some("100.00%"));
        assert_eq!(text(json!("n/a")), None);
        assert_eq!(percent_text(None), None);
    }

    #[test]
    fn percent_text_stays_a_valid_percentage_at_the_extremes() {
        let text = |value: Value| percent_text(Some(&value));
        assert_eq!(text(json!(1e307)), None);
        assert_eq!(text(json!(-1e307)), None);
        assert_eq!(text(json!(-0.00001)).as_deref(), Some("0.00%"));
        assert_eq!(text(json!(-0.0)).as_deref(), Some("0.00%"));
        assert_eq!(text(json!(-0.25)).as_deref(), Some("-25.00%"));
    }

    #[test]
    fn percent_text_survives_reparsing() {
        for ratio in [0.0, 0.5, 0.7065, 0.7826, 0.99999, 1.0] {
            let text = percent_text(Some(&json!(ratio))).expect("formats");
            let parsed = parse_percent_text(&text).expect("parses back");
            assert!(
                (parsed - ratio).abs() <= 0.00005,
                "{ratio} -> {text} -> {parsed}"
            );
            let reformatted = percent_text(Some(&json!(parsed)));
            assert_eq!(reformatted.as_deref(), Some(text.as_str()));
        }
        assert_eq!(parse_percent_text("n/a%"), None);
    }

    #[test]
    fn bucket_sum_totals_across_rows() {
        let rows = vec![
            json!({ "thirty_days": 1250.50, "sixty_days": 840.00, "ninety_days": 410.25 }),
            json!({ "thirty_days": 300.00, "sixty_days": 160.75, "ninety_days": 89.50 }),
        ];
        assert_eq!(bucket_sum(&rows, "thirty_days"), 1550.50);
        assert_eq!(bucket_sum(&rows, "sixty_days"), 1000.75);
        assert_eq!(bucket_sum(&rows, "ninety_days"), 499.75);
    }

    #[test]
    fn bucket_sum_counts_unparseable_entries_as_zero() {
        // Unlike safe_float, a bad entry does not make the total absent.
        let rows = vec![
            json!({ "thirty_days": "100.10" }),
            json!({ "thirty_days": "pending" }),
            json!({ "thirty_days": null }),
            json!({ "sixty_days": 5 }),
            json!("not a row"),
            json!({ "thirty_days": 0.02 }),
        ];
        assert_eq!(bucket_sum(&rows, "thirty_days"), 100.12);
        assert_eq!(safe_float(rows[1].get("thirty_days")), None);
        assert_eq!(bucket_sum(&[], "thirty_days"), 0.0);
    }
}
