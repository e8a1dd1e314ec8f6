use crate::reports::numeric::{percent_text, to_int_rounding};
use crate::reports::payload::{field, first_row_of, report_data, Row};
use crate::reports::records::{LeadMetrics, PropertySummary, UnitsSummary};
use serde_json::Value;

const AVAILABILITY: &[&str] = &["availability"];
const PULSE: &[&str] = &["property_pulse", "pulse"];
const LEAD_ACTIVITY: &[&str] = &["lead_activity"];
const LEAD_CONVERSIONS: &[&str] = &["lead_conversions"];

/// Everything one box score payload contributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxScoreExtract {
    pub property: PropertySummary,
    pub units: UnitsSummary,
    pub leads: LeadMetrics,
}

/// First row of each box score section, located once per payload.
struct Sections<'a> {
    availability: Option<&'a Row>,
    pulse: Option<&'a Row>,
    lead_activity: Option<&'a Row>,
    lead_conversions: Option<&'a Row>,
}

impl<'a> Sections<'a> {
    fn locate(payload: Option<&'a Value>) -> Self {
        let report = payload.and_then(report_data);
        Self {
            availability: first_row_of(report, AVAILABILITY),
            pulse: first_row_of(report, PULSE),
            lead_activity: first_row_of(report, LEAD_ACTIVITY),
            lead_conversions: first_row_of(report, LEAD_CONVERSIONS),
        }
    }

    fn property(&self) -> PropertySummary {
        let availability = self.availability;
        let skips = to_int_rounding(field(self.pulse, "skips")).unwrap_or(0);
        let evictions = to_int_rounding(field(self.pulse, "evictions_completed")).unwrap_or(0);

        PropertySummary {
            total_units: to_int_rounding(field(availability, "total_units")),
            total_rentable_units: to_int_rounding(field(availability, "total_rentable_units")),
            excluded_units: to_int_rounding(field(availability, "excluded_units")),
            occupied_units_percentage: percent_text(field(availability, "percent_occupied")),
            leased_units_percentage: percent_text(field(availability, "percent_leased")),
            trend_percentage: percent_text(field(availability, "avg_not_exposed_leased_units")),
            evictions_and_skips_occurred: skips.saturating_add(evictions),
        }
    }

    fn units(&self) -> UnitsSummary {
        let availability = self.availability;
        UnitsSummary {
            count_of_occupied_units: to_int_rounding(field(availability, "occupied_units")),
            count_of_on_notice_rented_units: to_int_rounding(field(
                availability,
                "notice_rented_units",
            )),
            count_of_on_notice_unrented_units: to_int_rounding(field(
                availability,
                "notice_unrented_units",
            )),
            count_of_vacant_units: to_int_rounding(field(availability, "vacant_units")),
            count_of_vacant_rented_units: to_int_rounding(field(
                availability,
                "vacant_rented_units",
            )),
            count_of_vacant_unrented_units: to_int_rounding(field(
                availability,
                "vacant_unrented_units",
            )),
            count_of_total_move_ins: to_int_rounding(field(self.pulse, "move_ins")),
            count_of_total_move_out: to_int_rounding(field(self.pulse, "move_outs")),
        }
    }

    fn leads(&self) -> LeadMetrics {
        LeadMetrics {
            new_leads: to_int_rounding(field(self.lead_activity, "new_leads")),
            tours: to_int_rounding(field(self.lead_activity, "unique_visits_tours")),
            applications_completed: to_int_rounding(field(self.lead_conversions, "completed")),
            lease_approved: to_int_rounding(field(self.lead_conversions, "approved")),
        }
    }
}

pub fn extract_box_score(payload: Option<&Value>) -> BoxScoreExtract {
    let sections = Sections::locate(payload);
    BoxScoreExtract {
        property: sections.property(),
        units: sections.units(),
        leads: sections.leads(),
    }
}

pub fn extract_property_summary(payload: Option<&Value>) -> PropertySummary {
    Sections::locate(payload).property()
}

pub fn extract_units_summary(payload: Option<&Value>) -> UnitsSummary {
    Sections::locate(payload).units()
}

pub fn extract_lead_metrics(payload: Option<&Value>) -> LeadMetrics {
    Sections::locate(payload).leads()
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
    fn property_summary_from_full_payload() {
        let payload = fixtures::box_score();
        let summary = extract_property_summary(Some(&payload));
        assert_eq!(
            summary,
            PropertySummary {
                total_units: Some(95),
                total_rentable_units: Some(93),
                excluded_units: Some(1),
                occupied_units_percentage: Some("78.26%".to_string()),
                leased_units_percentage: Some("80.43%".to_string()),
                trend_percentage: Some("70.65%".to_string()),
                evictions_and_skips_occurred: 3,
            }
        );
    }

    #[test]
    fn units_and_leads_from_full_payload() {
        let extract = extract_box_score(Some(&fixtures::box_score()));
        assert_eq!(extract.units.count_of_occupied_units, Some(74));
        assert_eq!(extract.units.count_of_on_notice_rented_units, Some(6));
        assert_eq!(extract.units.count_of_on_notice_unrented_units, Some(3));
        assert_eq!(extract.units.count_of_vacant_units, Some(12));
        assert_eq!(extract.units.count_of_vacant_rented_units, Some(5));
        assert_eq!(extract.units.count_of_vacant_unrented_units, Some(7));
        assert_eq!(extract.units.count_of_total_move_ins, Some(9));
        assert_eq!(extract.units.count_of_total_move_out, Some(7));
        assert_eq!(
            extract.leads,
            LeadMetrics {
                new_leads: Some(42),
                tours: Some(18),
                applications_completed: Some(11),
                lease_approved: Some(8),
            }
        );
    }

    #[test]
    fn missing_pulse_defaults_evictions_to_zero_but_keeps_absence_elsewhere() {
        let payload = wrap(json!({
            "availability": [{ "percent_occupied": 0.7826 }]
        }));
        let summary = extract_property_summary(Some(&payload));
        assert_eq!(summary.evictions_and_skips_occurred, 0);
        assert_eq!(summary.total_units, None);
        assert_eq!(summary.total_rentable_units, None);
        assert_eq!(summary.occupied_units_percentage.as_deref(), Some("78.26%"));
        assert_eq!(summary.leased_units_percentage, None);
    }

    #[test]
    fn legacy_pulse_section_name_is_accepted() {
        let payload = wrap(json!({
            "pulse": [{ "skips": "2", "evictions_completed": null, "move_ins": 4 }]
        }));
        let extract = extract_box_score(Some(&payload));
        assert_eq!(extract.property.evictions_and_skips_occurred, 2);
        assert_eq!(extract.units.count_of_total_move_ins, Some(4));
        assert_eq!(extract.units.count_of_total_move_out, None);
    }

    #[test]
    fn unparseable_fields_degrade_individually() {
        let payload = wrap(json!({
            "availability": [{
                "total_units": "ninety-five",
                "total_rentable_units": "93",
                "percent_leased": "",
                "occupied_units": 74.4
            }],
            "property_pulse": [{ "skips": "one", "evictions_completed": 2 }],
            "lead_activity": [{ "new_leads": "n/a", "unique_visits_tours": "18" }]
        }));
        let extract = extract_box_score(Some(&payload));
        assert_eq!(extract.property.total_units, None);
        assert_eq!(extract.property.total_rentable_units, Some(93));
        assert_eq!(extract.property.leased_units_percentage, None);
        assert_eq!(extract.property.evictions_and_skips_occurred, 2);
        assert_eq!(extract.units.count_of_occupied_units, Some(74));
        assert_eq!(extract.leads.new_leads, None);
        assert_eq!(extract.leads.tours, Some(18));
        assert_eq!(extract.leads.applications_completed, None);
    }

    #[test]
    fn only_first_row_of_each_section_is_used() {
        let payload = wrap(json!({
            "availability": [{ "total_units": 10 }, { "total_units": 90 }]
        }));
        assert_eq!(
            extract_property_summary(Some(&payload)).total_units,
            Some(10)
        );
    }

    #[test]
    fn empty_and_absent_payloads_produce_absent_records() {
        for payload in [
            None,
            Some(json!({})),
            Some(json!({ "response": null })),
            Some(json!([])),
        ] {
            let extract = extract_box_score(payload.as_ref());
            assert_eq!(extract.property, PropertySummary::default());
            assert_eq!(extract.units, UnitsSummary::default());
            assert_eq!(extract.leads, LeadMetrics::default());
        }
    }
}
