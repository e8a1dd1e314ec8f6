//! Plain-text rendering of a dashboard snapshot for the terminal.

use property_pulse::reports::{
    DashboardSnapshot, LeadsSummaryForThreeWeeks, PropertySummary, UnitsSummary,
};
use std::fmt::{self, Write};

pub(crate) const ABSENT: &str = "—";

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `value` with thousands separators and `decimals` fractional digits.
fn grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut out = group_digits(whole);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        out.insert(0, '-');
    }
    out
}

/// Whole counts, e.g. `1,234`.
pub(crate) fn count(value: Option<i64>) -> String {
    match value {
        Some(value) if value < 0 => format!("-{}", group_digits(&value.unsigned_abs().to_string())),
        Some(value) => group_digits(&value.to_string()),
        None => ABSENT.to_string(),
    }
}

/// Thousands of dollars, e.g. `$125.00 K`.
pub(crate) fn currency(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("${} K", grouped(value / 1000.0, 2)),
        _ => ABSENT.to_string(),
    }
}

/// Percent text as stored on the records (`"78.26%"`) shown as `78.26 %`.
/// Text that does not parse is shown verbatim.
pub(crate) fn percent(value: Option<&str>) -> String {
    let Some(text) = value.filter(|text| !text.trim().is_empty()) else {
        return ABSENT.to_string();
    };
    match text.replace('%', "").trim().parse::<f64>() {
        Ok(number) if number.is_finite() => format!("{} %", grouped(number, 2)),
        _ => text.to_string(),
    }
}

fn as_amount(value: Option<i64>) -> Option<f64> {
    value.map(|value| value as f64)
}

pub(crate) fn render_dashboard(snapshot: &DashboardSnapshot) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_dashboard(&mut out, snapshot)?;
    Ok(out)
}

fn write_dashboard(out: &mut impl Write, snapshot: &DashboardSnapshot) -> fmt::Result {
    writeln!(
        out,
        "Dashboard for property {} (as of {})",
        snapshot.property_id, snapshot.reference_date
    )?;

    write_overview(out, snapshot)?;
    write_operations(out, snapshot)?;

    writeln!(out, "\nResident retention")?;
    writeln!(
        out,
        "  Expiring Leases: {}",
        count(snapshot.retention.expiring_leases)
    )?;
    writeln!(out, "  Renewals: {}", count(snapshot.retention.renewals))?;
    Ok(())
}

fn write_overview(out: &mut impl Write, snapshot: &DashboardSnapshot) -> fmt::Result {
    match snapshot.property_summaries.latest() {
        Some(latest) => {
            writeln!(out, "\nOverview ({})", latest.label)?;
            write_property_kpis(out, &latest.summary)?;
        }
        None => writeln!(out, "\nOverview: no property data")?,
    }

    let rent = &snapshot.rent;
    writeln!(out, "\nRent billed vs collected")?;
    for (label, billed, collected) in [
        (
            &rent.current_month_date,
            rent.current_month_total_rent_billed,
            rent.current_month_total_rent_collected,
        ),
        (
            &rent.last_month_date,
            rent.last_month_total_rent_billed,
            rent.last_month_total_rent_collected,
        ),
        (
            &rent.month_before_last_date,
            rent.month_before_last_total_rent_billed,
            rent.month_before_last_total_rent_collected,
        ),
    ] {
        writeln!(
            out,
            "  {label}: billed {}, collected {}",
            currency(as_amount(billed)),
            currency(as_amount(collected))
        )?;
    }

    let delinquency = &snapshot.delinquency;
    writeln!(out, "\nDelinquency")?;
    writeln!(
        out,
        "  0-30 Days: {}",
        currency(delinquency.current_month_delinquency)
    )?;
    writeln!(
        out,
        "  30-60 Days: {}",
        currency(delinquency.last_month_delinquency)
    )?;
    writeln!(
        out,
        "  60-90 Days: {}",
        currency(delinquency.month_before_last_delinquency)
    )?;

    writeln!(out, "\nProperty summary by week")?;
    for entry in &snapshot.property_summaries {
        let summary = &entry.summary;
        writeln!(
            out,
            "  {}: units {}, occupied {}, leased {}, evictions/skips {}",
            entry.label,
            count(summary.total_units),
            percent(summary.occupied_units_percentage.as_deref()),
            percent(summary.leased_units_percentage.as_deref()),
            count(Some(summary.evictions_and_skips_occurred)),
        )?;
    }
    Ok(())
}

fn write_property_kpis(out: &mut impl Write, summary: &PropertySummary) -> fmt::Result {
    writeln!(out, "  Total Units: {}", count(summary.total_units))?;
    writeln!(
        out,
        "  Rentable Units: {}",
        count(summary.total_rentable_units)
    )?;
    writeln!(out, "  Excluded Units: {}", count(summary.excluded_units))?;
    writeln!(
        out,
        "  Occupied %: {}",
        percent(summary.occupied_units_percentage.as_deref())
    )?;
    writeln!(
        out,
        "  Leased %: {}",
        percent(summary.leased_units_percentage.as_deref())
    )?;
    writeln!(
        out,
        "  Trend %: {}",
        percent(summary.trend_percentage.as_deref())
    )?;
    writeln!(
        out,
        "  Evictions/Skips: {}",
        count(Some(summary.evictions_and_skips_occurred))
    )
}

fn write_operations(out: &mut impl Write, snapshot: &DashboardSnapshot) -> fmt::Result {
    match snapshot.unit_summaries.latest() {
        Some(latest) => {
            writeln!(out, "\nOperations ({})", latest.label)?;
            write_unit_kpis(out, &latest.label, &latest.summary)?;
        }
        None => writeln!(out, "\nOperations: no unit data")?,
    }

    writeln!(out, "\nLeads & applications (3 weeks)")?;
    write_lead_weeks(out, &snapshot.leads)
}

fn write_unit_kpis(out: &mut impl Write, label: &str, summary: &UnitsSummary) -> fmt::Result {
    writeln!(
        out,
        "  Occupied Units: {}",
        count(summary.count_of_occupied_units)
    )?;
    writeln!(
        out,
        "  Vacant Units: {}",
        count(summary.count_of_vacant_units)
    )?;
    writeln!(
        out,
        "  Move-ins ({label}): {}",
        count(summary.count_of_total_move_ins)
    )?;
    writeln!(
        out,
        "  Move-outs ({label}): {}",
        count(summary.count_of_total_move_out)
    )
}

fn write_lead_weeks(out: &mut impl Write, leads: &LeadsSummaryForThreeWeeks) -> fmt::Result {
    let weeks = [
        (
            "Current",
            &leads.current_week_start_date,
            &leads.current_week_end_date,
            [
                leads.current_week_new_leads_count,
                leads.current_week_tours_count,
                leads.current_week_applications_completed_count,
                leads.current_week_lease_approved_count,
            ],
        ),
        (
            "Last",
            &leads.last_week_start_date,
            &leads.last_week_end_date,
            [
                leads.last_week_new_leads_count,
                leads.last_week_tours_count,
                leads.last_week_applications_completed_count,
                leads.last_week_lease_approved_count,
            ],
        ),
        (
            "Week Before Last",
            &leads.week_before_last_start_date,
            &leads.week_before_last_end_date,
            [
                leads.week_before_last_new_leads_count,
                leads.week_before_last_tours_count,
                leads.week_before_last_applications_completed_count,
                leads.week_before_last_lease_approved_count,
            ],
        ),
    ];

    for (name, start, end, [new_leads, tours, completed, approved]) in weeks {
        write!(
            out,
            "  {name} ({start} → {end}): new leads {}, tours {}",
            count(new_leads),
            count(tours)
        )?;
        writeln!(
            out,
            ", applications completed {}, lease approved {}",
            count(completed),
            count(approved)
        )?;
    }
    Ok(())
}
