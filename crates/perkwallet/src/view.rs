//! Plain-text rendering for the CLI commands.
//!
//! Pure functions from projections to strings so output stays testable
//! without capturing stdout.

use perkwallet_core::{
    BenefitPreview, BenefitStatus, Cadence, Card, PeriodMetrics, UsageLedgerEntry,
};

fn status_label(status: BenefitStatus) -> &'static str {
    match status {
        BenefitStatus::Available => "available",
        BenefitStatus::Used => "used",
        BenefitStatus::Expired => "expired",
    }
}

/// The dashboard: one metrics block per reporting window, then the benefits
/// expiring soonest.
pub fn render_dashboard(metrics: &[(Cadence, PeriodMetrics)], previews: &[BenefitPreview]) -> String {
    let mut out = String::new();
    for (cadence, m) in metrics {
        out.push_str(&format!(
            "{:<12} ${:>8.2} of ${:>8.2} redeemed ({:.0}%), {} of {} benefits used\n",
            cadence.label(),
            m.redeemed_value,
            m.total_value,
            m.percentage_used(),
            m.used_count,
            m.total_count,
        ));
    }

    let mut expiring: Vec<&BenefitPreview> = previews
        .iter()
        .filter(|p| p.status == BenefitStatus::Available)
        .collect();
    expiring.sort_by_key(|p| p.days_left);

    if !expiring.is_empty() {
        out.push_str("\nExpiring soon:\n");
        for p in expiring.iter().take(5) {
            out.push_str(&format!(
                "  {:>3}d  ${:>7.2}  {} ({})\n",
                p.days_left, p.value, p.name, p.card_name,
            ));
        }
    }
    out
}

/// Every benefit as a table row.
pub fn render_list(previews: &[BenefitPreview]) -> String {
    let mut out = String::from("id    status     value     cadence     ends        benefit\n");
    for p in previews {
        out.push_str(&format!(
            "{:<5} {:<10} ${:>7.2}  {:<10}  {}  {} ({})\n",
            p.benefit_id,
            status_label(p.status),
            p.value,
            p.cadence.label(),
            p.period_end,
            p.name,
            p.card_name,
        ));
    }
    out
}

pub fn render_cards(cards: &[Card]) -> String {
    let mut out = String::new();
    for card in cards {
        match &card.issuer {
            Some(issuer) => out.push_str(&format!("{:<5} {} ({issuer})\n", card.card_id, card.name)),
            None => out.push_str(&format!("{:<5} {}\n", card.card_id, card.name)),
        }
    }
    out
}

/// The usage ledger, newest first.
pub fn render_history(entries: &[UsageLedgerEntry]) -> String {
    let mut rows: Vec<&UsageLedgerEntry> = entries.iter().collect();
    rows.sort_by(|a, b| b.used_on.cmp(&a.used_on).then(b.entry_id.cmp(&a.entry_id)));

    let mut out = String::new();
    for e in rows {
        let kind = if e.was_auto_expired { "expired" } else { "used" };
        out.push_str(&format!(
            "{}  {:<7} ${:>7.2}  {} ({})\n",
            e.used_on, kind, e.value_redeemed, e.benefit_name, e.card_name,
        ));
    }
    out
}
