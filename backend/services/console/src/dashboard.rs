use chrono::{DateTime, TimeZone};
use profileera_common::types::LeadView;

/// Leads whose name contains `term` (ignoring case) or whose contact number
/// contains it verbatim. A blank term keeps everything.
pub fn filter_leads<'a>(leads: &'a [LeadView], term: &str) -> Vec<&'a LeadView> {
    let term = term.trim();
    if term.is_empty() {
        return leads.iter().collect();
    }

    let needle = term.to_lowercase();
    leads
        .iter()
        .filter(|lead| lead.name.to_lowercase().contains(&needle) || lead.contact.contains(term))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub new_today: usize,
}

/// Counts leads, and those created on `now`'s calendar day in `now`'s zone.
pub fn stats<Tz: TimeZone>(leads: &[LeadView], now: &DateTime<Tz>) -> DashboardStats {
    let zone = now.timezone();
    let today = now.date_naive();
    let new_today = leads
        .iter()
        .filter(|lead| lead.created_at.with_timezone(&zone).date_naive() == today)
        .count();

    DashboardStats {
        total: leads.len(),
        new_today,
    }
}

pub fn render_lead(lead: &LeadView) -> String {
    format!(
        "{id}  {created}  {name}  {contact}\n    LinkedIn: {linkedin}\n    Naukri:   {naukri}",
        id = lead.id,
        created = lead.created_at.format("%Y-%m-%d %H:%M"),
        name = lead.name,
        contact = lead.contact,
        linkedin = lead.linkedin,
        naukri = lead.naukri,
    )
}
