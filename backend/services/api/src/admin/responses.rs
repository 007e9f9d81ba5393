use profileera_common::types::LeadView;
use profileera_db::lead::models::Lead;

pub fn to_lead_view(lead: Lead) -> LeadView {
    LeadView {
        id: lead.id,
        name: lead.name,
        contact: lead.contact,
        linkedin: LeadView::display_url(lead.linkedin),
        naukri: LeadView::display_url(lead.naukri),
        created_at: lead.created_at,
    }
}
