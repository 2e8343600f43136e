// src/spreadsheets/leads_xlsx.rs
use crate::domain::lead::{format_source, Lead};
use crate::errors::ServerError;
use crate::outreach::status::{status_label, Channel};
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::Workbook;

const HEADERS: [&str; 10] = [
    "Name",
    "Company",
    "Emails",
    "Phone",
    "Website",
    "Source",
    "Status",
    "Attempts",
    "Next Follow-up",
    "Created",
];

/// Build the CRM workbook in memory.
pub fn leads_workbook(leads: &[Lead]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write header '{header}': {e}")))?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let r = (i + 1) as u32;
        let cells = [
            lead.full_name.clone().unwrap_or_default(),
            lead.company_name.clone().unwrap_or_default(),
            lead.all_emails().join(", "),
            lead.phone.clone().unwrap_or_default(),
            lead.website.clone().unwrap_or_default(),
            format_source(lead.lead_source.as_deref()),
            status_label(lead.outreach_status.as_deref(), Channel::Email).to_string(),
        ];
        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string(r, col as u16, value)
                .map_err(|e| ServerError::XlsxError(format!("{}: {e}", HEADERS[col])))?;
        }

        worksheet
            .write_number(r, 7, lead.attempts as f64)
            .map_err(|e| ServerError::XlsxError(format!("attempts: {e}")))?;

        let next = lead
            .next_follow_up_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        worksheet
            .write_string(r, 8, next)
            .map_err(|e| ServerError::XlsxError(format!("next follow-up: {e}")))?;

        worksheet
            .write_string(r, 9, lead.created_at.format("%Y-%m-%d %H:%M").to_string())
            .map_err(|e| ServerError::XlsxError(format!("created: {e}")))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_leads_xlsx(leads: &[Lead], filename: &str) -> ResultResp {
    let buffer = leads_workbook(leads)?;
    xlsx_response(buffer, filename)
}
