// src/domain/filters.rs

use super::lead::{Lead, SocialLead};

/// Select value meaning "no filter".
pub const ALL: &str = "all";

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle))
}

fn normalized(q: &str) -> Option<String> {
    let q = q.trim();
    (!q.is_empty()).then(|| q.to_lowercase())
}

fn selected(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != ALL).then_some(value)
}

/// Search box plus status / source selects on the email outreach page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub search: String,
    pub status: String,
    pub source: String,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        let matches_search = match normalized(&self.search) {
            None => true,
            Some(q) => {
                contains_ci(lead.full_name.as_deref(), &q)
                    || contains_ci(lead.company_name.as_deref(), &q)
                    || contains_ci(lead.email.as_deref(), &q)
                    || contains_ci(lead.context.as_deref(), &q)
            }
        };
        let matches_status =
            selected(&self.status).map_or(true, |s| lead.outreach_status.as_deref() == Some(s));
        let matches_source =
            selected(&self.source).map_or(true, |s| lead.lead_source.as_deref() == Some(s));

        matches_search && matches_status && matches_source
    }

    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|l| self.matches(l)).collect()
    }

    pub fn is_active(&self) -> bool {
        normalized(&self.search).is_some()
            || selected(&self.status).is_some()
            || selected(&self.source).is_some()
    }
}

/// Search box plus status select on the direct-message page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLeadFilter {
    pub search: String,
    pub status: String,
}

impl SocialLeadFilter {
    pub fn matches(&self, lead: &SocialLead) -> bool {
        let matches_search = match normalized(&self.search) {
            None => true,
            Some(q) => {
                contains_ci(lead.username.as_deref(), &q)
                    || contains_ci(lead.fullname.as_deref(), &q)
                    || contains_ci(lead.biography.as_deref(), &q)
                    || contains_ci(lead.search_term.as_deref(), &q)
            }
        };
        let matches_status = selected(&self.status).map_or(true, |s| lead.status == s);

        matches_search && matches_status
    }

    pub fn apply<'a>(&self, leads: &'a [SocialLead]) -> Vec<&'a SocialLead> {
        leads.iter().filter(|l| self.matches(l)).collect()
    }

    pub fn is_active(&self) -> bool {
        normalized(&self.search).is_some() || selected(&self.status).is_some()
    }
}
