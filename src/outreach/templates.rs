// src/outreach/templates.rs
//
// Outreach copy for the direct-message channel (Instagram / WhatsApp) and
// the email sequence. Every function is a pure mapping from lead variables
// to text.

use serde::Serialize;

use super::classifier::{detect_line_focus, LineFocus};

const FALLBACK_FIRST_NAME: &str = "there";
const FALLBACK_STORE: &str = "your store";
const FALLBACK_BUSINESS: &str = "your business";
const FALLBACK_COUNTRY: &str = "your region";
const FALLBACK_PRODUCT_FOCUS: &str = "Islamicwear";

/// The slice of a lead that message templates read. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadVariables {
    pub contact_first_name: Option<String>,
    pub business_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub product_focus: Option<String>,
    pub notes_for_outreach: Option<String>,
    pub username: Option<String>,
    pub fullname: Option<String>,
    pub biography: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTemplate {
    pub subject_options: Vec<String>,
    pub body: String,
}

/// Position in the two-step direct-message follow-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmStage {
    FollowUp1,
    FollowUp2,
}

impl DmStage {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(DmStage::FollowUp1),
            2 => Some(DmStage::FollowUp2),
            _ => None,
        }
    }
}

/// Position in the email follow-up sequence. Stage 0 is `initial_email`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStage {
    FollowUp1,
    FollowUp2,
    BreakUp,
}

impl EmailStage {
    pub const ALL: [EmailStage; 3] = [EmailStage::FollowUp1, EmailStage::FollowUp2, EmailStage::BreakUp];

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(EmailStage::FollowUp1),
            2 => Some(EmailStage::FollowUp2),
            3 => Some(EmailStage::BreakUp),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            EmailStage::FollowUp1 => 1,
            EmailStage::FollowUp2 => 2,
            EmailStage::BreakUp => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EmailStage::FollowUp1 => "Follow-up 1",
            EmailStage::FollowUp2 => "Follow-up 2",
            EmailStage::BreakUp => "Break-up",
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn first_name(name: Option<&str>) -> &str {
    name.and_then(|n| n.split(' ').next())
        .filter(|first| !first.is_empty())
        .unwrap_or(FALLBACK_FIRST_NAME)
}

fn in_city(city: Option<&str>) -> String {
    city.map(|c| format!(" in {c}")).unwrap_or_default()
}

/// Name used by the direct-message templates: full name first, then contact name.
fn dm_name(lead: &LeadVariables) -> &str {
    first_name(present(&lead.fullname).or(present(&lead.contact_first_name)))
}

fn dm_business(lead: &LeadVariables) -> &str {
    present(&lead.business_name)
        .or(present(&lead.username))
        .unwrap_or(FALLBACK_STORE)
}

// ========================================
// INSTAGRAM / WHATSAPP
// ========================================

/// Opening direct message. Wording follows the line detected in the bio.
pub fn instagram_dm(lead: &LeadVariables) -> String {
    let name = dm_name(lead);
    let business = dm_business(lead);

    match detect_line_focus(present(&lead.biography)) {
        LineFocus::Mens => format!(
            "Hi {name}, this is Amir from Al-Dar Apparel in Dubai.

We manufacture premium men's thobes/jubbas for retailers like {business}, under our brand or your own label.

Our MOQs start around 250 pcs per style, with regular shipping worldwide.

If this might be relevant, I can share a 2-page catalog + price/MOQ summary here or by email – what do you prefer?"
        ),
        LineFocus::Womens => format!(
            "Hi {name}, this is Amir from Al-Dar Apparel in Dubai.

We manufacture premium abayas, jilbabs and women's Islamicwear for retailers like {business}, either under our Al-Dar brand or your private label.

Our MOQs start around 250 pcs per style, with regular shipping worldwide.

If this could fit your range, I can share a 2-page catalog + price/MOQ summary here or by email – what's easier for you?"
        ),
        LineFocus::Family => format!(
            "Hi {name}, this is Amir from Al-Dar Apparel in Dubai.

We manufacture premium men's thobes and women's Islamicwear (abayas, jilbabs, etc.) for retailers like {business}, under our brand or your own label.

MOQs start around 250 pcs per style, with regular shipping worldwide.

If it's relevant, I can send a 2-page catalog + price/MOQ summary here or by email – which do you prefer?"
        ),
    }
}

pub fn whatsapp_follow_up(lead: &LeadVariables, stage: DmStage) -> String {
    let name = dm_name(lead);
    let business = dm_business(lead);

    match stage {
        DmStage::FollowUp1 => {
            let city = in_city(present(&lead.city));
            format!(
                "Hi {name}, just checking you saw my message about supplying thobes/abayas/Islamicwear to {business}{city}.

I can send a very short catalog + price/MOQ overview so you can decide quickly if it's a fit.

If it's not relevant, a quick \"no\" is totally fine."
            )
        }
        DmStage::FollowUp2 => format!(
            "Hi {name}, I'll assume now isn't the right time for {business} to look at a new Islamicwear supplier.

I'll close this on my side – but if you ever want to see the 2-page catalog + wholesale price ranges, just send me a quick \"catalog\" and I'll share it."
        ),
    }
}

// ========================================
// EMAIL
// ========================================

/// First email of the sequence. `focus` overrides detection from the
/// product focus (or, failing that, the bio).
pub fn initial_email(lead: &LeadVariables, focus: Option<LineFocus>) -> EmailTemplate {
    let focus = focus.unwrap_or_else(|| {
        detect_line_focus(present(&lead.product_focus).or(present(&lead.biography)))
    });
    let name = first_name(present(&lead.contact_first_name));
    let business = present(&lead.business_name).unwrap_or(FALLBACK_BUSINESS);
    let city = in_city(present(&lead.city));
    let country = present(&lead.country).unwrap_or(FALLBACK_COUNTRY);
    let product_focus = present(&lead.product_focus).unwrap_or(FALLBACK_PRODUCT_FOCUS);
    let notes = present(&lead.notes_for_outreach)
        .map(|n| format!(" – {n}"))
        .unwrap_or_default();

    let intro = format!("I came across {business}{city} and saw you focus on {product_focus}{notes}.");

    let (subject_options, range) = match focus {
        LineFocus::Mens => (
            vec![
                format!("Thobes for {business}{city}"),
                format!("New thobe supplier for {business}"),
            ],
            "premium men's thobes/jubbas for retailers and online stores in the UK, Europe, North America and South Africa, under our brand or yours",
        ),
        LineFocus::Womens => (
            vec![
                format!("Abayas for {business}{city}"),
                format!("New abaya & jilbab supplier for {business}"),
            ],
            "premium abayas, jilbabs and women's Islamicwear (and men's thobes where needed) for retailers and online stores in the UK, Europe, North America and South Africa, under our brand or your private label",
        ),
        LineFocus::Family => (
            vec![
                format!("Men's & women's Islamicwear for {business}"),
                "New supplier for your Islamicwear range".to_string(),
            ],
            "premium men's thobes and women's Islamicwear (abayas, jilbabs, etc.) for retailers and online stores in the UK, Europe, North America and South Africa, under our brand or as your private label",
        ),
    };

    let body = format!(
        "Hi {name},

{intro}

I run Al-Dar Apparel in Dubai. We make {range}.

I've attached a 2-page catalog with key styles and indicative wholesale prices. Our MOQs start around 250 pcs per style, with reliable production and shipping to {country}.

If this looks relevant, are you open to a quick 10–15 minute call, or would you prefer a simple price/MOQ breakdown by email first?

Best regards,
Amir"
    );

    EmailTemplate {
        subject_options,
        body,
    }
}

pub fn follow_up_email(lead: &LeadVariables, stage: EmailStage) -> EmailTemplate {
    let name = first_name(present(&lead.contact_first_name));
    let business = present(&lead.business_name).unwrap_or(FALLBACK_BUSINESS);

    match stage {
        EmailStage::FollowUp1 => {
            let city = in_city(present(&lead.city));
            let country = present(&lead.country).unwrap_or(FALLBACK_COUNTRY);
            EmailTemplate {
                subject_options: vec![
                    format!("Quick follow-up for {business}"),
                    format!("Did you see the catalog for {business}?"),
                ],
                body: format!(
                    "Hi {name},

Just checking you saw my email and 2-page catalog about supplying Islamicwear to {business}{city}.

Our MOQs start around 250 pcs per style, with regular shipments to {country}.

If this might fit your range, I'm happy to jump on a quick 10–15 minute call or email a simple price/MOQ summary. If not, a quick \"no\" is fine and I won't follow up again.

Best,
Amir"
                ),
            }
        }
        EmailStage::FollowUp2 => EmailTemplate {
            subject_options: vec![
                format!("Private-label options for {business}"),
                format!("Next collection at {business}?"),
            ],
            body: format!(
                "Hi {name},

I know you're busy, so I'll be brief.

Many of our partners start with a small initial order to add or upgrade their thobe/abaya/Islamicwear line – either under their own label or by adding selected Al-Dar styles.

Would exploring a small trial order for {business} be completely off the table right now, or worth a short conversation?

Thanks,
Amir"
            ),
        },
        EmailStage::BreakUp => EmailTemplate {
            subject_options: vec![
                format!("Should I close this for {business}?"),
                format!("Quick yes/no for {business}"),
            ],
            body: format!(
                "Hi {name},

I haven't heard back, so I'll assume now isn't the right time for {business} to look at new thobe/abaya/Islamicwear suppliers.

I'll close this on my side. If you want to revisit later, just reply \"catalog\" and I'll resend the 2-page overview and current wholesale price ranges.

Best,
Amir"
            ),
        },
    }
}
