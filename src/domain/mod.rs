pub mod campaign;
pub mod feed;
pub mod filters;
pub mod lead;
pub mod metrics;

pub use campaign::{Campaign, CampaignStatus, NewCampaign};
pub use feed::{ChangeEvent, Collection, EventBatch, Keyed, RecordSet};
pub use lead::{format_source, Lead, LeadSource, ReplyIntent, SocialLead};
