pub mod automated;
pub mod campaigns;
pub mod crm;
pub mod dashboard;
pub mod error;
pub mod manual;
pub mod outreach;
pub mod search;

pub use automated::{automated_detail_page, automated_list_page, AutomatedListVm};
pub use campaigns::{campaign_detail_page, campaigns_page};
pub use crm::crm_page;
pub use dashboard::dashboard_page;
pub use error::error_page;
pub use manual::{manual_detail_page, manual_list_page, ManualListVm};
pub use outreach::outreach_page;
pub use search::search_page;
