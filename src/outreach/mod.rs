pub mod classifier;
pub mod status;
pub mod templates;

pub use classifier::{detect_line_focus, LineFocus};
pub use status::{status_label, status_style, Channel, FollowUpSchedule};
pub use templates::{
    follow_up_email, initial_email, instagram_dm, whatsapp_follow_up, DmStage, EmailStage,
    EmailTemplate, LeadVariables,
};
