// src/commands.rs
//
// Work behind the `watch` and `render` subcommands.

use std::fmt::Debug;
use std::time::Duration;

use clap::ValueEnum;

use crate::db::changes::{self, FeedRecord};
use crate::db::{leads, social_leads, Database};
use crate::domain::feed::{ChangeEvent, RecordSet};
use crate::errors::ServerError;
use crate::outreach::{
    follow_up_email, initial_email, instagram_dm, whatsapp_follow_up, DmStage, EmailStage,
    EmailTemplate,
};

/// Which generated message `render` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageKind {
    #[value(name = "initial-email")]
    InitialEmail,
    #[value(name = "follow-up-1")]
    FollowUp1,
    #[value(name = "follow-up-2")]
    FollowUp2,
    #[value(name = "follow-up-3")]
    FollowUp3,
    #[value(name = "dm")]
    Dm,
    #[value(name = "dm-follow-up-1")]
    DmFollowUp1,
    #[value(name = "dm-follow-up-2")]
    DmFollowUp2,
}

impl MessageKind {
    fn email_stage(self) -> Option<EmailStage> {
        match self {
            MessageKind::FollowUp1 => Some(EmailStage::FollowUp1),
            MessageKind::FollowUp2 => Some(EmailStage::FollowUp2),
            MessageKind::FollowUp3 => Some(EmailStage::BreakUp),
            _ => None,
        }
    }
}

fn format_email(email: &EmailTemplate) -> String {
    let subjects: Vec<String> = email
        .subject_options
        .iter()
        .map(|s| format!("Subject: {s}"))
        .collect();
    format!("{}\n\n{}", subjects.join("\n"), email.body)
}

/// Generate one message. Email kinds look the id up in `leads`, DM kinds in
/// `instagram_leads`.
pub fn render_message(db: &Database, id: &str, kind: MessageKind) -> Result<String, ServerError> {
    match kind {
        MessageKind::Dm | MessageKind::DmFollowUp1 | MessageKind::DmFollowUp2 => {
            let lead = db
                .with_conn(|conn| social_leads::get_social_lead(conn, id))?
                .ok_or(ServerError::NotFound)?;
            let vars = lead.to_variables();
            Ok(match kind {
                MessageKind::DmFollowUp1 => whatsapp_follow_up(&vars, DmStage::FollowUp1),
                MessageKind::DmFollowUp2 => whatsapp_follow_up(&vars, DmStage::FollowUp2),
                _ => instagram_dm(&vars),
            })
        }
        _ => {
            let lead = db
                .with_conn(|conn| leads::get_lead(conn, id))?
                .ok_or(ServerError::NotFound)?;
            let vars = lead.to_variables();
            let email = match kind.email_stage() {
                Some(stage) => follow_up_email(&vars, stage),
                None => initial_email(&vars, Some(lead.line_focus())),
            };
            Ok(format_email(&email))
        }
    }
}

/// Load the current records and the feed position they correspond to.
pub fn open_view<T: FeedRecord>(db: &Database) -> Result<RecordSet<T>, ServerError> {
    db.with_conn(|conn| {
        let cursor = changes::latest_seq(conn, T::COLLECTION)?;
        let records = T::list_all(conn)?;
        Ok(RecordSet::new(records, cursor))
    })
}

/// Apply every pending event to `view`, logging each one. Returns how many applied.
pub fn poll_once<T: FeedRecord + Debug>(
    db: &Database,
    view: &mut RecordSet<T>,
) -> Result<usize, ServerError> {
    let batch = db.with_conn(|conn| changes::events_since::<T>(conn, view.cursor()))?;
    let mut applied = 0;
    for event in batch.events {
        let (seq, kind) = (event.seq(), event.kind());
        let key = match &event {
            ChangeEvent::Insert { record, .. } | ChangeEvent::Update { record, .. } => record.key(),
            ChangeEvent::Delete { id, .. } => id.clone(),
        };
        if view.apply(event) {
            applied += 1;
            tracing::info!(
                collection = T::COLLECTION.as_str(),
                seq,
                kind,
                id = %key,
                total = view.len(),
                "change applied"
            );
        }
    }
    view.advance_to(batch.cursor);
    Ok(applied)
}

/// Tail a collection forever.
pub fn watch<T: FeedRecord + Debug>(db: &Database, interval: Duration) -> Result<(), ServerError> {
    let mut view = open_view::<T>(db)?;
    tracing::info!(
        collection = T::COLLECTION.as_str(),
        records = view.len(),
        cursor = view.cursor(),
        "watching change feed"
    );
    loop {
        if let Err(e) = poll_once(db, &mut view) {
            tracing::warn!(error = %e, "poll failed, retrying next interval");
        }
        std::thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::{Lead, SocialLead};
    use crate::domain::feed::{Collection, Keyed};
    use crate::tests::utils::{
        init_test_db, insert_lead, insert_social_lead, sample_lead, sample_social_lead,
    };

    #[test]
    fn render_picks_table_by_kind() {
        let db = init_test_db();
        let mut lead = sample_lead("e1");
        lead.full_name = Some("Yusuf Ali".into());
        lead.context = Some("thobes".into());
        insert_lead(&db, &lead);
        let mut social = sample_social_lead("s1");
        social.biography = Some("Hijab and abaya boutique".into());
        insert_social_lead(&db, &social);

        let email = render_message(&db, "e1", MessageKind::InitialEmail).unwrap();
        assert!(email.starts_with("Subject: "));
        assert!(email.contains("Hi Yusuf,"));

        let dm = render_message(&db, "s1", MessageKind::Dm).unwrap();
        assert!(dm.starts_with("Hi there,"));

        let err = render_message(&db, "s1", MessageKind::FollowUp3).unwrap_err();
        assert!(matches!(err, ServerError::NotFound));
    }

    #[test]
    fn poll_applies_new_events_only() {
        let db = init_test_db();
        insert_lead(&db, &sample_lead("a"));

        let mut view = open_view::<Lead>(&db).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(poll_once(&db, &mut view).unwrap(), 0);

        insert_lead(&db, &sample_lead("b"));
        assert_eq!(poll_once(&db, &mut view).unwrap(), 1);
        assert_eq!(view.records()[0].key(), "b");
    }

    #[test]
    fn poll_cursor_reaches_end_of_log() {
        let db = init_test_db();
        let mut view = open_view::<Lead>(&db).unwrap();

        insert_lead(&db, &sample_lead("short-lived"));
        db.with_conn(|conn| {
            conn.execute("UPDATE leads SET attempts = 1 WHERE id = 'short-lived'", [])?;
            conn.execute("DELETE FROM leads WHERE id = 'short-lived'", [])?;
            Ok(())
        })
        .unwrap();

        assert_eq!(poll_once(&db, &mut view).unwrap(), 1);
        assert!(view.is_empty());
        let last = db
            .with_conn(|conn| changes::latest_seq(conn, Collection::Leads))
            .unwrap();
        assert_eq!(view.cursor(), last);
        assert_eq!(poll_once(&db, &mut view).unwrap(), 0);
    }

    #[test]
    fn social_view_starts_empty() {
        let db = init_test_db();
        let view = open_view::<SocialLead>(&db).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.cursor(), 0);
    }
}
