//! Per-participant orchestration: fetch, parse, filter, record.

use questrank_core::{EligibilityWindow, Participant, ParticipantError};

use crate::client::ProfileClient;
use crate::error::ParseErrorKind;
use crate::parse;

/// Fetches and parses one participant's quest report, then applies the
/// eligibility filter. Never fails the batch: every error is captured into
/// `participant.error`, leaving the entry out of the rankings but present
/// in the report's error section.
///
/// This is the only place network I/O happens, and the unit of failure
/// isolation — participants share no mutable state, so any number of them
/// may be processed concurrently.
pub async fn process(
    client: &ProfileClient,
    participant: &mut Participant,
    window: &EligibilityWindow,
) {
    let page = match client.fetch_page(&participant.profile_url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(
                email = %participant.email,
                url = %participant.profile_url,
                error = %e,
                "unable to load quest report"
            );
            participant.error = Some(ParticipantError::Fetch {
                detail: e.to_string(),
            });
            return;
        }
    };

    match parse::parse_quest_page(&page) {
        Ok(quests) => {
            participant.legal_quests = window.legal_quests(&quests);
            participant.quests = quests;
            tracing::info!(
                email = %participant.email,
                quests = participant.quests.len(),
                legal = participant.legal_quests.len(),
                "quest report counted"
            );
        }
        Err(e) => {
            tracing::error!(
                email = %participant.email,
                error = %e,
                "unexpected quest report content"
            );
            let detail = e.to_string();
            // Partial quests stay on the participant as a diagnostic
            // trace; legal_quests stays empty so none of them count.
            participant.quests = e.partial;
            participant.error = Some(match e.kind {
                ParseErrorKind::BadgeShape { .. } => ParticipantError::MalformedPage { detail },
                ParseErrorKind::EarnedDate { .. } => ParticipantError::UnparseableDate { detail },
            });
        }
    }
}
