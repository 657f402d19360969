use chrono::NaiveDate;
use thiserror::Error;

/// One completed quest as listed on a participant's public profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub title: String,
    /// Calendar date the quest was earned; the page carries no time component.
    pub earned_date: NaiveDate,
}

/// Why a participant's quest report could not be counted.
///
/// `Display` is the short description shown in the report's error section;
/// `detail` carries the underlying cause for the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParticipantError {
    #[error("unable to load quest report page")]
    Fetch { detail: String },

    #[error("unexpected quest report content")]
    MalformedPage { detail: String },

    #[error("unparseable quest earned date")]
    UnparseableDate { detail: String },
}

/// One roster entry, mutated exactly once by the processor and read-only
/// afterwards.
///
/// `legal_quests` is always an order-preserving subset of `quests`. When
/// `error` is set, `quests` holds whatever was extracted before the failure
/// (a diagnostic trace) and `legal_quests` is empty, keeping the entry out
/// of every ranking. A page with zero badges yields empty `quests` and no
/// error — a different state from a failed fetch.
#[derive(Debug, Clone)]
pub struct Participant {
    /// 1-based source row in the roster sheet, for duplicate diagnostics.
    pub row_id: usize,
    /// Unique key; trimmed and lowercased on construction.
    pub email: String,
    pub name: String,
    pub nick_name: String,
    pub profile_url: String,
    /// Free text, matched case-insensitively against bucket name lists.
    pub location: String,
    pub quests: Vec<Quest>,
    pub legal_quests: Vec<Quest>,
    pub error: Option<ParticipantError>,
}

impl Participant {
    #[must_use]
    pub fn new(
        row_id: usize,
        email: &str,
        name: &str,
        nick_name: &str,
        profile_url: &str,
        location: &str,
    ) -> Self {
        Self {
            row_id,
            email: email.trim().to_lowercase(),
            name: name.trim().to_owned(),
            nick_name: nick_name.trim().to_owned(),
            profile_url: profile_url.trim().to_owned(),
            location: location.trim().to_owned(),
            quests: Vec::new(),
            legal_quests: Vec::new(),
            error: None,
        }
    }

    /// Earned date of the first legal quest in page order, if any.
    #[must_use]
    pub fn first_legal_quest_date(&self) -> Option<NaiveDate> {
        self.legal_quests.first().map(|q| q.earned_date)
    }

    #[must_use]
    pub fn legal_quest_count(&self) -> usize {
        self.legal_quests.len()
    }
}
