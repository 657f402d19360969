use questrank_core::Quest;
use thiserror::Error;

/// Failure reaching a profile page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// Failure extracting quests from a fetched page.
///
/// `partial` holds the quests parsed before the failing badge. They are a
/// diagnostic trace only and never count toward any ranking.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct PageParseError {
    pub kind: ParseErrorKind,
    pub partial: Vec<Quest>,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// A badge did not decompose into the expected three child elements.
    #[error("badge {index} has {found} child elements, expected 3")]
    BadgeShape { index: usize, found: usize },

    /// The earned-date text of a badge did not yield a parseable date.
    #[error("badge {index} earned-date text {raw:?} is not a valid date")]
    EarnedDate { index: usize, raw: String },
}
