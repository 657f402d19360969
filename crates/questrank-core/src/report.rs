//! The immutable result of a run, consumed by rendering. Rankings borrow
//! participants; nothing here copies or mutates them.

use chrono::NaiveDate;

use crate::participant::Participant;

/// Headline numbers for the report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderStats {
    /// Participants that reached a terminal success state (errors excluded).
    pub total: usize,
    /// `(bucket title, count)` in configured bucket order.
    pub per_bucket: Vec<(String, usize)>,
    /// Ranked participants matching no bucket.
    pub unknown_location: usize,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

/// One leaderboard dimension: the global ordering plus its order-preserving
/// projection onto each configured bucket.
#[derive(Debug)]
pub struct RankingSet<'a> {
    pub all: Vec<&'a Participant>,
    pub buckets: Vec<BucketRanking<'a>>,
}

#[derive(Debug)]
pub struct BucketRanking<'a> {
    pub key: String,
    pub title: String,
    /// Subsequence of the global ranking whose location matches this bucket.
    pub entries: Vec<&'a Participant>,
}

#[derive(Debug)]
pub struct Report<'a> {
    pub stats: HeaderStats,
    /// Participants whose processing failed, in roster order.
    pub errors: Vec<&'a Participant>,
    /// Descending by legal quest count; roster order breaks ties.
    pub by_count: RankingSet<'a>,
    /// Ascending by earliest legal quest date; no-quest entries last.
    pub by_earliest: RankingSet<'a>,
}

/// Mask the local part of an email for display: `someone@example.com`
/// becomes `******@example.com`. Strings without `@` are masked whole.
#[must_use]
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((_, domain)) => format!("******@{domain}"),
        None => "******".to_owned(),
    }
}
