use chrono::NaiveDate;

use crate::eligibility::EligibilityWindow;
use crate::filters::LocationBucket;
use crate::participant::Participant;
use crate::report::{BucketRanking, HeaderStats, RankingSet, Report};

/// Build the run report: partition out failed participants, rank the rest
/// by legal quest count and by earliest legal quest, and project both
/// rankings onto the configured location buckets.
///
/// Pure function of its inputs. Both sorts are stable, so roster order is
/// the only tie-break; bucket lists are order-preserving subsequences of
/// the global ranking, never re-sorted. Must only be called once every
/// participant has reached a terminal state.
#[must_use]
pub fn rank<'a>(
    participants: &'a [Participant],
    buckets: &[LocationBucket],
    window: &EligibilityWindow,
) -> Report<'a> {
    let (errors, ok): (Vec<&Participant>, Vec<&Participant>) =
        participants.iter().partition(|p| p.error.is_some());

    let mut by_count = ok.clone();
    by_count.sort_by_key(|p| std::cmp::Reverse(p.legal_quest_count()));

    let mut by_earliest = ok;
    // NaiveDate::MAX sorts quest-less participants after every dated entry.
    by_earliest.sort_by_key(|p| p.first_legal_quest_date().unwrap_or(NaiveDate::MAX));

    let stats = header_stats(&by_count, buckets, window);

    Report {
        stats,
        errors,
        by_count: project(by_count, buckets),
        by_earliest: project(by_earliest, buckets),
    }
}

/// Filter an established global ranking down to each bucket, preserving
/// relative order.
fn project<'a>(all: Vec<&'a Participant>, buckets: &[LocationBucket]) -> RankingSet<'a> {
    let buckets = buckets
        .iter()
        .map(|bucket| BucketRanking {
            key: bucket.key.clone(),
            title: bucket.title.clone(),
            entries: all
                .iter()
                .copied()
                .filter(|p| bucket.matches(&p.location))
                .collect(),
        })
        .collect();

    RankingSet { all, buckets }
}

fn header_stats(
    ranked: &[&Participant],
    buckets: &[LocationBucket],
    window: &EligibilityWindow,
) -> HeaderStats {
    let per_bucket: Vec<(String, usize)> = buckets
        .iter()
        .map(|bucket| {
            let count = ranked.iter().filter(|p| bucket.matches(&p.location)).count();
            (bucket.title.clone(), count)
        })
        .collect();

    let bucketed: usize = per_bucket.iter().map(|(_, count)| count).sum();

    HeaderStats {
        total: ranked.len(),
        per_bucket,
        unknown_location: ranked.len() - bucketed,
        from_date: window.from_date,
        to_date: window.to_date,
    }
}
