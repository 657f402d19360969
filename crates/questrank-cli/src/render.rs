//! Plain-text rendering of a run report, for stdout and the result file.

use chrono::NaiveDate;

use questrank_core::{mask_email, Participant, Report};

pub(crate) struct RenderOptions {
    pub hide_emails: bool,
}

const INDENT_LV1: &str = "    ";
const INDENT_LV2: &str = "        ";

pub(crate) fn render_report(report: &Report<'_>, options: &RenderOptions) -> String {
    let mut out = String::new();

    render_header(&mut out, report);
    render_errors(&mut out, report);

    render_by_count(&mut out, "ALL LOCATIONS", &report.by_count.all, options);
    render_by_time(
        &mut out,
        "ALL LOCATIONS (BY TIME SUBMITTING FIRST QUEST)",
        &report.by_earliest.all,
        options,
    );

    // Bucket sets come out of the ranking in the same configured order.
    for (count_bucket, time_bucket) in report
        .by_count
        .buckets
        .iter()
        .zip(&report.by_earliest.buckets)
    {
        let title = count_bucket.title.to_uppercase();
        render_by_count(&mut out, &title, &count_bucket.entries, options);
        render_by_time(
            &mut out,
            &format!("{title} (BY TIME SUBMITTING FIRST QUEST)"),
            &time_bucket.entries,
            options,
        );
    }

    out
}

fn render_header(out: &mut String, report: &Report<'_>) {
    let stats = &report.stats;
    out.push_str("CLOUD STUDY JAMS RESULT\n");
    out.push_str(&format!(
        "{INDENT_LV1}Total participants: {}\n",
        stats.total
    ));
    for (title, count) in &stats.per_bucket {
        out.push_str(&format!("{INDENT_LV2}{title}: {count}\n"));
    }
    out.push_str(&format!(
        "{INDENT_LV2}Unknown location: {}\n",
        stats.unknown_location
    ));
    out.push_str(&format!("{INDENT_LV1}Time period:\n"));
    out.push_str(&format!(
        "{INDENT_LV2}From Date: {}\n",
        date_bound(stats.from_date)
    ));
    out.push_str(&format!(
        "{INDENT_LV2}To Date: {}\n",
        date_bound(stats.to_date)
    ));
}

fn render_errors(out: &mut String, report: &Report<'_>) {
    if report.errors.is_empty() {
        return;
    }
    out.push_str("\nERRORS\n");
    for (ordinal, participant) in report.errors.iter().enumerate() {
        let description = participant
            .error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        out.push_str(&format!(
            "{INDENT_LV1}{}. {} - {description}\n",
            ordinal + 1,
            participant.name
        ));
    }
}

fn render_by_count(
    out: &mut String,
    title: &str,
    entries: &[&Participant],
    options: &RenderOptions,
) {
    out.push_str(&format!("\n{title}\n"));
    for (ordinal, participant) in entries.iter().enumerate() {
        out.push_str(&format!(
            "{INDENT_LV1}{}. {} ({}) - {} Legal quests ({} Total)\n",
            ordinal + 1,
            participant.name,
            display_email(participant, options),
            participant.legal_quest_count(),
            participant.quests.len()
        ));
    }
}

fn render_by_time(
    out: &mut String,
    title: &str,
    entries: &[&Participant],
    options: &RenderOptions,
) {
    out.push_str(&format!("\n{title}\n"));
    for (ordinal, participant) in entries.iter().enumerate() {
        let date = participant
            .first_legal_quest_date()
            .map_or_else(|| "N/A".to_owned(), |d| d.to_string());
        out.push_str(&format!(
            "{INDENT_LV1}{}. {} ({}) - Earliest Date {date}\n",
            ordinal + 1,
            participant.name,
            display_email(participant, options)
        ));
    }
}

fn display_email(participant: &Participant, options: &RenderOptions) -> String {
    if options.hide_emails {
        mask_email(&participant.email)
    } else {
        participant.email.clone()
    }
}

fn date_bound(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "none".to_owned(), |d| d.to_string())
}
