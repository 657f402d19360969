//! One end-to-end run: ingest roster, process every participant, rank,
//! render, save.

use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};

use questrank_core::{AppConfig, Participant};
use questrank_roster::Roster;
use questrank_scraper::ProfileClient;

use crate::render::{self, RenderOptions};
use crate::Cli;

pub(crate) async fn run(config: &AppConfig, cli: &Cli) -> anyhow::Result<()> {
    let filters_path = cli.filters.as_ref().unwrap_or(&config.filters_path);
    let filters = questrank_core::load_filters(filters_path)
        .with_context(|| format!("cannot load filters from {}", filters_path.display()))?;

    let mut window = filters.window();
    if let Some(raw) = &cli.start_date {
        window.from_date = parse_date_arg(raw)?;
    }
    if let Some(raw) = &cli.end_date {
        window.to_date = parse_date_arg(raw)?;
    }

    let mut roster = load_roster(config, cli).await?;
    if let Some(limit) = cli.limit {
        roster.participants.truncate(limit);
    }
    if !roster.ignored.is_empty() {
        tracing::warn!(
            count = roster.ignored.len(),
            "some roster rows were ignored"
        );
    }
    tracing::info!(
        participants = roster.participants.len(),
        "roster ingested"
    );

    let client = ProfileClient::new(config.fetch_timeout_secs, &config.user_agent)?;
    let max_concurrent = cli
        .max_concurrent
        .unwrap_or(config.max_concurrent_fetches)
        .max(1);

    // Every participant reaches a terminal state (success or recorded
    // error) before ranking starts. `buffered` keeps roster order, which
    // the stable sorts rely on as the tie-break.
    let participants: Vec<Participant> = stream::iter(roster.participants)
        .map(|mut participant| {
            let client = &client;
            let window = &window;
            async move {
                questrank_scraper::process(client, &mut participant, window).await;
                participant
            }
        })
        .buffered(max_concurrent)
        .collect()
        .await;

    let report = questrank_core::rank(&participants, &filters.locations, &window);

    let options = RenderOptions {
        hide_emails: config.hide_emails && !cli.show_emails,
    };
    let text = render::render_report(&report, &options);
    println!("{text}");

    let output = cli.output.as_ref().unwrap_or(&config.output_path);
    std::fs::write(output, &text)
        .with_context(|| format!("cannot write report to {}", output.display()))?;
    tracing::info!(path = %output.display(), "report saved");

    Ok(())
}

async fn load_roster(config: &AppConfig, cli: &Cli) -> anyhow::Result<Roster> {
    if let Some(path) = &cli.input_file {
        return questrank_roster::load_roster_file(path)
            .with_context(|| format!("cannot load roster from {}", path.display()));
    }

    tracing::info!("downloading roster sheet");
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .user_agent(&config.user_agent)
        .build()?;
    let url = questrank_roster::export_url(&config.roster_file_id, &config.roster_sheet_gid);
    let csv_text = questrank_roster::download_roster_from(&client, &url).await?;
    Ok(questrank_roster::parse_roster(&csv_text)?)
}

fn parse_date_arg(raw: &str) -> anyhow::Result<Option<NaiveDate>> {
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date argument {raw:?}; expected YYYY-MM-DD or \"none\""))?;
    Ok(Some(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_arg_accepts_iso_date() {
        let parsed = parse_date_arg("2019-07-28").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2019, 7, 28));
    }

    #[test]
    fn parse_date_arg_none_disables_bound() {
        assert!(parse_date_arg("none").unwrap().is_none());
        assert!(parse_date_arg("NONE").unwrap().is_none());
    }

    #[test]
    fn parse_date_arg_rejects_garbage() {
        assert!(parse_date_arg("28/07/2019").is_err());
    }
}
