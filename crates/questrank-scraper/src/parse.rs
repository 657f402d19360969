//! Quest extraction from public profile pages.

use chrono::NaiveDate;
use questrank_core::Quest;
use regex::Regex;

use crate::error::{PageParseError, ParseErrorKind};
use crate::markup;

/// Class marking one completed-quest badge on the profile page.
const BADGE_CLASS: &str = "public-profile__badge";

/// Earned dates appear as e.g. `Aug 29, 2019`.
const DATE_FORMAT: &str = "%b %d, %Y";

fn badge_open_regex() -> Regex {
    Regex::new(&format!(
        r#"(?is)<div[^>]*class\s*=\s*["'][^"']*{BADGE_CLASS}[^"']*["'][^>]*>"#
    ))
    .expect("valid badge regex")
}

/// Extracts every completed quest from one profile page, in page order.
///
/// Each badge must decompose into exactly three child elements: icon,
/// title, and earned-date block. The title is the second child's trimmed
/// text; the date is the second line of the third child's trimmed text.
/// A badge that deviates fails the whole page, with the quests parsed so
/// far carried inside the error as a diagnostic trace. A page with no
/// badges is a valid zero-quest report.
///
/// # Errors
///
/// [`ParseErrorKind::BadgeShape`] when a badge has a child-element count
/// other than three; [`ParseErrorKind::EarnedDate`] when the date text is
/// missing or does not parse.
pub fn parse_quest_page(html: &str) -> Result<Vec<Quest>, PageParseError> {
    let badge_re = badge_open_regex();
    let mut quests: Vec<Quest> = Vec::new();

    for (index, open) in badge_re.find_iter(html).enumerate() {
        let inner = markup::enclosed_block(html, open.end());
        let children = markup::top_level_children(inner);
        if children.len() != 3 {
            return Err(PageParseError {
                kind: ParseErrorKind::BadgeShape {
                    index,
                    found: children.len(),
                },
                partial: quests,
            });
        }

        let title = markup::element_text(children[1]).trim().to_owned();
        let earned_date = parse_earned_date(children[2]).map_err(|raw| PageParseError {
            kind: ParseErrorKind::EarnedDate { index, raw },
            partial: quests.clone(),
        })?;

        quests.push(Quest { title, earned_date });
    }

    Ok(quests)
}

/// The earned date is the second line of the block's trimmed text content.
/// Returns the offending text on failure.
fn parse_earned_date(block: &str) -> Result<NaiveDate, String> {
    let text = markup::element_text(block);
    let trimmed = text.trim();
    let Some(line) = trimmed.lines().nth(1) else {
        return Err(trimmed.to_owned());
    };
    let line = line.trim();
    NaiveDate::parse_from_str(line, DATE_FORMAT).map_err(|_| line.to_owned())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
