use std::collections::HashSet;

use chrono::NaiveDate;

use crate::participant::Quest;

/// Which quests count toward the ranking: titles outside the skip-list,
/// earned inside the inclusive date window. A missing bound leaves that
/// side unbounded. Fixed for the whole run.
#[derive(Debug, Clone, Default)]
pub struct EligibilityWindow {
    pub skip_titles: HashSet<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl EligibilityWindow {
    #[must_use]
    pub fn is_legal(&self, quest: &Quest) -> bool {
        if self.skip_titles.contains(&quest.title) {
            return false;
        }
        if let Some(from) = self.from_date {
            if quest.earned_date < from {
                return false;
            }
        }
        if let Some(to) = self.to_date {
            if quest.earned_date > to {
                return false;
            }
        }
        true
    }

    /// Order-preserving subset of `quests` passing the filter.
    #[must_use]
    pub fn legal_quests(&self, quests: &[Quest]) -> Vec<Quest> {
        quests
            .iter()
            .filter(|q| self.is_legal(q))
            .cloned()
            .collect()
    }
}
