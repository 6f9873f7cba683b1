//! Ranked member list combining training and reading scores.

use crate::model::Role;
use crate::store::Store;
use crate::views;
use serde::Serialize;

/// Canonical courses required for the top-performer badge (11 of 12).
pub const TOP_BADGE_THRESHOLD: usize = 11;

/// One leaderboard row. `rank` is the 1-based position in the full
/// ranking and is unaffected by chapter filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub rank: usize,
    pub phone: String,
    pub name: String,
    pub chapter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    pub training_score: u32,
    pub report_score: u32,
    pub total_score: u32,
    pub completed_courses: usize,
}

impl Ranking {
    pub fn is_top_performer(&self) -> bool {
        self.completed_courses >= TOP_BADGE_THRESHOLD
    }
}

/// Every member except the Master, ranked by total score.
///
/// The sort is stable and descending: members with equal totals keep
/// their encounter order, so rank numbers derived from position are
/// deterministic.
pub fn rankings(store: &Store) -> Vec<Ranking> {
    let mut rows: Vec<Ranking> = store
        .members
        .iter()
        .filter(|m| m.role != Role::Master)
        .map(|m| {
            let training_score = views::training_score(store, &m.phone);
            let report_score = views::report_score(store, &m.phone);
            Ranking {
                rank: 0,
                phone: m.phone.clone(),
                name: m.name.clone(),
                chapter_id: m.chapter_id.clone(),
                company_name: m.company_name.clone(),
                specialty: m.specialty.clone(),
                training_score,
                report_score,
                total_score: training_score + report_score,
                completed_courses: views::completed_course_count(store, &m.phone),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

/// The full ranking narrowed to one chapter. Filtering happens after the
/// sort, so each row keeps its overall rank number.
pub fn rankings_for_chapter(store: &Store, chapter_id: &str) -> Vec<Ranking> {
    rankings(store)
        .into_iter()
        .filter(|r| r.chapter_id == chapter_id)
        .collect()
}

/// A single member's row, for self-rank display. `None` for the Master
/// and for unknown phones.
pub fn ranking_of(store: &Store, phone: &str) -> Option<Ranking> {
    rankings(store).into_iter().find(|r| r.phone == phone)
}
