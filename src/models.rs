use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// A recurring quest definition. The string `id` is the one canonical
/// identifier: it keys the completion log, the persisted snapshots and
/// every API lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestTemplate {
    pub id: String,
    pub name: String,
    pub points: u64,
}

/// Sparse completion record: date key (`YYYY-MM-DD`) to per-quest flags.
///
/// An absent date means no entries were recorded that day, which is not
/// the same as a recorded day with nothing done. An absent quest id
/// inside a day reads as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLog {
    days: BTreeMap<String, BTreeMap<String, bool>>,
}

impl CompletionLog {
    /// Flips the flag for `(day, id)` and returns the new value. The
    /// day-map is created lazily, so the first toggle sets `true`.
    pub fn toggle(&mut self, id: &str, day: &str) -> bool {
        let day_map = self.days.entry(day.to_string()).or_default();
        let flag = day_map.entry(id.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn entry_for(&self, id: &str, day: &str) -> bool {
        self.days
            .get(day)
            .and_then(|day_map| day_map.get(id))
            .copied()
            .unwrap_or(false)
    }

    /// Drops `id` from every day-map. Emptied day-maps stay in place, so
    /// the day still counts as recorded.
    pub fn purge_template(&mut self, id: &str) {
        for day_map in self.days.values_mut() {
            day_map.remove(id);
        }
    }

    pub fn has_day(&self, day: &str) -> bool {
        self.days.contains_key(day)
    }

    pub fn days_with_entries(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }
}

/// The in-memory store: quest registry plus completion log. Loaded once
/// at startup, mutated under the state lock, snapshotted after every
/// mutation.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub templates: Vec<QuestTemplate>,
    pub log: CompletionLog,
}

impl AppData {
    pub fn create_template(
        &mut self,
        name: &str,
        points: i64,
    ) -> Result<&QuestTemplate, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("quest name must not be empty"));
        }
        if points < 1 {
            return Err(ValidationError::new("points must be a positive integer"));
        }

        let template = QuestTemplate {
            id: self.next_id(),
            name: name.to_string(),
            points: points as u64,
        };
        self.templates.push(template);
        Ok(&self.templates[self.templates.len() - 1])
    }

    /// Removes the template and its log entries as one operation, so the
    /// registry and log never disagree across a snapshot. Unknown ids are
    /// a no-op.
    pub fn delete_template(&mut self, id: &str) {
        self.templates.retain(|template| template.id != id);
        self.log.purge_template(id);
    }

    pub fn find_template(&self, id: &str) -> Option<&QuestTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    // Millisecond timestamp, bumped until it does not collide with a
    // live template (two creations can land in the same millisecond).
    fn next_id(&self) -> String {
        let mut millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        while self.templates.iter().any(|t| t.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestRequest {
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: String,
    pub day: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,
    pub day: String,
    pub done: bool,
    pub points_earned: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct QuestView {
    pub id: String,
    pub name: String,
    pub points: u64,
    pub streak: u32,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub done_count: u64,
    pub total_count: u64,
    pub total_points: u64,
    pub completion_pct: u8,
    pub best_streak: u32,
}

#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub points: u64,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub name: String,
    pub points: u64,
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub date: String,
    pub points: u64,
    pub quests: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct TodayQuest {
    pub id: String,
    pub name: String,
    pub points: u64,
    pub done: bool,
    pub streak: u32,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: String,
    pub points: u64,
    pub quests: Vec<TodayQuest>,
}
