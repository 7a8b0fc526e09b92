use crate::clock::{self, date_key};
use crate::models::{
    AppData, ChartPoint, HistoryEntry, HistoryRow, QuestView, SummaryResponse, TodayQuest,
    TodayResponse,
};
use crate::streak::compute_streak;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn build_summary(data: &AppData) -> SummaryResponse {
    build_summary_at(clock::today(), data)
}

/// Global counters over every recorded day, crossed with the current
/// quest set. While today has no day-map yet, today's quests are counted
/// as pending slots in `total_count`; once today gets its first entry the
/// day is counted like any other.
pub fn build_summary_at(today: NaiveDate, data: &AppData) -> SummaryResponse {
    let mut done_count = 0u64;
    let mut total_count = 0u64;
    let mut total_points = 0u64;

    for day in data.log.days_with_entries() {
        for template in &data.templates {
            total_count += 1;
            if data.log.entry_for(&template.id, day) {
                done_count += 1;
                total_points += template.points;
            }
        }
    }

    if !data.log.has_day(&date_key(today)) {
        total_count += data.templates.len() as u64;
    }

    let completion_pct = if total_count == 0 {
        0
    } else {
        (done_count as f64 / total_count as f64 * 100.0).round() as u8
    };

    let best_streak = data
        .templates
        .iter()
        .map(|template| compute_streak(&data.log, &template.id, today))
        .max()
        .unwrap_or(0);

    SummaryResponse {
        done_count,
        total_count,
        total_points,
        completion_pct,
        best_streak,
    }
}

/// Points earned per recorded day. Days contributing nothing are absent;
/// the chart plots only the dates present here.
pub fn per_day_points(data: &AppData) -> BTreeMap<String, u64> {
    let mut points_by_day = BTreeMap::new();
    for day in data.log.days_with_entries() {
        for template in &data.templates {
            if data.log.entry_for(&template.id, day) {
                *points_by_day.entry(day.to_string()).or_insert(0) += template.points;
            }
        }
    }
    points_by_day
}

pub fn chart_series(data: &AppData) -> Vec<ChartPoint> {
    per_day_points(data)
        .into_iter()
        .map(|(date, points)| ChartPoint { date, points })
        .collect()
}

pub fn build_history(data: &AppData) -> Vec<HistoryRow> {
    build_history_at(clock::today(), data)
}

/// Every recorded day except today, most recent first, with the day's
/// point total and per-quest flags. Always recomputed against the current
/// quest set; deleted quests leave no trace here.
pub fn build_history_at(today: NaiveDate, data: &AppData) -> Vec<HistoryRow> {
    let today_key = date_key(today);
    let mut rows = Vec::new();

    for day in data.log.days_with_entries() {
        if day == today_key {
            continue;
        }
        let mut day_points = 0u64;
        let quests = data
            .templates
            .iter()
            .map(|template| {
                let done = data.log.entry_for(&template.id, day);
                if done {
                    day_points += template.points;
                }
                HistoryEntry {
                    id: template.id.clone(),
                    name: template.name.clone(),
                    points: template.points,
                    done,
                }
            })
            .collect();
        rows.push(HistoryRow {
            date: day.to_string(),
            points: day_points,
            quests,
        });
    }

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

pub fn quest_views(data: &AppData) -> Vec<QuestView> {
    quest_views_at(clock::today(), data)
}

pub fn quest_views_at(today: NaiveDate, data: &AppData) -> Vec<QuestView> {
    data.templates
        .iter()
        .map(|template| QuestView {
            id: template.id.clone(),
            name: template.name.clone(),
            points: template.points,
            streak: compute_streak(&data.log, &template.id, today),
        })
        .collect()
}

pub fn build_today(data: &AppData) -> TodayResponse {
    build_today_at(clock::today(), data)
}

pub fn build_today_at(today: NaiveDate, data: &AppData) -> TodayResponse {
    let key = date_key(today);
    let mut points = 0u64;
    let quests = data
        .templates
        .iter()
        .map(|template| {
            let done = data.log.entry_for(&template.id, &key);
            if done {
                points += template.points;
            }
            TodayQuest {
                id: template.id.clone(),
                name: template.name.clone(),
                points: template.points,
                done,
                streak: compute_streak(&data.log, &template.id, today),
            }
        })
        .collect();

    TodayResponse {
        date: key,
        points,
        quests,
    }
}
