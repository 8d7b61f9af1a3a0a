//! Filtering, due-date bucketing and completion statistics.
//!
//! Everything here is a pure function of the full task list, the filter
//! criteria and the current day. Nothing is cached between calls.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::models::{Task, TaskPriority};

/// Query value that is either the "all" sentinel or one concrete value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "all" {
            return Ok(Self::All);
        }
        raw.parse()
            .map(Self::Only)
            .map_err(serde::de::Error::custom)
    }
}

/// Completion filter of the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl CompletionFilter {
    pub fn admits(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

/// Filter criteria; every active criterion must pass.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct TaskQuery {
    /// Case-insensitive substring of the title; empty matches all
    pub search: String,
    /// Exact category name, or "all"
    #[param(value_type = Option<String>)]
    pub category: Selection<String>,
    /// low, medium, high or "all"
    #[param(value_type = Option<String>)]
    pub priority: Selection<TaskPriority>,
    /// all, completed or pending
    #[param(value_type = Option<CompletionFilter>)]
    pub completion: CompletionFilter,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.category.admits(&task.category)
            && self.priority.admits(&task.priority)
            && self.completion.admits(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        self.search.is_empty() || task.title.to_lowercase().contains(&self.search.to_lowercase())
    }

    /// Keep the matching tasks, preserving their order
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}

/// Due-date group a task is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    Other,
}

impl DueBucket {
    /// Classify by calendar day. Completed tasks are never overdue.
    pub fn classify(task: &Task, today: NaiveDate) -> Self {
        match task.due_date {
            Some(due) if due == today => Self::Today,
            Some(due) if Some(due) == today.succ_opt() => Self::Tomorrow,
            _ if is_overdue(task, today) => Self::Overdue,
            _ => Self::Other,
        }
    }
}

/// Pending and due strictly before `today`
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < today)
}

/// Tasks partitioned into the four due-date buckets
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TaskBoard<T> {
    pub overdue: Vec<T>,
    pub today: Vec<T>,
    pub tomorrow: Vec<T>,
    pub other: Vec<T>,
}

impl<T> Default for TaskBoard<T> {
    fn default() -> Self {
        Self {
            overdue: Vec::new(),
            today: Vec::new(),
            tomorrow: Vec::new(),
            other: Vec::new(),
        }
    }
}

impl TaskBoard<Task> {
    /// Every task lands in exactly one bucket; input order is kept.
    pub fn build(tasks: Vec<Task>, today: NaiveDate) -> Self {
        let mut board = Self::default();
        for task in tasks {
            match DueBucket::classify(&task, today) {
                DueBucket::Overdue => board.overdue.push(task),
                DueBucket::Today => board.today.push(task),
                DueBucket::Tomorrow => board.tomorrow.push(task),
                DueBucket::Other => board.other.push(task),
            }
        }
        board
    }
}

impl<T> TaskBoard<T> {
    pub fn len(&self) -> usize {
        self.overdue.len() + self.today.len() + self.tomorrow.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> TaskBoard<U> {
        TaskBoard {
            overdue: self.overdue.into_iter().map(&mut f).collect(),
            today: self.today.into_iter().map(&mut f).collect(),
            tomorrow: self.tomorrow.into_iter().map(&mut f).collect(),
            other: self.other.into_iter().map(&mut f).collect(),
        }
    }
}

/// Completion statistics over the unfiltered task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Rounded half up; 0 when there are no tasks
    pub percent: u8,
}

impl CompletionStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let percent = if total == 0 {
            0
        } else {
            ((completed * 100 + total / 2) / total) as u8
        };

        Self {
            total,
            completed,
            pending: total - completed,
            percent,
        }
    }
}

/// Filtered board plus statistics over the whole list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskOverview {
    pub board: TaskBoard<Task>,
    pub stats: CompletionStats,
}

impl TaskOverview {
    pub fn build(tasks: Vec<Task>, query: &TaskQuery, today: NaiveDate) -> Self {
        let stats = CompletionStats::from_tasks(&tasks);
        let board = TaskBoard::build(query.apply(tasks), today);
        Self { board, stats }
    }
}

/// Newest pending tasks first, at most `limit`
pub fn recent_pending(mut tasks: Vec<Task>, limit: usize) -> Vec<Task> {
    tasks.retain(|task| !task.completed);
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    tasks.truncate(limit);
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use record_store::RecordId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn created(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    fn task(id: i64, title: &str) -> Task {
        Task {
            id: RecordId::from(id),
            title: title.to_string(),
            completed: false,
            priority: TaskPriority::Medium,
            category: String::new(),
            due_date: None,
            created_at: created(id as u32),
            completed_at: None,
        }
    }

    fn due(mut task: Task, offset_days: i64) -> Task {
        task.due_date = Some(today() + Duration::days(offset_days));
        task
    }

    fn done(mut task: Task) -> Task {
        task.completed = true;
        task.completed_at = Some(created(59));
        task
    }

    fn sample() -> Vec<Task> {
        let mut report = due(task(1, "Write quarterly report"), -2);
        report.category = "Work".to_string();
        report.priority = TaskPriority::High;

        let mut milk = due(task(2, "Buy milk"), 0);
        milk.category = "Shopping".to_string();
        milk.priority = TaskPriority::Low;

        let mut dentist = done(due(task(3, "Dentist appointment"), -1));
        dentist.category = "Health".to_string();

        let mut gym = due(task(4, "Gym session"), 1);
        gym.category = "Health".to_string();

        let reading = due(task(5, "Read a book"), 5);
        let inbox = task(6, "Clean up inbox");

        vec![report, milk, dentist, gym, reading, inbox]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert_eq!(TaskQuery::default().apply(sample()).len(), 6);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let query = TaskQuery {
            search: "MILK".to_string(),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&query.apply(sample())), vec!["2"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let query = TaskQuery {
            category: Selection::Only("Health".to_string()),
            completion: CompletionFilter::Pending,
            ..TaskQuery::default()
        };
        assert_eq!(ids(&query.apply(sample())), vec!["4"]);
    }

    #[test]
    fn test_filter_order_does_not_matter() {
        let by_category = TaskQuery {
            category: Selection::Only("Health".to_string()),
            ..TaskQuery::default()
        };
        let by_completion = TaskQuery {
            completion: CompletionFilter::Completed,
            ..TaskQuery::default()
        };

        let a = by_completion.apply(by_category.apply(sample()));
        let b = by_category.apply(by_completion.apply(sample()));
        assert_eq!(a, b);
        assert_eq!(ids(&a), vec!["3"]);
    }

    #[test]
    fn test_unknown_category_yields_empty_result() {
        let query = TaskQuery {
            category: Selection::Only("Gardening".to_string()),
            ..TaskQuery::default()
        };
        assert!(query.apply(sample()).is_empty());
    }

    #[test]
    fn test_priority_filter() {
        let query = TaskQuery {
            priority: Selection::Only(TaskPriority::High),
            ..TaskQuery::default()
        };
        assert_eq!(ids(&query.apply(sample())), vec!["1"]);
    }

    #[test]
    fn test_query_deserializes_all_sentinel() {
        let query: TaskQuery = serde_json::from_value(serde_json::json!({
            "category": "all",
            "priority": "high",
            "completion": "pending"
        }))
        .unwrap();

        assert_eq!(query.category, Selection::All);
        assert_eq!(query.priority, Selection::Only(TaskPriority::High));
        assert_eq!(query.completion, CompletionFilter::Pending);
        assert!(query.search.is_empty());
    }

    #[test]
    fn test_query_rejects_unknown_priority() {
        let result: Result<TaskQuery, _> =
            serde_json::from_value(serde_json::json!({"priority": "urgent"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_buckets() {
        let board = TaskBoard::build(sample(), today());

        assert_eq!(ids(&board.overdue), vec!["1"]);
        assert_eq!(ids(&board.today), vec!["2"]);
        assert_eq!(ids(&board.tomorrow), vec!["4"]);
        assert_eq!(ids(&board.other), vec!["3", "5", "6"]);
    }

    #[test]
    fn test_buckets_partition_the_input() {
        let tasks = sample();
        let board = TaskBoard::build(tasks.clone(), today());

        assert_eq!(board.len(), tasks.len());
        for task in &tasks {
            let hits = [&board.overdue, &board.today, &board.tomorrow, &board.other]
                .iter()
                .filter(|bucket| bucket.iter().any(|t| t.id == task.id))
                .count();
            assert_eq!(hits, 1, "task {} must be in exactly one bucket", task.id);
        }
    }

    #[test]
    fn test_completed_past_due_is_never_overdue() {
        let task = done(due(task(1, "Pay rent"), -3));
        assert!(!is_overdue(&task, today()));
        assert_eq!(DueBucket::classify(&task, today()), DueBucket::Other);
    }

    #[test]
    fn test_completed_task_due_today_stays_in_today() {
        let task = done(due(task(1, "Water plants"), 0));
        assert_eq!(DueBucket::classify(&task, today()), DueBucket::Today);
    }

    #[test]
    fn test_completing_moves_task_out_of_overdue() {
        let pending = due(task(1, "Renew passport"), -1);
        assert_eq!(DueBucket::classify(&pending, today()), DueBucket::Overdue);

        let completed = done(pending);
        assert_eq!(DueBucket::classify(&completed, today()), DueBucket::Other);
    }

    #[test]
    fn test_stats() {
        assert_eq!(CompletionStats::from_tasks(&[]).percent, 0);

        let tasks = vec![
            done(task(1, "a")),
            done(task(2, "b")),
            done(task(3, "c")),
            task(4, "d"),
        ];
        let stats = CompletionStats::from_tasks(&tasks);
        assert_eq!(stats.percent, 75);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.pending, 1);
    }

    #[test]
    fn test_stats_round_half_up() {
        let mut tasks = vec![done(task(1, "a"))];
        tasks.extend((2..=8).map(|i| task(i, "x")));
        // 1 of 8 is 12.5%
        assert_eq!(CompletionStats::from_tasks(&tasks).percent, 13);

        let two_of_three = vec![done(task(1, "a")), done(task(2, "b")), task(3, "c")];
        assert_eq!(CompletionStats::from_tasks(&two_of_three).percent, 67);
    }

    #[test]
    fn test_overview_stats_ignore_filters() {
        let query = TaskQuery {
            completion: CompletionFilter::Pending,
            ..TaskQuery::default()
        };
        let overview = TaskOverview::build(sample(), &query, today());

        assert_eq!(overview.stats.total, 6);
        assert_eq!(overview.stats.completed, 1);
        assert_eq!(overview.board.len(), 5);
    }

    #[test]
    fn test_recent_pending_newest_first() {
        let tasks = vec![task(1, "a"), done(task(5, "e")), task(3, "c"), task(4, "d"), task(2, "b")];
        assert_eq!(ids(&recent_pending(tasks, 3)), vec!["4", "3", "2"]);
    }

    #[test]
    fn test_board_map_keeps_buckets() {
        let board = TaskBoard::build(sample(), today()).map(|t| t.title);
        assert_eq!(board.today, vec!["Buy milk".to_string()]);
    }
}
