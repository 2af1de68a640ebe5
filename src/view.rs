//! Pure projections of the task table for display.
//!
//! Nothing here touches the terminal; both the interactive screen and the
//! command line render from these values.

use chrono::NaiveDate;

use crate::fields::*;
use crate::task::Task;

/// One line of the task list: `<name> - <status> - <priority>`.
pub fn list_line(task: &Task) -> String {
    format!(
        "{} - {} - {}",
        task.name,
        format_status(task.status),
        format_priority(task.priority)
    )
}

/// Count tasks per status, one entry per status that occurs.
///
/// Ordered by descending count; ties keep `Status::ALL` order.
pub fn status_counts(tasks: &[Task]) -> Vec<(Status, u64)> {
    let mut counts: Vec<(Status, u64)> = Status::ALL
        .iter()
        .map(|&s| (s, tasks.iter().filter(|t| t.status == s).count() as u64))
        .filter(|&(_, n)| n > 0)
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Completion progress over the whole table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(tasks: &[Task]) -> Self {
        Progress {
            completed: tasks.iter().filter(|t| t.is_completed()).count(),
            total: tasks.len(),
        }
    }

    /// `100 * completed / total`, or 0 for an empty table.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    /// Ratio in `0.0..=1.0` for gauge widgets.
    pub fn ratio(&self) -> f64 {
        self.percent() / 100.0
    }

    pub fn label(&self) -> String {
        format!(
            "Progress: {}/{} tasks completed ({}%)",
            self.completed,
            self.total,
            self.percent() as u32
        )
    }
}

/// Format an expiry relative to today ("today", "tomorrow", "in 3d", "2d late").
///
/// Expiries that are not `YYYY-MM-DD` are shown as typed.
pub fn format_expiry_relative(expiry: &str, today: NaiveDate) -> String {
    let expiry = expiry.trim();
    if expiry.is_empty() {
        return "-".into();
    }
    let Ok(d) = NaiveDate::parse_from_str(expiry, "%Y-%m-%d") else {
        return expiry.to_string();
    };
    let days = (d - today).num_days();
    if days == 0 {
        "today".into()
    } else if days == 1 {
        "tomorrow".into()
    } else if days > 1 {
        format!("in {}d", days)
    } else {
        format!("{}d late", -days)
    }
}

/// Number of pending tasks whose expiry date has passed.
pub fn overdue_count(tasks: &[Task], today: NaiveDate) -> usize {
    tasks
        .iter()
        .filter(|t| !t.is_completed())
        .filter_map(|t| NaiveDate::parse_from_str(t.expiry.trim(), "%Y-%m-%d").ok())
        .filter(|d| *d < today)
        .count()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, status: Status, expiry: &str) -> Task {
        let mut t = Task::new(name, Priority::Medium, expiry);
        t.status = status;
        t
    }

    #[test]
    fn test_list_line_format() {
        let t = Task::new("Pay bills", Priority::High, "2024-01-01");
        assert_eq!(list_line(&t), "Pay bills - Pending - High");
    }

    #[test]
    fn test_progress_percent() {
        let empty = Progress::of(&[]);
        assert_eq!(empty.percent(), 0.0);
        assert_eq!(empty.label(), "Progress: 0/0 tasks completed (0%)");

        let tasks = vec![
            task("a", Status::Completed, ""),
            task("b", Status::Pending, ""),
            task("c", Status::Pending, ""),
        ];
        let p = Progress::of(&tasks);
        assert_eq!(p.completed, 1);
        assert!((p.percent() - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(p.label(), "Progress: 1/3 tasks completed (33%)");
    }

    #[test]
    fn test_status_counts_only_present_statuses() {
        assert!(status_counts(&[]).is_empty());

        let tasks = vec![
            task("a", Status::Completed, ""),
            task("b", Status::Completed, ""),
            task("c", Status::Pending, ""),
        ];
        assert_eq!(
            status_counts(&tasks),
            vec![(Status::Completed, 2), (Status::Pending, 1)]
        );

        let tasks = vec![task("a", Status::Pending, "")];
        assert_eq!(status_counts(&tasks), vec![(Status::Pending, 1)]);
    }

    #[test]
    fn test_status_counts_tie_keeps_pending_first() {
        let tasks = vec![task("a", Status::Completed, ""), task("b", Status::Pending, "")];
        assert_eq!(
            status_counts(&tasks),
            vec![(Status::Pending, 1), (Status::Completed, 1)]
        );
    }

    #[test]
    fn test_format_expiry_relative() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(format_expiry_relative("2024-01-10", today), "today");
        assert_eq!(format_expiry_relative("2024-01-11", today), "tomorrow");
        assert_eq!(format_expiry_relative("2024-01-13", today), "in 3d");
        assert_eq!(format_expiry_relative("2024-01-08", today), "2d late");
        assert_eq!(format_expiry_relative("next week", today), "next week");
        assert_eq!(format_expiry_relative("", today), "-");
    }

    #[test]
    fn test_overdue_ignores_completed_and_unparsed() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let tasks = vec![
            task("late", Status::Pending, "2024-01-01"),
            task("done", Status::Completed, "2024-01-01"),
            task("soon", Status::Pending, "2024-02-01"),
            task("vague", Status::Pending, "someday"),
        ];
        assert_eq!(overdue_count(&tasks, today), 1);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer name", 6), "a lon…");
    }
}
