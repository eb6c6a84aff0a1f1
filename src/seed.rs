//! Built-in demo data: a small staff directory and six tasks spread across
//! every lane, most of them created in November 2025.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::board::Board;
use crate::fields::*;
use crate::staff::StaffMember;
use crate::task::{Attachment, Comment, Subtask, Task, TaskId};

pub fn seed_staff() -> Vec<StaffMember> {
    vec![
        StaffMember::new("EMP001", "Sarah Johnson", "Engineering"),
        StaffMember::new("EMP002", "Michael Chen", "Engineering"),
        StaffMember::new("EMP003", "Emily Rodriguez", "Human Resources"),
        StaffMember::new("EMP004", "David Kim", "Design"),
        StaffMember::new("EMP005", "Priya Patel", "Operations"),
        StaffMember::new("ADM001", "Admin User", "Management"),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn subtask(id: &str, title: &str, completed: bool) -> Subtask {
    Subtask { id: id.to_string(), title: title.to_string(), completed }
}

fn comment(id: &str, author: &str, avatar: &str, text: &str, (m, d, h): (u32, u32, u32)) -> Comment {
    Comment {
        id: id.to_string(),
        author: author.to_string(),
        author_avatar: avatar.to_string(),
        text: text.to_string(),
        posted_at: Utc.with_ymd_and_hms(2025, m, d, h, 0, 0).single().unwrap_or_default(),
    }
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    title: &str,
    description: &str,
    (assignee, assignee_name): (&str, &str),
    stamp: &str,
    created_at: NaiveDate,
    priority: Priority,
    department: &str,
    project: &str,
    tags: &[&str],
    due_date: NaiveDate,
    status: Status,
    progress: u8,
) -> Task {
    Task {
        id: TaskId::from(id),
        title: title.to_string(),
        description: Some(description.to_string()),
        assigned_to: assignee.to_string(),
        assigned_to_name: assignee_name.to_string(),
        assigned_by: "ADM001".to_string(),
        assigned_by_name: "Admin User".to_string(),
        assigned_timestamp: stamp.to_string(),
        created_at,
        priority,
        department: Some(department.to_string()),
        project: Some(project.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        due_date,
        status,
        progress,
        subtasks: Vec::new(),
        attachments: Vec::new(),
        comments: Vec::new(),
    }
}

pub fn seed_tasks() -> Vec<Task> {
    let mut onboarding = task(
        "1",
        "Redesign employee onboarding flow",
        "Refresh the first-week checklist and welcome screens for new hires.",
        ("EMP004", "David Kim"),
        "Nov 1, 2025 09:30 AM",
        date(2025, 11, 1),
        Priority::High,
        "Design",
        "Onboarding Revamp",
        &["ux", "onboarding"],
        date(2025, 11, 20),
        Status::InProgress,
        60,
    );
    onboarding.subtasks = vec![
        subtask("1-1", "Audit current screens", true),
        subtask("1-2", "Draft new wireframes", true),
        subtask("1-3", "Usability review with HR", false),
    ];
    onboarding.attachments = vec![Attachment {
        id: "a1".to_string(),
        name: "onboarding-wireframes.fig".to_string(),
        url: "https://files.example.com/onboarding-wireframes.fig".to_string(),
    }];
    onboarding.comments = vec![comment(
        "c1",
        "Emily Rodriguez",
        "ER",
        "HR can review the drafts on Thursday.",
        (11, 3, 14),
    )];

    let mut review_prep = task(
        "2",
        "Prepare quarterly performance reviews",
        "Collect self-assessments and schedule review meetings.",
        ("EMP003", "Emily Rodriguez"),
        "Nov 2, 2025 11:00 AM",
        date(2025, 11, 2),
        Priority::Medium,
        "Human Resources",
        "Q4 Evaluations",
        &["evaluations"],
        date(2025, 12, 5),
        Status::Todo,
        0,
    );
    review_prep.subtasks = vec![
        subtask("2-1", "Send self-assessment forms", false),
        subtask("2-2", "Book meeting rooms", false),
    ];

    let leave_policy = task(
        "3",
        "Update leave policy document",
        "Reflect the new carry-over rules in the staff handbook.",
        ("EMP003", "Emily Rodriguez"),
        "Oct 28, 2025 03:15 PM",
        date(2025, 10, 28),
        Priority::Low,
        "Human Resources",
        "Policy Updates",
        &["policy", "leave"],
        date(2025, 11, 7),
        Status::Completed,
        100,
    );

    let mut attendance_api = task(
        "4",
        "Implement attendance tracking API",
        "Expose clock-in and clock-out endpoints for the attendance view.",
        ("EMP001", "Sarah Johnson"),
        "Nov 3, 2025 10:45 AM",
        date(2025, 11, 3),
        Priority::High,
        "Engineering",
        "Attendance System",
        &["backend", "api"],
        date(2025, 11, 28),
        Status::InProgress,
        45,
    );
    attendance_api.comments = vec![comment(
        "c2",
        "Michael Chen",
        "MC",
        "Schema for shifts is ready for review.",
        (11, 4, 16),
    )];

    let mut migration = task(
        "5",
        "Database schema migration",
        "Move evaluation records to the new schema. Waiting on DBA sign-off.",
        ("EMP002", "Michael Chen"),
        "Nov 4, 2025 08:20 AM",
        date(2025, 11, 4),
        Priority::High,
        "Engineering",
        "Attendance System",
        &["database", "migration"],
        date(2025, 11, 15),
        Status::Blocked,
        20,
    );
    migration.subtasks = vec![
        subtask("5-1", "Write migration scripts", true),
        subtask("5-2", "DBA approval", false),
        subtask("5-3", "Run on staging", false),
    ];

    let training = task(
        "6",
        "Publish staff training schedule",
        "Compile December training sessions and share with team leads.",
        ("EMP005", "Priya Patel"),
        "Nov 5, 2025 01:00 PM",
        date(2025, 11, 5),
        Priority::Medium,
        "Operations",
        "Training Program",
        &["training"],
        date(2025, 11, 30),
        Status::Todo,
        0,
    );

    vec![onboarding, review_prep, leave_policy, attendance_api, migration, training]
}

/// A board holding the seeded staff and tasks.
pub fn seed_board() -> Board {
    Board::from_parts(seed_tasks(), seed_staff())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let tasks = seed_tasks();
        let ids: HashSet<_> = tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_seed_covers_every_lane() {
        let tasks = seed_tasks();
        for status in Status::ALL {
            assert!(tasks.iter().any(|t| t.status == status), "no seeded task in {status}");
        }
    }
}
