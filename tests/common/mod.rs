//! Shared fixtures for integration tests

#![allow(dead_code)]

use roster_view::prelude::*;

/// Route `tracing` output through the test harness
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Amy and Cid in grade 3, Ben in grade 4
pub fn amy_ben_cid() -> Vec<Student> {
    vec![
        Student::new("STU-001", "Amy").with_grade("3"),
        Student::new("STU-002", "Ben").with_grade("4"),
        Student::new("STU-003", "Cid").with_grade("3"),
    ]
}

/// `count` students named "Student 01", "Student 02", ...
pub fn numbered_students(count: usize) -> Vec<Student> {
    (1..=count)
        .map(|n| {
            Student::new(format!("STU-{n:03}"), format!("Student {n:02}"))
                .with_grade(((n % 6) + 1).to_string())
                .with_age(5 + (n % 10) as u32)
        })
        .collect()
}

pub fn names<'a>(records: impl IntoIterator<Item = &'a Student>) -> Vec<&'a str> {
    records.into_iter().map(|s| s.name.as_str()).collect()
}

pub fn teacher_names<'a>(records: impl IntoIterator<Item = &'a Teacher>) -> Vec<&'a str> {
    records.into_iter().map(|t| t.name.as_str()).collect()
}
