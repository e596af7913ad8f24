//! Student records

use crate::core::{FieldValue, Record};
use crate::record_fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Enrollment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Pending,
    Graduated,
}

impl StudentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Pending => "pending",
            StudentStatus::Graduated => "graduated",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

record_fields! {
    /// Fields of a [`Student`]
    pub enum StudentField (default = Name) {
        Name => "name",
        StudentId => "student_id" | "studentId",
        Grade => "grade",
        Status => "status",
        Email => "email",
        Phone => "phone",
        ParentName => "parent_name" | "parentName",
        ParentPhone => "parent_phone" | "parentPhone",
        Age => "age",
        AttendanceRate => "attendance_rate" | "attendanceRate",
        EnrolledAt => "enrolled_at" | "enrolledAt" | "enrollmentDate",
    }
}

const STUDENT_SEARCH_FIELDS: &[StudentField] = &[
    StudentField::Name,
    StudentField::StudentId,
    StudentField::Grade,
    StudentField::Email,
    StudentField::Phone,
    StudentField::ParentName,
    StudentField::ParentPhone,
];

/// A student enrolled at the center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,

    /// Human-facing identifier (e.g. "STU-0042")
    pub student_id: String,

    pub name: String,

    /// Grade label as entered ("3", "Grade 3", "P3", ...)
    #[serde(default)]
    pub grade: Option<String>,

    #[serde(default)]
    pub status: StudentStatus,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub parent_name: Option<String>,

    #[serde(default)]
    pub parent_phone: Option<String>,

    #[serde(default)]
    pub age: Option<u32>,

    /// Share of attended sessions, in percent
    #[serde(default)]
    pub attendance_rate: Option<f64>,

    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl Student {
    /// Create an active student with only the required fields set
    pub fn new(student_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id: student_id.into(),
            name: name.into(),
            grade: None,
            status: StudentStatus::Active,
            email: None,
            phone: None,
            parent_name: None,
            parent_phone: None,
            age: None,
            attendance_rate: None,
            enrolled_at: None,
        }
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_parent(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.parent_name = Some(name.into());
        self.parent_phone = Some(phone.into());
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_attendance_rate(mut self, rate: f64) -> Self {
        self.attendance_rate = Some(rate);
        self
    }

    pub fn with_enrolled_at(mut self, enrolled_at: DateTime<Utc>) -> Self {
        self.enrolled_at = Some(enrolled_at);
        self
    }
}

impl Record for Student {
    type Field = StudentField;

    fn resource_name() -> &'static str {
        "students"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: StudentField) -> Option<FieldValue> {
        match field {
            StudentField::Name => Some(FieldValue::from(self.name.as_str())),
            StudentField::StudentId => Some(FieldValue::from(self.student_id.as_str())),
            StudentField::Grade => self.grade.as_deref().map(FieldValue::from),
            StudentField::Status => Some(FieldValue::from(self.status.as_str())),
            StudentField::Email => self.email.as_deref().map(FieldValue::from),
            StudentField::Phone => self.phone.as_deref().map(FieldValue::from),
            StudentField::ParentName => self.parent_name.as_deref().map(FieldValue::from),
            StudentField::ParentPhone => self.parent_phone.as_deref().map(FieldValue::from),
            StudentField::Age => self.age.map(FieldValue::from),
            StudentField::AttendanceRate => self.attendance_rate.map(FieldValue::from),
            StudentField::EnrolledAt => self.enrolled_at.map(FieldValue::from),
        }
    }

    fn searchable_fields() -> &'static [StudentField] {
        STUDENT_SEARCH_FIELDS
    }
}
