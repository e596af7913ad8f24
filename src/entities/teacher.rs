//! Teacher records

use crate::core::{FieldValue, Record};
use crate::record_fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Employment status of a teacher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherStatus {
    #[default]
    Active,
    OnLeave,
    Inactive,
}

impl TeacherStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TeacherStatus::Active => "active",
            TeacherStatus::OnLeave => "on_leave",
            TeacherStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for TeacherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

record_fields! {
    /// Fields of a [`Teacher`]
    pub enum TeacherField (default = Name) {
        Name => "name",
        TeacherId => "teacher_id" | "teacherId",
        Subject => "subject",
        Status => "status",
        Email => "email",
        Phone => "phone",
        Qualification => "qualification",
        YearsExperience => "years_experience" | "yearsExperience" | "experience",
        JoinedAt => "joined_at" | "joinedAt" | "joinDate",
    }
}

const TEACHER_SEARCH_FIELDS: &[TeacherField] = &[
    TeacherField::Name,
    TeacherField::TeacherId,
    TeacherField::Subject,
    TeacherField::Email,
    TeacherField::Phone,
    TeacherField::Qualification,
];

/// A member of the teaching staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,

    /// Human-facing identifier (e.g. "TCH-007")
    pub teacher_id: String,

    pub name: String,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub status: TeacherStatus,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub qualification: Option<String>,

    #[serde(default)]
    pub years_experience: Option<u32>,

    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl Teacher {
    pub fn new(teacher_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            teacher_id: teacher_id.into(),
            name: name.into(),
            subject: None,
            status: TeacherStatus::Active,
            email: None,
            phone: None,
            qualification: None,
            years_experience: None,
            joined_at: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_status(mut self, status: TeacherStatus) -> Self {
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

    pub fn with_qualification(mut self, qualification: impl Into<String>) -> Self {
        self.qualification = Some(qualification.into());
        self
    }

    pub fn with_years_experience(mut self, years: u32) -> Self {
        self.years_experience = Some(years);
        self
    }

    pub fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = Some(joined_at);
        self
    }
}

impl Record for Teacher {
    type Field = TeacherField;

    fn resource_name() -> &'static str {
        "teachers"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn field_value(&self, field: TeacherField) -> Option<FieldValue> {
        match field {
            TeacherField::Name => Some(FieldValue::from(self.name.as_str())),
            TeacherField::TeacherId => Some(FieldValue::from(self.teacher_id.as_str())),
            TeacherField::Subject => self.subject.as_deref().map(FieldValue::from),
            TeacherField::Status => Some(FieldValue::from(self.status.as_str())),
            TeacherField::Email => self.email.as_deref().map(FieldValue::from),
            TeacherField::Phone => self.phone.as_deref().map(FieldValue::from),
            TeacherField::Qualification => self.qualification.as_deref().map(FieldValue::from),
            TeacherField::YearsExperience => self.years_experience.map(FieldValue::from),
            TeacherField::JoinedAt => self.joined_at.map(FieldValue::from),
        }
    }

    fn searchable_fields() -> &'static [TeacherField] {
        TEACHER_SEARCH_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_field_values() {
        let teacher = Teacher::new("TCH-001", "Dana")
            .with_subject("Mathematics")
            .with_status(TeacherStatus::OnLeave)
            .with_years_experience(12);

        assert_eq!(
            teacher.field_value(TeacherField::Status),
            Some(FieldValue::from("on_leave"))
        );
        assert_eq!(
            teacher.field_value(TeacherField::YearsExperience),
            Some(FieldValue::Integer(12))
        );
        assert_eq!(teacher.field_value(TeacherField::Qualification), None);
        assert_eq!(Teacher::resource_name(), "teachers");
    }

    #[test]
    fn test_teacher_status_serde() {
        let json = serde_json::to_string(&TeacherStatus::OnLeave).expect("serialize should succeed");
        assert_eq!(json, "\"on_leave\"");
    }
}
