//! Record types listed by the dashboard's management screens

pub mod macros;
pub mod student;
pub mod teacher;

pub use student::{Student, StudentField, StudentStatus};
pub use teacher::{Teacher, TeacherField, TeacherStatus};
