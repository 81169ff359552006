use models::department;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

impl DepartmentInput {
    pub fn new(name: &str, description: Option<&str>) -> Self {
        Self { name: name.to_string(), description: description.map(str::to_string) }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.required_len("name", &self.name, 1, 100, "Department name");
        errs.max_len("description", self.description.as_deref(), 500, "Description");
        errs.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Counted at read time over employees of every status.
    pub employee_count: u64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl DepartmentResponse {
    pub fn from_model(m: department::Model, employee_count: u64) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            employee_count,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_required() {
        let errs = DepartmentInput::new("  ", None).validate().unwrap_err();
        assert!(errs.has_field("name"));
    }

    #[test]
    fn long_description_rejected() {
        let long = "x".repeat(501);
        let errs = DepartmentInput::new("Engineering", Some(&long)).validate().unwrap_err();
        assert!(errs.has_field("description"));
        assert!(!errs.has_field("name"));
    }

    #[test]
    fn single_char_name_is_fine() {
        assert!(DepartmentInput::new("R", None).validate().is_ok());
    }
}
