use models::position;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionInput {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub department_id: Option<i32>,
}

impl PositionInput {
    pub fn new(title: &str, department_id: i32) -> Self {
        Self { title: title.to_string(), description: None, department_id: Some(department_id) }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.required_len("title", &self.title, 2, 100, "Position title");
        errs.max_len("description", self.description.as_deref(), 500, "Description");
        if self.department_id.is_none() {
            errs.add("departmentId", "Department ID is required");
        }
        errs.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub department_id: i32,
    pub department_name: String,
    pub employee_count: u64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl PositionResponse {
    pub fn from_model(m: position::Model, department_name: String, employee_count: u64) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            department_id: m.department_id,
            department_name,
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
    fn department_is_required() {
        let input = PositionInput { title: "Engineer".into(), ..Default::default() };
        let errs = input.validate().unwrap_err();
        assert!(errs.has_field("departmentId"));
    }

    #[test]
    fn title_needs_two_chars() {
        let errs = PositionInput::new("X", 1).validate().unwrap_err();
        assert!(errs.has_field("title"));
        assert!(PositionInput::new("QA", 1).validate().is_ok());
    }
}
