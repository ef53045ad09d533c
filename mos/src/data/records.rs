//! Wire records returned by the collections API
//!
//! The endpoints serve camelCase JSON arrays; these types are the boundary
//! where modules turn untyped payloads into something they can trust.

use serde::{Deserialize, Serialize};

/// A project as served by `/projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub date: String,
}

/// A task as served by `/tasks`. Named `TaskRecord` to stay clear of
/// `tokio::task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    pub status: String,
}

/// A team as served by `/team`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    pub members: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_record_uses_camel_case_on_the_wire() {
        let task: TaskRecord =
            serde_json::from_value(json!({"id": 2, "projectId": 2, "name": "API Integration", "status": "In Progress"}))
                .unwrap();
        assert_eq!(task.project_id, 2);
        assert_eq!(serde_json::to_value(&task).unwrap()["projectId"], json!(2));
    }

    #[test]
    fn test_team_members_are_strings() {
        let team: Team =
            serde_json::from_value(json!({"id": 1, "name": "Team Alpha", "members": ["John Doe", "Jane Smith"]}))
                .unwrap();
        assert_eq!(team.members.len(), 2);
    }
}
