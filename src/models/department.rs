use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// Label used for users that do not belong to any department.
pub const NO_DEPARTMENT: &str = "No Department";
