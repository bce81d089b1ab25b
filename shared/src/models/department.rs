//! Department models

use serde::{Deserialize, Serialize};

/// Organizational destination for distributed stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// Input for creating a department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// Icon and color choices still free for a new department
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentOptions {
    pub icons: Vec<String>,
    pub colors: Vec<String>,
}
