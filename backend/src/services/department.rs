//! Department management

use std::sync::Arc;

use shared::models::{Department, DepartmentOptions, NewDepartment};
use shared::validation::{department_options, validate_new_department};

use crate::error::AppResult;
use crate::external::InventoryApi;

#[derive(Clone)]
pub struct DepartmentService {
    api: Arc<dyn InventoryApi>,
}

impl DepartmentService {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.api.list_departments().await
    }

    /// Icons and colors not yet taken by an existing department
    pub async fn options(&self) -> AppResult<DepartmentOptions> {
        let existing = self.api.list_departments().await?;
        Ok(department_options(&existing))
    }

    /// Create a department whose icon and color are both still free
    pub async fn create(&self, mut department: NewDepartment) -> AppResult<Department> {
        department.name = department.name.trim().to_string();
        department.description = department.description.trim().to_string();

        let existing = self.api.list_departments().await?;
        validate_new_department(&department, &existing)?;

        let created = self.api.create_department(&department).await?;
        tracing::info!("Created department {} ({})", created.id, created.name);
        Ok(created)
    }
}
