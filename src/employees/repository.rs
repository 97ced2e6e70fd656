pub mod ddb_employee_repository;
pub mod memory_employee_repository;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::employees::domain::model::EmployeeEntity;

#[async_trait]
pub(crate) trait EmployeeRepository: Repository<EmployeeEntity> {
    async fn find_by_username(&self, username: &str) -> LibraryResult<EmployeeEntity>;
}
