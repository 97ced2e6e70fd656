pub mod model;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::core::library::LibraryResult;
use crate::employees::dto::EmployeeDto;

#[async_trait]
pub(crate) trait EmployeeService: Sync + Send {
    async fn add_employee(&self, employee: &EmployeeDto) -> LibraryResult<EmployeeDto>;
    async fn update_employee(&self, employee: &EmployeeDto) -> LibraryResult<EmployeeDto>;
    async fn remove_employee(&self, id: i64) -> LibraryResult<()>;
    async fn find_employee_by_id(&self, id: i64) -> LibraryResult<EmployeeDto>;
    async fn find_employee_by_username(&self, username: &str) -> LibraryResult<EmployeeDto>;
    async fn authenticate(&self, username: &str, password: &str) -> LibraryResult<EmployeeDto>;
    async fn record_work_date(&self, id: i64, date: NaiveDateTime) -> LibraryResult<EmployeeDto>;
    async fn list_employees(&self) -> LibraryResult<Vec<EmployeeDto>>;
    async fn on_duty(&self, day: u32) -> LibraryResult<Vec<EmployeeDto>>;
}
