use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult};
use crate::employees::domain::model::EmployeeEntity;
use crate::employees::repository::EmployeeRepository;
use crate::utils::memory::{MemoryDatabase, MemoryRecord, MemoryRepository};

pub(crate) type MemoryEmployeeRepository = MemoryRepository<EmployeeEntity>;

impl MemoryRecord for EmployeeEntity {
    fn table(db: &MemoryDatabase) -> &Mutex<BTreeMap<i64, Self>> {
        &db.employees
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn label() -> &'static str {
        "employee"
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.username.clone())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryEmployeeRepository {
    async fn find_by_username(&self, username: &str) -> LibraryResult<EmployeeEntity> {
        let predicate = HashMap::from([("username".to_string(), username.to_string())]);
        self.select(&predicate)?.into_iter().next().ok_or_else(|| LibraryError::not_found(
            format!("employee not found for {}", username).as_str()))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;
    use crate::employees::domain::model::EmployeeEntity;
    use crate::employees::repository::EmployeeRepository;
    use crate::employees::repository::memory_employee_repository::MemoryEmployeeRepository;
    use crate::utils::memory::memory_database;

    #[tokio::test]
    async fn test_should_enforce_unique_username() {
        let repo = MemoryEmployeeRepository::new(memory_database(Uuid::new_v4().to_string().as_str()));
        repo.create(&EmployeeEntity::new(1, "Admin", "Quản trị viên", "admin", "admin123", true))
            .await.expect("should create employee");
        let res = repo.create(&EmployeeEntity::new(2, "Other", "Thủ thư", "admin", "x", false)).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));

        let loaded = repo.find_by_username("admin").await.expect("should find employee");
        assert_eq!(1, loaded.employee_id);
        assert!(repo.find_by_username("nobody").await.is_err());
    }
}
