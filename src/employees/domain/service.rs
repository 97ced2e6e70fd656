use std::collections::HashMap;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tracing::info;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{scan_all, Collection};
use crate::counters::repository::CounterRepository;
use crate::employees::domain::EmployeeService;
use crate::employees::domain::model::EmployeeEntity;
use crate::employees::dto::EmployeeDto;
use crate::employees::repository::EmployeeRepository;
use crate::employees::Employee;
use crate::gateway::events::{publish_committed, EventPublisher};

// bcrypt work factor of stored password hashes
const PASSWORD_COST: u32 = 10;

pub(crate) struct EmployeeServiceImpl {
    page_size: usize,
    employee_repository: Box<dyn EmployeeRepository>,
    counter_repository: Box<dyn CounterRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl EmployeeServiceImpl {
    pub(crate) fn new(config: &Configuration, employee_repository: Box<dyn EmployeeRepository>,
                      counter_repository: Box<dyn CounterRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            page_size: config.page_size,
            employee_repository,
            counter_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn add_employee(&self, employee: &EmployeeDto) -> LibraryResult<EmployeeDto> {
        if employee.username.trim().is_empty() {
            return Err(LibraryError::validation("username is required", None));
        }
        let mut entity = EmployeeEntity::from(employee);
        entity.password = bcrypt::hash(employee.password.as_str(), PASSWORD_COST)?;
        entity.employee_id = self.counter_repository.next_id(Collection::Employees.table_name()).await?;
        entity.version = 0;
        self.employee_repository.create(&entity).await?;
        let saved = EmployeeDto::from(&entity);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::added(
            "employees", "employees", entity.employee_id.to_string().as_str(), &HashMap::new(), &saved)).await;
        Ok(saved)
    }

    async fn update_employee(&self, employee: &EmployeeDto) -> LibraryResult<EmployeeDto> {
        let existing = self.employee_repository.get(employee.employee_id).await?;
        if existing.username != employee.username {
            return Err(LibraryError::validation(
                format!("username of employee {} cannot be changed", employee.employee_id).as_str(), None));
        }
        let mut entity = EmployeeEntity::from(employee);
        entity.password = if employee.password.is_empty() {
            existing.password
        } else {
            bcrypt::hash(employee.password.as_str(), PASSWORD_COST)?
        };
        self.employee_repository.update(&entity).await?;
        let saved = self.find_employee_by_id(employee.employee_id).await?;
        publish_committed(self.events_publisher.as_ref(), DomainEvent::updated(
            "employees", "employees", employee.employee_id.to_string().as_str(), &HashMap::new(), &saved)).await;
        Ok(saved)
    }

    async fn remove_employee(&self, id: i64) -> LibraryResult<()> {
        self.employee_repository.delete(id).await?;
        publish_committed(self.events_publisher.as_ref(), DomainEvent::deleted(
            "employees", "employees", id.to_string().as_str(), &HashMap::new(), &id)).await;
        Ok(())
    }

    async fn find_employee_by_id(&self, id: i64) -> LibraryResult<EmployeeDto> {
        self.employee_repository.get(id).await.map(|e| EmployeeDto::from(&e))
    }

    async fn find_employee_by_username(&self, username: &str) -> LibraryResult<EmployeeDto> {
        self.employee_repository.find_by_username(username).await.map(|e| EmployeeDto::from(&e))
    }

    async fn authenticate(&self, username: &str, password: &str) -> LibraryResult<EmployeeDto> {
        let denied = || LibraryError::access_denied(
            format!("invalid username or password for {}", username).as_str(), None);
        let employee = match self.employee_repository.find_by_username(username).await {
            Ok(employee) => employee,
            Err(err) if err.is_not_found() => return Err(denied()),
            Err(err) => return Err(err),
        };
        if !bcrypt::verify(password, employee.password.as_str()).unwrap_or(false) {
            return Err(denied());
        }
        info!("employee {} logged in", employee.username);
        Ok(EmployeeDto::from(&employee))
    }

    async fn record_work_date(&self, id: i64, date: NaiveDateTime) -> LibraryResult<EmployeeDto> {
        let mut employee = self.employee_repository.get(id).await?;
        if employee.work_date == date {
            return Ok(EmployeeDto::from(&employee));
        }
        employee.work_date = date;
        employee.updated_at = Utc::now().naive_utc();
        self.employee_repository.update(&employee).await?;
        info!("recorded work date {} for employee {}", date, id);
        self.find_employee_by_id(id).await
    }

    async fn list_employees(&self) -> LibraryResult<Vec<EmployeeDto>> {
        let mut records = scan_all(self.employee_repository.as_ref(), self.page_size).await?;
        records.sort_by_key(|e| e.employee_id);
        Ok(records.iter().map(EmployeeDto::from).collect())
    }

    async fn on_duty(&self, day: u32) -> LibraryResult<Vec<EmployeeDto>> {
        if !(1..=31).contains(&day) {
            return Err(LibraryError::validation(format!("invalid day of month {}", day).as_str(), None));
        }
        Ok(self.list_employees().await?.into_iter()
            .filter(|e| !e.is_admin() && e.works_on(day))
            .collect())
    }
}

impl From<&EmployeeEntity> for EmployeeDto {
    fn from(other: &EmployeeEntity) -> Self {
        Self {
            employee_id: other.employee_id,
            version: other.version,
            name: other.name.to_string(),
            position: other.position.to_string(),
            username: other.username.to_string(),
            password: other.password.to_string(),
            is_admin: other.is_admin,
            work_date: other.work_date,
            schedule_days: other.schedule_days.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&EmployeeDto> for EmployeeEntity {
    fn from(other: &EmployeeDto) -> Self {
        Self {
            employee_id: other.employee_id,
            version: other.version,
            name: other.name.to_string(),
            position: other.position.to_string(),
            username: other.username.to_string(),
            password: other.password.to_string(),
            is_admin: other.is_admin,
            work_date: other.work_date,
            schedule_days: other.schedule_days.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;
    use crate::employees::domain::EmployeeService;
    use crate::employees::dto::EmployeeDto;
    use crate::employees::factory;
    use crate::utils::date::parse_date;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn EmployeeService>> = AsyncOnce::new(async {
                let config = Configuration::new(Uuid::new_v4().to_string().as_str());
                factory::create_employee_service(&config, RepositoryStore::Memory).await
            });
    }

    fn new_employee(admin: bool) -> EmployeeDto {
        EmployeeDto::new("Nhân viên", "Thủ thư", Uuid::new_v4().to_string().as_str(), "secret", admin)
    }

    #[tokio::test]
    async fn test_should_add_employee() {
        let svc = SUT_SVC.get().await;
        let employee = svc.add_employee(&new_employee(false)).await.expect("should add employee");
        assert!(employee.employee_id > 0);
        assert_ne!("secret", employee.password.as_str());
        assert!(employee.password.starts_with("$2"));

        let loaded = svc.find_employee_by_id(employee.employee_id).await.expect("should return employee");
        assert_eq!(employee.username, loaded.username);
        let loaded = svc.find_employee_by_username(employee.username.as_str()).await.expect("should return employee");
        assert_eq!(employee.employee_id, loaded.employee_id);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_username() {
        let svc = SUT_SVC.get().await;
        let employee = svc.add_employee(&new_employee(false)).await.expect("should add employee");
        let mut other = new_employee(false);
        other.username = employee.username.clone();
        assert!(matches!(svc.add_employee(&other).await, Err(LibraryError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_authenticate() {
        let svc = SUT_SVC.get().await;
        let employee = svc.add_employee(&new_employee(true)).await.expect("should add employee");
        let logged = svc.authenticate(employee.username.as_str(), "secret").await.expect("should login");
        assert!(logged.is_admin);
        assert!(matches!(svc.authenticate(employee.username.as_str(), "wrong").await, Err(LibraryError::AccessDenied { .. })));
        assert!(matches!(svc.authenticate("missing-user", "secret").await, Err(LibraryError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_should_record_work_date() {
        let svc = SUT_SVC.get().await;
        let employee = svc.add_employee(&new_employee(false)).await.expect("should add employee");
        let date = parse_date("2022-03-01").expect("should parse date");
        let updated = svc.record_work_date(employee.employee_id, date).await.expect("should record date");
        assert_eq!(date, updated.work_date);
        assert_eq!(1, updated.version);
        let again = svc.record_work_date(employee.employee_id, date).await.expect("should record date");
        assert_eq!(date, again.work_date);
        assert_eq!(1, again.version);
        assert!(matches!(svc.record_work_date(-1, date).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_update_employee() {
        let svc = SUT_SVC.get().await;
        let mut employee = svc.add_employee(&new_employee(false)).await.expect("should add employee");
        employee.position = "Trưởng phòng".to_string();
        employee.password = "".to_string();
        let updated = svc.update_employee(&employee).await.expect("should update employee");
        assert_eq!("Trưởng phòng", updated.position.as_str());
        svc.authenticate(employee.username.as_str(), "secret").await.expect("should keep password");

        employee.version = updated.version;
        employee.password = "changed".to_string();
        svc.update_employee(&employee).await.expect("should change password");
        assert!(matches!(svc.authenticate(employee.username.as_str(), "secret").await, Err(LibraryError::AccessDenied { .. })));
        svc.authenticate(employee.username.as_str(), "changed").await.expect("should accept new password");

        employee.username = "renamed".to_string();
        assert!(matches!(svc.update_employee(&employee).await, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_find_on_duty() {
        let svc = SUT_SVC.get().await;
        let staff = svc.add_employee(&new_employee(false).with_schedule("7,21")).await.expect("should add employee");
        let _ = svc.add_employee(&new_employee(true).with_schedule("7")).await.expect("should add employee");
        let on_duty = svc.on_duty(21).await.expect("should list employees");
        assert!(on_duty.iter().any(|e| e.employee_id == staff.employee_id));
        assert!(on_duty.iter().all(|e| !e.is_admin));
        assert!(svc.on_duty(32).await.is_err());
    }

    #[tokio::test]
    async fn test_should_remove_employee() {
        let svc = SUT_SVC.get().await;
        let employee = svc.add_employee(&new_employee(false)).await.expect("should add employee");
        svc.remove_employee(employee.employee_id).await.expect("should remove employee");
        assert!(svc.find_employee_by_id(employee.employee_id).await.is_err());
    }
}
