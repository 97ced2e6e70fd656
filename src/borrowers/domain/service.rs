use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use crate::borrowers::domain::BorrowerService;
use crate::borrowers::domain::model::BorrowerEntity;
use crate::borrowers::dto::BorrowerDto;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{scan_all, Collection};
use crate::counters::repository::CounterRepository;
use crate::gateway::events::{publish_committed, EventPublisher};

pub(crate) struct BorrowerServiceImpl {
    page_size: usize,
    borrower_repository: Box<dyn BorrowerRepository>,
    counter_repository: Box<dyn CounterRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl BorrowerServiceImpl {
    pub(crate) fn new(config: &Configuration, borrower_repository: Box<dyn BorrowerRepository>,
                      counter_repository: Box<dyn CounterRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            page_size: config.page_size,
            borrower_repository,
            counter_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl BorrowerService for BorrowerServiceImpl {
    async fn add_borrower(&self, borrower: &BorrowerDto) -> LibraryResult<BorrowerDto> {
        if borrower.name.trim().is_empty() {
            return Err(LibraryError::validation("borrower name is required", None));
        }
        let mut entity = BorrowerEntity::from(borrower);
        entity.borrower_id = self.counter_repository.next_id(Collection::Borrowers.table_name()).await?;
        entity.version = 0;
        self.borrower_repository.create(&entity).await?;
        let saved = BorrowerDto::from(&entity);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::added(
            "borrowers", "borrowers", entity.borrower_id.to_string().as_str(), &HashMap::new(), &saved)).await;
        Ok(saved)
    }

    async fn update_borrower(&self, borrower: &BorrowerDto) -> LibraryResult<BorrowerDto> {
        let mut entity = BorrowerEntity::from(borrower);
        entity.updated_at = Utc::now().naive_utc();
        self.borrower_repository.update(&entity).await?;
        let saved = self.find_borrower_by_id(borrower.borrower_id).await?;
        publish_committed(self.events_publisher.as_ref(), DomainEvent::updated(
            "borrowers", "borrowers", borrower.borrower_id.to_string().as_str(), &HashMap::new(), &saved)).await;
        Ok(saved)
    }

    async fn remove_borrower(&self, id: i64) -> LibraryResult<()> {
        self.borrower_repository.delete_without_open_loans(id).await?;
        info!("removed borrower {}", id);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::deleted(
            "borrowers", "borrowers", id.to_string().as_str(), &HashMap::new(), &id)).await;
        Ok(())
    }

    async fn find_borrower_by_id(&self, id: i64) -> LibraryResult<BorrowerDto> {
        self.borrower_repository.get(id).await.map(|b| BorrowerDto::from(&b))
    }

    async fn search_borrowers(&self, keyword: Option<&str>) -> LibraryResult<Vec<BorrowerDto>> {
        let mut records = scan_all(self.borrower_repository.as_ref(), self.page_size).await?;
        records.sort_by_key(|b| b.borrower_id);
        Ok(records.iter().map(BorrowerDto::from)
            .filter(|b| keyword.map(|k| b.matches(k)).unwrap_or(true))
            .collect())
    }
}

impl From<&BorrowerEntity> for BorrowerDto {
    fn from(other: &BorrowerEntity) -> Self {
        Self {
            borrower_id: other.borrower_id,
            version: other.version,
            name: other.name.to_string(),
            phone: other.phone.to_string(),
            email: other.email.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BorrowerDto> for BorrowerEntity {
    fn from(other: &BorrowerDto) -> Self {
        Self {
            borrower_id: other.borrower_id,
            version: other.version,
            name: other.name.to_string(),
            phone: other.phone.to_string(),
            email: other.email.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
