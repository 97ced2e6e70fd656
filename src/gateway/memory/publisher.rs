use std::sync::Arc;
use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;
use crate::utils::memory::{lock, MemoryDatabase};

// Appends events to the branch's in-memory log.
#[derive(Debug)]
pub struct MemoryPublisher {
    db: Arc<MemoryDatabase>,
}

impl MemoryPublisher {
    pub(crate) fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError> {
        Ok(topic.to_string())
    }

    async fn get_topics(&self) -> Result<Vec<String>, LibraryError> {
        let events = lock(&self.db.events)?;
        let mut topics: Vec<String> = events.iter().map(|e| e.name.clone()).collect();
        topics.sort();
        topics.dedup();
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        lock(&self.db.events)?.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use uuid::Uuid;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;
    use crate::utils::memory::{lock, memory_database};

    #[tokio::test]
    async fn test_should_publish_to_memory() {
        let db = memory_database(Uuid::new_v4().to_string().as_str());
        let publisher = MemoryPublisher::new(db.clone());
        let event = DomainEvent::added("return_book", "loans", "7", &HashMap::new(), &7).expect("build event");
        publisher.publish(&event).await.expect("should publish");
        assert_eq!(vec!["return_book".to_string()], publisher.get_topics().await.expect("should get topics"));
        assert_eq!(1, lock(&db.events).expect("should lock").len());
    }
}
