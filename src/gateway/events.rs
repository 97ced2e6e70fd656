use async_trait::async_trait;
use tracing::warn;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;

#[async_trait]
pub(crate) trait EventPublisher: Sync + Send {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError>;
    async fn get_topics(&self) -> Result<Vec<String>, LibraryError>;
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError>;
}

// Publishes the event of a write that is already committed. Failures are only logged
// so they never undo or fail the write.
pub(crate) async fn publish_committed(publisher: &dyn EventPublisher, event: serde_json::Result<DomainEvent>) {
    match event {
        Ok(event) => {
            if let Err(err) = publisher.publish(&event).await {
                warn!("failed to publish {} event for {}: {}", event.name, event.key, err);
            }
        }
        Err(err) => {
            warn!("failed to build event: {}", err);
        }
    }
}
