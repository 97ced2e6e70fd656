use crate::core::domain::Configuration;
use crate::core::repository::{RepositoryStore, SYSTEM_LOGS_TABLE};
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::memory::publisher::MemoryPublisher;
use crate::gateway::sns::publisher::SNSPublisher;
use crate::utils::ddb::{build_db_client, build_sns_client, create_table, KeyDef};
use crate::utils::memory::memory_database;

pub(crate) async fn create_publisher(config: &Configuration, via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            Box::new(SNSPublisher::new(client))
        }
        GatewayPublisherVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            let _ = create_table(&client, SYSTEM_LOGS_TABLE, KeyDef::string("event_id"), None).await;
            Box::new(DDBPublisher::new(client, SYSTEM_LOGS_TABLE))
        }
        GatewayPublisherVia::Memory => {
            Box::new(MemoryPublisher::new(memory_database(config.branch_id.as_str())))
        }
    }
}
