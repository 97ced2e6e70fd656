use crate::books::factory::create_book_repository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::counters::factory::create_counter_repository;
use crate::gateway::factory::create_publisher;

pub(crate) async fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogService> {
    let book_repo = create_book_repository(config, store).await;
    let counter_repo = create_counter_repository(config, store).await;
    let publisher = create_publisher(config, store.gateway_publisher()).await;
    Box::new(CatalogServiceImpl::new(config, book_repo, counter_repo, publisher))
}
