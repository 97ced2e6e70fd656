use crate::books::factory::create_book_repository;
use crate::borrowers::factory::create_borrower_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::employees::factory::create_employee_repository;
use crate::loans::factory::create_loan_repository;
use crate::reports::domain::ReportService;
use crate::reports::domain::service::ReportServiceImpl;

pub(crate) async fn create_report_service(config: &Configuration, store: RepositoryStore) -> Box<dyn ReportService> {
    let book_repo = create_book_repository(config, store).await;
    let borrower_repo = create_borrower_repository(config, store).await;
    let employee_repo = create_employee_repository(config, store).await;
    let loan_repo = create_loan_repository(config, store).await;
    Box::new(ReportServiceImpl::new(config, book_repo, borrower_repo, employee_repo, loan_repo))
}
