use std::collections::{BTreeSet, HashMap};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::borrowers::repository::BorrowerRepository;
use crate::core::domain::Configuration;
use crate::core::library::{BorrowerStatus, LibraryResult, Locale};
use crate::core::repository::{scan_all, Repository};
use crate::employees::repository::EmployeeRepository;
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::reports::domain::{ReportService, OTHER_CATEGORY};
use crate::reports::dto::{BookRow, BorrowerRow, BorrowerSummaryDto, LoanDetailsDto, StatisticDto};

pub(crate) struct ReportServiceImpl {
    locale: Locale,
    page_size: usize,
    book_repository: Box<dyn BookRepository>,
    borrower_repository: Box<dyn BorrowerRepository>,
    employee_repository: Box<dyn EmployeeRepository>,
    loan_repository: Box<dyn LoanRepository>,
}

impl ReportServiceImpl {
    pub(crate) fn new(config: &Configuration,
                      book_repository: Box<dyn BookRepository>,
                      borrower_repository: Box<dyn BorrowerRepository>,
                      employee_repository: Box<dyn EmployeeRepository>,
                      loan_repository: Box<dyn LoanRepository>) -> Self {
        Self {
            locale: config.locale,
            page_size: config.page_size,
            book_repository,
            borrower_repository,
            employee_repository,
            loan_repository,
        }
    }

    async fn all_loans(&self) -> LibraryResult<Vec<LoanEntity>> {
        let mut loans = scan_all(self.loan_repository.as_ref(), self.page_size).await?;
        loans.sort_by_key(|l| l.loan_id);
        Ok(loans)
    }

    async fn books_of(&self, loans: &[LoanEntity]) -> LibraryResult<HashMap<i64, BookEntity>> {
        let ids: BTreeSet<i64> = loans.iter().map(|l| l.book_id).collect();
        lookup(self.book_repository.as_ref(), ids).await
    }
}

// Fetches each distinct id once; ids without a record are left out of the map.
async fn lookup<E, R>(repo: &R, ids: BTreeSet<i64>) -> LibraryResult<HashMap<i64, E>>
    where E: Send, R: Repository<E> + ?Sized {
    let mut found = HashMap::new();
    for id in ids {
        match repo.get(id).await {
            Ok(entity) => {
                found.insert(id, entity);
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }
    }
    Ok(found)
}

fn rank(counts: HashMap<String, usize>, limit: usize) -> Vec<StatisticDto> {
    let mut stats: Vec<StatisticDto> = counts.into_iter().map(|(k, v)| StatisticDto::new(k.as_str(), v)).collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    stats.truncate(limit);
    stats
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn list_borrowers(&self) -> LibraryResult<Vec<BorrowerRow>> {
        let mut borrowers = scan_all(self.borrower_repository.as_ref(), self.page_size).await?;
        borrowers.sort_by_key(|b| b.borrower_id);
        Ok(borrowers.into_iter().map(|b| BorrowerRow {
            borrower_id: b.borrower_id,
            name: b.name,
            phone: b.phone,
            email: b.email,
        }).collect())
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookRow>> {
        let mut books = scan_all(self.book_repository.as_ref(), self.page_size).await?;
        books.sort_by_key(|b| b.book_id);
        Ok(books.into_iter().map(|b| BookRow {
            book_id: b.book_id,
            status_label: b.book_status.label(self.locale).to_string(),
            title: b.title,
            author: b.author,
            published_year: b.published_year,
            category: b.category,
            status: b.book_status,
        }).collect())
    }

    async fn list_loan_details(&self) -> LibraryResult<Vec<LoanDetailsDto>> {
        let loans = self.all_loans().await?;
        let borrowers = lookup(self.borrower_repository.as_ref(),
                               loans.iter().map(|l| l.borrower_id).collect()).await?;
        let employees = lookup(self.employee_repository.as_ref(),
                               loans.iter().map(|l| l.employee_id).collect()).await?;
        let books = self.books_of(&loans).await?;
        Ok(loans.into_iter().map(|l| {
            let status = l.status();
            LoanDetailsDto {
                loan_id: l.loan_id,
                borrower_id: l.borrower_id,
                borrower_name: borrowers.get(&l.borrower_id).map(|b| b.name.to_string()),
                book_id: l.book_id,
                book_title: books.get(&l.book_id).map(|b| b.title.to_string()),
                employee_id: l.employee_id,
                employee_name: employees.get(&l.employee_id).map(|e| e.name.to_string()),
                borrow_date: l.borrow_date,
                return_date: l.return_date,
                is_returned: l.is_returned,
                status,
                status_label: status.label(self.locale).to_string(),
            }
        }).collect())
    }

    async fn borrower_summaries(&self, keyword: Option<&str>) -> LibraryResult<Vec<BorrowerSummaryDto>> {
        let loans = self.all_loans().await?;
        let mut counts: HashMap<i64, (usize, usize)> = HashMap::new();
        for loan in &loans {
            let entry = counts.entry(loan.borrower_id).or_default();
            entry.1 += 1;
            if !loan.is_returned {
                entry.0 += 1;
            }
        }
        let keyword = keyword.map(|k| k.to_lowercase());
        Ok(self.list_borrowers().await?.into_iter()
            .filter(|b| keyword.as_ref().map(|k| b.name.to_lowercase().contains(k) || b.phone.contains(k)).unwrap_or(true))
            .map(|b| {
                let (open_loans, total_loans) = counts.get(&b.borrower_id).copied().unwrap_or_default();
                let status = BorrowerStatus::from_counts(open_loans, total_loans);
                BorrowerSummaryDto {
                    borrower_id: b.borrower_id,
                    name: b.name,
                    phone: b.phone,
                    open_loans,
                    total_loans,
                    status,
                    status_label: status.label(self.locale).to_string(),
                }
            }).collect())
    }

    async fn top_categories(&self, since: Option<NaiveDateTime>, limit: usize) -> LibraryResult<Vec<StatisticDto>> {
        let loans: Vec<LoanEntity> = self.all_loans().await?.into_iter()
            .filter(|l| since.map(|s| l.borrow_date >= s).unwrap_or(true))
            .collect();
        let books = self.books_of(&loans).await?;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for loan in &loans {
            let category = books.get(&loan.book_id).map(|b| b.category.as_str()).unwrap_or(OTHER_CATEGORY);
            *counts.entry(category.to_string()).or_default() += 1;
        }
        Ok(rank(counts, limit))
    }

    async fn top_borrowers(&self, limit: usize) -> LibraryResult<Vec<StatisticDto>> {
        let loans = self.all_loans().await?;
        let borrowers = lookup(self.borrower_repository.as_ref(),
                               loans.iter().map(|l| l.borrower_id).collect()).await?;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for loan in &loans {
            let name = borrowers.get(&loan.borrower_id).map(|b| b.name.as_str()).unwrap_or(OTHER_CATEGORY);
            *counts.entry(name.to_string()).or_default() += 1;
        }
        Ok(rank(counts, limit))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::books::factory::create_book_repository;
    use crate::borrowers::factory::create_borrower_repository;
    use crate::core::domain::Configuration;
    use crate::core::library::{BookStatus, BorrowerStatus, Locale, LoanStatus};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::employees::factory::create_employee_repository;
    use crate::loans::factory::create_loan_service;
    use crate::reports::domain::{ReportService, OTHER_CATEGORY};
    use crate::reports::dto::StatisticDto;
    use crate::reports::factory;
    use crate::seed::seed_reference_data;
    use crate::utils::date::parse_date;

    // loan 1 stays open, loan 2 is returned
    async fn sample(config: &Configuration) -> Box<dyn ReportService> {
        seed_reference_data(config, RepositoryStore::Memory).await.expect("should seed reference data");
        let loans = create_loan_service(config, RepositoryStore::Memory).await;
        loans.borrow_book(1, 1, 1, parse_date("2022-01-01").unwrap()).await.expect("should borrow book");
        let loan = loans.borrow_book(2, 2, 2, parse_date("2022-02-01").unwrap()).await.expect("should borrow book");
        loans.return_book(loan.loan_id, parse_date("2022-02-15").unwrap()).await.expect("should return book");
        factory::create_report_service(config, RepositoryStore::Memory).await
    }

    #[tokio::test]
    async fn test_should_list_projections() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = sample(&config).await;
        let borrowers = svc.list_borrowers().await.expect("should list borrowers");
        assert_eq!(vec![1, 2], borrowers.iter().map(|b| b.borrower_id).collect::<Vec<i64>>());
        let books = svc.list_books().await.expect("should list books");
        assert_eq!(BookStatus::Borrowed, books[0].status);
        assert_eq!("Borrowed", books[0].status_label.as_str());
        assert_eq!(BookStatus::Available, books[1].status);
    }

    #[tokio::test]
    async fn test_should_list_loan_details() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str()).with_locale(Locale::Vietnamese);
        let svc = sample(&config).await;
        let details = svc.list_loan_details().await.expect("should list loans");
        assert_eq!(2, details.len());
        assert_eq!(Some("Nguyễn Văn A".to_string()), details[0].borrower_name);
        assert_eq!(Some("Sách A".to_string()), details[0].book_title);
        assert_eq!(Some("Admin Thư Viện".to_string()), details[0].employee_name);
        assert_eq!(LoanStatus::Borrowed, details[0].status);
        assert_eq!("Đang mượn", details[0].status_label.as_str());
        assert_eq!("Đã trả", details[1].status_label.as_str());
        assert_eq!(parse_date("2022-02-15"), details[1].return_date);
    }

    #[tokio::test]
    async fn test_should_keep_rows_after_join_miss() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = sample(&config).await;
        create_borrower_repository(&config, RepositoryStore::Memory).await.delete(2).await.expect("should delete borrower");
        create_book_repository(&config, RepositoryStore::Memory).await.delete(2).await.expect("should delete book");
        create_employee_repository(&config, RepositoryStore::Memory).await.delete(1).await.expect("should delete employee");

        let details = svc.list_loan_details().await.expect("should list loans");
        assert_eq!(vec![1, 2], details.iter().map(|d| d.loan_id).collect::<Vec<i64>>());
        assert_eq!(None, details[0].employee_name);
        assert_eq!(Some("Sách A".to_string()), details[0].book_title);
        assert_eq!(None, details[1].borrower_name);
        assert_eq!(None, details[1].book_title);

        let categories = svc.top_categories(None, 5).await.expect("should rank categories");
        assert!(categories.contains(&StatisticDto::new(OTHER_CATEGORY, 1)));
    }

    #[tokio::test]
    async fn test_should_summarize_borrowers() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = sample(&config).await;
        let summaries = svc.borrower_summaries(None).await.expect("should summarize");
        assert_eq!(BorrowerStatus::Borrowing, summaries[0].status);
        assert_eq!((1, 1), (summaries[0].open_loans, summaries[0].total_loans));
        assert_eq!(BorrowerStatus::AllReturned, summaries[1].status);
        assert_eq!("All returned", summaries[1].status_label.as_str());
        let filtered = svc.borrower_summaries(Some("trần")).await.expect("should summarize");
        assert_eq!(vec![2], filtered.iter().map(|s| s.borrower_id).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_should_rank_categories_and_borrowers() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let svc = sample(&config).await;
        let categories = svc.top_categories(None, 5).await.expect("should rank categories");
        assert_eq!(vec![StatisticDto::new("Khoa học", 1), StatisticDto::new("Lịch sử", 1)], categories);
        let recent = svc.top_categories(parse_date("2022-01-15"), 5).await.expect("should rank categories");
        assert_eq!(vec![StatisticDto::new("Khoa học", 1)], recent);
        let borrowers = svc.top_borrowers(1).await.expect("should rank borrowers");
        assert_eq!(1, borrowers.len());
    }
}
