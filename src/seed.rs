use chrono::{Duration, NaiveDateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use crate::books::dto::BookDto;
use crate::borrowers::dto::BorrowerDto;
use crate::borrowers::factory::create_borrower_service;
use crate::catalog::factory::create_catalog_service;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{Collection, RepositoryStore};
use crate::counters::factory::create_counter_repository;
use crate::employees::dto::EmployeeDto;
use crate::employees::factory::create_employee_service;
use crate::loans::factory::create_loan_service;
use crate::reports::dto::{BookRow, BorrowerRow, LoanDetailsDto};
use crate::reports::factory::create_report_service;
use crate::utils::date::parse_date;

const CATEGORIES: [&str; 6] = ["Lịch sử", "Khoa học", "Văn học", "Thiếu nhi", "Kinh tế", "Công nghệ"];
const FAMILY_NAMES: [&str; 8] = ["Nguyễn", "Trần", "Lê", "Phạm", "Hoàng", "Huỳnh", "Võ", "Đặng"];
const GIVEN_NAMES: [&str; 8] = ["Văn An", "Thị Bình", "Minh Châu", "Quốc Dũng", "Thu Hà", "Gia Huy", "Ngọc Lan", "Đức Long"];

// Projections printed after the sample data is loaded.
#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub borrowers: Vec<BorrowerRow>,
    pub books: Vec<BookRow>,
    pub loans: Vec<LoanDetailsDto>,
}

#[derive(Debug, Clone)]
pub struct DemoSize {
    pub employees: usize,
    pub books: usize,
    pub borrowers: usize,
    pub loans_per_borrower: usize,
    // fixed seed for a reproducible history
    pub seed: Option<u64>,
}

impl Default for DemoSize {
    fn default() -> Self {
        Self {
            employees: 4,
            books: 30,
            borrowers: 20,
            loans_per_borrower: 5,
            seed: None,
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct DemoSummary {
    pub employees: usize,
    pub books: usize,
    pub borrowers: usize,
    pub loans: usize,
    pub open_loans: usize,
}

// Adds the two employees, two books and two borrowers of the starter data set.
// Returns false without writing anything when the branch already issued employee ids.
pub async fn seed_reference_data(config: &Configuration, store: RepositoryStore) -> LibraryResult<bool> {
    let counters = create_counter_repository(config, store).await;
    if counters.last_id(Collection::Employees.table_name()).await? > 0 {
        info!("branch {} already has reference data", config.branch_id);
        return Ok(false);
    }

    let employees = create_employee_service(config, store).await;
    employees.add_employee(&EmployeeDto::new("Admin Thư Viện", "Quản trị viên", "admin", "admin123", true)).await?;
    employees.add_employee(&EmployeeDto::new("Nhân viên 1", "Thủ thư", "staff", "staff123", false)).await?;

    let catalog = create_catalog_service(config, store).await;
    catalog.add_book(&BookDto::new("Sách A", "Tác giả A", 2022, "Lịch sử")).await?;
    catalog.add_book(&BookDto::new("Sách B", "Tác giả B", 2021, "Khoa học")).await?;

    let borrowers = create_borrower_service(config, store).await;
    borrowers.add_borrower(&BorrowerDto::new("Nguyễn Văn A", "0123456789", "nguyenvana@example.com")).await?;
    borrowers.add_borrower(&BorrowerDto::new("Trần Thị B", "0987654321", "tranb@example.com")).await?;

    info!("seeded reference data of branch {}", config.branch_id);
    Ok(true)
}

fn sample_date(s: &str) -> LibraryResult<NaiveDateTime> {
    parse_date(s).ok_or_else(|| LibraryError::validation(format!("invalid date {}", s).as_str(), None))
}

// Loads the starter data set with its two loans, replays the follow-up updates
// (work dates recorded, loan 1 returned) and returns the resulting projections.
pub async fn seed_sample_data(config: &Configuration, store: RepositoryStore) -> LibraryResult<SeedReport> {
    if seed_reference_data(config, store).await? {
        let loans = create_loan_service(config, store).await;
        let employees = create_employee_service(config, store).await;

        let first = loans.borrow_book(1, 1, 1, sample_date("2022-01-01")?).await?;
        let second = loans.borrow_book(2, 2, 2, sample_date("2022-02-01")?).await?;
        loans.return_book(second.loan_id, sample_date("2022-02-15")?).await?;

        employees.record_work_date(1, Utc::now().naive_utc()).await?;
        loans.return_book(first.loan_id, Utc::now().naive_utc()).await?;
        employees.record_work_date(1, Utc::now().naive_utc()).await?;
        info!("seeded sample loans of branch {}", config.branch_id);
    }

    let reports = create_report_service(config, store).await;
    Ok(SeedReport {
        borrowers: reports.list_borrowers().await?,
        books: reports.list_books().await?,
        loans: reports.list_loan_details().await?,
    })
}

// Generates a random branch history through the lifecycle operations, so a book is
// never lent twice at the same time.
pub async fn seed_demo_data(config: &Configuration, store: RepositoryStore, size: &DemoSize) -> LibraryResult<DemoSummary> {
    let mut rng = match size.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut summary = DemoSummary::default();

    let employees = create_employee_service(config, store).await;
    let mut staff = vec![];
    for i in 0..size.employees {
        let mut days: Vec<u32> = (1..=28).collect();
        days.shuffle(&mut rng);
        let mut schedule: Vec<u32> = days.into_iter().take(rng.gen_range(2..=8)).collect();
        schedule.sort_unstable();
        let schedule = schedule.iter().map(|d| d.to_string()).collect::<Vec<String>>().join(",");
        let tag = Uuid::new_v4().simple().to_string();
        let employee = EmployeeDto::new(format!("Nhân viên {}", i + 1).as_str(), "Thủ thư",
                                        format!("staff-{}", &tag[..8]).as_str(), "staff123", false)
            .with_schedule(schedule.as_str());
        staff.push(employees.add_employee(&employee).await?.employee_id);
    }
    summary.employees = staff.len();

    let catalog = create_catalog_service(config, store).await;
    let mut books = vec![];
    for i in 0..size.books {
        let category = CATEGORIES.choose(&mut rng).copied().unwrap_or(CATEGORIES[0]);
        let book = BookDto::new(format!("Sách {}", i + 1).as_str(),
                                format!("Tác giả {}", rng.gen_range(1..=size.books.max(1))).as_str(),
                                rng.gen_range(1990..=2024), category);
        books.push(catalog.add_book(&book).await?.book_id);
    }
    summary.books = books.len();

    let borrowers_svc = create_borrower_service(config, store).await;
    let mut borrowers = vec![];
    for _ in 0..size.borrowers {
        let name = format!("{} {}",
                           FAMILY_NAMES.choose(&mut rng).copied().unwrap_or(FAMILY_NAMES[0]),
                           GIVEN_NAMES.choose(&mut rng).copied().unwrap_or(GIVEN_NAMES[0]));
        let phone = format!("09{:08}", rng.gen_range(0..100_000_000));
        let email = format!("{}@example.com", phone);
        borrowers.push(borrowers_svc.add_borrower(&BorrowerDto::new(name.as_str(), phone.as_str(), email.as_str())).await?.borrower_id);
    }
    summary.borrowers = borrowers.len();

    if staff.is_empty() || books.is_empty() {
        return Ok(summary);
    }
    let loans = create_loan_service(config, store).await;
    let today = Utc::now().naive_utc();
    for borrower_id in &borrowers {
        for _ in 0..rng.gen_range(0..=size.loans_per_borrower) {
            let book_id = books.choose(&mut rng).copied().unwrap_or(books[0]);
            let employee_id = staff.choose(&mut rng).copied().unwrap_or(staff[0]);
            let borrowed_at = today - Duration::days(rng.gen_range(1..=60));
            let loan = match loans.borrow_book(*borrower_id, book_id, employee_id, borrowed_at).await {
                Ok(loan) => loan,
                Err(LibraryError::InvalidState { .. }) => continue,
                Err(err) => return Err(err),
            };
            summary.loans += 1;
            if rng.gen_bool(0.7) {
                let returned_at = borrowed_at + Duration::days(rng.gen_range(1..=21));
                loans.return_book(loan.loan_id, returned_at.min(today)).await?;
            } else {
                summary.open_loans += 1;
            }
        }
    }
    if summary.loans == 0 {
        warn!("demo data of branch {} has no loans", config.branch_id);
    }
    info!("seeded demo data of branch {}: {:?}", config.branch_id, summary);
    Ok(summary)
}
