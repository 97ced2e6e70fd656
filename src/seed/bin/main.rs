use clap::{Parser, ValueEnum};
use library_manager::core::domain::Configuration;
use library_manager::core::library::LibraryError;
use library_manager::core::repository::RepositoryStore;
use library_manager::seed::{seed_demo_data, seed_sample_data, DemoSize};
use library_manager::utils::ddb::setup_tracing;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum SeedMode {
    Sample,
    Demo,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Loads sample or random demo data into a library branch.")]
struct Cli {
    /// Data set to load.
    #[arg(value_enum, default_value = "sample")]
    mode: SeedMode,

    /// Number of borrowers generated in demo mode.
    #[arg(long, default_value_t = 20)]
    borrowers: usize,

    /// Number of books generated in demo mode.
    #[arg(long, default_value_t = 30)]
    books: usize,

    /// Seed of the demo generator.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), LibraryError> {
    setup_tracing();
    let cli = Cli::parse();

    let config = Configuration::from_env();
    let store = RepositoryStore::from_env();
    match cli.mode {
        SeedMode::Sample => {
            let report = seed_sample_data(&config, store).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        SeedMode::Demo => {
            let size = DemoSize {
                borrowers: cli.borrowers,
                books: cli.books,
                seed: cli.seed,
                ..DemoSize::default()
            };
            let summary = seed_demo_data(&config, store, &size).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
