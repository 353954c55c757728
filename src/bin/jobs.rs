use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use iowa_dev_jobs::config::AppConfig;
use iowa_dev_jobs::models::company::{companies_by_sector, companies_in, Sector};
use iowa_dev_jobs::models::filter::{DateRange, ExperienceLevel, FilterState, KNOWN_CITIES};
use iowa_dev_jobs::models::job::{CategoryTag, JobRecord, UNCLASSIFIED_LABEL};
use iowa_dev_jobs::services::aggregator::Aggregator;
use iowa_dev_jobs::services::board::{JobBoard, ERROR_FALLBACK};
use iowa_dev_jobs::services::cache::JobCache;
use iowa_dev_jobs::services::categorize::primary_category;
use iowa_dev_jobs::services::filter_store::FilterStore;
use iowa_dev_jobs::services::jobs_api::JobsApiClient;
use iowa_dev_jobs::services::store::{open_store, KeyValueStore};

#[derive(Parser)]
#[command(name = "jobs", about = "Browse regional tech job listings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List jobs matching the saved filters
    List {
        /// Ignore the category filter
        #[arg(long)]
        all: bool,
        /// Show at most this many listings
        #[arg(long, default_value_t = 25)]
        limit: usize,
        /// Drop the cached listings before loading
        #[arg(long)]
        refresh: bool,
        /// Retry a failed load this many times
        #[arg(long, default_value_t = 0)]
        retry: u32,
    },
    /// Show or change the saved filters
    Filters {
        #[command(subcommand)]
        action: FiltersAction,
    },
    /// Regional employers and their careers pages
    Companies {
        /// Only this sector (e.g. software, financial)
        #[arg(long)]
        sector: Option<Sector>,
    },
    /// City filter values
    Cities,
}

#[derive(Subcommand)]
enum FiltersAction {
    Show,
    Set(SetFilters),
    Reset,
}

#[derive(Args)]
struct SetFilters {
    /// City, e.g. "Ames, IA" ("" for the whole region)
    #[arg(long)]
    city: Option<String>,
    /// Category tag, or "all"
    #[arg(long)]
    category: Option<String>,
    /// any, today, 3days, week or month
    #[arg(long)]
    date_range: Option<String>,
    /// unrestricted, entry, mid, no-experience or no-degree
    #[arg(long)]
    experience: Option<ExperienceLevel>,
    /// Free-text search ("" to clear)
    #[arg(long)]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Companies { sector } => {
            print_companies(sector);
            ExitCode::SUCCESS
        }
        Command::Cities => {
            for city in KNOWN_CITIES {
                println!("{:<18} {}", city.label, city.value);
            }
            ExitCode::SUCCESS
        }
        Command::Filters { action } => {
            let store = match open_store(&config).await {
                Ok(store) => store,
                Err(e) => {
                    eprintln!("Failed to open state store: {e}");
                    return ExitCode::FAILURE;
                }
            };
            run_filters(action, store).await
        }
        Command::List {
            all,
            limit,
            refresh,
            retry,
        } => run_list(&config, all, limit, refresh, retry).await,
    }
}

async fn run_filters(action: FiltersAction, store: Arc<dyn KeyValueStore>) -> ExitCode {
    let mut filters = FilterStore::load(store).await;

    match action {
        FiltersAction::Show => {}
        FiltersAction::Reset => filters.reset().await,
        FiltersAction::Set(set) => {
            let category = match set.category.as_deref().map(parse_category).transpose() {
                Ok(category) => category,
                Err(raw) => {
                    eprintln!("Unknown category: {raw}");
                    return ExitCode::FAILURE;
                }
            };

            let result = filters
                .update(|s| {
                    if let Some(city) = set.city {
                        s.city = city;
                    }
                    if let Some(category) = category {
                        s.category = category;
                    }
                    if let Some(range) = set.date_range.as_deref() {
                        s.date_range = DateRange::from_keyword(range);
                    }
                    if let Some(level) = set.experience {
                        s.experience_level = level;
                    }
                    if let Some(search) = set.search {
                        s.search_query = search;
                    }
                })
                .await;

            if let Err(e) = result {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    print_filters(filters.state());
    ExitCode::SUCCESS
}

/// `Ok(None)` clears the category filter.
fn parse_category(raw: &str) -> Result<Option<CategoryTag>, String> {
    match raw.trim() {
        "" | "all" => Ok(None),
        other => other.parse().map(Some).map_err(|_| other.to_string()),
    }
}

async fn run_list(config: &AppConfig, all: bool, limit: usize, refresh: bool, retry: u32) -> ExitCode {
    let store = match open_store(config).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open state store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match JobsApiClient::new(config.jobs_api_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to initialize jobs API client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(ttl) = config.cache_ttl() else {
        eprintln!(
            "Invalid CACHE_TTL_SECS: {} is out of range",
            config.cache_ttl_secs
        );
        return ExitCode::FAILURE;
    };
    let cache = JobCache::new(store.clone(), ttl);
    if refresh {
        cache.clear().await;
    }

    let aggregator = Aggregator::from_config(Arc::new(client), cache, config);
    let filters = FilterStore::load(store).await;
    let mut board = JobBoard::new(aggregator, filters);

    eprintln!("Finding jobs...");
    board.sync().await;
    for attempt in 1..=retry {
        if !board.view().is_error {
            break;
        }
        eprintln!("Retrying ({attempt}/{retry})...");
        board.retry().await;
    }

    let view = board.view();
    if view.is_error {
        eprintln!("Oops! Something went wrong");
        eprintln!("{}", view.error.unwrap_or(ERROR_FALLBACK));
        eprintln!("Try again with `jobs list --retry 1`.");
        return ExitCode::FAILURE;
    }

    let shown: Vec<&JobRecord> = if all {
        view.all_jobs.iter().collect()
    } else {
        view.jobs
    };

    if shown.is_empty() {
        println!("No jobs found... yet!");
        println!("Try adjusting your filters or search terms. New opportunities pop up all the time!");
        return ExitCode::SUCCESS;
    }

    let now = Utc::now();
    println!("{} of {} jobs", shown.len().min(limit), view.all_jobs.len());
    for job in shown.into_iter().take(limit) {
        print_job(job, now);
    }
    ExitCode::SUCCESS
}

fn print_job(job: &JobRecord, now: chrono::DateTime<Utc>) {
    let badge = primary_category(&job.categories)
        .map(CategoryTag::label)
        .unwrap_or(UNCLASSIFIED_LABEL);

    let mut meta = vec![job.location.clone()];
    if job.is_remote {
        meta.push("Remote".to_string());
    }
    if !job.employment_type.is_empty() {
        meta.push(job.employment_type.clone());
    }
    meta.push(job.posted_ago(now));
    if let Some(salary) = job.salary_summary() {
        meta.push(salary);
    }

    println!();
    println!("[{badge}] {} @ {}", job.title, job.company);
    println!("    {}", meta.join(" | "));
    println!("    Apply: {}", job.apply_link);
}

fn print_filters(state: &FilterState) {
    let category = state
        .category
        .map(CategoryTag::label)
        .unwrap_or("All Categories");
    let city = if state.city.is_empty() {
        "All Iowa"
    } else {
        state.city.as_str()
    };

    println!("city:        {city}");
    println!("category:    {category}");
    println!("date range:  {}", state.date_range.label());
    println!("experience:  {}", state.experience_level.label());
    println!("search:      {}", state.search_query);
}

fn print_companies(sector: Option<Sector>) {
    let groups = match sector {
        Some(sector) => vec![(sector, companies_in(sector))],
        None => companies_by_sector(),
    };

    for (sector, companies) in groups {
        println!("{sector}");
        for company in companies {
            println!("  {:<52} {}", company.name, company.career_url);
        }
    }
}
