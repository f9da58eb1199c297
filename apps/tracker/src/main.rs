use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobtrack::config::{default_data_dir, DEFAULT_API_URL};
use jobtrack::models::{ApplicationRecord, NewApplication, Status, TERM_OPTIONS};
use jobtrack::proxy_client::ProxyClient;
use jobtrack::storage::FileStorage;
use jobtrack::store::ApplicationStore;
use jobtrack::view::{self, StatusFilter, TermFilter};

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Track internship and job applications")]
struct Cli {
    /// Directory holding the application data
    #[arg(long, global = true, env = "JOBTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of the job tracker API
    #[arg(long, global = true, env = "JOBTRACK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an application
    Add {
        #[arg(short, long)]
        company: Option<String>,

        #[arg(short, long)]
        position: Option<String>,

        /// Applied, Interview, Offer or Rejected
        #[arg(short, long, default_value = "Applied")]
        status: Status,

        /// Application date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Recruiting term, e.g. "Summer 2026"
        #[arg(short, long)]
        term: Option<String>,

        /// Application portal URL
        #[arg(short, long)]
        url: Option<String>,

        /// Notes (up to 500 characters)
        #[arg(short, long)]
        notes: Option<String>,

        /// Fill company, position and notes from a job posting URL first
        #[arg(long)]
        from_url: Option<String>,
    },

    /// List applications
    List {
        /// Status to show, or "all"
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// Term to show, or "all"
        #[arg(short, long, default_value = "all")]
        term: TermFilter,
    },

    /// Show counts per status
    Stats,

    /// Change the status of an application
    Status {
        id: i64,
        status: Status,
    },

    /// Delete an application
    Delete {
        id: i64,
    },

    /// List terms in use
    Terms {
        /// Show the suggested term list instead
        #[arg(long)]
        options: bool,
    },

    /// Extract company, position and notes from a job posting URL
    Extract {
        url: String,
    },

    /// Generate a cover letter for an application
    CoverLetter {
        id: i64,

        /// A short summary of your experience
        #[arg(short, long, default_value = "")]
        experience: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is command output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", env!("CARGO_CRATE_NAME")))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let client = ProxyClient::new(cli.api_url);

    let mut store = ApplicationStore::load(FileStorage::new(&data_dir))
        .with_context(|| format!("Failed to load applications from {}", data_dir.display()))?;

    match cli.command {
        Commands::Add {
            company,
            position,
            status,
            date,
            term,
            url,
            notes,
            from_url,
        } => {
            let mut application = NewApplication {
                company: company.unwrap_or_default(),
                position: position.unwrap_or_default(),
                status,
                application_date: date,
                term,
                portal_url: url,
                notes,
            };

            if let Some(job_url) = from_url {
                let details = client
                    .extract_job_details(&job_url)
                    .await
                    .context("Failed to extract job details. Please try again or fill manually.")?;
                application.fill_from_job_details(details, &job_url);
            }

            let record = store.add(application)?;
            println!(
                "Added #{}: {} at {}",
                record.id, record.position, record.company
            );
        }

        Commands::List { status, term } => {
            let today = Utc::now().date_naive();
            let matched = view::filter(store.records(), &status, &term);
            if matched.is_empty() {
                println!("No applications found.");
            } else {
                println!(
                    "{:<14} {:<10} {:<24} {:<28} {:<14} {:>5}",
                    "ID", "STATUS", "COMPANY", "POSITION", "TERM", "DAYS"
                );
                println!("{}", "-".repeat(100));
                for record in matched {
                    print_row(record, today);
                }
            }
        }

        Commands::Stats => {
            let stats = view::stats(store.records());
            println!("Total:      {}", stats.total);
            for status in Status::ALL {
                println!("{:<11} {}", format!("{status}:"), stats.count(status));
            }
        }

        Commands::Status { id, status } => {
            if store.update_status(id, status)? {
                println!("#{id} is now {status}");
            } else {
                println!("No application #{id}");
            }
        }

        Commands::Delete { id } => {
            if store.remove(id)? {
                println!("Deleted #{id}");
            } else {
                println!("No application #{id}");
            }
        }

        Commands::Terms { options } => {
            if options {
                for term in TERM_OPTIONS {
                    println!("{term}");
                }
            } else {
                let terms = view::unique_terms(store.records());
                if terms.is_empty() {
                    println!("No terms recorded.");
                }
                for term in terms {
                    println!("{term}");
                }
            }
        }

        Commands::Extract { url } => {
            let details = client
                .extract_job_details(&url)
                .await
                .context("Failed to extract job details. Please try again or fill manually.")?;
            println!("Company:  {}", details.company.unwrap_or_default());
            println!("Position: {}", details.position.unwrap_or_default());
            println!("Notes:    {}", details.notes.unwrap_or_default());
        }

        Commands::CoverLetter { id, experience } => {
            let record = store
                .get(id)
                .ok_or_else(|| anyhow!("No application #{id}"))?;
            let letter = client
                .generate_cover_letter(
                    &record.company,
                    &record.position,
                    record.notes.as_deref().unwrap_or_default(),
                    &experience,
                )
                .await
                .context("Failed to generate cover letter. Please try again.")?;
            println!("{letter}");
        }
    }

    Ok(())
}

fn print_row(record: &ApplicationRecord, today: NaiveDate) {
    println!(
        "{:<14} {:<10} {:<24} {:<28} {:<14} {:>5}",
        record.id,
        record.status,
        truncate(&record.company, 22),
        truncate(&record.position, 26),
        truncate(record.term.as_deref().unwrap_or("-"), 12),
        view::days_since_applied(record, today)
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
