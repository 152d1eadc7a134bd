mod api;
mod models;
mod search;
mod store;
mod text;
mod validation;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};

use models::Job;
use search::{FilterState, SortBy, search_jobs};
use store::JobStore;
use validation::ApplicationForm;

#[derive(Parser)]
#[command(name = "jobfinder")]
#[command(about = "Job finder - search postings, bookmark favorites, apply")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text search over title, company, and location
    #[arg(short, long)]
    query: Option<String>,

    /// Keep only these job types (repeatable)
    #[arg(long = "job-type")]
    job_type: Vec<String>,

    /// Keep only these work models (repeatable)
    #[arg(long = "work-model")]
    work_model: Vec<String>,

    /// Keep only these seniority levels (repeatable)
    #[arg(long = "seniority")]
    seniority_level: Vec<String>,

    /// Sort mode
    #[arg(long, value_enum, default_value_t = SortBy::None)]
    sort: SortBy,
}

impl SearchArgs {
    fn filters(&self) -> FilterState {
        FilterState {
            job_type: self.job_type.clone(),
            work_model: self.work_model.clone(),
            seniority_level: self.seniority_level.clone(),
            sort_by: self.sort,
        }
    }

    fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and list job postings
    Jobs {
        #[command(flatten)]
        search: SearchArgs,

        /// Job API base URL
        #[arg(long, default_value = api::DEFAULT_API_URL)]
        url: String,
    },

    /// Show full details for one posting
    Show {
        /// Job ID
        id: String,

        /// Job API base URL
        #[arg(long, default_value = api::DEFAULT_API_URL)]
        url: String,
    },

    /// Bookmark a posting
    Save {
        /// Job ID
        id: String,

        /// Job API base URL
        #[arg(long, default_value = api::DEFAULT_API_URL)]
        url: String,
    },

    /// Remove a bookmark
    Unsave {
        /// Job ID
        id: String,
    },

    /// List bookmarked postings (no network)
    Saved {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Submit an application for a posting
    Apply {
        /// Job ID
        id: String,

        /// Applicant name
        #[arg(long)]
        name: String,

        /// Applicant email
        #[arg(long)]
        email: String,

        /// Contact number, digits only
        #[arg(long)]
        contact: String,

        /// Answer to "why should we hire you"
        #[arg(long)]
        why: String,

        /// Job API base URL
        #[arg(long, default_value = api::DEFAULT_API_URL)]
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Jobs { search, url } => {
            let store = JobStore::open()?;
            let jobs = fetch_jobs(&url)?;
            let results = search_jobs(&jobs, search.query(), &search.filters());
            print_job_table(&results, &store);
        }

        Commands::Show { id, url } => {
            let store = JobStore::open()?;
            let jobs = fetch_jobs(&url)?;
            let job = find_job(&jobs, &store, &id)
                .ok_or_else(|| anyhow!("Job {} not found", id))?;
            print_job_details(&job, &store);
        }

        Commands::Save { id, url } => {
            let mut store = JobStore::open()?;
            if store.is_saved(&id) {
                println!("Job {} is already saved.", id);
            } else {
                let jobs = fetch_jobs(&url)?;
                let job = jobs
                    .iter()
                    .find(|job| job.id == id)
                    .ok_or_else(|| anyhow!("Job {} not found", id))?;
                store.save_job(job);
                println!("Saved '{}' at {}.", job.title, job.company);
            }
        }

        Commands::Unsave { id } => {
            let mut store = JobStore::open()?;
            if store.is_saved(&id) {
                store.remove_job(&id);
                println!("Removed job {} from saved jobs.", id);
            } else {
                println!("Job {} is not in your saved jobs.", id);
            }
        }

        Commands::Saved { search } => {
            let store = JobStore::open()?;
            let results = search_jobs(store.saved_jobs(), search.query(), &search.filters());
            if store.saved_jobs().is_empty() {
                println!("No saved jobs yet.");
            } else {
                print_job_table(&results, &store);
            }
        }

        Commands::Apply {
            id,
            name,
            email,
            contact,
            why,
            url,
        } => {
            let store = JobStore::open()?;
            let jobs = fetch_jobs(&url)?;
            let job = find_job(&jobs, &store, &id)
                .ok_or_else(|| anyhow!("Job {} not found", id))?;

            let form = ApplicationForm {
                name,
                email,
                contact_number: contact,
                why_hire_you: why,
            };

            let errors = form.validate();
            if !errors.is_empty() {
                for error in &errors {
                    eprintln!("{}: {}", error.field, error.message);
                }
                return Err(anyhow!("Application not submitted"));
            }

            println!("Submitting application for {} at {}...", job.title, job.company);
            let acknowledgment = form.submit(&job)?;
            println!("{}", acknowledgment);
        }
    }

    Ok(())
}

fn fetch_jobs(url: &str) -> Result<Vec<Job>> {
    api::fetch_jobs(url).context("Failed to fetch jobs. Please try again later.")
}

// Postings may have dropped out of the feed since they were saved, so
// lookups fall back to the saved collection.
fn find_job(jobs: &[Job], store: &JobStore, id: &str) -> Option<Job> {
    jobs.iter()
        .find(|job| job.id == id)
        .or_else(|| store.saved_jobs().iter().find(|job| job.id == id))
        .cloned()
}

fn print_job_table(jobs: &[Job], store: &JobStore) {
    if jobs.is_empty() {
        println!("No jobs found.");
        return;
    }

    println!(
        "{:<38} {:<5} {:<28} {:<20} {:>22}",
        "ID", "SAVED", "TITLE", "COMPANY", "SALARY"
    );
    println!("{}", "-".repeat(116));
    for job in jobs {
        let saved = if store.is_saved(&job.id) { "*" } else { "" };
        println!(
            "{:<38} {:<5} {:<28} {:<20} {:>22}",
            job.id,
            saved,
            truncate(&job.title, 26),
            truncate(&job.company, 18),
            truncate(&job.formatted_salary(), 22)
        );
    }
    println!(
        "\n{} {} found",
        jobs.len(),
        if jobs.len() == 1 { "job" } else { "jobs" }
    );
}

fn print_job_details(job: &Job, store: &JobStore) {
    println!("{}", job.title);
    println!("{}", job.company);
    if let Some(location) = job.location_line() {
        println!("{}", location);
    }

    let badges: Vec<&str> = [
        job.job_type.as_deref(),
        job.work_model.as_deref(),
        job.seniority_level.as_deref(),
        job.main_category.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !badges.is_empty() {
        println!("[{}]", badges.join("] ["));
    }

    println!("\nSalary: {}", job.formatted_salary());
    if store.is_saved(&job.id) {
        println!("Saved: yes");
    }

    println!("\nAbout the Role");
    let description = text::format_description(job.description.as_deref().unwrap_or(""));
    for line in description.lines() {
        println!("{}", textwrap::fill(line, 80));
    }

    if let Some(tags) = &job.tags {
        if !tags.is_empty() {
            let hashtags: Vec<String> = tags.iter().map(|tag| format!("#{}", tag)).collect();
            println!("\nTags: {}", hashtags.join(" "));
        }
    }
}

// Counts chars, not bytes: feed strings are arbitrary UTF-8 and a byte
// slice could land mid-character.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
