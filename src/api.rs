use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::Job;

pub const DEFAULT_API_URL: &str = "https://empllo.com/api/v1";

// Fixed namespace so ids hash the same across runs and installs.
const JOB_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f0dd2cc6f1e4f1a9d3b1c2a7e5b4d90);

/// One entry as the upstream feed sends it. Key names vary across feed
/// revisions, so the known variants are accepted as aliases and everything
/// is optional until defaults are applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJob {
    title: Option<String>,
    #[serde(alias = "companyName")]
    company: Option<String>,
    company_logo: Option<String>,
    main_category: Option<String>,
    job_type: Option<String>,
    work_model: Option<String>,
    seniority_level: Option<String>,
    #[serde(alias = "minSalary")]
    salary_min: Option<i64>,
    #[serde(alias = "maxSalary")]
    salary_max: Option<i64>,
    currency: Option<String>,
    location: Option<String>,
    locations: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    description: Option<String>,
}

impl RawJob {
    fn into_job(self) -> Job {
        let locations = self
            .locations
            .filter(|locations| !locations.is_empty())
            .or_else(|| self.location.map(|location| vec![location]));
        Job {
            id: String::new(), // assigned after the whole batch is parsed
            title: self.title.unwrap_or_else(|| "Untitled Position".to_string()),
            company: self.company.unwrap_or_else(|| "Unknown Company".to_string()),
            company_logo: self.company_logo,
            main_category: self.main_category,
            job_type: self.job_type,
            work_model: self.work_model,
            seniority_level: self.seniority_level,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            currency: self.currency,
            locations,
            tags: self.tags,
            description: self.description,
            is_saved: false,
            saved_at: None,
        }
    }
}

/// Fetches the full job feed. Network failures, non-2xx responses, and
/// malformed bodies all surface as errors for the caller to report; retry
/// is user-initiated.
pub fn fetch_jobs(base_url: &str) -> Result<Vec<Job>> {
    let url = format!("{}/jobs", base_url.trim_end_matches('/'));
    let response = reqwest::blocking::get(&url)
        .with_context(|| format!("Failed to reach job API at {}", url))?;

    if !response.status().is_success() {
        bail!("Job API returned {}", response.status());
    }

    let payload: Value = response
        .json()
        .context("Job API returned malformed JSON")?;
    parse_jobs(payload)
}

/// The feed is either `{"jobs": [...]}` or a bare array, depending on the
/// API revision.
fn parse_jobs(payload: Value) -> Result<Vec<Job>> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("jobs") {
            Some(Value::Array(entries)) => entries,
            _ => bail!("Job payload has no 'jobs' array"),
        },
        _ => bail!("Unexpected job payload shape"),
    };

    let mut jobs: Vec<Job> = entries
        .into_iter()
        .map(|entry| serde_json::from_value::<RawJob>(entry).map(RawJob::into_job))
        .collect::<Result<_, _>>()
        .context("Failed to decode job entries")?;

    assign_ids(&mut jobs);
    Ok(jobs)
}

/// The feed carries no usable ids, so each job gets a deterministic one:
/// a namespaced hash of its "title-company" key. Re-fetching therefore
/// yields the same ids and the saved list stays in sync with the feed.
/// Within one batch, later records with an already-seen key get a numeric
/// suffix; the first keeps the bare hash.
pub fn assign_ids(jobs: &mut [Job]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for job in jobs.iter_mut() {
        let key = format!("{}-{}", job.title, job.company);
        let base = Uuid::new_v5(&JOB_ID_NAMESPACE, key.as_bytes()).to_string();
        let count = seen.entry(base.clone()).or_insert(0);
        job.id = if *count == 0 {
            base.clone()
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
    }
}
