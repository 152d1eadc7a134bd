use clap::ValueEnum;

use crate::models::Job;

/// Ordering applied after filtering. `None` keeps the source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortBy {
    #[default]
    None,
    SalaryHigh,
    SalaryLow,
}

/// One categorical axis that can restrict results independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    JobType,
    WorkModel,
    SeniorityLevel,
}

/// Per-session filter selections. An empty list on a dimension means no
/// restriction on that dimension. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub job_type: Vec<String>,
    pub work_model: Vec<String>,
    pub seniority_level: Vec<String>,
    pub sort_by: SortBy,
}

impl FilterState {
    /// Drops a single accepted value from one dimension, leaving the rest of
    /// that dimension intact.
    pub fn remove_filter(&mut self, dimension: FilterDimension, value: &str) {
        let values = match dimension {
            FilterDimension::JobType => &mut self.job_type,
            FilterDimension::WorkModel => &mut self.work_model,
            FilterDimension::SeniorityLevel => &mut self.seniority_level,
        };
        values.retain(|v| v != value);
    }

    pub fn clear_sort(&mut self) {
        self.sort_by = SortBy::None;
    }
}

/// Derives the displayed list from (source list, query, filters). Pure: the
/// inputs are never mutated and the same inputs always produce the same
/// output. Filters are predicate-based so the source order survives them.
pub fn search_jobs(jobs: &[Job], query: &str, filters: &FilterState) -> Vec<Job> {
    let query = query.trim().to_lowercase();

    let mut result: Vec<Job> = jobs
        .iter()
        .filter(|job| query.is_empty() || matches_query(job, &query))
        .filter(|job| matches_category(job.job_type.as_deref(), &filters.job_type))
        .filter(|job| matches_category(job.work_model.as_deref(), &filters.work_model))
        .filter(|job| matches_category(job.seniority_level.as_deref(), &filters.seniority_level))
        .cloned()
        .collect();

    match filters.sort_by {
        SortBy::SalaryHigh => result.sort_by(|a, b| salary_key(b).cmp(&salary_key(a))),
        SortBy::SalaryLow => result.sort_by(|a, b| salary_key(a).cmp(&salary_key(b))),
        SortBy::None => {}
    }

    result
}

// Missing salaries sort as zero, same as the display layer treats them.
fn salary_key(job: &Job) -> i64 {
    job.salary_min.unwrap_or(0)
}

fn matches_query(job: &Job, query: &str) -> bool {
    if job.title.to_lowercase().contains(query) || job.company.to_lowercase().contains(query) {
        return true;
    }
    job.locations
        .as_ref()
        .is_some_and(|locations| locations.iter().any(|l| l.to_lowercase().contains(query)))
}

// Jobs missing the field are excluded once the dimension is constrained.
fn matches_category(value: Option<&str>, accepted: &[String]) -> bool {
    accepted.is_empty() || value.is_some_and(|v| accepted.iter().any(|a| a == v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str) -> Job {
        Job {
            id: format!("{}-{}", title, company),
            title: title.to_string(),
            company: company.to_string(),
            company_logo: None,
            main_category: None,
            job_type: None,
            work_model: None,
            seniority_level: None,
            salary_min: None,
            salary_max: None,
            currency: None,
            locations: None,
            tags: None,
            description: None,
            is_saved: false,
            saved_at: None,
        }
    }

    fn sample_jobs() -> Vec<Job> {
        let mut engineer = job("Engineer", "Acme");
        engineer.salary_min = Some(100);
        engineer.job_type = Some("Full-time".to_string());
        engineer.locations = Some(vec!["Manila".to_string(), "Remote".to_string()]);

        let mut designer = job("Designer", "Acme");
        designer.salary_min = Some(200);
        designer.job_type = Some("Part-time".to_string());
        designer.work_model = Some("Remote".to_string());

        let mut manager = job("Manager", "Globex");
        manager.salary_min = Some(150);
        manager.job_type = Some("Full-time".to_string());
        manager.seniority_level = Some("Senior".to_string());

        vec![engineer, designer, manager]
    }

    fn titles(jobs: &[Job]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let jobs = sample_jobs();
        let result = search_jobs(&jobs, "", &FilterState::default());
        assert_eq!(titles(&result), vec!["Engineer", "Designer", "Manager"]);
    }

    #[test]
    fn test_whitespace_query_is_no_filter() {
        let jobs = sample_jobs();
        let result = search_jobs(&jobs, "   ", &FilterState::default());
        assert_eq!(result.len(), jobs.len());
    }

    #[test]
    fn test_query_matches_title_case_insensitive() {
        let jobs = sample_jobs();
        let result = search_jobs(&jobs, "engineer", &FilterState::default());
        assert_eq!(titles(&result), vec!["Engineer"]);
    }

    #[test]
    fn test_query_matches_company_and_location() {
        let jobs = sample_jobs();
        let by_company = search_jobs(&jobs, "acme", &FilterState::default());
        assert_eq!(titles(&by_company), vec!["Engineer", "Designer"]);

        let by_location = search_jobs(&jobs, "manila", &FilterState::default());
        assert_eq!(titles(&by_location), vec!["Engineer"]);
    }

    #[test]
    fn test_result_preserves_source_order() {
        let jobs = sample_jobs();
        let result = search_jobs(&jobs, "a", &FilterState::default());
        // "a" hits all three via title/company; order must match the source.
        assert_eq!(titles(&result), vec!["Engineer", "Designer", "Manager"]);
    }

    #[test]
    fn test_category_filter_keeps_only_accepted_values() {
        let jobs = sample_jobs();
        let filters = FilterState {
            job_type: vec!["Full-time".to_string()],
            ..Default::default()
        };
        let result = search_jobs(&jobs, "", &filters);
        assert_eq!(titles(&result), vec!["Engineer", "Manager"]);
        assert!(result.iter().all(|j| j.job_type.as_deref() == Some("Full-time")));
    }

    #[test]
    fn test_constrained_dimension_excludes_jobs_missing_the_field() {
        let jobs = sample_jobs();
        let filters = FilterState {
            seniority_level: vec!["Senior".to_string(), "Junior".to_string()],
            ..Default::default()
        };
        let result = search_jobs(&jobs, "", &filters);
        // Engineer and Designer carry no seniority level at all.
        assert_eq!(titles(&result), vec!["Manager"]);
    }

    #[test]
    fn test_filters_and_query_combine_with_and() {
        let jobs = sample_jobs();
        let filters = FilterState {
            job_type: vec!["Full-time".to_string()],
            ..Default::default()
        };
        let result = search_jobs(&jobs, "acme", &filters);
        assert_eq!(titles(&result), vec!["Engineer"]);
    }

    #[test]
    fn test_sort_salary_high_and_low_are_reversed() {
        let jobs = sample_jobs();

        let mut filters = FilterState::default();
        filters.sort_by = SortBy::SalaryHigh;
        let high = search_jobs(&jobs, "", &filters);
        assert_eq!(titles(&high), vec!["Designer", "Manager", "Engineer"]);

        filters.sort_by = SortBy::SalaryLow;
        let low = search_jobs(&jobs, "", &filters);
        let mut reversed = high.clone();
        reversed.reverse();
        assert_eq!(titles(&low), titles(&reversed));
    }

    #[test]
    fn test_missing_salary_sorts_as_zero() {
        let mut jobs = sample_jobs();
        jobs.push(job("Intern", "Initech")); // no salary at all

        let filters = FilterState {
            sort_by: SortBy::SalaryLow,
            ..Default::default()
        };
        let result = search_jobs(&jobs, "", &filters);
        assert_eq!(result[0].title, "Intern");
    }

    #[test]
    fn test_sort_does_not_mutate_source() {
        let jobs = sample_jobs();
        let filters = FilterState {
            sort_by: SortBy::SalaryHigh,
            ..Default::default()
        };
        let _ = search_jobs(&jobs, "", &filters);
        assert_eq!(titles(&jobs), vec!["Engineer", "Designer", "Manager"]);
    }

    #[test]
    fn test_remove_filter_drops_single_value_only() {
        let mut filters = FilterState {
            job_type: vec!["Full-time".to_string(), "Part-time".to_string()],
            work_model: vec!["Remote".to_string()],
            ..Default::default()
        };
        filters.remove_filter(FilterDimension::JobType, "Part-time");
        assert_eq!(filters.job_type, vec!["Full-time".to_string()]);
        assert_eq!(filters.work_model, vec!["Remote".to_string()]);
    }

    #[test]
    fn test_clear_sort_resets_to_none() {
        let mut filters = FilterState {
            sort_by: SortBy::SalaryHigh,
            ..Default::default()
        };
        filters.clear_sort();
        assert_eq!(filters.sort_by, SortBy::None);
    }

    #[test]
    fn test_engineer_designer_scenario() {
        let mut engineer = job("Engineer", "Acme");
        engineer.salary_min = Some(100);
        let mut designer = job("Designer", "Acme");
        designer.salary_min = Some(200);
        let jobs = vec![engineer, designer];

        let by_query = search_jobs(&jobs, "engineer", &FilterState::default());
        assert_eq!(titles(&by_query), vec!["Engineer"]);

        let filters = FilterState {
            sort_by: SortBy::SalaryHigh,
            ..Default::default()
        };
        let sorted = search_jobs(&jobs, "", &filters);
        assert_eq!(titles(&sorted), vec!["Designer", "Engineer"]);
    }
}
