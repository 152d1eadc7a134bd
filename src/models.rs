use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text::group_thousands;

/// One job posting. Everything beyond id/title/company is optional because
/// the upstream feed is inconsistent about which fields it sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// True only for entries living in the saved collection.
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Salary range for display. Only derivable when both ends are present.
    pub fn formatted_salary(&self) -> String {
        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) => {
                let range = format!("{} - {}", group_thousands(min), group_thousands(max));
                match self.currency.as_deref() {
                    Some(currency) => format!("{} {}", currency, range),
                    None => range,
                }
            }
            _ => "Salary not disclosed".to_string(),
        }
    }

    pub fn location_line(&self) -> Option<String> {
        self.locations
            .as_ref()
            .filter(|locations| !locations.is_empty())
            .map(|locations| locations.join(", "))
    }
}
