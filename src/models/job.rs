use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Technology domain a listing is tagged with.
///
/// Tags are not mutually exclusive: a listing may carry several, or none at
/// all when it looks unrelated to software.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CategoryTag {
    Frontend,
    Backend,
    Fullstack,
    Devops,
    Mobile,
    Data,
    Security,
    Cloud,
}

impl CategoryTag {
    /// Human-readable badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Fullstack => "Fullstack",
            Self::Devops => "DevOps",
            Self::Mobile => "Mobile",
            Self::Data => "Data",
            Self::Security => "Security",
            Self::Cloud => "Cloud",
        }
    }
}

/// Label shown for a listing without any tag.
pub const UNCLASSIFIED_LABEL: &str = "Other";

/// Bullet lists the provider extracts from a posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
}

/// A normalized job listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub company_website: Option<String>,
    /// "City, ST" built from the separate provider fields.
    pub location: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_remote: bool,
    pub employment_type: String,
    pub apply_link: String,
    /// `None` when the provider timestamp could not be parsed.
    pub posted_at: Option<DateTime<Utc>>,
    pub description: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: Option<String>,
    pub salary_period: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Highlights>,
}

impl JobRecord {
    pub fn has_category(&self, tag: CategoryTag) -> bool {
        self.categories.contains(&tag)
    }

    /// Salary range as shown on a listing card, e.g. `$80k - $120k/year`.
    ///
    /// Zero bounds count as missing.
    pub fn salary_summary(&self) -> Option<String> {
        let min = self.salary_min.filter(|v| *v > 0.0);
        let max = self.salary_max.filter(|v| *v > 0.0);
        let per = self
            .salary_period
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| "year".to_string());

        match (min, max) {
            (Some(min), Some(max)) => Some(format!(
                "${} - ${}/{}",
                compact_amount(min),
                compact_amount(max),
                per
            )),
            (Some(min), None) => Some(format!("${}+/{}", compact_amount(min), per)),
            (None, Some(max)) => Some(format!("Up to ${}/{}", compact_amount(max), per)),
            (None, None) => None,
        }
    }

    /// Relative age of the posting as of `now`.
    pub fn posted_ago(&self, now: DateTime<Utc>) -> String {
        let Some(posted_at) = self.posted_at else {
            return "Unknown".to_string();
        };
        let days = (now - posted_at).num_days();

        match days {
            d if d <= 0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            d if d < 7 => format!("{d} days ago"),
            d if d < 30 => format!("{} weeks ago", d / 7),
            d => format!("{} months ago", d / 30),
        }
    }
}

fn compact_amount(amount: f64) -> String {
    if amount >= 1000.0 {
        format!("{:.0}k", amount / 1000.0)
    } else {
        format!("{amount}")
    }
}
