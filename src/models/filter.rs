use garde::Validate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::models::job::CategoryTag;

/// Posting-age window.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DateRange {
    #[default]
    Any,
    Today,
    #[serde(rename = "3days")]
    #[strum(serialize = "3days")]
    ThreeDays,
    Week,
    Month,
}

impl DateRange {
    /// Map a free-form keyword; anything unrecognised means no constraint.
    pub fn from_keyword(keyword: &str) -> Self {
        keyword.trim().parse().unwrap_or_default()
    }

    /// Value of the provider's `date_posted` parameter.
    pub fn date_posted_param(self) -> &'static str {
        match self {
            Self::Any => "all",
            Self::Today => "today",
            Self::ThreeDays => "3days",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Any => "Any time",
            Self::Today => "Today",
            Self::ThreeDays => "Last 3 days",
            Self::Week => "This week",
            Self::Month => "This month",
        }
    }
}

/// Experience requirement forwarded to the provider.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ExperienceLevel {
    #[default]
    Unrestricted,
    Entry,
    Mid,
    NoExperience,
    NoDegree,
}

impl ExperienceLevel {
    /// Value of the provider's `job_requirements` parameter, if any.
    pub fn job_requirements(self) -> Option<&'static str> {
        match self {
            Self::Unrestricted => None,
            Self::Entry => Some("under_3_years_experience"),
            Self::Mid => Some("more_than_3_years_experience"),
            Self::NoExperience => Some("no_experience"),
            Self::NoDegree => Some("no_degree"),
        }
    }

    pub fn is_restricted(self) -> bool {
        self != Self::Unrestricted
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unrestricted => "All Levels",
            Self::Entry => "Entry Level (0-3 yrs)",
            Self::Mid => "Mid Level (3+ yrs)",
            Self::NoExperience => "No Experience Required",
            Self::NoDegree => "No Degree Required",
        }
    }
}

/// The user's current filter selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FilterState {
    /// Empty means the whole region.
    #[garde(length(chars, max = 100))]
    pub city: String,

    /// Applied after fetch only; never sent upstream.
    #[garde(skip)]
    pub category: Option<CategoryTag>,

    #[garde(skip)]
    pub date_range: DateRange,

    #[garde(skip)]
    pub experience_level: ExperienceLevel,

    #[garde(length(chars, max = 200))]
    pub search_query: String,
}

impl FilterState {
    /// The part of the state that selects what to fetch.
    pub fn query_key(&self) -> QueryKey {
        QueryKey {
            city: self.city.trim().to_string(),
            date_range: self.date_range,
            experience_level: self.experience_level,
            search_query: self.search_query.trim().to_string(),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Fetch signature: every filter except category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub city: String,
    pub date_range: DateRange,
    pub experience_level: ExperienceLevel,
    pub search_query: String,
}

impl QueryKey {
    pub fn search_query(&self) -> Option<&str> {
        Some(self.search_query.as_str()).filter(|q| !q.is_empty())
    }

    pub fn city(&self) -> Option<&str> {
        Some(self.city.as_str()).filter(|c| !c.is_empty())
    }

    /// Only the unsearched, unrestricted view is cached.
    pub fn is_cacheable(&self) -> bool {
        self.search_query().is_none() && !self.experience_level.is_restricted()
    }
}

/// A selectable city filter value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct City {
    pub value: &'static str,
    pub label: &'static str,
}

pub const KNOWN_CITIES: &[City] = &[
    City { value: "Des Moines, IA", label: "Des Moines" },
    City { value: "Cedar Rapids, IA", label: "Cedar Rapids" },
    City { value: "Iowa City, IA", label: "Iowa City" },
    City { value: "Ames, IA", label: "Ames" },
    City { value: "Davenport, IA", label: "Davenport" },
    City { value: "Sioux City, IA", label: "Sioux City" },
    City { value: "Waterloo, IA", label: "Waterloo" },
    City { value: "Cedar Falls, IA", label: "Cedar Falls" },
    City { value: "Council Bluffs, IA", label: "Council Bluffs" },
    City { value: "Dubuque, IA", label: "Dubuque" },
    City { value: "West Des Moines, IA", label: "West Des Moines" },
    City { value: "Ankeny, IA", label: "Ankeny" },
    City { value: "Urbandale, IA", label: "Urbandale" },
];
