//! Keyword categorization of job postings.
//!
//! Matching is plain case-insensitive substring search over the title and
//! description. There is no word-boundary check, so "css" also matches
//! "cssoptimization".

use crate::models::job::CategoryTag;

/// Keyword lists per tag, in output order.
pub const CATEGORY_KEYWORDS: &[(CategoryTag, &[&str])] = &[
    (
        CategoryTag::Frontend,
        &[
            "frontend", "front-end", "front end", "react", "vue", "angular", "svelte",
            "javascript", "typescript", "css", "html", "ui developer", "ui engineer",
            "web developer", "next.js", "nextjs", "tailwind", "sass", "webpack",
        ],
    ),
    (
        CategoryTag::Backend,
        &[
            "backend", "back-end", "back end", "node.js", "nodejs", "python", "java",
            "golang", "go developer", "ruby", "rails", "django", "flask", "spring",
            "api developer", "server", ".net", "c#", "php", "laravel", "express",
        ],
    ),
    (
        CategoryTag::Fullstack,
        &["fullstack", "full-stack", "full stack", "mern", "mean", "lamp"],
    ),
    (
        CategoryTag::Devops,
        &[
            "devops", "dev ops", "sre", "site reliability", "infrastructure", "ci/cd",
            "cicd", "jenkins", "gitlab", "github actions", "terraform", "ansible",
            "puppet", "chef",
        ],
    ),
    (
        CategoryTag::Mobile,
        &[
            "mobile", "ios", "android", "swift", "kotlin", "react native", "flutter",
            "xamarin", "mobile developer", "app developer",
        ],
    ),
    (
        CategoryTag::Data,
        &[
            "data engineer", "data scientist", "machine learning", "ml engineer",
            "ai engineer", "big data", "analytics", "etl", "data pipeline", "spark",
            "hadoop", "snowflake", "databricks", "tensorflow", "pytorch",
        ],
    ),
    (
        CategoryTag::Security,
        &[
            "security", "cybersecurity", "infosec", "penetration", "pentest",
            "vulnerability", "soc analyst", "security engineer", "appsec",
        ],
    ),
    (
        CategoryTag::Cloud,
        &[
            "aws", "azure", "gcp", "google cloud", "cloud engineer", "cloud architect",
            "kubernetes", "k8s", "docker", "containerization", "microservices",
        ],
    ),
];

/// Terms marking a posting as a software role when no keyword matched.
pub const SOFTWARE_ROLE_SIGNALS: &[&str] = &["software", "developer", "engineer", "programmer"];

/// Single-badge priority; the first tag present wins.
pub const PRIMARY_PRIORITY: &[CategoryTag] = &[
    CategoryTag::Fullstack,
    CategoryTag::Frontend,
    CategoryTag::Backend,
    CategoryTag::Devops,
    CategoryTag::Cloud,
    CategoryTag::Mobile,
    CategoryTag::Data,
    CategoryTag::Security,
];

/// Tag a posting from its title and description.
///
/// Postings with no keyword match fall back to `Fullstack` when they carry a
/// generic software-role signal, and stay untagged otherwise.
pub fn categorize(title: &str, description: &str) -> Vec<CategoryTag> {
    let text = format!("{title} {description}").to_lowercase();

    let mut tags: Vec<CategoryTag> = CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(tag, _)| *tag)
        .collect();

    if tags.is_empty() && SOFTWARE_ROLE_SIGNALS.iter().any(|s| text.contains(s)) {
        tags.push(CategoryTag::Fullstack);
    }

    tags
}

/// Tag shown when only one badge fits. `None` means unclassified.
pub fn primary_category(tags: &[CategoryTag]) -> Option<CategoryTag> {
    PRIMARY_PRIORITY
        .iter()
        .copied()
        .find(|tag| tags.contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_frontend_title() {
        assert_eq!(
            categorize("Senior React Frontend Engineer", ""),
            vec![CategoryTag::Frontend]
        );
    }

    #[test]
    fn test_multiple_tags() {
        assert_eq!(
            categorize(
                "DevOps / Cloud Platform Engineer",
                "experience with Kubernetes and AWS"
            ),
            vec![CategoryTag::Devops, CategoryTag::Cloud]
        );
    }

    #[test]
    fn test_non_technical_stays_untagged() {
        assert!(categorize("Office Coordinator", "manage schedules").is_empty());
    }

    #[test]
    fn test_generic_software_fallback() {
        assert_eq!(
            categorize("Software Engineer II", ""),
            vec![CategoryTag::Fullstack]
        );
        assert_eq!(
            categorize("Lead PROGRAMMER", "on-site"),
            vec![CategoryTag::Fullstack]
        );
    }

    #[test]
    fn test_substring_without_word_boundary() {
        assert_eq!(
            categorize("Specialist", "cssoptimization"),
            vec![CategoryTag::Frontend]
        );
    }

    #[test]
    fn test_idempotent() {
        let title = "Full Stack Developer";
        let description = "Node.js, React and Docker on AWS";
        assert_eq!(categorize(title, description), categorize(title, description));
    }

    #[test]
    fn test_every_tag_has_keywords() {
        for tag in CategoryTag::iter() {
            assert!(
                CATEGORY_KEYWORDS.iter().any(|(t, kws)| *t == tag && !kws.is_empty()),
                "no keywords for {tag}"
            );
            assert!(PRIMARY_PRIORITY.contains(&tag));
        }
    }

    #[test]
    fn test_primary_category() {
        assert_eq!(primary_category(&[]), None);
        assert_eq!(
            primary_category(&[CategoryTag::Backend, CategoryTag::Frontend]),
            Some(CategoryTag::Frontend)
        );
        assert_eq!(
            primary_category(&[CategoryTag::Security, CategoryTag::Data, CategoryTag::Fullstack]),
            Some(CategoryTag::Fullstack)
        );
        assert_eq!(
            primary_category(&[CategoryTag::Security, CategoryTag::Cloud]),
            Some(CategoryTag::Cloud)
        );
    }
}
