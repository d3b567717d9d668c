//! Post-load filtering
//!
//! Three passes over the stored snapshot: drop works outside the
//! relevant publication types or past the cutoff date, normalize author
//! display names, and collapse same-named authors onto one canonical
//! alternate id (the smallest author_id in the group).

use crate::errors::IngestError;
use scholnet_common::config::FilterConfig;
use scholnet_common::db::Repository;
use tracing::{info, instrument};

#[derive(Debug, Default)]
pub struct FilterSummary {
    pub removed_by_type: u64,
    pub removed_by_date: u64,
    pub renamed_authors: u64,
    pub alt_ids_assigned: u64,
}

#[instrument(skip_all)]
pub async fn run_filtering(
    repo: &Repository,
    config: &FilterConfig,
) -> Result<FilterSummary, IngestError> {
    let mut summary = FilterSummary::default();

    summary.removed_by_type = repo.delete_works_not_in_types(&config.allowed_types).await?;
    info!(removed = summary.removed_by_type, "non-article works removed");

    if let Some(cutoff) = config.cutoff_date {
        summary.removed_by_date = repo.delete_works_on_or_after(cutoff).await?;
        info!(
            removed = summary.removed_by_date,
            %cutoff,
            "works past the cutoff removed"
        );
    }

    // Normalize names first so the alt-id grouping sees the final form
    for name in repo.unnormalized_author_names().await? {
        if let Some(normalized) = normalize_name(&name) {
            if normalized != name {
                summary.renamed_authors += repo.rename_authors(&name, &normalized).await?;
            }
        }
    }
    info!(renamed = summary.renamed_authors, "author names normalized");

    for name in repo.unnormalized_author_names().await? {
        if let Some(min_id) = repo.min_author_id_for_name(&name).await? {
            summary.alt_ids_assigned += repo.set_alt_id_for_name(&name, min_id).await?;
        }
    }
    info!(assigned = summary.alt_ids_assigned, "alternate ids assigned");

    Ok(summary)
}

/// Normalize an author display name.
///
/// Word-initial capitals, dashes between name parts become spaces, runs
/// of spaces collapse, single-letter initials gain a period, and a
/// period is always followed by a space. Returns `None` for blank input.
pub fn normalize_name(name: &str) -> Option<String> {
    let capped = title_case(name);
    let capped: Vec<char> = capped.trim().chars().collect();
    if capped.is_empty() {
        return None;
    }

    let mut norm = String::with_capacity(capped.len() + 4);
    for i in 0..capped.len() - 1 {
        let c = capped[i];
        let next = capped[i + 1];

        if c == '-' {
            // a dash between name parts becomes a space
            if next != ' ' && !norm.ends_with(' ') && !norm.is_empty() {
                norm.push(' ');
            }
        } else {
            if c == ' ' && next == ' ' {
                continue;
            }
            norm.push(c);
            if next == ' ' && c.is_uppercase() {
                // a word ending in an uppercase letter is an initial
                norm.push('.');
            } else if next != ' ' && c == '.' {
                norm.push(' ');
            }
        }
    }
    norm.push(capped[capped.len() - 1]);

    Some(norm)
}

/// Uppercase at every word boundary, lowercase elsewhere
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut boundary = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_title_cased() {
        assert_eq!(normalize_name("john smith"), Some("John Smith".into()));
        assert_eq!(normalize_name("JOHN SMITH"), Some("John Smith".into()));
    }

    #[test]
    fn test_initial_gets_period() {
        assert_eq!(normalize_name("J Smith"), Some("J. Smith".into()));
        assert_eq!(normalize_name("John F Kennedy"), Some("John F. Kennedy".into()));
    }

    #[test]
    fn test_period_gets_space() {
        assert_eq!(normalize_name("A.Smith"), Some("A. Smith".into()));
    }

    #[test]
    fn test_dash_between_names_becomes_space() {
        assert_eq!(
            normalize_name("Jean-paul Sartre"),
            Some("Jean Paul Sartre".into())
        );
    }

    #[test]
    fn test_spaces_collapse_and_trim() {
        assert_eq!(
            normalize_name("  john   smith "),
            Some("John Smith".into())
        );
    }

    #[test]
    fn test_blank_is_none() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name("   "), None);
    }

    #[test]
    fn test_normalization_is_stable_on_full_names() {
        let once = normalize_name("john   van der BERG-jones").unwrap();
        assert_eq!(once, "John Van Der Berg Jones");
        assert_eq!(normalize_name(&once), Some(once.clone()));
    }
}
