//! Keyword based title filter

/// Outcome of checking a title against the keyword list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    /// Rejected because the title contains `keyword`
    Reject { keyword: String },
}

impl Decision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Rejects titles that contain any of the blocked keywords, case-insensitive.
///
/// The keyword list is fixed on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Create a filter, keywords are lowercased and empty ones are dropped
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|kw| kw.as_ref().to_lowercase())
            .filter(|kw| {
                if kw.is_empty() {
                    warn!("Ignoring empty keyword, it would match every title");
                    return false;
                }
                true
            })
            .collect();

        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Check `title`, stopping at the first matching keyword
    pub fn check(&self, title: &str) -> Decision {
        let title = title.to_lowercase();
        self.keywords
            .iter()
            .find(|kw| title.contains(kw.as_str()))
            .map_or(Decision::Accept, |kw| Decision::Reject {
                keyword: kw.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_reject_case_insensitive() {
        let filter = KeywordFilter::new(["yanni"]);
        assert_eq!(
            filter.check("Yanni Live Concert"),
            Decision::Reject {
                keyword: "yanni".to_string()
            }
        );
        assert_eq!(filter.check("Relaxing Piano"), Decision::Accept);
        assert_eq!(filter.check("best of YANNI"), filter.check("best of YANNI"));
    }

    #[test]
    fn should_lowercase_keywords() {
        let filter = KeywordFilter::new(["Yanni", "LIVE", ""]);
        assert_eq!(filter.keywords(), &["yanni".to_string(), "live".to_string()]);
        assert!(!filter.check("live at the acropolis").is_accept());
    }

    #[test]
    fn should_report_first_matching_keyword() {
        let filter = KeywordFilter::new(["concert", "yanni"]);
        assert_eq!(
            filter.check("Yanni Live Concert"),
            Decision::Reject {
                keyword: "concert".to_string()
            }
        );
    }

    #[test]
    fn empty_list_accepts_everything() {
        let filter = KeywordFilter::new(Vec::<String>::new());
        assert!(filter.check("Yanni Live Concert").is_accept());
        assert!(filter.check("").is_accept());
    }

    #[test]
    fn should_match_stringified_numbers() {
        let filter = KeywordFilter::new(["234"]);
        assert!(!filter.check("12345").is_accept());
    }
}
