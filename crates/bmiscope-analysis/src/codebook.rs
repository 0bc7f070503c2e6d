//! Code-to-label recoding tables
//!
//! Survey files store categorical answers as numeric codes. A [`Codebook`]
//! maps each code to a human-readable label and lists codes that mean "no
//! answer" (refused, don't know), which are treated as missing. Codebooks are
//! supplied by configuration and applied before grouping; the statistics
//! engine only ever sees the resulting labels.
//!
//! Codes without an entry pass through unchanged.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Labels for the codes of one categorical column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Codebook {
    /// Code -> label.
    pub labels: BTreeMap<String, String>,
    /// Codes treated as missing.
    pub missing: BTreeSet<String>,
}

impl Codebook {
    /// Builds a codebook from `(code, label)` pairs.
    ///
    /// ```
    /// use bmiscope_analysis::codebook::Codebook;
    ///
    /// let sex = Codebook::from_pairs([("1", "Male"), ("2", "Female")]);
    /// assert_eq!(sex.recode("2").as_deref(), Some("Female"));
    /// assert_eq!(sex.recode("3").as_deref(), Some("3"));
    /// ```
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(code, label)| (code.to_owned(), label.to_owned()))
                .collect(),
            missing: BTreeSet::new(),
        }
    }

    /// Marks codes as missing.
    #[must_use]
    pub fn with_missing<'a, I>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.missing.extend(codes.into_iter().map(str::to_owned));
        self
    }

    /// Label for `code`; `None` if the code means missing.
    #[must_use]
    pub fn recode(&self, code: &str) -> Option<String> {
        if self.missing.contains(code) {
            return None;
        }
        Some(
            self.labels
                .get(code)
                .cloned()
                .unwrap_or_else(|| code.to_owned()),
        )
    }

    /// Whether `code` has an explicit label.
    #[must_use]
    pub fn is_known(&self, code: &str) -> bool {
        self.labels.contains_key(code) || self.missing.contains(code)
    }
}

/// Codebooks keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CodebookSet {
    books: BTreeMap<String, Codebook>,
}

impl CodebookSet {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Codebook> {
        self.books.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, codebook: Codebook) {
        self.books.insert(column.into(), codebook);
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }

    /// Recodes a raw categorical column.
    ///
    /// Columns without a codebook are returned as-is.
    #[must_use]
    pub fn recode_column(&self, column: &str, values: &[Option<String>]) -> Vec<Option<String>> {
        let Some(book) = self.books.get(column) else {
            return values.to_vec();
        };

        let mut unknown = BTreeSet::new();
        let recoded = values
            .iter()
            .map(|value| {
                let code = value.as_deref()?;
                if !book.is_known(code) {
                    unknown.insert(code);
                }
                book.recode(code)
            })
            .collect();
        if !unknown.is_empty() {
            tracing::debug!(column, ?unknown, "codes without a label kept as-is");
        }
        recoded
    }
}

impl FromIterator<(String, Codebook)> for CodebookSet {
    fn from_iter<T: IntoIterator<Item = (String, Codebook)>>(iter: T) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diabetes() -> Codebook {
        Codebook::from_pairs([("1", "Yes"), ("2", "No"), ("3", "Borderline")])
            .with_missing(["7", "9"])
    }

    #[test]
    fn test_missing_codes_become_none() {
        let book = diabetes();
        assert_eq!(book.recode("1").as_deref(), Some("Yes"));
        assert_eq!(book.recode("9"), None);
        assert!(book.is_known("7"));
        assert!(!book.is_known("4"));
    }

    #[test]
    fn test_recode_column() {
        let mut set = CodebookSet::default();
        set.insert("Diabetes", diabetes());
        let raw = vec![
            Some("1".to_owned()),
            None,
            Some("7".to_owned()),
            Some("4".to_owned()),
        ];
        assert_eq!(
            set.recode_column("Diabetes", &raw),
            vec![Some("Yes".to_owned()), None, None, Some("4".to_owned())]
        );
        assert_eq!(set.recode_column("Race", &raw), raw);
    }

    #[test]
    fn test_json_shape() {
        let set: CodebookSet = serde_json::from_str(
            r#"{"Gender": {"labels": {"1": "Male", "2": "Female"}, "missing": ["9"]}}"#,
        )
        .unwrap();
        let gender = set.get("Gender").unwrap();
        assert_eq!(gender.recode("1").as_deref(), Some("Male"));
        assert_eq!(gender.recode("9"), None);
        assert_eq!(set.columns().collect::<Vec<_>>(), vec!["Gender"]);
    }
}
