use std::collections::HashSet;

/// One film of the Cinémathèque collection together with the language it is typed with.
///
/// `language_uri` is the Wikidata identifier the CQ language entity is `owl:sameAs` to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieLanguageRecord {
    pub work_uri: String,
    pub work_label: String,
    pub language_uri: String,
    pub language_label: String,
}

impl MovieLanguageRecord {
    pub fn new(
        work_uri: impl Into<String>,
        work_label: impl Into<String>,
        language_uri: impl Into<String>,
        language_label: impl Into<String>,
    ) -> Self {
        Self {
            work_uri: work_uri.into(),
            work_label: work_label.into(),
            language_uri: language_uri.into(),
            language_label: language_label.into(),
        }
    }

    /// Field order of an output row, matching [`crate::core::export::CSV_HEADER`].
    pub fn as_row(&self) -> [&str; 4] {
        [
            self.work_uri.as_str(),
            self.work_label.as_str(),
            self.language_uri.as_str(),
            self.language_label.as_str(),
        ]
    }
}

/// Wikidata identifiers classified as a language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageIdentifierSet {
    identifiers: HashSet<String>,
}

impl LanguageIdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LanguageIdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            identifiers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output of the extract phase: both query results, untouched.
#[derive(Debug, Clone, Default)]
pub struct ExtractedData {
    pub movies: Vec<MovieLanguageRecord>,
    pub languages: LanguageIdentifierSet,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub csv_output: Vec<u8>,
    pub rows_written: usize,
    pub rows_discarded: usize,
}
