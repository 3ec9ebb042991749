use crate::domain::model::{LanguageIdentifierSet, MovieLanguageRecord};

/// Keeps the records whose language is a known Wikidata language, in their original order.
///
/// Lazy: nothing is filtered until the iterator is consumed.
pub fn filter_known_languages<'a, I>(
    records: I,
    languages: &'a LanguageIdentifierSet,
) -> impl Iterator<Item = MovieLanguageRecord> + 'a
where
    I: IntoIterator<Item = MovieLanguageRecord>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .filter(move |record| languages.contains(&record.language_uri))
}
