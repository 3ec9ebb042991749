use crate::adapters::sparql::{take_value, SparqlClient};
use crate::core::queries::{
    movie_languages_query, wikidata_languages_query, VAR_FILM, VAR_FILM_LABEL, VAR_LANGUE,
    VAR_LANGUE_LABEL, VAR_LANGUE_WIKIDATA,
};
use crate::domain::model::{LanguageIdentifierSet, MovieLanguageRecord};
use crate::utils::error::Result;

/// Runs the Cinémathèque query. A single malformed binding fails the whole fetch.
pub async fn fetch_movie_languages(
    client: &SparqlClient,
    endpoint: &str,
    ordered: bool,
) -> Result<Vec<MovieLanguageRecord>> {
    let query = movie_languages_query(ordered);
    let bindings = client.select(endpoint, &query).await?;

    bindings
        .into_iter()
        .map(|mut binding| {
            Ok(MovieLanguageRecord {
                work_uri: take_value(&mut binding, VAR_FILM, endpoint)?,
                work_label: take_value(&mut binding, VAR_FILM_LABEL, endpoint)?,
                language_uri: take_value(&mut binding, VAR_LANGUE_WIKIDATA, endpoint)?,
                language_label: take_value(&mut binding, VAR_LANGUE_LABEL, endpoint)?,
            })
        })
        .collect()
}

/// Runs the Wikidata query and collects the language identifiers.
pub async fn fetch_wikidata_languages(
    client: &SparqlClient,
    endpoint: &str,
    ordered: bool,
) -> Result<LanguageIdentifierSet> {
    let query = wikidata_languages_query(ordered);
    let bindings = client.select(endpoint, &query).await?;

    bindings
        .into_iter()
        .map(|mut binding| take_value(&mut binding, VAR_LANGUE, endpoint))
        .collect()
}
