//! SPARQL texts sent to the two endpoints.

/// Every CQ work with its label and the language it is typed with, resolved to Wikidata.
pub const MOVIE_LANGUAGES_QUERY: &str = r#"PREFIX crm: <http://www.cidoc-crm.org/cidoc-crm/>
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX frbroo: <http://iflastandards.info/ns/fr/frbr/frbroo/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
SELECT DISTINCT ?film ?filmLabel ?langueWikidata ?langueLabel WHERE {
  ?film a frbroo:F1_Work .
  ?film rdfs:label ?filmLabel .
  ?film crm:P2_has_type ?langue .
  ?langue owl:sameAs ?langueWikidata .
  ?langue rdfs:label ?langueLabel .
}
"#;

/// Everything that is an instance of "language" (Q34770) or of one of its subclasses.
pub const WIKIDATA_LANGUAGES_QUERY: &str = r#"PREFIX wd: <http://www.wikidata.org/entity/>
PREFIX wdt: <http://www.wikidata.org/prop/direct/>
SELECT DISTINCT ?langue WHERE {
  ?langue wdt:P31/wdt:P279* wd:Q34770 .
}
"#;

pub const MOVIE_LANGUAGES_ORDER: &str = "ORDER BY ?film ?filmLabel ?langueWikidata ?langueLabel";
pub const WIKIDATA_LANGUAGES_ORDER: &str = "ORDER BY ?langue";

// Result variables of the two queries.
pub const VAR_FILM: &str = "film";
pub const VAR_FILM_LABEL: &str = "filmLabel";
pub const VAR_LANGUE_WIKIDATA: &str = "langueWikidata";
pub const VAR_LANGUE_LABEL: &str = "langueLabel";
pub const VAR_LANGUE: &str = "langue";

fn with_ordering(query: &str, ordered: bool, order_clause: &str) -> String {
    if ordered {
        format!("{}{}\n", query, order_clause)
    } else {
        query.to_string()
    }
}

pub fn movie_languages_query(ordered: bool) -> String {
    with_ordering(MOVIE_LANGUAGES_QUERY, ordered, MOVIE_LANGUAGES_ORDER)
}

pub fn wikidata_languages_query(ordered: bool) -> String {
    with_ordering(WIKIDATA_LANGUAGES_QUERY, ordered, WIKIDATA_LANGUAGES_ORDER)
}
