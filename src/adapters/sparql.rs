use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// One row of a SELECT result: variable name to bound term. Unbound variables are absent.
pub type Binding = HashMap<String, SparqlTerm>;

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<Binding>,
}

/// A bound RDF term. Only the lexical value is kept; `type`, `xml:lang` and `datatype` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SparqlTerm {
    pub value: String,
}

/// Minimal SPARQL 1.1 Protocol client: URL-encoded POST, JSON results.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: Client,
}

impl SparqlClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(SPARQL_RESULTS_JSON));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Runs a SELECT query and returns `results.bindings` in the order the endpoint sent them.
    pub async fn select(&self, endpoint: &str, query: &str) -> Result<Vec<Binding>> {
        let query_error = |source: reqwest::Error| EtlError::QueryError {
            endpoint: endpoint.to_string(),
            source,
        };

        tracing::debug!("Sending SPARQL query to: {}", endpoint);
        let response = self
            .client
            .post(endpoint)
            .form(&[("query", query)])
            .send()
            .await
            .map_err(query_error)?;

        tracing::debug!("SPARQL response status: {}", response.status());
        let response = response.error_for_status().map_err(query_error)?;

        let parsed: SparqlResponse = response.json().await.map_err(query_error)?;
        tracing::debug!(
            "Received {} bindings from {}",
            parsed.results.bindings.len(),
            endpoint
        );

        Ok(parsed.results.bindings)
    }
}

/// Moves the value bound to `variable` out of `binding`.
pub fn take_value(binding: &mut Binding, variable: &str, endpoint: &str) -> Result<String> {
    binding
        .remove(variable)
        .map(|term| term.value)
        .ok_or_else(|| EtlError::MalformedResultsError {
            endpoint: endpoint.to_string(),
            message: format!("binding is missing variable '{}'", variable),
        })
}
