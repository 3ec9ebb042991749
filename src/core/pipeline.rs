use crate::adapters::sparql::SparqlClient;
use crate::core::export::encode_csv;
use crate::core::join::filter_known_languages;
use crate::core::sources::{fetch_movie_languages, fetch_wikidata_languages};
use crate::core::{ConfigProvider, ExtractedData, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;
use std::path::Path;

/// Cinémathèque films × Wikidata languages, written as one CSV file.
pub struct MovieLanguagePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: SparqlClient,
}

impl<S: Storage, C: ConfigProvider> MovieLanguagePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = SparqlClient::new(config.request_timeout(), config.user_agent())?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MovieLanguagePipeline<S, C> {
    async fn extract(&self) -> Result<ExtractedData> {
        let ordered = self.config.ordered_queries();
        let cq_endpoint = self.config.cq_endpoint();
        let wikidata_endpoint = self.config.wikidata_endpoint();

        let movies_fut = fetch_movie_languages(&self.client, cq_endpoint, ordered);
        let languages_fut = fetch_wikidata_languages(&self.client, wikidata_endpoint, ordered);

        let (movies, languages) = if self.config.concurrent_queries() {
            tracing::debug!("Querying {} and {} concurrently", cq_endpoint, wikidata_endpoint);
            tokio::try_join!(movies_fut, languages_fut)?
        } else {
            // 依序查詢：先 CQ，再 Wikidata
            let movies = movies_fut.await?;
            let languages = languages_fut.await?;
            (movies, languages)
        };

        tracing::debug!(
            "{} returned {} film records, {} returned {} language identifiers",
            cq_endpoint,
            movies.len(),
            wikidata_endpoint,
            languages.len()
        );

        if movies.is_empty() {
            tracing::warn!("No film records returned by {}", cq_endpoint);
        }
        if languages.is_empty() {
            tracing::warn!(
                "No language identifiers returned by {}, every record will be filtered out",
                wikidata_endpoint
            );
        }

        Ok(ExtractedData { movies, languages })
    }

    async fn transform(&self, data: ExtractedData) -> Result<TransformResult> {
        let ExtractedData { movies, languages } = data;
        let total = movies.len();

        let (csv_output, rows_written) = encode_csv(filter_known_languages(movies, &languages))?;

        Ok(TransformResult {
            csv_output,
            rows_written,
            rows_discarded: total - rows_written,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_file = self.config.output_file();
        let output_path = Path::new(self.config.output_path()).join(output_file);

        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            result.rows_written,
            result.csv_output.len(),
            output_path.display()
        );
        self.storage.write_file(output_file, &result.csv_output).await?;

        Ok(output_path.display().to_string())
    }
}
