use anyhow::Result;
use httpmock::prelude::*;
use movie_langues::config::DEFAULT_USER_AGENT;
use movie_langues::core::etl::run_with_config;
use movie_langues::{CliConfig, EtlEngine, EtlError, LocalStorage, MovieLanguagePipeline};
use tempfile::TempDir;

const SPARQL_JSON: &str = "application/sparql-results+json";

fn cli_config(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        cq_endpoint: server.url("/cq/sparql"),
        wikidata_endpoint: server.url("/wikidata/sparql"),
        output_path: output_path.to_string(),
        output_file: "movie_langues.csv".to_string(),
        timeout_seconds: 5,
        user_agent: DEFAULT_USER_AGENT.to_string(),
        concurrent_queries: false,
        ordered: false,
        config: None,
        verbose: false,
        json_logs: false,
        monitor: false,
        dry_run: false,
    }
}

fn movie_binding(film: &str, label: &str, langue: &str, langue_label: &str) -> serde_json::Value {
    serde_json::json!({
        "film": {"type": "uri", "value": film},
        "filmLabel": {"type": "literal", "xml:lang": "fr", "value": label},
        "langueWikidata": {"type": "uri", "value": langue},
        "langueLabel": {"type": "literal", "xml:lang": "fr", "value": langue_label}
    })
}

fn language_binding(langue: &str) -> serde_json::Value {
    serde_json::json!({"langue": {"type": "uri", "value": langue}})
}

fn cq_results(bindings: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "head": {"vars": ["film", "filmLabel", "langueWikidata", "langueLabel"]},
        "results": {"bindings": bindings}
    })
}

fn wikidata_results(bindings: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "head": {"vars": ["langue"]},
        "results": {"bindings": bindings}
    })
}

async fn run_pipeline(config: CliConfig) -> movie_langues::Result<String> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = MovieLanguagePipeline::new(storage, config)?;
    EtlEngine::new(pipeline).run().await
}

#[tokio::test]
async fn test_end_to_end_keeps_only_known_languages() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let cq_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/cq/sparql")
            .header("accept", SPARQL_JSON)
            .x_www_form_urlencoded_key_exists("query");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![
                movie_binding("w1", "Film A", "L1", "French"),
                movie_binding("w2", "Film B", "L2", "Klingon"),
            ]));
    });
    let wd_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/wikidata/sparql")
            .header("accept", SPARQL_JSON)
            .x_www_form_urlencoded_key_exists("query");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![language_binding("L1")]));
    });

    let output_file_path = run_pipeline(cli_config(&server, &output_path)).await?;

    cq_mock.assert();
    wd_mock.assert();
    assert!(output_file_path.ends_with("movie_langues.csv"));

    let content = std::fs::read_to_string(temp_dir.path().join("movie_langues.csv"))?;
    assert_eq!(
        content,
        "film,filmLabel,genre,genreLabel\r\nw1,Film A,L1,French\r\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_zero_records_writes_header_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![language_binding("L1")]));
    });

    run_pipeline(cli_config(&server, &output_path)).await?;

    let content = std::fs::read_to_string(temp_dir.path().join("movie_langues.csv"))?;
    assert_eq!(content, "film,filmLabel,genre,genreLabel\r\n");
    Ok(())
}

#[tokio::test]
async fn test_cq_failure_creates_no_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let cq_mock = server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(500).body("Virtuoso 42000 Error");
    });
    server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![language_binding("L1")]));
    });

    let err = run_pipeline(cli_config(&server, &output_path))
        .await
        .unwrap_err();

    cq_mock.assert();
    assert!(matches!(err, EtlError::QueryError { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!temp_dir.path().join("movie_langues.csv").exists());
    Ok(())
}

#[tokio::test]
async fn test_wikidata_failure_leaves_existing_file_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let target = temp_dir.path().join("movie_langues.csv");
    std::fs::write(&target, "previous export\r\n")?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![movie_binding("w1", "Film A", "L1", "French")]));
    });
    let wd_mock = server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(429).body("Too Many Requests");
    });

    let mut config = cli_config(&server, &output_path);
    config.concurrent_queries = true;
    let err = run_pipeline(config).await.unwrap_err();

    wd_mock.assert();
    assert!(matches!(err, EtlError::QueryError { .. }));
    assert_eq!(std::fs::read_to_string(&target)?, "previous export\r\n");
    Ok(())
}

#[tokio::test]
async fn test_malformed_binding_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![movie_binding("w1", "Film A", "L1", "French")]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![serde_json::json!({
                "genre": {"type": "uri", "value": "L1"}
            })]));
    });

    let err = run_pipeline(cli_config(&server, &output_path))
        .await
        .unwrap_err();

    assert!(matches!(err, EtlError::MalformedResultsError { .. }));
    assert!(!temp_dir.path().join("movie_langues.csv").exists());
    Ok(())
}

#[tokio::test]
async fn test_repeated_runs_are_byte_identical() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![
                movie_binding("w1", "Mon oncle Antoine", "L1", "Français"),
                movie_binding("w2", "Léolo, version \"longue\"", "L1", "Français"),
                movie_binding("w3", "Maelström", "L3", "Langue inventée"),
                movie_binding("w4", "Atanarjuat", "L4", "Inuktitut"),
            ]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![
                language_binding("L1"),
                language_binding("L4"),
            ]));
    });

    let mut config = cli_config(&server, &output_path);
    config.ordered = true;

    run_pipeline(config.clone()).await?;
    let first = std::fs::read(temp_dir.path().join("movie_langues.csv"))?;

    run_pipeline(config).await?;
    let second = std::fs::read(temp_dir.path().join("movie_langues.csv"))?;

    assert_eq!(first, second);

    let content = String::from_utf8(first)?;
    let lines: Vec<&str> = content.trim_end().split("\r\n").collect();
    assert_eq!(
        lines,
        vec![
            "film,filmLabel,genre,genreLabel",
            "w1,Mon oncle Antoine,L1,Français",
            "w2,\"Léolo, version \"\"longue\"\"\",L1,Français",
            "w4,Atanarjuat,L4,Inuktitut",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![movie_binding("w1", "Film A", "L1", "French")]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![language_binding("L1")]));
    });

    let mut config = cli_config(&server, &output_path);
    config.monitor = true;
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = MovieLanguagePipeline::new(storage, config)?;
    let engine = EtlEngine::new_with_monitoring(pipeline, true);

    let result = engine.run().await;

    assert!(result.is_ok());
    assert!(temp_dir.path().join("movie_langues.csv").exists());
    Ok(())
}

#[tokio::test]
async fn test_dry_run_touches_neither_network_nor_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().join("exports");

    let server = MockServer::start();
    let cq_mock = server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![movie_binding("w1", "Film A", "L1", "French")]));
    });
    let wd_mock = server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![language_binding("L1")]));
    });

    let mut config = cli_config(&server, output_path.to_str().unwrap());
    config.dry_run = true;
    let outcome = run_with_config(config, false, true).await?;

    assert!(outcome.is_none());
    assert_eq!(cq_mock.hits(), 0);
    assert_eq!(wd_mock.hits(), 0);
    assert!(!output_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_run_with_config_writes_file_and_returns_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(cq_results(vec![movie_binding("w1", "Film A", "L1", "French")]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/wikidata/sparql");
        then.status(200)
            .header("Content-Type", SPARQL_JSON)
            .json_body(wikidata_results(vec![language_binding("L1")]));
    });

    let outcome = run_with_config(cli_config(&server, &output_path), false, false).await?;

    let written = outcome.expect("a real run reports the output path");
    assert!(written.ends_with("movie_langues.csv"));
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("movie_langues.csv"))?,
        "film,filmLabel,genre,genreLabel\r\nw1,Film A,L1,French\r\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_config_exits_with_configuration_code_before_querying() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let cq_mock = server.mock(|when, then| {
        when.method(POST).path("/cq/sparql");
        then.status(200).json_body(cq_results(vec![]));
    });

    let mut config = cli_config(&server, &output_path);
    config.timeout_seconds = 0;
    let err = run_with_config(config, false, false).await.unwrap_err();

    assert!(matches!(err, EtlError::InvalidConfigValueError { .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(cq_mock.hits(), 0);
    assert!(!temp_dir.path().join("movie_langues.csv").exists());
    Ok(())
}
