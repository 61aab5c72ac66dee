//! Maintenance binary: import HTML documents, list the catalog, and export
//! survey bundles from the command line. All real behavior lives in the
//! library; this is a thin wrapper around the handlers.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use surveyforge::adapters::storage::FileTemplateStore;
use surveyforge::application::handlers::{
    ExportSurveyCommand, ExportSurveyHandler, ImportTemplateCommand, ImportTemplateHandler,
};
use surveyforge::config::AppConfig;
use surveyforge::domain::foundation::TemplateId;
use surveyforge::extraction::Extractor;

const USAGE: &str = "usage: surveyforge <import FILE | list | export TEMPLATE_ID [COUNT]>";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let store = Arc::new(FileTemplateStore::new(&config.storage.data_dir));
    let extractor = Arc::new(Extractor::new(config.extraction.budget()));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("import") => {
            let path = args.get(1).ok_or(USAGE)?;
            let html = tokio::fs::read_to_string(path).await?;
            let handler = ImportTemplateHandler::new(store, extractor);
            let outcome = handler
                .handle(ImportTemplateCommand {
                    html,
                    template_id: None,
                    name: None,
                    category: None,
                })
                .await?;
            println!(
                "{}",
                serde_json::json!({
                    "template_id": outcome.template_id,
                    "name": outcome.name,
                    "count_q": outcome.question_count,
                })
            );
        }
        Some("list") => {
            use surveyforge::ports::TemplateRepository;
            let index = store.list().await?;
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
        Some("export") => {
            let id: TemplateId = args.get(1).ok_or(USAGE)?.parse()?;
            let count = match args.get(2) {
                Some(raw) => raw.parse()?,
                None => 0,
            };
            let handler = ExportSurveyHandler::new(store.clone(), store.clone(), store);
            let bundle = handler
                .handle(ExportSurveyCommand {
                    template_id: id,
                    question_keys: Vec::new(),
                    random_count: count,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        _ => return Err(USAGE.into()),
    }
    Ok(())
}
