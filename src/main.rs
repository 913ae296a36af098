use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use company_enricher::cli::Cli;
use company_enricher::config::AppConfig;
use company_enricher::export;
use company_enricher::loader::load_companies;
use company_enricher::logger::{EnrichmentLogger, VerbosityLevel};
use company_enricher::lookup::{EnrichPolicy, LookupClient};
use company_enricher::pipeline::{self, RunOptions};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbosity = VerbosityLevel::from_verbose_count(cli.verbose);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.tracing_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // --init writes the template and exits before anything else
    if cli.init {
        match AppConfig::create_default_config(Path::new(&cli.config)) {
            Ok(path) => {
                println!("✅ Created default configuration file at: {}", path.display());
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = cli.validate() {
        eprintln!("❌ Invalid arguments: {}", e);
        std::process::exit(1);
    }
    let delimiter = match cli.delimiter_byte() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("❌ Invalid arguments: {}", e);
            std::process::exit(1);
        }
    };

    let config = match AppConfig::load_or_default(Path::new(&cli.config))
        .and_then(|c| c.with_overrides(cli.base_url.as_deref(), cli.output.as_deref()))
    {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mut logger = match &cli.log_file {
        Some(path) => EnrichmentLogger::with_log_file(verbosity, path.clone()),
        None => EnrichmentLogger::new(verbosity),
    };
    if cli.no_progress {
        logger = logger.without_progress();
    }

    let companies = match load_companies(Path::new(&cli.data), delimiter) {
        Ok(companies) => companies,
        Err(e) => {
            logger.error(&format!("Failed to load {}: {}", cli.data, e));
            finish_logs(&logger);
            std::process::exit(1);
        }
    };
    logger.log_load_success(&cli.data, companies.len());

    let client = match LookupClient::new(&config.lookup) {
        Ok(client) => client,
        Err(e) => {
            logger.error(&e.to_string());
            finish_logs(&logger);
            std::process::exit(1);
        }
    };

    let options = RunOptions {
        enrich: EnrichPolicy {
            parse_error_pages: config.lookup.parse_error_pages,
        },
        on_fetch_error: config.batch.on_fetch_error,
    };

    let run = match pipeline::enrich_all(&companies, &client, options, &logger).await {
        Ok(run) => run,
        Err(e) => {
            logger.error(&format!("Enrichment aborted, no output written: {:#}", e));
            finish_logs(&logger);
            std::process::exit(1);
        }
    };

    if let Err(e) = export::export_csv(&run.companies, &config.output.path) {
        logger.error(&format!("{:#}", e));
        finish_logs(&logger);
        std::process::exit(1);
    }
    logger.log_export_success(&config.output.path);

    if let Some(summary_path) = &cli.summary_file {
        if let Err(e) = pipeline::export_run_summary(&run.summary, Path::new(summary_path)) {
            logger.error(&format!("{:#}", e));
        }
    }

    export::print_run_summary(&run.summary);
    finish_logs(&logger);
}

fn finish_logs(logger: &EnrichmentLogger) {
    if let Err(e) = logger.export_logs() {
        eprintln!("⚠️  Failed to write log file: {}", e);
    }
}
