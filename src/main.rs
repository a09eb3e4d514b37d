use clap::Parser;
use small_library::adapters::csv_catalog;
use small_library::app::demo::{self, Walkthrough};
use small_library::app::seed;
use small_library::config::OutputFormat;
use small_library::utils::{logger, validation::Validate};
use small_library::{CliConfig, InMemoryCatalog, LibraryConfig, LibraryService};

fn run(config: &CliConfig) -> small_library::Result<()> {
    let library = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            LibraryConfig::from_file(path)?
        }
        None => {
            tracing::info!("No configuration file given, using sample data");
            seed::sample_config()
        }
    };
    library.validate()?;
    tracing::debug!("Loan limits: {:?}", library.limits);

    let mut catalog = InMemoryCatalog::new();
    let seeded = library.populate(&mut catalog);
    tracing::info!("📚 Catalog seeded with {} books", seeded);

    if let Some(path) = &config.catalog_csv {
        csv_catalog::import_books_from_file(&mut catalog, path)?;
    }

    let mut service = LibraryService::with_limits(catalog, library.limits);
    let walkthrough = Walkthrough::new(library.library.name.clone(), &library.users())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = walkthrough.run(&mut service, &mut out)?;
    tracing::info!(
        "✅ Walkthrough finished: {} checkouts, {} returns, {} rejections",
        summary.checkouts,
        summary.returns,
        summary.rejections
    );

    if config.format == OutputFormat::Json {
        demo::write_snapshot(&library.library.name, &service, &mut out)?;
    }

    Ok(())
}

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_json);
    tracing::info!("Starting small-library");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate().and_then(|()| run(&config)) {
        tracing::debug!("small-library failed: {:?} (Category: {:?})", e, e.category());

        // The user-facing report goes to stderr exactly once.
        let stderr = std::io::stderr();
        let _ = demo::write_failure(&e, &mut stderr.lock());
        std::process::exit(e.exit_code());
    }
}
