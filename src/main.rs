use clap::Parser;
use csw_interactor::utils::logger;
use csw_interactor::utils::validation::Validate;
use csw_interactor::{CatalogInteractor, CliConfig, Command, CswError};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if let Err(e) = cli.validate() {
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    let resolved = match cli.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("❌ Configuration failed: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if resolved.log_json {
        logger::init_json_logger(resolved.verbose);
    } else {
        logger::init_cli_logger(resolved.verbose);
    }
    tracing::debug!("Catalogue config: {:?}", resolved.catalog);

    if let Err(e) = run(resolved.catalog, cli.command).await {
        tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(config: csw_interactor::CatalogConfig, command: Command) -> Result<(), CswError> {
    let interactor = CatalogInteractor::new(config)?;

    match command {
        Command::Records {
            max_records,
            start_position,
        } => {
            let xml = interactor.fetch_records(max_records, start_position).await?;
            println!("{}", xml);
        }
        Command::Count => {
            let count = interactor.fetch_record_count().await?;
            println!("{}", count);
        }
        Command::Record { id } => {
            let xml = interactor.fetch_record_by_id(&id).await?;
            println!("{}", xml);
        }
    }

    Ok(())
}
