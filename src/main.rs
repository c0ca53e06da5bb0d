use anyhow::Context;
use clap::Parser;
use hbnb::domain::views::{AmenityRecord, PlaceSummary, UserRecord};
use hbnb::utils::{logger, validation::Validate};
use hbnb::{AppConfig, CliConfig, HbnbError, HbnbFacade, SeedFixture};

const EXIT_DATA_ERROR: i32 = 1;
const EXIT_CONFIG_ERROR: i32 = 2;

fn load_config(cli: &CliConfig) -> hbnb::Result<AppConfig> {
    let config = cli.resolve()?;
    config.validate()?;
    Ok(config)
}

fn exit_code(e: &HbnbError) -> i32 {
    if e.kind().is_client_error() {
        EXIT_DATA_ERROR
    } else {
        EXIT_CONFIG_ERROR
    }
}

fn render(facade: &HbnbFacade, detail: bool) -> anyhow::Result<String> {
    let output = if detail {
        serde_json::to_string_pretty(&facade.snapshot())
    } else {
        let users: Vec<UserRecord> = facade
            .get_all_users()
            .iter()
            .map(|u| UserRecord::from(&*u.read()))
            .collect();
        let amenities: Vec<AmenityRecord> = facade
            .get_all_amenities()
            .iter()
            .map(|a| AmenityRecord::from(&*a.read()))
            .collect();
        let places: Vec<PlaceSummary> = facade
            .get_all_places()
            .iter()
            .map(|p| PlaceSummary::from(&*p.read()))
            .collect();
        serde_json::to_string_pretty(&serde_json::json!({
            "users": users,
            "amenities": amenities,
            "places": places,
            "review_count": facade.get_all_reviews().len(),
        }))
    };
    output.context("failed to serialize store contents")
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證配置
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(&config.logging.level);
    }

    tracing::info!(
        "Starting {} ({} environment)",
        config.app.name,
        config.app.environment
    );
    tracing::debug!("Resolved config: {:?}", config);

    let facade = HbnbFacade::new();

    if let Some(path) = config.seed_path() {
        tracing::info!("Loading seed fixture from {}", path);
        let seeded = SeedFixture::from_file(path).and_then(|fixture| fixture.apply(&facade));
        if let Err(e) = seeded {
            tracing::error!("❌ Seeding failed: {} (kind: {:?})", e, e.kind());
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
    }

    let output = render(&facade, cli.detail)?;
    println!("{}", output);
    Ok(())
}
