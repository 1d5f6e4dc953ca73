use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use quote_core::calculations::{
    DakkapelCalculator, PaintingRates, PlasteringRates, PriceBreakdown, WidthPolicy, resolver,
    calculate_painting_price, calculate_plastering_price,
};
use quote_core::db::RepositoryRegistry;
use quote_core::{
    DakkapelConfiguration, NewQuoteRequest, PaintingConfiguration, PlasteringConfiguration,
    PriceTable, QuoteRepository, QuoteRequest, SizeClass, Vertical,
};
use quote_db_sqlite::SqliteRepositoryFactory;

use crate::cli::{
    Cli, Command, DakkapelArgs, PaintingArgs, PlasteringArgs, ResolveArgs, SubmitArgs, SubmitJob,
};
use crate::config::AppConfig;
use crate::report::{
    DakkapelReport, LinearReport, PriceTableReport, ResolvedAttributes, SubmittedReport,
};

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Reads the config file named on the command line (if any) and applies
/// the command-line overrides.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(backend) = &cli.backend {
        config.database.backend = backend.clone();
    }
    if let Some(db) = &cli.db {
        config.database.connection = Some(db.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }

    Ok(config)
}

/// Opens the configured repository, or returns `None` when no database is
/// configured.
pub async fn open_repository(
    registry: &RepositoryRegistry,
    config: &AppConfig,
) -> Result<Option<Box<dyn QuoteRepository>>> {
    let Some(db_config) = config.db_config() else {
        return Ok(None);
    };

    debug!(
        backend = %db_config.backend,
        connection = %db_config.connection_string,
        "opening repository"
    );
    let repo = registry
        .create(&db_config)
        .await
        .with_context(|| format!("Failed to open {} database", db_config.backend))?;
    Ok(Some(repo))
}

/// The stored price table, or the standard one when nothing is stored.
pub async fn active_price_table(repo: Option<&dyn QuoteRepository>) -> Result<PriceTable> {
    let stored = match repo {
        Some(repo) => repo
            .price_table()
            .await
            .context("Failed to read the stored price table")?,
        None => None,
    };

    Ok(stored.unwrap_or_else(|| {
        info!("no stored price table, using standard prices");
        PriceTable::default()
    }))
}

/// Builds a configuration from the arguments; width and window count
/// default from the size class.
pub fn dakkapel_configuration(args: &DakkapelArgs) -> DakkapelConfiguration {
    let mut config = DakkapelConfiguration::new(args.size);
    if let Some(width) = args.width {
        config.width_cm = width;
    }
    if let Some(windows) = args.windows {
        config.window_count = windows;
    }
    config.material = args.material;
    config.frame_color = args.frame_color;
    config.side_color = args.side_color;
    config.sash_color = args.sash_color;
    config.insulation = args.insulation;
    config.frame_height = args.frame_height;
    config.options = args.options.iter().copied().collect();
    config.build_type = args.build_type;
    config
}

pub fn width_policy(
    args: &DakkapelArgs,
    config: &AppConfig,
) -> WidthPolicy {
    if args.enforce_width {
        WidthPolicy::Enforce
    } else {
        config.width_policy()
    }
}

pub fn price_dakkapel(
    table: &PriceTable,
    args: &DakkapelArgs,
    policy: WidthPolicy,
) -> Result<(DakkapelConfiguration, PriceBreakdown)> {
    let config = dakkapel_configuration(args);
    let breakdown = DakkapelCalculator::new(table)
        .with_width_policy(policy)
        .calculate(&config)?;
    Ok((config, breakdown))
}

pub fn painting_configuration(args: &PaintingArgs) -> PaintingConfiguration {
    PaintingConfiguration {
        wall_area_m2: args.walls,
        ceiling_area_m2: args.ceilings,
        door_count: args.doors,
        window_count: args.windows,
        color_scheme: args.colors,
        build_type: args.build_type,
    }
}

pub fn plastering_configuration(args: &PlasteringArgs) -> PlasteringConfiguration {
    PlasteringConfiguration {
        wall_area_m2: args.walls,
        ceiling_area_m2: args.ceilings,
        corner_bead_m: args.corner_beads,
        finish: args.finish,
        build_type: args.build_type,
    }
}

/// Unknown size codes and roof slopes fall back instead of failing.
pub fn resolve(args: &ResolveArgs) -> ResolvedAttributes {
    let size_class = SizeClass::parse(&args.size);

    ResolvedAttributes {
        size_class,
        width_range: resolver::width_range_or_default(&args.size),
        default_width_cm: size_class.map(resolver::default_width),
        default_window_count: size_class.map(resolver::default_window_count),
        frame_height: args.frame_height,
        frame_heights: resolver::frame_heights(args.frame_height),
        roof_angle: args
            .roof_slope
            .as_deref()
            .map(resolver::roof_slope_angle_or_default),
    }
}

fn configuration_json<T: Serialize>(config: &T) -> Result<String> {
    serde_json::to_string(config).context("Failed to serialize configuration")
}

/// Width policy for a submitted job; only dakkapel widths are checked.
pub fn submit_width_policy(
    args: &SubmitArgs,
    config: &AppConfig,
) -> WidthPolicy {
    match &args.job {
        SubmitJob::Dakkapel(dakkapel) => width_policy(dakkapel, config),
        SubmitJob::Painting(_) | SubmitJob::Plastering(_) => config.width_policy(),
    }
}

/// Prices the job in `args` and stores it as a quote request.
pub async fn submit(
    repo: &dyn QuoteRepository,
    table: &PriceTable,
    args: &SubmitArgs,
    policy: WidthPolicy,
) -> Result<QuoteRequest> {
    let (vertical, configuration, total_price) = match &args.job {
        SubmitJob::Dakkapel(dakkapel) => {
            let (config, breakdown) = price_dakkapel(table, dakkapel, policy)?;
            (Vertical::Dakkapel, configuration_json(&config)?, breakdown.total)
        }
        SubmitJob::Painting(painting) => {
            let config = painting_configuration(painting);
            let quote = calculate_painting_price(&PaintingRates::default(), &config)?;
            (Vertical::Painting, configuration_json(&config)?, quote.total)
        }
        SubmitJob::Plastering(plastering) => {
            let config = plastering_configuration(plastering);
            let quote = calculate_plastering_price(&PlasteringRates::default(), &config)?;
            (Vertical::Plastering, configuration_json(&config)?, quote.total)
        }
    };

    let quote = repo
        .create_quote(NewQuoteRequest {
            vertical,
            customer_name: args.name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
            postal_code: args.postal_code.clone(),
            configuration,
            total_price,
        })
        .await
        .context("Failed to store quote request")?;

    info!(
        id = quote.id,
        vertical = vertical.as_str(),
        total = %quote.total_price,
        "quote request submitted"
    );
    Ok(quote)
}

/// Runs one command, printing its result on stdout.
pub async fn run(
    command: Command,
    config: &AppConfig,
) -> Result<()> {
    match command {
        Command::Dakkapel(args) => {
            let registry = build_registry();
            let repo = open_repository(&registry, config).await?;
            let table = active_price_table(repo.as_deref()).await?;
            let (dakkapel, breakdown) = price_dakkapel(&table, &args, width_policy(&args, config))?;
            print!(
                "{}",
                DakkapelReport {
                    config: &dakkapel,
                    breakdown: &breakdown,
                }
            );
        }
        Command::Painting(args) => {
            let painting = painting_configuration(&args);
            let quote = calculate_painting_price(&PaintingRates::default(), &painting)?;
            print!(
                "{}",
                LinearReport {
                    title: format!("Schilderwerk ({})", painting.color_scheme.as_str()),
                    build_type: painting.build_type,
                    quote: &quote,
                }
            );
        }
        Command::Plastering(args) => {
            let plastering = plastering_configuration(&args);
            let quote = calculate_plastering_price(&PlasteringRates::default(), &plastering)?;
            print!(
                "{}",
                LinearReport {
                    title: format!("Stucwerk ({})", plastering.finish.as_str()),
                    build_type: plastering.build_type,
                    quote: &quote,
                }
            );
        }
        Command::Resolve(args) => {
            print!("{}", resolve(&args));
        }
        Command::Prices => {
            let registry = build_registry();
            let repo = open_repository(&registry, config).await?;
            let table = active_price_table(repo.as_deref()).await?;
            print!("{}", PriceTableReport(&table));
        }
        Command::Submit(args) => {
            let registry = build_registry();
            let repo = open_repository(&registry, config).await?.context(
                "submitting a quote needs a database; pass --db or set database.connection",
            )?;
            let table = active_price_table(Some(&*repo)).await?;
            let quote = submit(&*repo, &table, &args, submit_width_policy(&args, config)).await?;
            print!("{}", SubmittedReport(&quote));
        }
    }

    Ok(())
}
