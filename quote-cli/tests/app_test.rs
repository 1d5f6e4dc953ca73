//! End-to-end tests of the command handlers against an in-memory SQLite
//! database.

use clap::Parser;
use pretty_assertions::assert_eq;
use quote_cli::app;
use quote_cli::cli::{Cli, Command};
use quote_cli::config::AppConfig;
use quote_core::calculations::{PaintingRates, WidthPolicy, calculate_painting_price};
use quote_core::{
    DakkapelConfiguration, DakkapelOption, PaintingConfiguration, PriceTable, SizeClass, Vertical,
};
use rust_decimal_macros::dec;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["quote"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

fn in_memory_config() -> AppConfig {
    app::load_config(&parse(&["--db", ":memory:", "prices"])).expect("config")
}

#[test]
fn command_line_overrides_defaults() {
    let config = app::load_config(&parse(&[
        "--backend",
        "sqlite",
        "--db",
        "quotes.db",
        "--log-level",
        "debug",
        "resolve",
        "--size",
        "small",
    ]))
    .expect("config");

    assert_eq!(config.database.connection.as_deref(), Some("quotes.db"));
    assert_eq!(config.logging.level, "debug");
}

#[tokio::test]
async fn no_database_means_standard_prices() {
    let registry = app::build_registry();
    let repo = app::open_repository(&registry, &AppConfig::default())
        .await
        .expect("open");

    assert!(repo.is_none());
    assert_eq!(
        app::active_price_table(None).await.expect("table"),
        PriceTable::default()
    );
}

#[tokio::test]
async fn unknown_backend_is_reported() {
    let cli = parse(&["--backend", "postgres", "--db", "quotes", "prices"]);
    let config = app::load_config(&cli).expect("config");

    let err = app::open_repository(&app::build_registry(), &config)
        .await
        .err()
        .expect("expected an error");

    assert!(format!("{err:#}").contains("unknown backend 'postgres'"));
}

#[test]
fn dakkapel_defaults_come_from_the_size_class() {
    let Command::Dakkapel(args) = parse(&["dakkapel", "--size", "extra_large"]).command else {
        panic!("expected dakkapel command");
    };

    let config = app::dakkapel_configuration(&args);

    assert_eq!(config, DakkapelConfiguration::new(SizeClass::ExtraLarge));
    assert_eq!(config.width_cm, dec!(550));
    assert_eq!(config.window_count, 3);
}

#[test]
fn enforce_width_flag_rejects_out_of_range_width() {
    let Command::Dakkapel(args) =
        parse(&["dakkapel", "--size", "small", "--width", "320", "--enforce-width"]).command
    else {
        panic!("expected dakkapel command");
    };
    let policy = app::width_policy(&args, &AppConfig::default());

    let result = app::price_dakkapel(&PriceTable::default(), &args, policy);

    assert_eq!(policy, WidthPolicy::Enforce);
    assert!(result.is_err());
}

#[test]
fn resolve_falls_back_for_unknown_codes() {
    let Command::Resolve(args) =
        parse(&["resolve", "--size", "huge", "--roof-slope", "steil"]).command
    else {
        panic!("expected resolve command");
    };

    let resolved = app::resolve(&args);

    assert_eq!(resolved.size_class, None);
    assert_eq!(resolved.width_range.max_cm, dec!(300));
    assert_eq!(resolved.default_width_cm, None);
    assert_eq!(resolved.roof_angle, Some(42));
}

#[test]
fn resolve_known_codes() {
    let Command::Resolve(args) = parse(&[
        "resolve",
        "--size",
        "large",
        "--frame-height",
        "140",
        "--roof-slope",
        ">45°",
    ])
    .command
    else {
        panic!("expected resolve command");
    };

    let resolved = app::resolve(&args);

    assert_eq!(resolved.size_class, Some(SizeClass::Large));
    assert_eq!(resolved.default_window_count, Some(2));
    assert_eq!(resolved.frame_heights.frame_cm, 140);
    assert_eq!(resolved.frame_heights.unit_cm, 180);
    assert_eq!(resolved.roof_angle, Some(50));
}

#[test]
fn painting_and_plastering_arguments_map_to_configurations() {
    let Command::Painting(painting) = parse(&[
        "painting", "--walls", "40", "--ceilings", "20", "--doors", "3", "--windows", "2",
    ])
    .command
    else {
        panic!("expected painting command");
    };
    let Command::Plastering(plastering) = parse(&[
        "plastering",
        "--walls",
        "50",
        "--ceilings",
        "25",
        "--corner-beads",
        "12",
    ])
    .command
    else {
        panic!("expected plastering command");
    };

    let painting = app::painting_configuration(&painting);
    let plastering = app::plastering_configuration(&plastering);

    assert_eq!(painting.wall_area_m2, dec!(40));
    assert_eq!(painting.door_count, 3);
    assert_eq!(plastering.corner_bead_m, dec!(12));
}

#[tokio::test]
async fn submit_stores_priced_configuration() {
    let config = in_memory_config();
    let registry = app::build_registry();
    let repo = app::open_repository(&registry, &config)
        .await
        .expect("open")
        .expect("database configured");
    let table = app::active_price_table(Some(&*repo)).await.expect("table");
    let Command::Submit(args) = parse(&[
        "submit",
        "--name",
        "J. de Vries",
        "--email",
        "j.devries@example.nl",
        "--postal-code",
        "1234 AB",
        "dakkapel",
        "--size",
        "small",
        "--option",
        "zinc_gutter",
    ])
    .command
    else {
        panic!("expected submit command");
    };

    let quote = app::submit(&*repo, &table, &args, WidthPolicy::Advisory)
        .await
        .expect("submit");

    assert_eq!(quote.vertical, Vertical::Dakkapel);
    assert_eq!(quote.total_price, dec!(9530));
    assert_eq!(quote.postal_code.as_deref(), Some("1234 AB"));

    let stored: DakkapelConfiguration =
        serde_json::from_str(&quote.configuration).expect("configuration json");
    assert_eq!(
        stored,
        DakkapelConfiguration::new(SizeClass::Small).with_option(DakkapelOption::ZincGutter)
    );

    let listed = repo
        .list_quotes(Some(Vertical::Dakkapel))
        .await
        .expect("list");
    assert_eq!(listed, vec![quote]);
}

#[tokio::test]
async fn submit_stores_painting_quote() {
    let config = in_memory_config();
    let registry = app::build_registry();
    let repo = app::open_repository(&registry, &config)
        .await
        .expect("open")
        .expect("database configured");
    let Command::Submit(args) = parse(&[
        "submit",
        "--name",
        "M. Bakker",
        "--email",
        "m.bakker@example.nl",
        "painting",
        "--walls",
        "40",
        "--ceilings",
        "20",
        "--doors",
        "3",
        "--windows",
        "2",
    ])
    .command
    else {
        panic!("expected submit command");
    };
    let policy = app::submit_width_policy(&args, &config);

    let quote = app::submit(&*repo, &PriceTable::default(), &args, policy)
        .await
        .expect("submit");

    assert_eq!(quote.vertical, Vertical::Painting);
    assert_eq!(quote.total_price, dec!(1280.75));

    let stored: PaintingConfiguration =
        serde_json::from_str(&quote.configuration).expect("configuration json");
    assert_eq!(stored.wall_area_m2, dec!(40));

    let listed = repo
        .list_quotes(Some(Vertical::Painting))
        .await
        .expect("list");
    assert!(listed.contains(&quote));
}

#[test]
fn huge_width_with_per_meter_option_is_an_error() {
    let Command::Dakkapel(args) = parse(&[
        "dakkapel",
        "--size",
        "small",
        "--width",
        "79228162514264337593543950335",
        "--option",
        "electric_roller_shutter",
    ])
    .command
    else {
        panic!("expected dakkapel command");
    };

    let err = app::price_dakkapel(&PriceTable::default(), &args, WidthPolicy::Advisory)
        .err()
        .expect("expected an error");

    assert!(format!("{err:#}").contains("too large"));
}

#[test]
fn huge_wall_area_is_an_error() {
    let Command::Painting(args) = parse(&["painting", "--walls", "79228162514264337593543950335"])
        .command
    else {
        panic!("expected painting command");
    };
    let painting = app::painting_configuration(&args);

    let result = calculate_painting_price(&PaintingRates::default(), &painting);

    assert!(result.is_err());
}
