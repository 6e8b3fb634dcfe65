use super::*;
use clap::{CommandFactory, Parser};

#[test]
fn test_cli_structure_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_migrate() {
    let cli = Cli::parse_from(["cqf", "migrate"]);
    assert!(matches!(cli.command, Commands::Migrate));
    assert!(!cli.global.verbose);
    assert_eq!(cli.global.project_dir, ".");
}

#[test]
fn test_parse_status_with_json_output() {
    let cli = Cli::parse_from(["cqf", "status", "--output", "json"]);
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, StatusOutput::Json),
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn test_status_output_defaults_to_table() {
    let cli = Cli::parse_from(["cqf", "status"]);
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, StatusOutput::Table),
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn test_global_args_apply_to_subcommands() {
    let cli = Cli::parse_from([
        "cqf",
        "status",
        "-p",
        "/srv/project",
        "--profile",
        "container",
        "-v",
    ]);
    assert_eq!(cli.global.project_dir, "/srv/project");
    assert_eq!(cli.global.profile, Some(ProfileArg::Container));
    assert!(cli.global.verbose);
}

#[test]
fn test_parse_init_with_keyspace() {
    let cli = Cli::parse_from(["cqf", "init", "orders_project", "--keyspace", "orders"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.name, "orders_project");
            assert_eq!(args.keyspace.as_deref(), Some("orders"));
        }
        other => panic!("expected init, got {other:?}"),
    }
}
