// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use metapick_source::{FetchConfig, SfClient};
use metapick_tui::SessionOptions;
use runtime::SourceRuntime;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `metapick --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let fetch_config = fetch_config(&config, &options);
    let session_options = SessionOptions {
        metadata_types: config.metadata_types(),
        poll_interval: config.poll_interval()?,
    };
    let log_path = config.log_path()?;
    if options.check_only {
        return Ok(());
    }

    logging::init(&log_path, config.log_level())?;
    info!(
        program = %fetch_config.program,
        metadata_type = %fetch_config.metadata_type,
        demo = options.demo,
        "starting metapick"
    );

    let mut runtime = if options.demo {
        SourceRuntime::demo(fetch_config.metadata_type)
    } else {
        SourceRuntime::Sf(SfClient::new(fetch_config))
    };
    let outcome = metapick_tui::run_app(&mut runtime, &session_options)?;
    info!(
        metadata_type = %outcome.metadata_type,
        selected = outcome.selected.len(),
        "session ended"
    );
    for record in &outcome.selected {
        println!("{}", record.full_name);
    }
    Ok(())
}

/// Flags win over the config file.
fn fetch_config(config: &Config, options: &CliOptions) -> FetchConfig {
    FetchConfig {
        program: config.program().to_owned(),
        metadata_type: options
            .metadata_type
            .clone()
            .unwrap_or_else(|| config.metadata_type().to_owned()),
        target_org: options
            .target_org
            .clone()
            .or_else(|| config.target_org().map(str::to_owned)),
        ..FetchConfig::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    metadata_type: Option<String>,
    target_org: Option<String>,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        metadata_type: None,
        target_org: None,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--metadata-type" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--metadata-type requires a type name"))?;
                let value = value.as_ref().trim();
                if value.is_empty() {
                    return Err(anyhow!("--metadata-type requires a type name"));
                }
                options.metadata_type = Some(value.to_owned());
            }
            "--target-org" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--target-org requires an org alias or username"))?;
                options.target_org = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("metapick: browse and select org metadata");
    println!("  --config <path>          Use a specific config path");
    println!("  --metadata-type <type>   Metadata type to list (default ApexClass)");
    println!("  --target-org <org>       Org alias or username passed to sf");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Browse built-in demo records instead of calling sf");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
    println!();
    println!("Selected records are printed one full name per line on exit.");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, Config, fetch_config, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/metapick-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                metadata_type: None,
                target_org: None,
                print_config_path: false,
                demo: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_reads_source_overrides() -> Result<()> {
        let options = parse_cli_args(
            vec!["--metadata-type", "Flow", "--target-org", "dev-hub"],
            default_options_path(),
        )?;
        assert_eq!(options.metadata_type.as_deref(), Some("Flow"));
        assert_eq!(options.target_org.as_deref(), Some("dev-hub"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for (args, expected) in [
            (vec!["--config"], "--config requires a file path"),
            (vec!["--metadata-type"], "--metadata-type requires a type name"),
            (vec!["--metadata-type", "  "], "--metadata-type requires a type name"),
            (vec!["--target-org"], "--target-org requires"),
        ] {
            let error = parse_cli_args(args, default_options_path())
                .expect_err("missing value should fail");
            assert!(error.to_string().contains(expected), "got {error}");
        }
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_demo_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check", "--demo"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(options.demo);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn fetch_config_prefers_flags_over_config_file() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "version = 1\n[source]\nprogram = \"sf2\"\nmetadata_type = \"ApexPage\"\ntarget_org = \"from-config\"\n",
        )?;
        let config = Config::load(&path)?;

        let from_config = fetch_config(
            &config,
            &parse_cli_args(Vec::<String>::new(), path.clone())?,
        );
        assert_eq!(from_config.program, "sf2");
        assert_eq!(from_config.metadata_type, "ApexPage");
        assert_eq!(from_config.target_org.as_deref(), Some("from-config"));

        let overridden = fetch_config(
            &config,
            &parse_cli_args(vec!["--metadata-type", "Flow", "--target-org", "cli"], path)?,
        );
        assert_eq!(overridden.metadata_type, "Flow");
        assert_eq!(overridden.target_org.as_deref(), Some("cli"));
        assert_eq!(
            overridden.command_args(),
            vec![
                "org",
                "list",
                "metadata",
                "--json",
                "--metadata-type",
                "Flow",
                "--target-org",
                "cli"
            ]
        );
        Ok(())
    }
}
