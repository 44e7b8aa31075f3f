//! fusionctl - Gigabyte RGB Fusion 2.0 lighting control
//!
//! Drives the motherboard RGB controller (ITE IT5702 / IT8297) over USB HID
//! feature reports.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Commands, DeviceSelector};
use crate::error::ErrorKind;

#[derive(Parser, Debug)]
#[command(name = "fusionctl")]
#[command(about = "Control Gigabyte RGB Fusion 2.0 motherboard lighting")]
#[command(version)]
#[command(long_about = "
fusionctl talks to Gigabyte RGB Fusion 2.0 controllers (ITE IT5702 and IT8297)
over USB HID. Channels are led1..led7, or `sync` for all of them.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    device: DeviceSelector,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "fusionctl={lvl},rgb_fusion2_hid_protocol={lvl},fusion_hid_common={lvl}",
                    lvl = log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            std::process::exit(ErrorKind::of(&e).exit_code());
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::List => commands::device::list(&cli.device, cli.json),
        Commands::Initialize => commands::device::initialize(&cli.device, cli.json),
        Commands::Status => commands::device::status(&cli.device, cli.json),
        Commands::SetColor(args) => commands::lighting::set_color(args, &cli.device, cli.json),
        Commands::Reset => commands::device::reset(&cli.device, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_list_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["fusionctl", "list"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.device.vid, 0x048D);
        assert!(matches!(cli.command, Commands::List));
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "fusionctl", "initialize", "--json", "-vv", "--pid", "8297",
        ])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.device.pid, Some(0x8297));
        assert!(matches!(cli.command, Commands::Initialize));
        Ok(())
    }

    #[test]
    fn parse_set_color_with_colors_and_speed() -> TestResult {
        let cli = Cli::try_parse_from([
            "fusionctl", "set-color", "sync", "pulse", "ff0000", "00ff00", "--speed", "faster",
        ])?;
        let Commands::SetColor(args) = cli.command else {
            return Err("expected set-color".into());
        };
        assert_eq!(args.channel, "sync");
        assert_eq!(args.mode, "pulse");
        assert_eq!(args.colors, vec!["ff0000", "00ff00"]);
        assert_eq!(args.speed, "faster");
        Ok(())
    }

    #[test]
    fn parse_set_color_without_colors() -> TestResult {
        let cli = Cli::try_parse_from(["fusionctl", "set-color", "led1", "off"])?;
        let Commands::SetColor(args) = cli.command else {
            return Err("expected set-color".into());
        };
        assert!(args.colors.is_empty());
        Ok(())
    }

    #[test]
    fn set_color_requires_channel_and_mode() {
        assert!(Cli::try_parse_from(["fusionctl", "set-color", "led1"]).is_err());
    }

    #[test]
    fn bad_hex_vid_is_rejected() {
        assert!(Cli::try_parse_from(["fusionctl", "--vid", "xyz", "list"]).is_err());
    }

    #[test]
    fn parse_reset_and_status() -> TestResult {
        let cli = Cli::try_parse_from(["fusionctl", "reset"])?;
        assert!(matches!(cli.command, Commands::Reset));
        let cli = Cli::try_parse_from(["fusionctl", "status"])?;
        assert!(matches!(cli.command, Commands::Status));
        Ok(())
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
