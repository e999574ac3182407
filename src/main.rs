mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use mobile_build_gate::core::context::ProjectContext;
use mobile_build_gate::core::error::{GateError, print_error};
use mobile_build_gate::{Platform, logging};
use std::path::PathBuf;

const DEFAULT_SNAPSHOT: &str = "release.toml";

/// Validate release settings before a mobile build, and bump build numbers on success
#[derive(Parser)]
#[command(name = "mobile-build-gate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the pre-build gate (exit 0 = build may proceed)
  Gate {
    /// Release snapshot to validate
    #[arg(long, default_value = DEFAULT_SNAPSHOT)]
    snapshot: PathBuf,
    /// Build target (default: the snapshot's platform)
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,
    /// Output the outcome in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show every rule outcome and the build counters (read-only)
  Report {
    /// Release snapshot to inspect
    #[arg(long, default_value = DEFAULT_SNAPSHOT)]
    snapshot: PathBuf,
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// List the rule catalog in evaluation order
  Rules {
    /// Output the catalog in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Inspect build counters and the auto-increment toggle
  #[command(subcommand)]
  Counters(CountersCommands),

  /// Write a default gate.toml
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

#[derive(Subcommand)]
enum CountersCommands {
  /// Show current counter values
  Show {
    /// Output counters in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Turn auto-increment on build on or off
  AutoIncrement {
    #[arg(value_enum)]
    state: Toggle,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
  Android,
  Ios,
  Other,
}

impl From<PlatformArg> for Platform {
  fn from(arg: PlatformArg) -> Self {
    match arg {
      PlatformArg::Android => Platform::Android,
      PlatformArg::Ios => Platform::Ios,
      PlatformArg::Other => Platform::Other,
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
  On,
  Off,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let project_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  // init must work even when an existing gate.toml is invalid
  if let Commands::Init { force } = cli.command {
    if let Err(err) = commands::run_init(&project_root, force) {
      handle_error(err);
    }
    return;
  }

  let ctx = match ProjectContext::build(&project_root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  logging::init(&ctx.config.logging);

  let result = match cli.command {
    Commands::Gate {
      snapshot,
      platform,
      json,
    } => commands::run_gate(&ctx, &snapshot, platform.map(Platform::from), json),
    Commands::Report { snapshot, json } => commands::run_report(&ctx, &snapshot, json),
    Commands::Rules { json } => commands::run_rules(json),
    Commands::Counters(counters_cmd) => match counters_cmd {
      CountersCommands::Show { json } => commands::run_counters_show(&ctx, json),
      CountersCommands::AutoIncrement { state } => {
        commands::run_counters_auto_increment(&ctx, matches!(state, Toggle::On))
      }
    },
    Commands::Init { .. } => Ok(()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
