use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use inifile::{
    find_config_file, find_editorconfig, generate_init_file, get_value, list_sections,
    load_config, merge_format_config, parse_editorconfig, run, set_value, should_use_colors,
    CliFormatOptions, Colors, Config, FormatConfig, InifileToml, OutputContext, OutputMode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inifile")]
#[command(version, about = "Read, edit and format INI configuration files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite INI files in canonical form
    Fmt(FmtArgs),
    /// Print the value of a field
    Get {
        file: PathBuf,
        section: String,
        key: String,
        /// Printed when the field does not exist
        #[arg(long, value_name = "VALUE")]
        default: Option<String>,
        #[command(flatten)]
        shared: SharedArgs,
    },
    /// Set a field, creating the file or section if needed
    Set {
        file: PathBuf,
        section: String,
        key: String,
        value: String,
        /// Save even if comments or fields in the file would be lost
        #[arg(long)]
        allow_drop: bool,
        #[command(flatten)]
        shared: SharedArgs,
    },
    /// List section names in file order
    Sections {
        file: PathBuf,
        #[command(flatten)]
        shared: SharedArgs,
    },
    /// Generate a template inifile.toml configuration file
    Init,
}

#[derive(Args)]
struct FmtArgs {
    /// Target files or directories
    #[arg(required = true)]
    paths: Vec<String>,

    /// Check only (no modifications), exit 1 if any file would change
    #[arg(short, long)]
    check: bool,

    /// Show changes in diff format
    #[arg(short, long)]
    diff: bool,

    /// Output only changed file names
    #[arg(short, long)]
    quiet: bool,

    /// Also report unchanged and skipped files
    #[arg(short, long)]
    verbose: bool,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Rewrite files even when comments or fields would be lost
    #[arg(long)]
    allow_drop: bool,

    #[command(flatten)]
    shared: SharedArgs,
}

#[derive(Args)]
struct SharedArgs {
    /// Indent field lines with a tab when saving
    #[arg(long)]
    tabbed: bool,

    /// Keep reading a section after a boolean field
    #[arg(long)]
    lenient: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Init => handle_init(),
        Command::Fmt(args) => handle_fmt(&args),
        Command::Get {
            file,
            section,
            key,
            default,
            shared,
        } => handle_get(&file, &section, &key, default, &shared),
        Command::Set {
            file,
            section,
            key,
            value,
            allow_drop,
            shared,
        } => {
            let format = resolve_format_config(&shared, false);
            report(set_value(&file, &section, &key, &value, &format, allow_drop))
        }
        Command::Sections { file, shared } => {
            let format = resolve_format_config(&shared, true);
            match list_sections(&file, format.mode) {
                Ok(names) => {
                    names.iter().for_each(|name| println!("{name}"));
                    ExitCode::SUCCESS
                }
                Err(e) => fail(&e),
            }
        }
    }
}

/// Log filter comes from `INIFILE_LOG`; warnings only by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("INIFILE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn handle_fmt(args: &FmtArgs) -> ExitCode {
    let format = resolve_format_config(&args.shared, args.quiet);

    let output_mode = if args.quiet {
        OutputMode::Quiet
    } else if args.diff {
        OutputMode::Diff
    } else {
        OutputMode::Normal
    };

    let use_colors = should_use_colors(args.color, args.no_color);
    let show_progress = output_mode == OutputMode::Normal && std::io::stderr().is_terminal();
    let ctx = OutputContext::new(output_mode, use_colors, args.verbose, show_progress);

    let config = Config {
        check_only: args.check,
        output_mode,
        allow_drop: args.allow_drop,
        format,
    };

    match run(&args.paths, &config, &ctx) {
        Ok(result) if result.has_problems() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn handle_get(
    file: &Path,
    section: &str,
    key: &str,
    default: Option<String>,
    shared: &SharedArgs,
) -> ExitCode {
    let format = resolve_format_config(shared, true);
    match get_value(file, section, key, format.mode) {
        Ok(value) => match value.or(default) {
            Some(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            }
            None => ExitCode::from(1),
        },
        Err(e) => fail(&e),
    }
}

fn report(result: Result<(), inifile::Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(e: &dyn std::fmt::Display) -> ExitCode {
    let colors = Colors::new(should_use_colors(false, false));
    eprintln!("{} {e}", colors.paint(colors.error, "Error:"));
    ExitCode::from(1)
}

/// Merge CLI flags, inifile.toml and .editorconfig into format settings.
fn resolve_format_config(shared: &SharedArgs, quiet: bool) -> FormatConfig {
    let toml_config = load_configuration(&shared.config, quiet);
    let editorconfig = std::env::current_dir()
        .ok()
        .and_then(|d| find_editorconfig(&d))
        .and_then(|p| parse_editorconfig(&p).ok());

    // Boolean flags are always present (default false), so false means
    // "not set" for merging with the config file.
    let cli = CliFormatOptions {
        tabbed: shared.tabbed.then_some(true),
        lenient: shared.lenient.then_some(true),
    };

    merge_format_config(
        &cli,
        toml_config.as_ref().map(|c| &c.format),
        editorconfig.as_ref(),
    )
}

fn load_configuration(explicit_path: &Option<PathBuf>, quiet: bool) -> Option<InifileToml> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            if !quiet {
                eprintln!("Using config: {}", p.display());
            }
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {e}");
            None
        }
    })
}
