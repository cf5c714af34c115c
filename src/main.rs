//! Wallsplit CLI
//!
//! Usage:
//!   wallsplit [OPTIONS] <SOURCE> <OUTPUT>
//!
//! Options:
//!   -s, --screen <SPEC>   Screen in the current group, left to right
//!       --then            Start a new group (one output file per group)
//!       --crop <SPEC>     Only use this region of the source image
//!   -n, --pretend         Print the crops instead of writing files
//!   -h, --help            Print help

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{ArgAction, Command, CommandFactory, FromArgMatches, Parser};
use tracing_subscriber::EnvFilter;

use wallsplit::{
    parse_region, parse_screen, run, LayoutConfig, MagickConfig, MagickEngine, ParseError,
    Profile, ProfileError, RenderConfig,
};

#[derive(Parser)]
#[command(name = "wallsplit", version)]
#[command(about = "Split an image into wallpapers for screens of different size and density")]
struct Cli {
    /// Source image
    source: PathBuf,

    /// Output file, prefixed with the group number when there are several groups
    output: PathBuf,

    /// Screen spec WxH/DENSITY[UNIT][@TOP[UNIT]][+GAP[UNIT]]
    #[arg(short = 's', long = "screen", value_name = "SPEC", action = ArgAction::Append)]
    screens: Vec<String>,

    /// Start a new group of screens
    #[arg(long, action = ArgAction::Count)]
    then: u8,

    /// Region of the source image to use, WxH(+|-)X(+|-)Y
    #[arg(long, value_name = "SPEC")]
    crop: Option<String>,

    /// Horizontal placement of the screens within the image, 0 (left) to 1 (right)
    #[arg(long, value_name = "FLOAT")]
    xcenter: Option<f64>,

    /// Vertical placement of the screens within the image, 0 (top) to 1 (bottom)
    #[arg(long, value_name = "FLOAT")]
    ycenter: Option<f64>,

    /// Shrink the screens within the image by this factor (at least 1.0)
    #[arg(long, value_name = "FLOAT")]
    scale: Option<f64>,

    /// Print the planned crops without writing any file
    #[arg(short = 'n', long)]
    pretend: bool,

    /// Log every computed box and command
    #[arg(short, long)]
    verbose: bool,

    /// Profile file with screen groups and fit settings (TOML format)
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// ImageMagick program used to crop and join images
    #[arg(long, value_name = "PROGRAM", default_value = "convert")]
    convert: String,

    /// ImageMagick program used to measure the source image
    #[arg(long, value_name = "PROGRAM", default_value = "identify")]
    identify: String,
}

fn main() {
    let mut cmd = Cli::command();
    let matches = cmd.clone().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_tracing(cli.verbose);

    let screens: Vec<(usize, String)> = matches
        .indices_of("screens")
        .map(|indices| indices.zip(cli.screens.iter().cloned()).collect())
        .unwrap_or_default();
    let breaks: Vec<usize> = matches
        .indices_of("then")
        .map(|indices| indices.collect())
        .unwrap_or_default();
    let spec_groups = split_groups(screens, breaks);

    let profile = match &cli.profile {
        Some(path) => match Profile::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                report_profile_error(path, &e);
                std::process::exit(1);
            }
        },
        None => Profile::default(),
    };

    // Screens given on the command line replace the profile's groups
    let mut groups = Vec::with_capacity(spec_groups.len());
    for group in &spec_groups {
        let mut parsed = Vec::with_capacity(group.len());
        for spec in group {
            match parse_screen(spec) {
                Ok(screen) => parsed.push(screen),
                Err(errors) => invalid_spec(&mut cmd, "screen", spec, &errors),
            }
        }
        groups.push(parsed);
    }
    if groups.is_empty() {
        groups = profile.groups.clone();
    }
    if groups.is_empty() {
        cmd.error(
            ErrorKind::MissingRequiredArgument,
            "no screens specified, use --screen or a --profile with groups",
        )
        .exit();
    }

    let region = match &cli.crop {
        Some(spec) => match parse_region(spec) {
            Ok(region) => Some(region),
            Err(errors) => invalid_spec(&mut cmd, "crop", spec, &errors),
        },
        None => profile.crop,
    };

    let mut layout = profile.apply(LayoutConfig::new());
    if let Some(x) = cli.xcenter {
        layout.gravity.x = x;
    }
    if let Some(y) = cli.ycenter {
        layout.gravity.y = y;
    }
    if let Some(scale) = cli.scale {
        layout.scale = scale;
    }
    if let Err(e) = layout.validate() {
        cmd.error(ErrorKind::ValueValidation, e).exit();
    }

    let config = RenderConfig::new()
        .with_layout(layout)
        .with_region(region)
        .with_magick(
            MagickConfig::new()
                .with_convert(cli.convert)
                .with_identify(cli.identify),
        )
        .with_pretend(cli.pretend);

    let mut engine = match MagickEngine::new(config.magick.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match run(&cli.source, &cli.output, &groups, &config, &mut engine) {
        Ok(plan) => {
            if config.pretend {
                print!("{}", plan);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Quiet unless `--verbose`; `RUST_LOG` takes precedence over both
fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Split `--screen` values into groups at each `--then`, using argument
/// positions. Empty groups are never produced.
fn split_groups(screens: Vec<(usize, String)>, breaks: Vec<usize>) -> Vec<Vec<String>> {
    let mut events: Vec<(usize, Option<String>)> = screens
        .into_iter()
        .map(|(i, spec)| (i, Some(spec)))
        .chain(breaks.into_iter().map(|i| (i, None)))
        .collect();
    events.sort_by_key(|(i, _)| *i);

    let mut groups = Vec::new();
    let mut current = Vec::new();
    for (_, event) in events {
        match event {
            Some(spec) => current.push(spec),
            None if !current.is_empty() => groups.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn color_reports() -> bool {
    std::io::stderr().is_terminal()
}

fn invalid_spec(cmd: &mut Command, kind: &str, spec: &str, errors: &[ParseError]) -> ! {
    for error in errors {
        eprint!("{}", error.format_with_color(spec, kind, color_reports()));
    }
    cmd.error(
        ErrorKind::ValueValidation,
        format!("invalid {} spec '{}'", kind, spec),
    )
    .exit()
}

fn report_profile_error(path: &Path, error: &ProfileError) {
    eprintln!("Error loading profile '{}': {}", path.display(), error);
    if let Some((spec, errors)) = error.spec_errors() {
        for e in errors {
            eprint!(
                "{}",
                e.format_with_color(spec, &path.display().to_string(), color_reports())
            );
        }
    }
}
