//! Line Opener - open the source location embedded in a log line
//!
//! This is the binary entry point. It is meant to be registered as an
//! external tool in a log viewer, which passes the selected line as the only
//! argument. All logic lives in the library crates.
//!
//! Nothing is ever reported on the console: failures are written to the log
//! file and the process exits cleanly.

use std::panic;

use clap::error::ErrorKind;
use clap::Parser;
use color_eyre::config::{HookBuilder, Theme};
use color_eyre::eyre::{Result, WrapErr};
use lineopen_app::config::{config_path, load_settings};
use lineopen_app::{find_source_reference, DetachedLauncher, LineOpener, OpenerConfig};
use tracing::{debug, error};

/// Line Opener - open `","../../path:line` references from log lines in an editor
#[derive(Parser, Debug)]
#[command(name = "lineopen", version)]
#[command(about = "Open the source location embedded in a log line in an editor", long_about = None)]
struct Args {
    /// Log line containing a `","../../<path>:<line>` source reference
    #[arg(value_name = "LINE", allow_hyphen_values = true)]
    line: String,
}

fn main() {
    if let Err(e) = lineopen_core::logging::init() {
        eprintln!("lineopen: {e}");
    }

    if let Err(e) = install_hooks() {
        error!("Failed to install error hooks: {:?}", e);
    }

    match panic::catch_unwind(run) {
        Ok(Ok(())) => {}
        Ok(Err(report)) => error!("{:?}", report),
        // The panic hook already logged the report.
        Err(_) => {}
    }
}

/// Route color-eyre reports and panics into the log file, uncolored.
fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .theme(Theme::new())
        .display_env_section(false)
        .into_hooks();

    eyre_hook.install()?;
    panic::set_hook(Box::new(move |info| {
        error!("{}", panic_hook.panic_report(info));
    }));

    Ok(())
}

fn run() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(e).wrap_err("Expected exactly one argument: the log line"),
    };

    // Most lines carry no reference; those must not depend on the editor config.
    if find_source_reference(&args.line).is_none() {
        return Ok(());
    }

    let config_file = config_path();
    let settings = load_settings(&config_file);
    let config = OpenerConfig::from_settings(&settings).wrap_err_with(|| {
        format!(
            "Invalid editor configuration (config file: {})",
            config_file.display()
        )
    })?;
    debug!(
        "Base directory: {}, template: {}",
        config.base_dir.display(),
        config.template
    );

    let opener = LineOpener::new(config, DetachedLauncher);
    opener
        .open_line_from_log_entry(&args.line)
        .wrap_err("Failed to open source reference")?;

    Ok(())
}
