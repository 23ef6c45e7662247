//! The CLI interface for remode
//!
//! Use the `--help` flag to see the available options.
use color_eyre::eyre::Result;
use remode::{ChangeRequest, Frequency, Orientation, Resolution};
use structopt::{StructOpt, clap::ArgGroup};

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "remode",
    about = "Changes display resolution, refresh rate and orientation, rolling back on failure.",
    group = ArgGroup::with_name("change").required(true).multiple(true)
)]
struct Opts {
    /// The refresh rate in Hz
    #[structopt(group = "change", long, visible_alias = "rr")]
    refresh_rate: Option<Frequency>,
    /// The resolution in the format WIDTHxHEIGHT (e.g., 1920x1080)
    #[structopt(group = "change", short, long)]
    resolution: Option<Resolution>,
    /// The display orientation: Landscape, ReverseLandscape, Portrait or ReversePortrait
    #[structopt(group = "change", short, long)]
    orientation: Option<Orientation>,
    /// Apply the change to these monitors (1-indexed); defaults to the primary display
    #[structopt(short, long)]
    monitors: Vec<usize>,
    /// Wait for Enter after a successful change, then revert all displays
    #[structopt(short, long)]
    pause: bool,
    /// Output debug info
    #[structopt(short, long)]
    verbose: bool,
}

/// Entry point for `remode`.
fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .init();

    log::debug!("Parsed Opts:\n{:#?}", opts);

    let monitors = if opts.monitors.is_empty() {
        None
    } else {
        Some(opts.monitors.clone())
    };
    let request = ChangeRequest::new(opts.refresh_rate, opts.resolution, opts.orientation, monitors)?;

    change_settings(&request, opts.pause)
}

#[cfg(target_os = "windows")]
fn change_settings(request: &ChangeRequest, pause: bool) -> Result<()> {
    use remode::{Transaction, WindowsBackend, revert_all};

    let backend = WindowsBackend::new();
    let mut transaction = Transaction::new(&backend);

    if let Err(err) = transaction.run(request) {
        // The transaction has already rolled its targets back; re-assert the
        // reported modes of everything attached before exiting non-zero.
        revert_all(&backend);
        return Err(err.into());
    }
    log::info!("Display settings changed");

    if pause {
        println!("Press 'Enter' to revert changes...");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        transaction.revert_all();
    }

    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn change_settings(_request: &ChangeRequest, _pause: bool) -> Result<()> {
    Err(color_eyre::eyre::eyre!(
        "Changing display settings is only supported on Windows"
    ))
}
