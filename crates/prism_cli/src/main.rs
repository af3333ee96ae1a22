//! Prism CLI
//!
//! Launches the shell against a chosen host runtime and prints what the
//! entry page would show.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use prism_app::{logging, App, AppConfig};
use prism_core::{NativeHost, StaticHost, SystemInfoHost, UnsupportedHost};

#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(about = "Cross-platform UI shell with host-aware light/dark theming")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the app and render the entry page
    Run {
        /// Config file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host runtime to launch against
        #[arg(long, value_enum, default_value_t = HostKind::Native)]
        host: HostKind,

        /// JSON file with the host's answer (for `--host static`)
        #[arg(long)]
        system_info: Option<PathBuf>,

        /// Press the manual override this many times
        #[arg(long, default_value_t = 0)]
        toggle: u32,
    },

    /// Load and validate a config file
    Check {
        #[arg(short, long, default_value = "prism.toml")]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HostKind {
    /// The operating system running this process
    Native,
    /// A browser-like host without the system info query
    Unsupported,
    /// A fixed answer read from `--system-info`
    Static,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            host,
            system_info,
            toggle,
        } => run(config.as_deref(), host, system_info.as_deref(), toggle),
        Commands::Check { config } => check(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn select_host(kind: HostKind, system_info: Option<&Path>) -> Result<Box<dyn SystemInfoHost>> {
    Ok(match kind {
        HostKind::Native => Box::new(NativeHost),
        HostKind::Unsupported => Box::new(UnsupportedHost::named("h5")),
        HostKind::Static => {
            let path = system_info.context("--host static requires --system-info <FILE>")?;
            let src = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let host = StaticHost::from_json(&src)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            Box::new(host)
        }
    })
}

fn run(
    config: Option<&Path>,
    host: HostKind,
    system_info: Option<&Path>,
    toggle: u32,
) -> Result<()> {
    let config = load_config(config)?;
    logging::init(config.app.dev);

    let host = select_host(host, system_info)?;
    let app = App::new(config).context("invalid configuration")?;
    let page = app.entry_page();

    app.launch(&host);
    for _ in 0..toggle {
        page.toggle_theme();
    }

    let view = page.render();
    let window = app.window_style();
    println!(
        "{} ({})",
        window.navigation_bar_title_text,
        app.config().entry_page().unwrap_or_default()
    );
    println!(
        "navigation bar: {} / {}",
        window.navigation_bar_background_color, window.navigation_bar_text_style
    );
    println!();
    println!("{view}");

    let state = app.store().state();
    tracing::debug!(
        "final state: {}",
        serde_json::to_string(&*state).context("failed to serialize state")?
    );
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    logging::init(false);
    let config = load_config(Some(path))?;
    config.validate().context("invalid configuration")?;
    println!(
        "{}: ok ({} page(s), default theme {}, follow_system {})",
        path.display(),
        config.app.pages.len(),
        config.theme.default,
        config.theme.follow_system
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_to_native_host() {
        let cli = Cli::try_parse_from(["prism", "run"]).unwrap();
        match cli.command {
            Commands::Run { host, toggle, .. } => {
                assert_eq!(host, HostKind::Native);
                assert_eq!(toggle, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn check_rejects_unresolvable_config() {
        let path = std::env::temp_dir().join(format!("prism-check-{}.toml", std::process::id()));
        std::fs::write(&path, "[window]\nnavigation_bar_text_style = \"@missing\"\n").unwrap();

        let err = check(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(format!("{err:#}").contains("@missing"));
    }

    #[test]
    fn static_host_needs_a_file() {
        let err = select_host(HostKind::Static, None).err().unwrap();
        assert!(err.to_string().contains("--system-info"));
    }
}
