mod chart;
mod dispatch;
mod output;
mod payload;
mod shaping;
mod style;
mod ui;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chart::DashboardBackend;
use dispatch::{RenderReport, render_all};
use output::{print_error, print_legend, print_prefs, print_report, print_warning};
use payload::load_payload;
use style::StyleConfig;
use ui::{Debouncer, JsonFileStore, MemoryStore, Theme, UiEvent, UiState};

/// Poll period for `--watch`
const WATCH_POLL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(
    name = "mailchart",
    version,
    about = "Email report dashboard renderer: turns mailbox statistics into charts",
    after_help = "Examples:
  mailchart render stats.json                              Write dashboard.html
  mailchart render stats.json -o out/report.html           Custom output path
  mailchart render stats.json --image-dir charts/          Also export PNG charts
  mailchart render stats.json --prefs prefs.json --watch   Re-render on change
  mailchart toggle dark-mode --prefs prefs.json            Flip a UI preference
  mailchart prefs --prefs prefs.json                       Show UI preferences"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Render the dashboard from a payload file
    Render {
        /// Payload JSON file, or - for stdin
        payload: String,

        /// Dashboard HTML output path
        #[arg(short, long, default_value = "dashboard.html", value_name = "PATH")]
        output: PathBuf,

        /// Export drawn charts as PNG images into this directory
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,

        /// UI preferences file (sidebar and dark mode flags)
        #[arg(long, value_name = "PATH")]
        prefs: Option<PathBuf>,

        /// Force dark theme for this render
        #[arg(long, conflicts_with = "light")]
        dark: bool,

        /// Force light theme for this render
        #[arg(long)]
        light: bool,

        /// Re-render whenever the payload file changes
        #[arg(short, long)]
        watch: bool,

        /// Suppress explanations (show data only)
        #[arg(short, long)]
        quiet: bool,
    },
    /// Flip one UI preference
    Toggle {
        preference: Preference,

        /// UI preferences file
        #[arg(long, value_name = "PATH")]
        prefs: PathBuf,
    },
    /// Show UI preferences
    Prefs {
        /// UI preferences file
        #[arg(long, value_name = "PATH")]
        prefs: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preference {
    Sidebar,
    DarkMode,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mailchart=info" } else { "mailchart=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(path: &Path) -> JsonFileStore {
    JsonFileStore::open(path).unwrap_or_else(|e| {
        print_error(&e.to_string());
        std::process::exit(1);
    })
}

/// One render pass: load, dispatch, write
fn render_once(
    source: &str,
    output: &Path,
    image_dir: Option<&Path>,
    ui: &UiState,
) -> Result<RenderReport, String> {
    let payload = load_payload(source).map_err(|e| e.to_string())?;
    let style = StyleConfig::for_theme(ui.theme);

    let mut backend = DashboardBackend::new();
    if let Some(dir) = image_dir {
        backend = backend.with_image_dir(dir);
    }

    let report = render_all(payload.as_ref(), &style, &mut backend);
    backend
        .write_page(output, ui)
        .map_err(|e| e.to_string())?;

    for path in backend.exported_images() {
        eprintln!("Chart saved to: {}", path.display());
    }
    Ok(report)
}

fn modified(path: &str) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn run_render(
    source: &str,
    output: &Path,
    image_dir: Option<&Path>,
    ui: &UiState,
    watch: bool,
    quiet: bool,
) {
    let report = render_once(source, output, image_dir, ui).unwrap_or_else(|e| {
        print_error(&e);
        std::process::exit(1);
    });

    print_report(&report, quiet);
    if !quiet {
        println!();
        print_legend();
    }
    eprintln!("Dashboard saved to: {}", output.display());
    if report.failed() {
        print_warning("some charts could not be rendered");
    }

    if !watch {
        return;
    }

    info!(source, "watching payload for changes");
    let mut last_seen = modified(source);
    let mut debouncer = Debouncer::default();
    loop {
        std::thread::sleep(WATCH_POLL);
        let now = Instant::now();

        let current = modified(source);
        if current != last_seen {
            last_seen = current;
            if debouncer.is_pending() {
                debug!("payload changed again, restarting quiet period");
            } else {
                debug!("payload changed");
            }
            debouncer.trigger(now);
        }

        if debouncer.fire_due(now) {
            match render_once(source, output, image_dir, ui) {
                Ok(report) => {
                    eprintln!(
                        "Re-rendered: {}/{} slots drawn",
                        report.drawn(),
                        report.outcomes.len()
                    );
                }
                Err(e) => print_error(&e),
            }
        }
    }
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    init_tracing(args.verbose);

    match args.command {
        Command::Render {
            payload,
            output,
            image_dir,
            prefs,
            dark,
            light,
            watch,
            quiet,
        } => {
            if watch && payload == "-" {
                print_error("--watch needs a payload file, not stdin");
                std::process::exit(1);
            }

            if payload != "-" && !Path::new(&payload).exists() {
                print_error(&format!("Payload file does not exist: {}", payload));
                std::process::exit(1);
            }

            if let Some(parent) = output.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                print_error(&format!("Directory does not exist: {}", parent.display()));
                std::process::exit(1);
            }

            if let Some(dir) = &image_dir
                && !dir.is_dir()
            {
                print_error(&format!("Directory does not exist: {}", dir.display()));
                std::process::exit(1);
            }

            let mut ui = match &prefs {
                Some(path) => UiState::load(&open_store(path)),
                None => UiState::load(&MemoryStore::default()),
            };
            if dark {
                ui = ui.apply(UiEvent::SetTheme(Theme::Dark));
            } else if light {
                ui = ui.apply(UiEvent::SetTheme(Theme::Light));
            }

            run_render(&payload, &output, image_dir.as_deref(), &ui, watch, quiet);
        }
        Command::Toggle { preference, prefs } => {
            let mut store = open_store(&prefs);
            let event = match preference {
                Preference::Sidebar => UiEvent::ToggleSidebar,
                Preference::DarkMode => UiEvent::ToggleTheme,
            };
            let ui = UiState::load(&store).apply(event);
            if let Err(e) = ui.save(&mut store) {
                print_error(&e.to_string());
                std::process::exit(1);
            }
            print_prefs(&ui);
        }
        Command::Prefs { prefs } => {
            let store = open_store(&prefs);
            print_prefs(&UiState::load(&store));
        }
    }
}
