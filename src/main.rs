//! termwin - interactive demo of the input pipeline and scroll engine
//!
//! Reads keys from the terminal through `getch` and echoes what arrives
//! into a scrolling region, with a status line showing the key codes.
//!
//! # Quick Start
//!
//! ```text
//! termwin                # Cooked mode: keys arrive after Enter
//! termwin --cbreak       # Keys arrive one at a time
//! termwin --halfdelay 5  # Give up after half a second without input
//! ```
//!
//! Press `q` (or Ctrl+C) to quit.

use std::env;
use std::path::PathBuf;

use termwin::config::{home_dir, Config};
use termwin::core::keys::{is_ordinary, key_name, KEY_BREAK};
use termwin::core::{CursesError, InputMode, Screen, WindowId};
use termwin::ui::CrosstermBackend;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line overrides
#[derive(Default)]
struct Args {
    mode: Option<InputMode>,
    noecho: bool,
    halfdelay: Option<u32>,
    config_path: Option<PathBuf>,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("termwin {}", VERSION);
}

fn print_help() {
    eprintln!("termwin {} - curses-style input and scrolling demo", VERSION);
    eprintln!();
    eprintln!("Usage: termwin [OPTIONS]");
    eprintln!();
    eprintln!("Input options:");
    eprintln!("  (default)             Cooked mode, keys arrive a line at a time");
    eprintln!("  --cbreak              Deliver keys immediately");
    eprintln!("  --raw                 Deliver keys immediately, Ctrl+C included");
    eprintln!("  --noecho              Do not echo typed keys");
    eprintln!("  --halfdelay <N>       Time out reads after N tenths of a second");
    eprintln!();
    eprintln!("Other options:");
    eprintln!("  --config <PATH>       Read settings from PATH");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Configuration: ~/.termwin/config.toml");
    eprintln!("Log file:      ~/.termwin/termwin.log (level from TERMWIN_LOG)");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "--raw" => parsed.mode = Some(InputMode::Raw),
            "--cbreak" => parsed.mode = Some(InputMode::Cbreak),
            "--noecho" => parsed.noecho = true,
            "--halfdelay" => {
                i += 1;
                let value = args.get(i).ok_or("Missing halfdelay argument")?;
                let tenths = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid halfdelay: {}", value))?;
                parsed.halfdelay = Some(tenths);
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing config path")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

fn init_logging() {
    let log_path = home_dir()
        .map(|h| h.join(".termwin").join("termwin.log"))
        .unwrap_or_else(|| PathBuf::from("termwin.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("TERMWIN_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("termwin starting...");

    let mut config = match &args.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(mode) = args.mode {
        config.input.mode = mode;
    }
    if args.noecho {
        config.input.echo = false;
    }

    let backend = CrosstermBackend::init()?;
    let mut screen = Screen::new(backend, config.input.to_session(), config.scroll.policy());
    if let Some(tenths) = args.halfdelay {
        screen.halfdelay(tenths)?;
    }

    let result = run(&mut screen);
    screen.end().cleanup()?;

    if let Err(e) = &result {
        error!("demo failed: {}", e);
    }
    info!("termwin exiting");
    result
}

/// Main loop: echo area above, status line at the bottom.
fn run(screen: &mut Screen<CrosstermBackend>) -> anyhow::Result<()> {
    let stdscr = screen.stdscr();
    let (rows, cols) = {
        let win = screen.window(stdscr)?;
        (win.height(), win.width())
    };
    if rows < 2 {
        anyhow::bail!("terminal too small");
    }

    // The last row is the status line; everything above it scrolls
    screen.scrollok(stdscr, true)?;
    screen.setscrreg(0, rows - 2)?;
    let status = screen.newwin(1, cols, rows - 1, 0)?;

    screen.addstr("termwin: type something, q quits\n")?;
    show_status(screen, status, "ready")?;

    loop {
        let key = match screen.getch() {
            Ok(key) => key,
            Err(CursesError::NoInput) => {
                show_status(screen, status, "no input")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        // Ctrl+C arrives as 0x03 in raw mode
        if key == KEY_BREAK || key == 0x03 || key == u32::from(b'q') {
            break;
        }

        let text = if is_ordinary(key) {
            format!("key {:#04x}", key)
        } else {
            key_name(key)
        };
        show_status(screen, status, &text)?;
        screen.wrefresh(stdscr)?;
    }

    Ok(())
}

fn show_status(screen: &mut Screen<CrosstermBackend>, status: WindowId, text: &str) -> anyhow::Result<()> {
    screen.wmove(status, 0, 0)?;
    screen.window_mut(status)?.clear_to_eol();
    screen.waddstr(status, text)?;
    screen.wrefresh(status)?;
    Ok(())
}
