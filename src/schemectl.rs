use colorscheme::config::{self, STORAGE_KEY};
use colorscheme::{ColorScheme, FileBackend, PreferenceStore};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::env;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Get,
    Set(ColorScheme),
    Toggle,
}

struct Config {
    command: Command,
    store_path: Option<PathBuf>,
    no_backend: bool,
    show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            command: Command::Get,
            store_path: None,
            no_backend: false,
            show_help: false,
        }
    }
}

/// Parses `args`, where `args[0]` is the program name.
fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "get" => {
                config.command = Command::Get;
            }
            "toggle" => {
                config.command = Command::Toggle;
            }
            "set" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("set requires a value (light or dark)");
                }
                let scheme = args[i].parse::<ColorScheme>()?;
                config.command = Command::Set(scheme);
            }
            "-store" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-store requires a file path argument");
                }
                config.store_path = Some(PathBuf::from(&args[i]));
            }
            "-no-backend" => {
                config.no_backend = true;
            }
            "-h" | "-help" | "--help" => {
                config.show_help = true;
            }
            _ => {
                eprintln!("Warning: Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Color scheme preference tool");
    println!("Usage: schemectl [OPTIONS] [get | toggle | set <light|dark>]");
    println!();
    println!("COMMANDS:");
    println!("  get                    Print the current scheme (default)");
    println!("  toggle                 Flip the scheme and persist it");
    println!("  set <light|dark>       Set the scheme and persist it");
    println!();
    println!("OPTIONS:");
    println!("  -store <FILE>          Preference file (default: ${} or the user config dir)", config::STORE_PATH_ENV);
    println!("  -no-backend            Run without persistence; nothing is read or written");
    println!("  -h, -help, --help      Show this help message");
}

/// A store plus a handle on its file backend, if it has one.
fn open_store(config: &Config) -> Result<(PreferenceStore, Option<Rc<RefCell<FileBackend>>>)> {
    if config.no_backend {
        return Ok((PreferenceStore::detached(), None));
    }

    let path = config.store_path.clone()
        .or_else(config::default_store_path)
        .context("no config directory available; pass -store <FILE> or -no-backend")?;
    log::debug!("using preference file {}", path.display());

    let backend = Rc::new(RefCell::new(FileBackend::open(path)));
    let store = PreferenceStore::with_backend(Box::new(Rc::clone(&backend)));
    Ok((store, Some(backend)))
}

/// Runs the command and returns the resulting scheme.
///
/// Changes must reach the preference file; a failed write is an error.
fn run(config: &Config) -> Result<ColorScheme> {
    let (store, backend) = open_store(config)?;

    match config.command {
        Command::Get => return Ok(store.get()),
        Command::Toggle => {
            // toggle writes the new value under STORAGE_KEY itself
            store.toggle();
        }
        Command::Set(scheme) => {
            store.set(scheme);
            store.persist();
        }
    }

    match backend {
        Some(backend) => {
            let backend = backend.borrow();
            backend
                .try_save()
                .with_context(|| format!("failed to save {}", backend.path().display()))?;
        }
        None => log::warn!("'{}' was not persisted (no backend)", STORAGE_KEY),
    }

    Ok(store.get())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args)?;
    if config.show_help {
        print_help();
        return Ok(());
    }

    let scheme = run(&config)?;
    println!("{scheme}");

    Ok(())
}
