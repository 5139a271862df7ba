use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use passforge::clipboard::{self, Osc52, SystemClipboard, SYSTEM_BACKEND};
use passforge::config::{self, Config};
use passforge::{Error, PasswordGenerator, Result, Sampling};
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Command, GenerateArgs};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "passforge=warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Command::InitConfig { path, force }) => init_config(path, force),
        None => run(&cli.generate),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Prints the user-facing message for `e` and picks the exit status.
fn report(e: &Error) -> ExitCode {
    debug!(error = %e, "run failed");
    eprintln!("Error: {}", user_message(e));
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &Error) -> u8 {
    if e.is_configuration() {
        2
    } else {
        1
    }
}

fn user_message(e: &Error) -> String {
    if e.is_configuration() {
        "select at least one character class".to_string()
    } else {
        e.to_string()
    }
}

fn run(args: &GenerateArgs) -> Result<()> {
    let config = args.merge(config::load_or_default(args.config.as_deref())?);
    let sampling = if args.modulo {
        Sampling::Modulo
    } else {
        Sampling::Rejection
    };
    let mut generator = PasswordGenerator::system().with_sampling(sampling);
    debug!(count = args.count, sampling = ?generator.sampling(), "generating");

    let mut last = String::new();
    for _ in 0..args.count {
        last = generator.generate(&config.options)?;
        println!("{last}");
    }

    if config.copy && !last.is_empty() {
        copy(last, config.clear_after_secs);
    }

    Ok(())
}

/// Copy failures are reported but do not fail the run; the password has
/// already been printed.
fn copy(password: String, clear_after_secs: Option<u64>) {
    let mut system = SystemClipboard::new();
    let mut terminal = Osc52::new(io::stderr());

    let backend = match clipboard::copy_with_fallback(&mut system, &mut terminal, &password) {
        Ok(backend) => backend,
        Err(e) => {
            debug!(error = %e, "copy failed");
            eprintln!("Failed to copy to clipboard");
            return;
        }
    };
    eprintln!("✅ Copied to clipboard ({backend})");
    if let Some(notice) = clear_notice(backend, clear_after_secs) {
        eprintln!("{notice}");
    }

    if backend != SYSTEM_BACKEND {
        return;
    }

    match clear_after_secs {
        Some(secs) => {
            let deadline = Instant::now() + Duration::from_secs(secs);
            if let Err(e) = system.hold(&password, Some(deadline)) {
                warn!(error = %e, "could not hold clipboard");
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if clipboard::clear_after(password, remaining).join().is_err() {
                error!("clipboard clear thread panicked");
            }
        }
        None => {
            if cfg!(target_os = "linux") {
                eprintln!("Keeping the clipboard until another application copies (Ctrl-C to stop)");
            }
            if let Err(e) = system.hold(&password, None) {
                warn!(error = %e, "could not hold clipboard");
            }
        }
    }
}

/// What happens to the copied text once `--clear-after` is considered.
fn clear_notice(backend: &str, clear_after_secs: Option<u64>) -> Option<String> {
    match clear_after_secs {
        Some(_) if backend != SYSTEM_BACKEND => {
            Some("A terminal copy cannot be cleared automatically".to_string())
        }
        Some(secs) => Some(format!("Clipboard will be cleared in {secs}s")),
        None => None,
    }
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(config::default_path);
    if path.exists() && !force {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists, pass --force to replace it", path.display()),
        )));
    }

    config::save(&Config::default(), &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_exits_with_two() {
        let err = Error::InvalidConfiguration("no character class selected".to_string());

        assert_eq!(exit_status(&err), 2);
        assert_eq!(user_message(&err), "select at least one character class");
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let io_err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing.json"));
        assert_eq!(exit_status(&io_err), 1);
        assert!(user_message(&io_err).contains("missing.json"));

        assert_eq!(exit_status(&Error::Random), 1);
        assert_eq!(exit_status(&Error::Clipboard("busy".to_string())), 1);
    }

    #[test]
    fn test_clear_notice() {
        assert_eq!(
            clear_notice(SYSTEM_BACKEND, Some(10)).as_deref(),
            Some("Clipboard will be cleared in 10s")
        );
        assert_eq!(
            clear_notice("osc52", Some(10)).as_deref(),
            Some("A terminal copy cannot be cleared automatically")
        );
        assert_eq!(clear_notice("osc52", None), None);
        assert_eq!(clear_notice(SYSTEM_BACKEND, None), None);
    }

    #[test]
    fn test_init_config_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passforge.json");
        std::fs::write(&path, "keep me").unwrap();

        let result = init_config(Some(path.clone()), false);

        assert!(result.is_err());
        if let Err(err) = result {
            assert!(matches!(&err, Error::Io(e) if e.kind() == io::ErrorKind::AlreadyExists));
            assert_eq!(exit_status(&err), 1);
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_init_config_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passforge.json");
        std::fs::write(&path, "old").unwrap();

        init_config(Some(path.clone()), true).unwrap();

        assert_eq!(config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_config_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.json");

        init_config(Some(path.clone()), false).unwrap();
        assert!(path.exists());
    }
}
