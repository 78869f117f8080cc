//! mailgate - send a message only when there is something to send
//!
//! Main entry point for the mailgate CLI.

use clap::{Parser, Subcommand};
use mailgate::config::{validate_config, validate_config_result, MailGateConfig};
use mailgate::mail::{Address, EmailConfig, EmailSender};
use mailgate::MailGateError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

/// mailgate - refuse empty messages, deliver the rest
#[derive(Parser, Debug)]
#[command(name = "mailgate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/mailgate/config.yaml)
    #[arg(short, long, env = "MAILGATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a configuration file with default email settings
    Init {
        /// Sender address
        #[arg(long)]
        from: Option<Address>,

        /// Recipient address (repeatable)
        #[arg(long)]
        to: Vec<Address>,

        /// Subject line
        #[arg(short, long)]
        subject: Option<String>,
    },

    /// Render an email for MESSAGE to stdout, unless MESSAGE is empty
    Send {
        /// Sender address (default: from config)
        #[arg(long)]
        from: Option<Address>,

        /// Recipient address, repeatable (default: from config)
        #[arg(long)]
        to: Vec<Address>,

        /// Subject line (default: from config)
        #[arg(short, long)]
        subject: Option<String>,

        /// Message body
        message: String,
    },

    /// Validate the configuration file
    Check,
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(MailGateConfig::default_path);

    // The config supplies the log filter, so it is read before the subscriber
    // exists and its own load logs are dropped. Report the outcome once logging is up.
    let loaded = MailGateConfig::load(&config_path);

    let filter = loaded
        .as_ref()
        .map(|c| c.log_filter.as_str())
        .unwrap_or(mailgate::logging::DEFAULT_FILTER);
    if let Err(e) = mailgate::logging::init_with_default(filter) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match &loaded {
        Ok(config) => tracing::info!(
            path = %config_path.display(),
            has_email = config.email.is_some(),
            "Loaded mailgate configuration"
        ),
        Err(e) => tracing::debug!(
            path = %config_path.display(),
            error = %e,
            "No usable configuration"
        ),
    }

    match run(cli.command, &config_path, loaded) {
        Ok(()) => {}
        Err(MailGateError::Gate(e)) => {
            eprintln!("Couldn't send the message: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(
    command: Commands,
    config_path: &Path,
    loaded: mailgate::Result<MailGateConfig>,
) -> mailgate::Result<()> {
    match command {
        Commands::Init { from, to, subject } => handle_init(config_path, from, to, subject),

        Commands::Send {
            from,
            to,
            subject,
            message,
        } => {
            let config = match loaded {
                Ok(config) => config,
                Err(MailGateError::ConfigNotFound(_)) => MailGateConfig::new(),
                Err(e) => return Err(e),
            };
            let email = resolve_email(config.email, from, to, subject)?;
            handle_send(email, &message, io::stdout())
        }

        Commands::Check => handle_check(config_path, loaded?),
    }
}

fn handle_init(
    config_path: &Path,
    from: Option<Address>,
    to: Vec<Address>,
    subject: Option<String>,
) -> mailgate::Result<()> {
    if config_path.exists() {
        println!("Configuration already exists at {}", config_path.display());
        return Ok(());
    }

    let config = build_init_config(from, to, subject)?;
    config.save(config_path)?;

    println!("✓ Created configuration at {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  mailgate send \"your message\"");

    Ok(())
}

/// Build the config `init` writes, refusing anything `check` would reject
fn build_init_config(
    from: Option<Address>,
    to: Vec<Address>,
    subject: Option<String>,
) -> mailgate::Result<MailGateConfig> {
    let config = match from {
        Some(from) if !to.is_empty() => {
            MailGateConfig::with_email(EmailConfig::new(from, to, subject.unwrap_or_default())?)
        }
        None if to.is_empty() => MailGateConfig::new(),
        _ => {
            return Err(MailGateError::Config(
                "--from and --to must be given together".to_string(),
            ))
        }
    };

    validate_config_result(&config)?;
    Ok(config)
}

/// Merge command line overrides with configured defaults
fn resolve_email(
    configured: Option<EmailConfig>,
    from: Option<Address>,
    to: Vec<Address>,
    subject: Option<String>,
) -> mailgate::Result<EmailConfig> {
    let from = from
        .or_else(|| configured.as_ref().map(|c| c.from.clone()))
        .ok_or_else(|| {
            MailGateError::Config(
                "No sender address. Pass --from or run 'mailgate init --from <addr> --to <addr>'"
                    .to_string(),
            )
        })?;

    let to = if to.is_empty() {
        configured.as_ref().map(|c| c.to.clone()).unwrap_or_default()
    } else {
        to
    };

    let subject = subject
        .or_else(|| configured.map(|c| c.subject))
        .unwrap_or_default();

    Ok(EmailConfig::new(from, to, subject)?)
}

fn handle_send<W: Write + Send>(
    email: EmailConfig,
    message: &str,
    sink: W,
) -> mailgate::Result<()> {
    let sender = EmailSender::new(email, sink);

    match sender.send(message) {
        Ok(()) => Ok(()),
        // Nothing was attempted; not a failure for the caller
        Err(e) if e.is_empty_message() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn handle_check(config_path: &Path, config: MailGateConfig) -> mailgate::Result<()> {
    match validate_config(&config) {
        Ok(()) => {
            println!("✓ Configuration at {} is valid", config_path.display());
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                println!("✗ {}", error);
            }
            Err(MailGateError::Config(format!(
                "{} problem(s) in {}",
                errors.len(),
                config_path.display()
            )))
        }
    }
}
