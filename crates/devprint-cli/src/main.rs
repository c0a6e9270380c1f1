//! devprint CLI - device identity tokens and request payload fingerprints.

use clap::{Parser, Subcommand};
use devprint_identity::{ConfigError, Signer, SigningSecret};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{canonicalize, fingerprint, resolve, sign, verify};

#[derive(Parser)]
#[command(name = "devprint")]
#[command(about = "Device identity signing and request fingerprint CLI")]
struct Cli {
    /// HMAC signing secret for sign, verify and resolve (falls back to DEVPRINT_SECRET)
    #[arg(long, global = true)]
    secret: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical JSON for input
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Compute the fingerprint of input JSON
    Fingerprint {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output fingerprint and hygiene report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign a device id into a cookie token
    Sign {
        /// Device id to sign
        id: String,
    },
    /// Verify a signed token and print its device id
    Verify {
        /// Token in `<id>.<hex-digest>` form
        token: String,
        /// Exit with error code if the token is invalid
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve the identity of a request and show the cookie to set
    Resolve {
        /// Raw `Cookie` request header
        #[arg(long)]
        cookie_header: Option<String>,
        /// Raw `x-device-id` request header
        #[arg(long)]
        device_id: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_signer(secret: Option<String>) -> Result<Signer, ConfigError> {
    match secret {
        Some(value) => Signer::new(&SigningSecret::new(value.into_bytes())?),
        None => Signer::from_env(),
    }
}

fn with_signer<F>(secret: Option<String>, run: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&Signer) -> Result<(), Box<dyn std::error::Error>>,
{
    let signer = load_signer(secret).map_err(|e| {
        tracing::error!(error = %e, "refusing to start without a signing secret");
        e
    })?;
    run(&signer)
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Fingerprint { input, json } => fingerprint::run(input, json),
        Commands::Sign { id } => with_signer(cli.secret, |signer| sign::run(signer, id)),
        Commands::Verify {
            token,
            strict,
            json,
        } => with_signer(cli.secret, |signer| verify::run(signer, token, strict, json)),
        Commands::Resolve {
            cookie_header,
            device_id,
            json,
        } => with_signer(cli.secret, |signer| {
            resolve::run(signer, cookie_header, device_id, json)
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
