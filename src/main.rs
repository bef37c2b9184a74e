//! # qrforge CLI
//!
//! Command-line interface for the QR code generator.
//!
//! ## Usage
//!
//! ```bash
//! # Start the web server on the default port
//! qrforge serve
//!
//! # Production mode (enables HSTS) on a custom address
//! qrforge serve --listen 127.0.0.1:8080 --environment production
//!
//! # Render a single QR code to a PNG file
//! qrforge render "example.com" --size l --color "#6c63ff" -o example.png
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use qrforge::{
    QrForgeError,
    generate::{GenerationRequest, Normalization, generate},
    server::{self, Environment, ServerConfig, state::DEFAULT_MAX_BODY_BYTES},
};

/// qrforge - QR code generator
#[derive(Parser, Debug)]
#[command(name = "qrforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (defaults to 0.0.0.0:$PORT)
        #[arg(long, env = "LISTEN_ADDR")]
        listen: Option<String>,

        /// Port used when --listen is not given
        #[arg(long, env = "PORT", default_value = "5000")]
        port: u16,

        /// Deployment environment (development or production)
        #[arg(long, env = "APP_ENV", default_value = "development")]
        environment: Environment,

        /// Maximum request body size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_BODY_BYTES)]
        max_body_bytes: usize,
    },

    /// Render a QR code to a PNG file
    Render {
        /// Text to encode
        data: String,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "qr.png")]
        output: PathBuf,

        /// Size profile id (xs, s, m, l, xl)
        #[arg(long, default_value = "m")]
        size: String,

        /// Foreground color (#RRGGBB or #RGB)
        #[arg(long, default_value = "#000000")]
        color: String,

        /// Error-correction level (L, M, Q, H)
        #[arg(long, default_value = "M")]
        error_correction: String,

        /// Encode the text verbatim, without mailto:/tel:/https:// detection
        #[arg(long)]
        raw: bool,
    },
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli.command).await {
        tracing::error!(error = %e, "qrforge failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), QrForgeError> {
    match command {
        Commands::Serve {
            listen,
            port,
            environment,
            max_body_bytes,
        } => {
            let config = ServerConfig {
                listen_addr: listen.unwrap_or_else(|| format!("0.0.0.0:{}", port)),
                environment,
                max_body_bytes,
            };
            server::serve(config).await
        }
        Commands::Render {
            data,
            output,
            size,
            color,
            error_correction,
            raw,
        } => {
            let request = GenerationRequest::new(data)
                .size(size)
                .color(color)
                .error_correction(error_correction);
            let normalization = if raw {
                Normalization::Skip
            } else {
                Normalization::Apply
            };

            let result = generate(&request, normalization)?;
            if let Some(warning) = &result.warning {
                eprintln!("{}", warning);
            }
            std::fs::write(&output, &result.png)?;

            println!(
                "Saved {} ({}x{} px, version {}, {}) to {}",
                result.encoded_data,
                result.size_px,
                result.size_px,
                result.version,
                result.error_correction.display_name(),
                output.display()
            );
            Ok(())
        }
    }
}
