//! Serve command - run the HTTP API.

use clap::Args;

use super::config::load_config;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Host to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Disable the audit log file
    #[arg(long)]
    no_audit: bool,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.no_audit {
        config.audit.enabled = false;
    }

    eprintln!("Serving on http://{}", config.server.bind_addr());
    intake_server::start_server(config).await?;
    Ok(())
}
