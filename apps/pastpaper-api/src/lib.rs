pub mod rate_limit;
pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tokio::net::TcpListener;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = pastpaper_cli::VERSION,
	rename_all = "kebab",
	styles = pastpaper_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = pastpaper_config::load(&args.config)?;

	pastpaper_cli::init_tracing(&config.service.log_level);

	if config.drive.access_token.is_none() {
		tracing::warn!("drive.access_token is not set. Remote requests will be rejected.");
	}

	let http_addr: SocketAddr = config.service.http_bind.parse()?;
	let state = AppState::new(config)?;
	let app = routes::router(state);
	let http_listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	axum::serve(http_listener, app).await?;

	Ok(())
}
