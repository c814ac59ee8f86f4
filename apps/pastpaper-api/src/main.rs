use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = pastpaper_api::Args::parse();
	pastpaper_api::run(args).await
}
