use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = tome_worker::Args::parse();
	tome_worker::run(args).await
}
