use clap::Parser;
use hrms_rs::cli::{self, Cli, CommandOutcome};
use hrms_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (settings, environment) = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    match cli::execute_command(&cli, settings.clone()).await? {
        CommandOutcome::StartServer => Server::new(settings, environment).run().await,
        CommandOutcome::Done => Ok(()),
    }
}
