use clap::Parser;

use analyst_chat::analyst::{AnalystClient, AnalystError};
use analyst_chat::chat::ChatSession;
use analyst_chat::config::{Cli, Command};
use analyst_chat::render::Printer;
use analyst_chat::repl;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Analyst(#[from] AnalystError),
    #[error(transparent)]
    Repl(#[from] repl::ReplError),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .init();

    let client = AnalystClient::new(&cli.api_url)?;
    tracing::info!(url = %client.url(), "analyst client ready");

    let mut session = ChatSession::new();
    let mut printer = Printer::new(std::io::stdout(), cli.render_options());

    match cli.command() {
        Command::Chat => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            repl::run(&client, &mut session, &mut printer, stdin).await?;
            Ok(())
        }
        Command::Ask { question } => {
            repl::ask_once(&client, &mut session, &mut printer, &question.join(" ")).await?;
            Ok(())
        }
    }
}
