// Utterance CLI Entry Point

use utterance_cli::router::CommandRouter;

#[tokio::main]
async fn main() {
    if let Err(e) = CommandRouter::route().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
