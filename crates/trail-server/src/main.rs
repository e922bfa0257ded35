use clap::Parser;
use std::process::ExitCode;
use trail_server::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    trail_server::init_logging();
    let settings = Settings::parse();

    match trail_server::serve(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
