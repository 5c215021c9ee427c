use clap::Parser;
use futures_util::future::{self, Either};
use log::{error, info};
use mdns_logger::Logger;
use std::process::ExitCode;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("mdns_logger=info"))
        .init();

    let cli = cli::Cli::parse();
    let (logger, task) = match Logger::with_default_handle(cli.config()) {
        Ok(started) => started,
        Err(err) => {
            error!("startup failed: {}", err);
            return ExitCode::FAILURE;
        }
    };
    info!("startup complete");

    let task = Box::pin(task);
    let ctrl_c = Box::pin(tokio::signal::ctrl_c());
    let result = match future::select(task, ctrl_c).await {
        Either::Left((result, _)) => result,
        Either::Right((signal, task)) => {
            if let Err(err) = signal {
                error!("couldn't wait for ctrl-c: {}", err);
            }
            info!("shutting down");
            logger.shutdown();
            task.await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("receive loop failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
