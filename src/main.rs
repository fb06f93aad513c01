use log::error;

use polymath::cli;
use polymath::error::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    main_fallible().await.map_err(|error| {
        error!("{error}");

        error
    })
}

async fn main_fallible() -> Result<(), Error> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            return Err(Error::Dotenv(error.to_string()));
        }
    }
    pretty_env_logger::init();

    cli::run().await
}
