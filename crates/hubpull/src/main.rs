use clap::Parser;

use crate::cli::App;

mod cli;
mod config;
mod env;
mod logging;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    logging::init(app.verbose);
    app.run().await
}
