mod app;
mod availability;
mod catalog;
mod category;
mod cli;
mod config;
mod gametime;
mod sorting;
mod state;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    cli::run()
}
