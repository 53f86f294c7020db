pub mod cli;
pub mod client;
pub mod crop;
pub mod model;
pub mod runtime;
pub mod workflow;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
