use std::process;

use clap::Parser;
use exchange_rates_cli::{Cli, Error, RateResponse, fetch, request};
use log::error;

fn main() {
    env_logger::init();
    let args = Cli::parse();

    if let Err(err) = run(&args) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), Error> {
    let request = request::build(
        &args.command,
        args.base.as_deref(),
        args.start,
        args.end,
        args.currency.as_deref(),
    )?;
    let raw = fetch(&request.url)?;
    let response = RateResponse::parse(request.command, &raw)?;
    print!("{response}");
    Ok(())
}
