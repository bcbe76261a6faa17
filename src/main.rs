use clap::CommandFactory;
use log::LevelFilter;
use optipix::{Cli, ImageProcessor};
use std::process;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    env_logger::Builder::new()
        .filter_level(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    log::debug!("Command line options: {:?}", cli);

    let Some(config) = cli.to_config() else {
        println!("No input filename provided, quitting.");
        eprint!("{}", Cli::command().render_help());
        process::exit(1);
    };

    let outcome = ImageProcessor::new(config).process()?;

    for line in outcome.notices.lines() {
        println!("{}", line);
    }
    println!("{}", outcome.report);

    Ok(())
}
