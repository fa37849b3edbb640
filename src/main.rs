use accuracy_pool::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use accuracy_pool::adapter::inbound::cli::output::{self, OutputConfig};
use accuracy_pool::adapter::inbound::cli::{
    allocate, config as config_cmd, distribution, explain, markets, settle,
};
use accuracy_pool::error::{Error, Result};
use accuracy_pool::infrastructure::config::settings::Config;
use clap::Parser;
use tracing::debug;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = run(&cli) {
        report(e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // `config` subcommands must work on missing or broken files.
    let config = match (&cli.command, Config::load_or_default(&cli.config)) {
        (_, Ok(config)) => config,
        (Commands::Config(_), Err(_)) => Config::default(),
        (_, Err(e)) => return Err(e),
    };
    config
        .logging
        .clone()
        .with_verbosity(output::is_quiet(), output::verbosity())
        .init();
    debug!(path = %cli.config.display(), "configuration loaded");

    match &cli.command {
        Commands::Allocate(args) => allocate::execute(&config, args),
        Commands::Settle(args) => settle::execute(&config, args),
        Commands::Markets(args) => markets::execute(&config, args),
        Commands::Distribution(args) => distribution::execute(args),
        Commands::Explain => explain::execute(),
        Commands::Config(ConfigCommand::Init(args)) => config_cmd::init(&cli.config, args.force),
        Commands::Config(ConfigCommand::Show) => config_cmd::show(&cli.config),
        Commands::Config(ConfigCommand::Validate) => config_cmd::validate(&cli.config),
    }
}

fn report(error: Error) {
    match error {
        Error::Input(diagnostic) if !output::is_json() => {
            eprintln!("{:?}", miette::Report::new(*diagnostic));
        }
        other => output::error(&other.to_string()),
    }
}
