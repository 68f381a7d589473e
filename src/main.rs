use anyhow::Result;
use clap::Parser;
use prodmix::{CLIArguments, Command, init_tracing, show_config_main, solve_main, sweep_main};

fn main() -> Result<()> {
    let args = CLIArguments::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Solve(args) => solve_main(args),
        Command::Sweep(args) => sweep_main(args),
        Command::ShowConfig(args) => show_config_main(args),
    }
}
