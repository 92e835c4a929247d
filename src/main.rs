mod batch;
mod config;

use crate::batch::Batch;
use crate::config::argh::{Args, Subcommands};
use crate::config::Config;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Args = argh::from_env();

    if args.version {
        println!("v{}", VERSION);
        std::process::exit(0);
    }

    let command = args.nested.unwrap_or_else(|| {
        println!("No args given");
        std::process::exit(0);
    });

    let config = Config::discover(args.file.as_deref())
        .and_then(|filename| Config::parse(&filename))
        .unwrap_or_else(|error| {
            eprintln!("{}", error);
            std::process::exit(1);
        });

    let result = match command {
        Subcommands::Run(run) => (Batch {}).run(config, run.workers).map(|succeeded| {
            if !succeeded {
                std::process::exit(1);
            }
        }),
        Subcommands::List(_) => (Batch {}).list(config),
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
