mod completions;
mod generate;
mod services;

use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use services::ServicesCommand;

/// Extension trait for exiting on pipeline errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for clientgen_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                let stage = e.stage();
                let report = miette::Report::new(*e).wrap_err(format!("{} stage failed", stage));
                eprintln!("{:?}", report);
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "generate-clients")]
#[command(version)]
#[command(about = "Generate server/client code from a service's protobuf files")]
#[command(
    after_help = "Example: generate-clients -l ruby -s catalog -o ./namara-ruby/lib/rpc/catalog"
)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateCommand,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Some(Commands::Services(cmd)) => cmd.run(),
            Some(Commands::Completions(cmd)) => cmd.run(),
            None => self.generate.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List services and the protobuf definitions they expose
    Services(ServicesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
