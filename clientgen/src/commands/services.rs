use clap::Args;
use eyre::{Context, Result};

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ServicesCommand {
    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

impl ServicesCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::services();

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .wrap_err("Failed to serialize service table")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
