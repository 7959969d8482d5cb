//! Pipeline stages.

use std::fmt;

/// A step of one generation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Checks the request against the language and service tables.
    Validate,
    /// Allocates or tears down the temporary workspace.
    Workspace,
    /// Clones the service source tree into the workspace.
    Fetch,
    /// Stages the interface definition under its canonical name.
    Extract,
    /// Runs the schema compiler over the staged definition.
    Generate,
    /// Copies generated files to the output directory.
    Collect,
}

impl Stage {
    /// The stage name used in logs and plugin hooks.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Workspace => "workspace",
            Stage::Fetch => "fetch",
            Stage::Extract => "extract",
            Stage::Generate => "generate",
            Stage::Collect => "collect",
        }
    }

    /// A human-readable description of what this stage does.
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Validate => "Check language and service support",
            Stage::Workspace => "Create the temporary workspace",
            Stage::Fetch => "Clone the service repository",
            Stage::Extract => "Stage the protobuf definition",
            Stage::Generate => "Run the schema compiler",
            Stage::Collect => "Copy generated files to the output directory",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
