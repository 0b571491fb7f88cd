use std::path::PathBuf;

use bauplan_core::{File, WriteResult};
use clap::Args;
use eyre::{Context, Result};

use crate::reports::{InitReport, Report, TerminalOutput};

const STARTER: &str = r#"[source]
# Qualified-name prefix bounding builder discovery
prefix = "{prefix}"
# Type universe dumped by the introspection adapter
universe = "universe.json"
# docs = "docs.json"

[target]
# Package for generated DSL code (defaults to "<source.prefix>.dsl")
# prefix = "{prefix}.dsl"
output = "generated"

[filter]
exclude_type_prefixes = ["Default"]
exclude_type_suffixes = ["Impl"]

[model]
# Extra method names kept out of attributes (build, copy, applyMutation
# and sdkFields are always excluded)
excluded_methods = []

# Display-name aliases for types whose simple names collide
[type_names]
"#;

#[derive(Args)]
pub struct InitCommand {
    /// Directory to create bauplan.toml in
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Qualified-name prefix of the model packages
    #[arg(short, long, default_value = "com.example.model")]
    pub prefix: String,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.dir.join("bauplan.toml");
        let result = File::if_missing(&path, starter(&self.prefix))
            .write()
            .wrap_err("Failed to write bauplan.toml")?;

        let report = InitReport {
            path,
            created: result == WriteResult::Written,
        };
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}

fn starter(prefix: &str) -> String {
    STARTER.replace("{prefix}", prefix)
}
