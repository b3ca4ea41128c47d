//! `nav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use nav_config::Config;
use nav_tree::ItemsFactory;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover navigation.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of building one tree.
#[derive(Debug, PartialEq)]
pub(crate) struct TreeReport {
    pub name: String,
    pub result: Result<usize, String>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or any tree
    /// fails to build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        if let Some(path) = &config.config_path {
            output.highlight(&format!("Checking {}", path.display()));
        }
        output.info(&format!("Templates: {}", config.templates.navigation_dir));

        let mut factory = config.items_factory();
        let reports = check_trees(&mut factory);

        let mut failed = 0;
        for report in &reports {
            match &report.result {
                Ok(count) => output.success(&format!("{}: {count} items", report.name)),
                Err(message) => {
                    failed += 1;
                    output.error(&format!("{}: {message}", report.name));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} navigation trees failed to build",
                reports.len()
            )));
        }
        Ok(())
    }
}

/// Build every configured tree and count its items.
pub(crate) fn check_trees(factory: &mut ItemsFactory) -> Vec<TreeReport> {
    let names: Vec<String> = factory.tree_names().map(str::to_owned).collect();
    names
        .into_iter()
        .map(|name| {
            let result = factory
                .create(&name)
                .map(|root| root.get_items(true).len())
                .map_err(|e| e.to_string());
            TreeReport { name, result }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use nav_tree::NavigationConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_check_trees_counts_items() {
        let config = NavigationConfig::from_value(json!({
            "main": {
                "label": "Main",
                "items": {
                    "a": {"label": "A", "items": {"b": {"label": "B"}}},
                    "c": {"label": "C"}
                }
            },
            "broken": {
                "items": {"bad name": {"label": "X"}}
            }
        }))
        .unwrap();
        let mut factory = ItemsFactory::new(config);

        let reports = check_trees(&mut factory);
        assert_eq!(reports.len(), 2);
        assert_eq!(
            reports[0],
            TreeReport {
                name: "main".to_owned(),
                result: Ok(3),
            }
        );
        assert_eq!(reports[1].name, "broken");
        assert!(reports[1].result.as_ref().unwrap_err().contains("bad name"));
    }
}
