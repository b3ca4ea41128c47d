//! `nav show` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use nav_config::{CliSettings, Config};
use nav_tree::{LinkArgs, Options};
use nav_view::{ControlKind, JinjaEngine, JsonEngine, Layout, Navigation, TemplateEngine};
use serde_json::Value;

use crate::error::CliError;
use crate::output::Output;

/// Render control selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum View {
    Menu,
    Breadcrumb,
    Panel,
    Sitemap,
    Title,
}

impl From<View> for ControlKind {
    fn from(view: View) -> Self {
        match view {
            View::Menu => Self::Menu,
            View::Breadcrumb => Self::Breadcrumb,
            View::Panel => Self::Panel,
            View::Sitemap => Self::Sitemap,
            View::Title => Self::Title,
        }
    }
}

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Path to configuration file (default: auto-discover navigation.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Navigation tree to render.
    #[arg(short, long)]
    tree: String,

    /// Control to render.
    #[arg(long, value_enum, default_value = "menu")]
    view: View,

    /// Mark items whose link equals this value as current.
    #[arg(long)]
    current: Option<String>,

    /// Render from the item at this `-` separated key instead of the root.
    #[arg(long)]
    root: Option<String>,

    /// Extra control option as KEY=VALUE (VALUE parsed as JSON when possible).
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_option)]
    options: Vec<(String, Value)>,

    /// Directory with Jinja templates; without it the view is printed as JSON.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Template layout directory (overrides config).
    #[arg(long)]
    navigation_dir: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, tree building or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            navigation_dir: self.navigation_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let mut factory = config.items_factory();
        let root = factory.create(&self.tree)?;

        if let Some(current) = &self.current {
            let marked = root.mark_current(&|link: &str, _: &LinkArgs| link == current);
            tracing::info!(tree = %self.tree, link = %current, marked, "Current items marked");
            if marked == 0 {
                output.warning(&format!("No item links to '{current}'"));
            }
        }

        let mut options: Options = self.options.into_iter().collect();
        if let Some(key) = self.root {
            options.insert("root".to_owned(), Value::String(key));
        }

        let layout = Layout::new(config.templates.navigation_dir.as_str());
        let engine: Box<dyn TemplateEngine> = match self.templates {
            Some(dir) => Box::new(JinjaEngine::from_dir(dir)),
            None => Box::new(JsonEngine::pretty()),
        };
        let navigation = Navigation::new(root, &layout, engine.as_ref());

        let rendered = navigation.render(self.view.into(), &options)?;
        output.print(&rendered)?;

        Ok(())
    }
}

/// Parse a `KEY=VALUE` control option.
fn parse_option(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty option name in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}
