//! Template engines turning a [`ViewContext`] into output text.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind};

use crate::error::ViewError;
use crate::view::ViewContext;

/// Extension appended to template names when loading from disk.
pub const TEMPLATE_EXTENSION: &str = "html";

/// Renders a named template with a view context.
pub trait TemplateEngine {
    /// Render template `name` (e.g. `default/Menu`) with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] if the template is missing or fails to render.
    fn render(&self, name: &str, context: &ViewContext) -> Result<String, ViewError>;
}

/// Engine that ignores the template name and emits the context as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEngine {
    pretty: bool,
}

impl JsonEngine {
    /// Compact single-line output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output.
    #[must_use]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl TemplateEngine for JsonEngine {
    fn render(&self, _name: &str, context: &ViewContext) -> Result<String, ViewError> {
        let output = if self.pretty {
            serde_json::to_string_pretty(context)?
        } else {
            serde_json::to_string(context)?
        };
        Ok(output)
    }
}

/// Jinja templates loaded from a directory.
///
/// Template `default/Menu` is read from `<base>/default/Menu.html`. Output is
/// HTML-escaped. A `translate` filter is always available; it returns its
/// input unchanged unless replaced with [`JinjaEngine::set_translator`].
#[derive(Debug)]
pub struct JinjaEngine {
    env: Environment<'static>,
}

impl JinjaEngine {
    /// Engine without any templates; add them with [`JinjaEngine::add_template`].
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_filter("translate", |text: String| text);
        Self { env }
    }

    /// Replace the `translate` filter used for labels in templates.
    pub fn set_translator<F>(&mut self, translate: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.env.add_filter("translate", move |text: String| translate(&text));
    }

    /// Engine loading templates lazily from `base`.
    #[must_use]
    pub fn from_dir(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let mut engine = Self::new();
        engine.env.set_loader(move |name| load_template(&base, name));
        engine
    }

    /// Register template `name` from a source string.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Template`] if the source does not compile.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), ViewError> {
        self.env
            .add_template_owned(name.to_owned(), source.to_owned())
            .map_err(|e| template_error(name, &e))
    }
}

impl Default for JinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaEngine {
    fn render(&self, name: &str, context: &ViewContext) -> Result<String, ViewError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| template_error(name, &e))?;
        template.render(context).map_err(|e| template_error(name, &e))
    }
}

fn load_template(base: &Path, name: &str) -> Result<Option<String>, minijinja::Error> {
    if name.split('/').any(|segment| segment == "..") {
        return Ok(None);
    }
    let path = base.join(format!("{name}.{TEMPLATE_EXTENSION}"));
    match std::fs::read_to_string(&path) {
        Ok(source) => {
            tracing::debug!(path = %path.display(), "Template loaded");
            Ok(Some(source))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read {}", path.display()),
        )
        .with_source(e)),
    }
}

fn template_error(name: &str, error: &minijinja::Error) -> ViewError {
    ViewError::Template {
        name: name.to_owned(),
        message: error.to_string(),
    }
}
