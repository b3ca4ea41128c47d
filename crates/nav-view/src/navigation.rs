//! Render entry point grouping all controls of one tree.

use nav_tree::{Item, Options};

use crate::control::{ControlKind, Layout, build_context};
use crate::engine::TemplateEngine;
use crate::error::ViewError;

/// Renders the controls of a tree with a layout and engine.
pub struct Navigation<'a> {
    root: &'a Item,
    layout: &'a Layout,
    engine: &'a dyn TemplateEngine,
}

impl<'a> Navigation<'a> {
    #[must_use]
    pub fn new(root: &'a Item, layout: &'a Layout, engine: &'a dyn TemplateEngine) -> Self {
        Self {
            root,
            layout,
            engine,
        }
    }

    /// Tree root the controls render from.
    #[must_use]
    pub fn root(&self) -> &'a Item {
        self.root
    }

    /// Render control `kind` with caller `options` over its defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Navigation`] if the `root` option does not resolve,
    /// or an engine error.
    pub fn render(&self, kind: ControlKind, options: &Options) -> Result<String, ViewError> {
        let context = build_context(kind, self.root, options)?;
        let template = self.layout.template_name(kind);
        tracing::debug!(template = %template, "Rendering navigation control");
        self.engine.render(&template, &context)
    }

    pub fn render_menu(&self, options: &Options) -> Result<String, ViewError> {
        self.render(ControlKind::Menu, options)
    }

    pub fn render_breadcrumb(&self, options: &Options) -> Result<String, ViewError> {
        self.render(ControlKind::Breadcrumb, options)
    }

    pub fn render_panel(&self, options: &Options) -> Result<String, ViewError> {
        self.render(ControlKind::Panel, options)
    }

    pub fn render_sitemap(&self, options: &Options) -> Result<String, ViewError> {
        self.render(ControlKind::Sitemap, options)
    }

    pub fn render_title(&self, options: &Options) -> Result<String, ViewError> {
        self.render(ControlKind::Title, options)
    }
}
