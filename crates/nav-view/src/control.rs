//! Render controls and their option defaults.

use std::fmt;
use std::str::FromStr;

use nav_tree::{Item, NON_NAVIGABLE_LINK, NavigationError, Options};
use serde_json::{Value, json};

use crate::view::{ItemView, ViewContext};

/// The render controls available for a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Nested menu of the root's children.
    Menu,
    /// Trail from the root down to the current item.
    Breadcrumb,
    /// Flat list of reachable, non-current items.
    Panel,
    /// Full nested listing of the root's children.
    Sitemap,
    /// Label of the current item.
    Title,
}

impl ControlKind {
    /// All controls in a stable order.
    pub const ALL: [Self; 5] = [
        Self::Menu,
        Self::Breadcrumb,
        Self::Panel,
        Self::Sitemap,
        Self::Title,
    ];

    /// Name used in template paths.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Breadcrumb => "Breadcrumb",
            Self::Panel => "Panel",
            Self::Sitemap => "Sitemap",
            Self::Title => "Title",
        }
    }

    /// Default options of the control.
    #[must_use]
    pub fn default_options(self) -> Options {
        let value = match self {
            Self::Menu => json!({
                "root": null,
                "class": "nav",
                "subclass": "nav",
                "activeClass": "active",
                "openClass": "open",
                "dropdownClass": "dropdown dropdown-fw",
                "open": false,
                "deep": true,
                "ajax": false,
            }),
            Self::Breadcrumb | Self::Title => json!({ "root": null }),
            Self::Panel => json!({ "root": null, "ajax": false }),
            Self::Sitemap => json!({
                "root": null,
                "class": "nav",
                "subclass": "nav",
                "ajax": false,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Options::new(),
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown control '{s}'"))
    }
}

/// Template layout: the directory holding one template per control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    navigation_dir: String,
}

impl Layout {
    #[must_use]
    pub fn new(navigation_dir: impl Into<String>) -> Self {
        Self {
            navigation_dir: navigation_dir.into(),
        }
    }

    #[must_use]
    pub fn navigation_dir(&self) -> &str {
        &self.navigation_dir
    }

    /// Template name for `kind`, e.g. `default/Menu`.
    #[must_use]
    pub fn template_name(&self, kind: ControlKind) -> String {
        format!("{}/{}", self.navigation_dir, kind.name())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Control defaults with `overrides` applied key by key.
#[must_use]
pub fn merge_options(kind: ControlKind, overrides: &Options) -> Options {
    let mut options = kind.default_options();
    for (key, value) in overrides {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Item selected by the `root` option: `tree` itself when unset, otherwise
/// the descendant addressed by a `-` separated key.
///
/// # Errors
///
/// Returns [`NavigationError::NotFound`] if the key does not resolve and
/// [`NavigationError::TypeMismatch`] if `root` is not a string.
pub fn select_root<'a>(tree: &'a Item, options: &Options) -> Result<&'a Item, NavigationError> {
    match options.get("root") {
        None | Some(Value::Null) => Ok(tree),
        Some(Value::String(key)) if key.is_empty() => Ok(tree),
        Some(Value::String(key)) => tree.resolve(key),
        Some(other) => Err(NavigationError::TypeMismatch {
            field: "root".to_owned(),
            expected: "a string",
            found: match other {
                Value::Bool(_) => "boolean",
                Value::Number(_) => "number",
                Value::Array(_) => "list",
                _ => "mapping",
            },
        }),
    }
}

/// Build the template context of control `kind` over `tree`.
///
/// # Errors
///
/// Returns an error if the `root` option cannot be resolved.
pub fn build_context(
    kind: ControlKind,
    tree: &Item,
    overrides: &Options,
) -> Result<ViewContext, NavigationError> {
    let options = merge_options(kind, overrides);
    let root = select_root(tree, &options)?;

    let (items, item) = match kind {
        ControlKind::Menu | ControlKind::Sitemap => (
            root.get_items(false).into_iter().map(ItemView::tree).collect(),
            None,
        ),
        ControlKind::Breadcrumb => (root.get_path().items().map(ItemView::shallow).collect(), None),
        ControlKind::Panel => {
            let mut items = Vec::new();
            collect_panel_items(root, &mut items);
            (items, None)
        }
        ControlKind::Title => (Vec::new(), root.get_current_item().map(ItemView::shallow)),
    };

    tracing::trace!(control = kind.name(), items = items.len(), "View context built");

    Ok(ViewContext {
        control: kind.name(),
        options,
        root: ItemView::shallow(root),
        items,
        item,
    })
}

/// Grouping items (link `#`) are replaced by their children; other items are
/// listed when active and not current.
fn collect_panel_items(parent: &Item, out: &mut Vec<ItemView>) {
    for item in parent.get_items(false) {
        if item.link() == NON_NAVIGABLE_LINK {
            collect_panel_items(item, out);
        } else if !item.is_current() && item.is_active() {
            out.push(ItemView::tree(item));
        }
    }
}
