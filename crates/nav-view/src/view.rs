//! Serializable snapshots of items handed to templates.

use nav_tree::{Item, LinkArgs, Options};
use serde::Serialize;
use serde_json::Value;

/// Render data for one item.
///
/// Computed state (`open`, `dropdown`, `url`) and the item value are
/// evaluated when the view is taken, so templates never call back into
/// the tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub label: String,
    pub link: String,
    #[serde(skip_serializing_if = "LinkArgs::is_empty")]
    pub link_args: LinkArgs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub active: bool,
    pub current: bool,
    pub open: bool,
    pub dropdown: bool,
    pub url: bool,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub value: Value,
    #[serde(skip_serializing_if = "Options::is_empty")]
    pub options: Options,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ItemView>,
}

impl ItemView {
    /// Snapshot of `item` including its whole subtree.
    #[must_use]
    pub fn tree(item: &Item) -> Self {
        let mut view = Self::shallow(item);
        view.children = item.get_items(false).into_iter().map(Self::tree).collect();
        view
    }

    /// Snapshot of `item` without children.
    #[must_use]
    pub fn shallow(item: &Item) -> Self {
        Self {
            name: item.name().map(str::to_owned),
            label: item.label().to_owned(),
            link: item.link().to_owned(),
            link_args: item.link_args().clone(),
            icon: item.icon().map(str::to_owned),
            active: item.is_active(),
            current: item.is_current(),
            open: item.is_open(),
            dropdown: item.is_dropdown(),
            url: item.is_url(),
            value: item.get_value(),
            options: item.options().clone(),
            children: Vec::new(),
        }
    }
}

/// Everything a control template receives.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewContext {
    /// Control name, e.g. `Menu`.
    pub control: &'static str,
    /// Effective options: control defaults overridden by caller options.
    pub options: Options,
    /// The item the control was rendered from (after `root` resolution).
    pub root: ItemView,
    /// Items listed by the control. Empty for the title control.
    pub items: Vec<ItemView>,
    /// Single item shown by the title control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemView>,
}
