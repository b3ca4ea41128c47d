//! Navigation item tree.
//!
//! An [`Item`] owns its children exclusively. Children are kept in insertion
//! order in a `Vec` with a name index on the side, so lookups by name are O(1)
//! and iteration order is stable. There are no parent pointers; every derived
//! state (open, dropdown, path) is computed by walking down from the queried
//! item.
//!
//! Compound keys address nested items with `-` as separator: `"about-team"`
//! resolves `about`, then `team` below it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::NavigationError;
use crate::path::ItemPath;

/// Link of grouping items that do not navigate anywhere.
pub const NON_NAVIGABLE_LINK: &str = "#";

/// Privilege assigned when none is given.
pub const DEFAULT_PRIVILEGE: &str = "default";

/// Separator between names in a compound key.
pub const PATH_SEPARATOR: char = '-';

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Extra parameters for link resolution.
pub type LinkArgs = Map<String, Value>;

/// Free-form per-item flags for render collaborators.
pub type Options = Map<String, Value>;

/// Function computing an item value on read.
pub type ComputedValue = Arc<dyn Fn(&Item) -> Value + Send + Sync>;

/// Item value: either stored as-is or computed from the item on every read.
#[derive(Clone)]
pub enum ItemValue {
    /// Plain value returned unchanged.
    Literal(Value),
    /// Function invoked with the owning item.
    Computed(ComputedValue),
}

impl ItemValue {
    /// Wrap a closure as a computed value.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Item) -> Value + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }
}

impl Default for ItemValue {
    fn default() -> Self {
        Self::Literal(Value::Null)
    }
}

impl From<Value> for ItemValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Debug for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Check that `name` can be used as an item name.
///
/// The whole name must consist of ASCII letters, digits and underscores.
/// Names containing `-` are rejected because they could not be reached
/// through a compound key.
pub fn validate_name(name: &str) -> Result<(), NavigationError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(NavigationError::InvalidName(name.to_owned()))
    }
}

/// Node of a navigation tree.
#[derive(Clone, Debug)]
pub struct Item {
    name: Option<String>,
    label: String,
    link: String,
    link_args: LinkArgs,
    icon: Option<String>,
    resource: Option<String>,
    privilege: String,
    value: ItemValue,
    active: bool,
    current: bool,
    children: Vec<Item>,
    index: HashMap<String, usize>,
    options: Options,
}

impl Item {
    /// Create a detached item.
    ///
    /// An empty `link` becomes [`NON_NAVIGABLE_LINK`].
    #[must_use]
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            name: None,
            label: label.into(),
            link: if link.is_empty() {
                NON_NAVIGABLE_LINK.to_owned()
            } else {
                link
            },
            link_args: LinkArgs::new(),
            icon: None,
            resource: None,
            privilege: DEFAULT_PRIVILEGE.to_owned(),
            value: ItemValue::default(),
            active: true,
            current: false,
            children: Vec::new(),
            index: HashMap::new(),
            options: Options::new(),
        }
    }

    /// Set the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the authorization resource.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the authorization privilege.
    #[must_use]
    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privilege = privilege.into();
        self
    }

    /// Create a child item and insert it under `name`.
    ///
    /// An existing child with the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidName`] if `name` is not a valid item name.
    pub fn add_item(
        &mut self,
        name: &str,
        label: impl Into<String>,
        link: impl Into<String>,
    ) -> Result<&mut Item, NavigationError> {
        self.set_item(name, Item::new(label, link))
    }

    /// Insert an already built item as a child under `name`.
    ///
    /// The item's name is set to `name`. An existing child with the same name
    /// is replaced in place and keeps its position among siblings.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidName`] if `name` is not a valid item name.
    pub fn set_item(&mut self, name: &str, mut item: Item) -> Result<&mut Item, NavigationError> {
        validate_name(name)?;
        item.name = Some(name.to_owned());

        let idx = if let Some(&idx) = self.index.get(name) {
            self.children[idx] = item;
            idx
        } else {
            let idx = self.children.len();
            self.children.push(item);
            self.index.insert(name.to_owned(), idx);
            idx
        };
        Ok(&mut self.children[idx])
    }

    /// Detach and return the child named `name`.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let idx = self.index.remove(name)?;
        let removed = self.children.remove(idx);
        for pos in self.index.values_mut() {
            if *pos > idx {
                *pos -= 1;
            }
        }
        Some(removed)
    }

    /// Whether a direct child named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Direct child by name.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] if there is no such child.
    pub fn get_item(&self, name: &str) -> Result<&Item, NavigationError> {
        self.index
            .get(name)
            .map(|&i| &self.children[i])
            .ok_or_else(|| NavigationError::item_not_found(name))
    }

    /// Mutable direct child by name.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] if there is no such child.
    pub fn get_item_mut(&mut self, name: &str) -> Result<&mut Item, NavigationError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.children[i]),
            None => Err(NavigationError::item_not_found(name)),
        }
    }

    /// Follow a chain of child names.
    ///
    /// An empty chain returns `self`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] for the first missing segment.
    pub fn get_by_path<S: AsRef<str>>(&self, segments: &[S]) -> Result<&Item, NavigationError> {
        segments
            .iter()
            .try_fold(self, |item, segment| item.get_item(segment.as_ref()))
    }

    /// Mutable variant of [`Item::get_by_path`].
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] for the first missing segment.
    pub fn get_by_path_mut<S: AsRef<str>>(
        &mut self,
        segments: &[S],
    ) -> Result<&mut Item, NavigationError> {
        segments
            .iter()
            .try_fold(self, |item, segment| item.get_item_mut(segment.as_ref()))
    }

    /// Look up a compound key such as `"about-team"`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] for the first missing segment.
    pub fn resolve(&self, key: &str) -> Result<&Item, NavigationError> {
        let segments: Vec<&str> = key.split(PATH_SEPARATOR).collect();
        self.get_by_path(&segments)
    }

    /// Mutable variant of [`Item::resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] for the first missing segment.
    pub fn resolve_mut(&mut self, key: &str) -> Result<&mut Item, NavigationError> {
        let segments: Vec<&str> = key.split(PATH_SEPARATOR).collect();
        self.get_by_path_mut(&segments)
    }

    /// Children in insertion order, or the whole subtree in pre-order when
    /// `deep` is set. The item itself is never included.
    #[must_use]
    pub fn get_items(&self, deep: bool) -> Vec<&Item> {
        if !deep {
            return self.children.iter().collect();
        }
        let mut items = Vec::new();
        self.collect_descendants(&mut items);
        items
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Item>) {
        for child in &self.children {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    /// Direct children with the `active` flag set.
    #[must_use]
    pub fn get_items_active(&self) -> Vec<&Item> {
        self.children.iter().filter(|item| item.active).collect()
    }

    /// This item if current, else the first current item in pre-order.
    #[must_use]
    pub fn get_current_item(&self) -> Option<&Item> {
        if self.current {
            return Some(self);
        }
        self.children.iter().find_map(Item::get_current_item)
    }

    /// Whether this item or anything below it is current.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current
            || self
                .children
                .iter()
                .any(|item| item.current || item.is_open())
    }

    /// Whether at least one direct child is active.
    #[must_use]
    pub fn is_dropdown(&self) -> bool {
        self.children.iter().any(|item| item.active)
    }

    /// Whether the link is an external URL, an absolute path or a fragment
    /// rather than an application route.
    #[must_use]
    pub fn is_url(&self) -> bool {
        is_absolute_url(&self.link) || is_absolute_path(&self.link) || self.link.starts_with('#')
    }

    /// Trail from this item down to the current item.
    ///
    /// Collects, in pre-order, every descendant that is current or open. When
    /// anything was collected, this item is put first. Entries are keyed by
    /// link, so items sharing a link collapse into one entry.
    #[must_use]
    pub fn get_path(&self) -> ItemPath<'_> {
        let mut found = ItemPath::new();
        for item in self.get_items(true) {
            if item.current || item.is_open() {
                found.insert(&item.link, item);
            }
        }
        if found.is_empty() {
            return found;
        }

        let mut path = ItemPath::new();
        path.insert(&self.link, self);
        for (link, item) in found.iter() {
            if link != self.link {
                path.insert(link, item);
            }
        }
        path
    }

    /// Stored value, or the result of the value function called with `self`.
    #[must_use]
    pub fn get_value(&self) -> Value {
        match &self.value {
            ItemValue::Literal(value) => value.clone(),
            ItemValue::Computed(f) => f(self),
        }
    }

    /// Option value by key.
    #[must_use]
    pub fn get_option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Option value by key, falling back to `default`.
    #[must_use]
    pub fn get_option_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.options.get(name).unwrap_or(default)
    }

    /// Set a single option.
    pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Name assigned by the parent; `None` for a root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    #[must_use]
    pub fn link_args(&self) -> &LinkArgs {
        &self.link_args
    }

    pub fn set_link_args(&mut self, link_args: LinkArgs) {
        self.link_args = link_args;
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn set_resource(&mut self, resource: Option<String>) {
        self.resource = resource;
    }

    #[must_use]
    pub fn privilege(&self) -> &str {
        &self.privilege
    }

    pub fn set_privilege(&mut self, privilege: impl Into<String>) {
        self.privilege = privilege.into();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current
    }

    pub fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    #[must_use]
    pub fn value(&self) -> &ItemValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<ItemValue>) {
        self.value = value.into();
    }

    /// Mutable children in insertion order.
    pub(crate) fn children_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.children.iter_mut()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn is_absolute_url(link: &str) -> bool {
    url::Url::parse(link)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
}

/// `/` followed by something other than a second `/`.
fn is_absolute_path(link: &str) -> bool {
    link.strip_prefix('/')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c != '/')
}
