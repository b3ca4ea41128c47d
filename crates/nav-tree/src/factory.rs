//! Building item trees from declarative configuration.
//!
//! [`ItemsFactory`] builds a tree the first time it is requested and keeps it,
//! so later calls return the very same root and `current` flags set during a
//! request stay visible to every consumer of that factory.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::config::{NavigationConfig, NodeConfig, NodeMap};
use crate::error::NavigationError;
use crate::item::Item;

/// Source of navigation trees by name.
///
/// Hosts depend on this trait rather than on [`ItemsFactory`] so the factory
/// can be swapped for another implementation.
pub trait ItemsProvider {
    /// Root item of the tree registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] for an unknown tree, or the first
    /// error met while building it.
    fn create(&mut self, name: &str) -> Result<&mut Item, NavigationError>;
}

/// Builds and caches item trees from a [`NavigationConfig`].
///
/// The cache is owned by the factory instance. A host that shares one
/// factory between concurrent requests must serialize the marking of
/// current items itself; the usual setup is one factory per request or
/// per worker.
#[derive(Debug, Default)]
pub struct ItemsFactory {
    config: NavigationConfig,
    trees: HashMap<String, Item>,
}

impl ItemsFactory {
    /// Create a factory over `config`. Nothing is built until requested.
    #[must_use]
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            trees: HashMap::new(),
        }
    }

    /// Configuration this factory builds from.
    #[must_use]
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Root item of tree `name`, building it on first use.
    ///
    /// Repeated calls return the same instance. A tree is cached only once
    /// it was built completely, so a failed build is retried from scratch on
    /// the next call.
    ///
    /// # Errors
    ///
    /// - [`NavigationError::NotFound`] if `name` is not configured
    /// - [`NavigationError::InvalidName`] if an item name anywhere in the tree is invalid
    pub fn create(&mut self, name: &str) -> Result<&mut Item, NavigationError> {
        match self.trees.entry(name.to_owned()) {
            Entry::Occupied(entry) => {
                tracing::debug!(navigation = name, "Navigation served from cache");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let node = self
                    .config
                    .get(name)
                    .ok_or_else(|| NavigationError::navigation_not_found(name))?;
                let root = build_tree(node)?;
                tracing::debug!(
                    navigation = name,
                    item_count = root.get_items(true).len(),
                    "Navigation built"
                );
                Ok(entry.insert(root))
            }
        }
    }

    /// Already built tree, without building it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.trees.get(name)
    }

    /// Whether tree `name` has been built and cached.
    #[must_use]
    pub fn is_built(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    /// Configured tree names in document order.
    pub fn tree_names(&self) -> impl Iterator<Item = &str> {
        self.config.names()
    }

    /// Drop the cached tree `name`. Returns `true` if one was cached.
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.trees.remove(name).is_some()
    }

    /// Drop every cached tree.
    pub fn clear(&mut self) {
        self.trees.clear();
    }
}

impl ItemsProvider for ItemsFactory {
    fn create(&mut self, name: &str) -> Result<&mut Item, NavigationError> {
        ItemsFactory::create(self, name)
    }
}

/// Build a root item and its subtree.
///
/// The root only takes the constructor fields; `linkArgs`, `active`, `value`
/// and `options` apply to child nodes.
fn build_tree(node: &NodeConfig) -> Result<Item, NavigationError> {
    let mut root = Item::new(node.label.clone(), node.link.clone().unwrap_or_default())
        .with_privilege(node.privilege.clone());
    root.set_icon(node.icon.clone());
    root.set_resource(node.resource.clone());
    add_items(&mut root, &node.items)?;
    Ok(root)
}

fn add_items(parent: &mut Item, items: &NodeMap) -> Result<(), NavigationError> {
    for (name, node) in items.iter() {
        let item = parent.add_item(
            name,
            node.label.clone(),
            node.link.clone().unwrap_or_default(),
        )?;
        item.set_icon(node.icon.clone());
        item.set_resource(node.resource.clone());
        item.set_privilege(node.privilege.clone());
        item.set_link_args(node.link_args.clone());
        item.set_active(node.active);
        item.set_value(node.value.clone());
        item.set_options(node.options.clone());
        add_items(item, &node.items)?;
    }
    Ok(())
}
