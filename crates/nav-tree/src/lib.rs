//! Navigation item tree for web applications.
//!
//! This crate provides:
//! - [`Item`]: a node of an ordered, named navigation tree with queries for
//!   current, open, dropdown and breadcrumb state
//! - [`NavigationConfig`]: tree definitions, deserialized with serde
//! - [`ItemsFactory`]: builds and caches item trees from a [`NavigationConfig`]
//! - [`LinkMatcher`]: the seam through which the host marks items current
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use nav_tree::{ItemsFactory, LinkArgs, NavigationConfig};
//! use serde_json::json;
//!
//! let config = NavigationConfig::from_value(json!({
//!     "nav": {
//!         "label": "Root",
//!         "items": {
//!             "home": {"label": "Home", "link": "Homepage:default"},
//!             "about": {
//!                 "label": "About",
//!                 "link": "About:default",
//!                 "items": {"team": {"label": "Team", "link": "About:team"}}
//!             }
//!         }
//!     }
//! }))?;
//!
//! let mut factory = ItemsFactory::new(config);
//! let root = factory.create("nav")?;
//! root.mark_current(&|link: &str, _: &LinkArgs| link == "About:team");
//!
//! assert!(root.get_item("about")?.is_open());
//! let trail: Vec<_> = root.get_path().items().map(|item| item.label()).collect();
//! assert_eq!(trail, ["Root", "About", "Team"]);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod factory;
mod item;
mod matcher;
mod path;

pub use error::{NavigationError, NotFoundKind};
pub use config::{DEFAULT_LABEL, NavigationConfig, NodeConfig, NodeMap};
pub use factory::{ItemsFactory, ItemsProvider};
pub use item::{
    ComputedValue, DEFAULT_PRIVILEGE, Item, ItemValue, LinkArgs, NON_NAVIGABLE_LINK,
    Options, PATH_SEPARATOR, validate_name,
};
pub use matcher::LinkMatcher;
pub use path::ItemPath;
