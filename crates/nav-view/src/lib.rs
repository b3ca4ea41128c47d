//! View models and template rendering for navigation trees.
//!
//! A tree is rendered through one of five controls ([`ControlKind`]): menu,
//! breadcrumb, panel, sitemap and title. Each control turns the tree into a
//! [`ViewContext`] and hands it to a [`TemplateEngine`] under the template
//! name `"{navigation_dir}/{Control}"`.
//!
//! # Example
//!
//! ```
//! use nav_tree::{Item, Options};
//! use nav_view::{JsonEngine, Layout, Navigation};
//!
//! let mut root = Item::new("Root", "#");
//! root.add_item("home", "Home", "Home:default").unwrap();
//!
//! let layout = Layout::default();
//! let engine = JsonEngine::new();
//! let navigation = Navigation::new(&root, &layout, &engine);
//! let json = navigation.render_menu(&Options::new()).unwrap();
//! assert!(json.contains("\"label\":\"Home\""));
//! ```

mod control;
mod engine;
mod error;
mod navigation;
mod view;

pub use control::{ControlKind, Layout, build_context, merge_options, select_root};
pub use engine::{JinjaEngine, JsonEngine, TEMPLATE_EXTENSION, TemplateEngine};
pub use error::ViewError;
pub use navigation::Navigation;
pub use view::{ItemView, ViewContext};
