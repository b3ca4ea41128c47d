//! Marking items current against the active request.
//!
//! The host framework knows how to compare an item link with the request
//! being served. It exposes that through [`LinkMatcher`], and
//! [`Item::mark_current`] applies it to every routable item of a tree.

use crate::item::{Item, LinkArgs};

/// Host-side check whether a link targets the request being served.
pub trait LinkMatcher {
    /// Returns `true` if `link` with `args` is the current request target.
    fn is_link_current(&self, link: &str, args: &LinkArgs) -> bool;
}

impl<F> LinkMatcher for F
where
    F: Fn(&str, &LinkArgs) -> bool,
{
    fn is_link_current(&self, link: &str, args: &LinkArgs) -> bool {
        self(link, args)
    }
}

impl Item {
    /// Set the `current` flag of every descendant from `matcher`.
    ///
    /// The item itself is left untouched. Descendants whose link is a URL,
    /// absolute path or fragment (see [`Item::is_url`]) are skipped and keep
    /// their previous flag. Returns the number of items marked current.
    pub fn mark_current(&mut self, matcher: &dyn LinkMatcher) -> usize {
        let mut marked = 0;
        for child in self.children_mut() {
            if !child.is_url() {
                let current = matcher.is_link_current(child.link(), child.link_args());
                if current {
                    tracing::trace!(link = child.link(), "Item marked current");
                    marked += 1;
                }
                child.set_current(current);
            }
            marked += child.mark_current(matcher);
        }
        marked
    }

    /// Reset the `current` flag on this item and its whole subtree.
    pub fn clear_current(&mut self) {
        self.set_current(false);
        for child in self.children_mut() {
            child.clear_current();
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn admin_tree() -> Item {
        let mut root = Item::new("Admin", "Admin:default");
        root.add_item("dashboard", "Dashboard", "Dashboard:default").unwrap();
        let users = root.add_item("users", "Users", "User:default").unwrap();
        let mut args = LinkArgs::new();
        args.insert("id".to_owned(), json!(5));
        users
            .add_item("edit", "Edit user", "User:edit")
            .unwrap()
            .set_link_args(args);
        root.add_item("docs", "Docs", "https://docs.example.com").unwrap();
        root.add_item("anchor", "Anchor", "#top").unwrap();
        root
    }

    #[test]
    fn test_mark_current_with_closure() {
        let mut root = admin_tree();
        let marked = root.mark_current(&|link: &str, args: &LinkArgs| {
            link == "User:edit" && args.get("id") == Some(&json!(5))
        });

        assert_eq!(marked, 1);
        assert!(root.resolve("users-edit").unwrap().is_current());
        assert!(root.get_item("users").unwrap().is_open());
        assert!(!root.is_current());
        assert!(root.is_open());
    }

    #[test]
    fn test_mark_current_skips_url_items() {
        let mut root = admin_tree();
        root.get_item_mut("docs").unwrap().set_current(true);

        let marked = root.mark_current(&|_: &str, _: &LinkArgs| true);

        // docs and anchor are URLs and keep whatever they had
        assert!(root.get_item("docs").unwrap().is_current());
        assert!(!root.get_item("anchor").unwrap().is_current());
        assert_eq!(marked, 3);
        assert!(!root.is_current());
    }

    #[test]
    fn test_mark_current_resets_previous_request() {
        let mut root = admin_tree();
        root.mark_current(&|link: &str, _: &LinkArgs| link == "Dashboard:default");
        assert!(root.get_item("dashboard").unwrap().is_current());

        root.mark_current(&|link: &str, _: &LinkArgs| link == "User:default");
        assert!(!root.get_item("dashboard").unwrap().is_current());
        assert!(root.get_item("users").unwrap().is_current());
    }

    struct PrefixMatcher(&'static str);

    impl LinkMatcher for PrefixMatcher {
        fn is_link_current(&self, link: &str, _args: &LinkArgs) -> bool {
            link.starts_with(self.0)
        }
    }

    #[test]
    fn test_mark_current_with_trait_object() {
        let mut root = admin_tree();
        assert_eq!(root.mark_current(&PrefixMatcher("User:")), 2);
        assert_eq!(root.get_current_item().map(Item::label), Some("Users"));
    }

    #[test]
    fn test_clear_current() {
        let mut root = admin_tree();
        root.set_current(true);
        root.resolve_mut("users-edit").unwrap().set_current(true);

        root.clear_current();

        assert!(root.get_current_item().is_none());
        assert!(!root.is_open());
    }
}
