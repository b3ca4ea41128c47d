//! Ordered link-to-item mapping returned by [`Item::get_path`].

use std::collections::HashMap;

use crate::Item;

/// Breadcrumb trail keyed by item link.
///
/// Entries keep the order in which their link was first inserted. Inserting a
/// link that is already present replaces the item but keeps the position, so
/// two items sharing a link collapse into one entry holding the later item.
#[derive(Clone, Debug, Default)]
pub struct ItemPath<'a> {
    entries: Vec<(&'a str, &'a Item)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ItemPath<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, link: &'a str, item: &'a Item) {
        if let Some(&i) = self.index.get(link) {
            self.entries[i].1 = item;
        } else {
            self.index.insert(link, self.entries.len());
            self.entries.push((link, item));
        }
    }

    /// Number of distinct links in the trail.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing below the queried item is current or open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item stored under `link`.
    #[must_use]
    pub fn get(&self, link: &str) -> Option<&'a Item> {
        self.index.get(link).map(|&i| self.entries[i].1)
    }

    /// Whether an entry exists for `link`.
    #[must_use]
    pub fn contains_link(&self, link: &str) -> bool {
        self.index.contains_key(link)
    }

    /// First entry (the queried item itself when the trail is non-empty).
    #[must_use]
    pub fn first(&self) -> Option<(&'a str, &'a Item)> {
        self.entries.first().copied()
    }

    /// Last entry (usually the current item).
    #[must_use]
    pub fn last(&self) -> Option<(&'a str, &'a Item)> {
        self.entries.last().copied()
    }

    /// Links in trail order.
    pub fn links(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(link, _)| *link)
    }

    /// Items in trail order.
    pub fn items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.entries.iter().map(|(_, item)| *item)
    }

    /// `(link, item)` pairs in trail order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Item)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position_on_duplicate_link() {
        let a = Item::new("A", "/a");
        let b = Item::new("B", "/b");
        let c = Item::new("C", "/a");

        let mut path = ItemPath::new();
        path.insert(a.link(), &a);
        path.insert(b.link(), &b);
        path.insert(c.link(), &c);

        assert_eq!(path.len(), 2);
        assert_eq!(path.links().collect::<Vec<_>>(), vec!["/a", "/b"]);
        assert_eq!(path.get("/a").map(Item::label), Some("C"));
        assert_eq!(path.last().map(|(_, item)| item.label()), Some("B"));
    }

    #[test]
    fn test_empty_path() {
        let path = ItemPath::new();
        assert!(path.is_empty());
        assert!(path.first().is_none());
        assert!(!path.contains_link("#"));
    }
}
