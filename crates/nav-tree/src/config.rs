//! Declarative tree definitions.
//!
//! [`NavigationConfig`] maps tree names to [`NodeConfig`] definitions. Each
//! node is a mapping with optional `label`, `link`, `linkArgs`, `icon`,
//! `active`, `value`, `items`, `resource`, `privilege` and `options` keys;
//! missing or `null` keys take the defaults of [`NodeConfig::default`].
//! `items` maps child names to nested nodes, in document order. A list of
//! nodes is accepted too and named by position (`"0"`, `"1"`, ...).

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::item::{DEFAULT_PRIVILEGE, LinkArgs, Options};

/// Label used when a node does not define one.
pub const DEFAULT_LABEL: &str = "None";

/// Named node definitions in document order.
///
/// Inserting a name that is already present replaces the node in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeMap {
    nodes: Vec<(String, NodeConfig)>,
}

impl NodeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the node stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, node: NodeConfig) {
        let name = name.into();
        match self.nodes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.nodes.push((name, node)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NodeConfig> {
        self.nodes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, node)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeConfig)> {
        self.nodes.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Mutable `(name, node)` pairs in document order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut NodeConfig)> {
        self.nodes.iter_mut().map(|(name, node)| (name.as_str(), node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl IntoIterator for NodeMap {
    type Item = (String, NodeConfig);
    type IntoIter = std::vec::IntoIter<(String, NodeConfig)>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'de> Deserialize<'de> for NodeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeMapVisitor)
    }
}

struct NodeMapVisitor;

impl<'de> Visitor<'de> for NodeMapVisitor {
    type Value = NodeMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping or list of item definitions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut nodes = NodeMap::new();
        while let Some((name, node)) = access.next_entry::<String, NodeConfig>()? {
            nodes.insert(name, node);
        }
        Ok(nodes)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut nodes = NodeMap::new();
        while let Some(node) = access.next_element::<NodeConfig>()? {
            nodes.insert(nodes.len().to_string(), node);
        }
        Ok(nodes)
    }
}

/// One node definition merged over the defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    #[serde(deserialize_with = "deserialize_label")]
    pub label: String,
    /// `None` (or empty) means a grouping node with link `#`.
    pub link: Option<String>,
    #[serde(
        rename = "linkArgs",
        alias = "link_args",
        deserialize_with = "deserialize_map_or_list"
    )]
    pub link_args: LinkArgs,
    pub icon: Option<String>,
    #[serde(deserialize_with = "deserialize_active")]
    pub active: bool,
    pub value: Value,
    /// Child definitions in document order.
    #[serde(deserialize_with = "deserialize_items")]
    pub items: NodeMap,
    pub resource: Option<String>,
    #[serde(deserialize_with = "deserialize_privilege")]
    pub privilege: String,
    #[serde(deserialize_with = "deserialize_map_or_list")]
    pub options: Options,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_owned(),
            link: None,
            link_args: LinkArgs::new(),
            icon: None,
            active: true,
            value: Value::Null,
            items: NodeMap::new(),
            resource: None,
            privilege: DEFAULT_PRIVILEGE.to_owned(),
            options: Options::new(),
        }
    }
}

/// Navigation tree definitions keyed by tree name, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationConfig {
    trees: NodeMap,
}

impl NavigationConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize a mapping of tree name to node definition.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not a mapping or a node is malformed.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Add or replace a tree definition.
    pub fn insert(&mut self, name: impl Into<String>, node: NodeConfig) {
        self.trees.insert(name, node);
    }

    /// Definition of tree `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NodeConfig> {
        self.trees.get(name)
    }

    /// Whether a tree named `name` is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.trees.contains(name)
    }

    /// Tree names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.names()
    }

    /// `(name, definition)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeConfig)> {
        self.trees.iter()
    }

    /// Mutable definitions, for loaders that post-process values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut NodeConfig)> {
        self.trees.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl<'de> Deserialize<'de> for NavigationConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreesVisitor;

        impl<'de> Visitor<'de> for TreesVisitor {
            type Value = NodeMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of tree names to item definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
                NodeMapVisitor.visit_map(access)
            }
        }

        let trees = deserializer.deserialize_map(TreesVisitor)?;
        Ok(Self { trees })
    }
}

/// Label given as a string, number or boolean; `null` means the default.
fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LabelVisitor;

    impl Visitor<'_> for LabelVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(DEFAULT_LABEL.to_owned())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(DEFAULT_LABEL.to_owned())
        }
    }

    deserializer.deserialize_any(LabelVisitor)
}

fn deserialize_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn deserialize_privilege<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_PRIVILEGE.to_owned()))
}

/// Mapping field; a list is accepted and keyed by position.
fn deserialize_map_or_list<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(Value::Array(list)) => Ok(list
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect()),
        Some(other) => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a mapping or list",
        )),
    }
}

/// Child definitions; a scalar is ignored with a warning.
fn deserialize_items<'de, D>(deserializer: D) -> Result<NodeMap, D::Error>
where
    D: Deserializer<'de>,
{
    struct ItemsVisitor;

    impl ItemsVisitor {
        fn ignore<E: de::Error>(found: &str) -> Result<NodeMap, E> {
            tracing::warn!(found, "Ignoring items that are not a mapping or list");
            Ok(NodeMap::new())
        }
    }

    impl<'de> Visitor<'de> for ItemsVisitor {
        type Value = NodeMap;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            NodeMapVisitor.expecting(formatter)
        }

        fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
            NodeMapVisitor.visit_map(access)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
            NodeMapVisitor.visit_seq(access)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(NodeMap::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(NodeMap::new())
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Self::ignore("string")
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Self::ignore("boolean")
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Self::ignore("number")
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Self::ignore("number")
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Self::ignore("number")
        }
    }

    deserializer.deserialize_any(ItemsVisitor)
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
