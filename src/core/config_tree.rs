//! Generic representation of untyped plugin configuration blocks.
//!
//! Plugin `<configuration>` sections have no fixed schema, so they are kept as
//! an ordered tree of text, repeated-element lists and nested maps. Consumers
//! read it through the small path helpers below instead of mapping it onto
//! concrete types.
//!
//! ```
//! use deploy_descriptor::core::ConfigNode;
//!
//! let xml = "<configuration><to><image>acme/api</image><tags><tag>1.0</tag><tag>latest</tag></tags></to></configuration>";
//! let doc = roxmltree::Document::parse(xml).unwrap();
//! let config = ConfigNode::from_element(doc.root_element());
//!
//! assert_eq!(config.text_at("to/image").as_deref(), Some("acme/api"));
//! assert_eq!(config.texts_at("to/tags/tag"), vec!["1.0", "latest"]);
//! ```

use serde_json::{Map, Value};

use crate::constants::plugin_inventory::{MASKED_VALUE, SENSITIVE_KEY_FRAGMENTS};

/// Ordered key to node entries of a configuration element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    attributes: Vec<(String, String)>,
    entries: Vec<(String, ConfigNode)>,
    text: Option<String>,
}

impl ConfigMap {
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Text(String),
    List(Vec<ConfigNode>),
    Map(ConfigMap),
}

impl ConfigNode {
    /// Convert an XML element into a configuration node.
    ///
    /// Leaf elements without attributes become [`ConfigNode::Text`], sibling
    /// elements sharing a name collapse into a [`ConfigNode::List`]. A leaf
    /// carrying attributes becomes a [`ConfigNode::Map`] that keeps its text.
    pub fn from_element(node: roxmltree::Node<'_, '_>) -> Self {
        let attributes: Vec<(String, String)> = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        let children: Vec<_> = node.children().filter(|child| child.is_element()).collect();
        if children.is_empty() {
            let text = node.text().map(str::trim).unwrap_or_default().to_string();
            if attributes.is_empty() {
                return ConfigNode::Text(text);
            }
            return ConfigNode::Map(ConfigMap {
                attributes,
                entries: Vec::new(),
                text: (!text.is_empty()).then_some(text),
            });
        }

        let mut grouped: Vec<(String, Vec<ConfigNode>)> = Vec::new();
        for child in children {
            let name = child.tag_name().name().to_string();
            let value = ConfigNode::from_element(child);
            match grouped.iter_mut().find(|(key, _)| *key == name) {
                Some((_, values)) => values.push(value),
                None => grouped.push((name, vec![value])),
            }
        }

        let entries = grouped
            .into_iter()
            .map(|(name, mut values)| {
                let node = if values.len() == 1 {
                    values.remove(0)
                } else {
                    ConfigNode::List(values)
                };
                (name, node)
            })
            .collect();

        ConfigNode::Map(ConfigMap {
            attributes,
            entries,
            text: None,
        })
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigNode::Map(map) => Some(map),
            ConfigNode::List(items) => items.first().and_then(ConfigNode::as_map),
            ConfigNode::Text(_) => None,
        }
    }

    /// Non-empty text of a leaf node.
    pub fn text(&self) -> Option<&str> {
        match self {
            ConfigNode::Text(text) if !text.is_empty() => Some(text),
            ConfigNode::Map(map) => map.text.as_deref(),
            ConfigNode::List(items) => items.first().and_then(ConfigNode::text),
            ConfigNode::Text(_) => None,
        }
    }

    /// All nodes this node stands for: the list items, or the node itself.
    pub fn items(&self) -> Vec<&ConfigNode> {
        match self {
            ConfigNode::List(items) => items.iter().collect(),
            other => vec![other],
        }
    }

    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.as_map().and_then(|map| map.get(name))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.as_map().and_then(|map| map.attribute(name))
    }

    /// Follow a `/` separated path, taking the first item of repeated elements.
    pub fn at(&self, path: &str) -> Option<&ConfigNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub fn text_at(&self, path: &str) -> Option<String> {
        self.at(path).and_then(ConfigNode::text).map(str::to_string)
    }

    /// Texts of every element matched by the last path segment.
    pub fn texts_at(&self, path: &str) -> Vec<String> {
        self.nodes_at(path)
            .into_iter()
            .filter_map(ConfigNode::text)
            .map(str::to_string)
            .collect()
    }

    /// Every element matched by the last path segment.
    pub fn nodes_at(&self, path: &str) -> Vec<&ConfigNode> {
        let (parent, leaf) = match path.rsplit_once('/') {
            Some((parent, leaf)) => (self.at(parent), leaf),
            None => (Some(self), path),
        };

        parent
            .and_then(|node| node.child(leaf))
            .map(ConfigNode::items)
            .unwrap_or_default()
    }

    /// Render as JSON, optionally replacing values under sensitive keys.
    ///
    /// Attributes are not part of the rendered value.
    pub fn to_sanitized_json(&self, mask_sensitive: bool) -> Value {
        match self {
            ConfigNode::Text(text) => Value::String(text.clone()),
            ConfigNode::List(items) => Value::Array(
                items
                    .iter()
                    .map(|item| item.to_sanitized_json(mask_sensitive))
                    .collect(),
            ),
            ConfigNode::Map(map) if map.is_empty() => {
                Value::String(map.text.clone().unwrap_or_default())
            }
            ConfigNode::Map(map) => {
                let mut object = Map::new();
                for (key, node) in map.entries() {
                    let value = if mask_sensitive && is_sensitive_key(key) {
                        Value::String(MASKED_VALUE.to_string())
                    } else {
                        node.to_sanitized_json(mask_sensitive)
                    };
                    object.insert(key.to_string(), value);
                }
                Value::Object(object)
            }
        }
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_lowercase();
    SENSITIVE_KEY_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
}
