//! Generic configuration trees.
//!
//! Goal configuration arrives as a tree of named nodes, the way a build
//! descriptor reader hands it over. Children keep document order and names may
//! repeat (`sourcePath`, `sourcePath`, ...).

use serde::Serialize;

/// A node in a configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// A text value.
    Value(String),
    /// Named children in document order.
    Tree(Vec<(String, ConfigNode)>),
}

impl ConfigNode {
    /// Create a value node.
    pub fn value(text: impl Into<String>) -> Self {
        ConfigNode::Value(text.into())
    }

    /// Create an empty tree.
    pub fn tree() -> Self {
        ConfigNode::Tree(Vec::new())
    }

    /// Append a named child. Has no effect on value nodes.
    pub fn with_child(mut self, name: impl Into<String>, child: ConfigNode) -> Self {
        if let ConfigNode::Tree(ref mut children) = self {
            children.push((name.into(), child));
        }
        self
    }

    /// Append a list child: a tree of `item_name` values.
    pub fn with_list<I, S>(self, name: impl Into<String>, item_name: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = items.into_iter().fold(ConfigNode::tree(), |list, item| {
            list.with_child(item_name, ConfigNode::value(item))
        });
        self.with_child(name, list)
    }

    /// Get the text of a value node.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            ConfigNode::Value(text) => Some(text),
            ConfigNode::Tree(_) => None,
        }
    }

    /// Get the children of a tree node.
    pub fn children(&self) -> &[(String, ConfigNode)] {
        match self {
            ConfigNode::Tree(children) => children,
            ConfigNode::Value(_) => &[],
        }
    }

    /// Human-readable node kind for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigNode::Value(_) => "value",
            ConfigNode::Tree(_) => "tree",
        }
    }

    /// Convert a TOML value into a configuration tree.
    ///
    /// Tables become trees in document order. Arrays become trees whose items
    /// are named after `key` with one trailing `s` dropped, so
    /// `sourcePaths = ["a", "b"]` reads like `<sourcePaths><sourcePath>a</sourcePath>...`.
    pub fn from_toml(key: &str, value: &toml::Value) -> Self {
        match value {
            toml::Value::String(s) => ConfigNode::Value(s.clone()),
            toml::Value::Integer(i) => ConfigNode::Value(i.to_string()),
            toml::Value::Float(f) => ConfigNode::Value(f.to_string()),
            toml::Value::Boolean(b) => ConfigNode::Value(b.to_string()),
            toml::Value::Datetime(d) => ConfigNode::Value(d.to_string()),
            toml::Value::Array(items) => {
                let item_name = singular(key);
                ConfigNode::Tree(
                    items
                        .iter()
                        .map(|item| (item_name.to_string(), ConfigNode::from_toml(item_name, item)))
                        .collect(),
                )
            }
            toml::Value::Table(table) => ConfigNode::Tree(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), ConfigNode::from_toml(k, v)))
                    .collect(),
            ),
        }
    }
}

fn singular(key: &str) -> &str {
    key.strip_suffix('s').filter(|s| !s.is_empty()).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_keeps_document_order() {
        let table: toml::Table = toml::from_str(
            r#"
            testPaths = ["t"]
            args = "-m app"
            executable = "clj"
            "#,
        )
        .unwrap();
        let node = ConfigNode::from_toml("configuration", &toml::Value::Table(table));

        let names: Vec<&str> = node.children().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["testPaths", "args", "executable"]);
    }

    #[test]
    fn test_from_toml_names_array_items() {
        let value = toml::Value::Array(vec![
            toml::Value::String("src/a".into()),
            toml::Value::String("src/b".into()),
        ]);
        let node = ConfigNode::from_toml("sourcePaths", &value);

        assert_eq!(
            node,
            ConfigNode::tree()
                .with_child("sourcePath", ConfigNode::value("src/a"))
                .with_child("sourcePath", ConfigNode::value("src/b"))
        );
    }

    #[test]
    fn test_from_toml_scalars() {
        assert_eq!(
            ConfigNode::from_toml("x", &toml::Value::Integer(3)),
            ConfigNode::value("3")
        );
        assert_eq!(
            ConfigNode::from_toml("x", &toml::Value::Boolean(true)),
            ConfigNode::value("true")
        );
    }

    #[test]
    fn test_singular() {
        assert_eq!(singular("testPaths"), "testPath");
        assert_eq!(singular("args"), "arg");
        assert_eq!(singular("s"), "s");
        assert_eq!(singular("path"), "path");
    }

    #[test]
    fn test_with_list() {
        let node = ConfigNode::tree().with_list("testPaths", "testPath", ["a", "b"]);
        let (name, list) = &node.children()[0];
        assert_eq!(name, "testPaths");
        assert_eq!(list.children().len(), 2);
        assert_eq!(list.children()[1].1.as_value(), Some("b"));
    }
}
