//! # Structure Tree
//!
//! An owned, labeled projection of a document's component hierarchy. Every
//! document, page, row, column and leaf exports one [`Structure`] node; the
//! result never refers back into the live tree, so it stays valid after the
//! document is dropped.
//!
//! Structures are the regression-testing surface: serialize one to JSON, keep
//! it as a golden file, and compare later exports against it with
//! [`Structure::diff`].
//!
//! ```
//! use folio::structure::Structure;
//!
//! let tree = Structure::new("row")
//!     .with_value("20")
//!     .with_child(Structure::new("col").with_value("12"));
//!
//! let json = tree.to_json_pretty().unwrap();
//! assert_eq!(Structure::from_json(&json).unwrap(), tree);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FolioError;
use crate::props::Details;

/// A node of the structure tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Structure {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Details::is_empty")]
    pub details: Details,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Structure>,
}

impl Structure {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Structure) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Structure>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: Structure) {
        self.children.push(child);
    }

    /// Pre-order depth-first traversal yielding `(depth, node)`.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![(0, self)],
        }
    }

    /// First node of the given type, in pre-order.
    pub fn find(&self, kind: &str) -> Option<&Structure> {
        self.iter().map(|(_, node)| node).find(|node| node.kind == kind)
    }

    /// Number of nodes of the given type, this node included.
    pub fn count(&self, kind: &str) -> usize {
        self.iter().filter(|(_, node)| node.kind == kind).count()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, FolioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Structure, FolioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every difference between `self` (actual) and `expected`.
    ///
    /// Paths name each node by type and sibling index, e.g.
    /// `document/row[1]/col[0]`.
    pub fn diff(&self, expected: &Structure) -> Vec<StructureDiff> {
        let mut diffs = Vec::new();
        diff_node(self, expected, self.kind.clone(), &mut diffs);
        diffs
    }
}

fn diff_node(actual: &Structure, expected: &Structure, path: String, out: &mut Vec<StructureDiff>) {
    if actual.kind != expected.kind {
        out.push(StructureDiff::new(&path, "type", &expected.kind, &actual.kind));
        return;
    }
    if actual.value != expected.value {
        out.push(StructureDiff::new(
            &path,
            "value",
            &quoted(&expected.value),
            &quoted(&actual.value),
        ));
    }

    let keys = actual.details.keys().chain(expected.details.keys());
    let mut seen = std::collections::BTreeSet::new();
    for key in keys {
        if !seen.insert(key) {
            continue;
        }
        let a = actual.details.get(key);
        let e = expected.details.get(key);
        if a != e {
            out.push(StructureDiff::new(
                &path,
                &format!("details.{key}"),
                &describe(e),
                &describe(a),
            ));
        }
    }

    if actual.children.len() != expected.children.len() {
        out.push(StructureDiff::new(
            &path,
            "children",
            &expected.children.len().to_string(),
            &actual.children.len().to_string(),
        ));
    }
    for (index, (a, e)) in actual.children.iter().zip(&expected.children).enumerate() {
        diff_node(a, e, format!("{path}/{}[{index}]", e.kind), out);
    }
}

fn quoted(value: &str) -> String {
    Value::from(value).to_string()
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "<missing>".into(),
    }
}

/// One mismatch found by [`Structure::diff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureDiff {
    pub path: String,
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl StructureDiff {
    fn new(path: &str, field: &str, expected: &str, actual: &str) -> Self {
        Self {
            path: path.into(),
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for StructureDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: expected {}, got {}",
            self.path, self.field, self.expected, self.actual
        )
    }
}

/// Pre-order iterator over a structure tree.
pub struct Iter<'a> {
    stack: Vec<(usize, &'a Structure)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a Structure);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

impl fmt::Display for Structure {
    /// Indented outline, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, node) in self.iter() {
            write!(f, "{:indent$}{}", "", node.kind, indent = depth * 2)?;
            if !node.value.is_empty() {
                write!(f, " {:?}", node.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Structure {
        Structure::new("document")
            .with_child(
                Structure::new("row")
                    .with_value(20)
                    .with_child(Structure::new("col").with_value(6).with_child(Structure::new("text").with_value("A")))
                    .with_child(Structure::new("col").with_value(6).with_child(Structure::new("text").with_value("B"))),
            )
            .with_child(Structure::new("row").with_value(10))
    }

    #[test]
    fn test_preorder_iteration() {
        let kinds: Vec<_> = sample()
            .iter()
            .map(|(depth, node)| format!("{}{}", depth, node.kind))
            .collect();
        assert_eq!(
            kinds,
            vec!["0document", "1row", "2col", "3text", "2col", "3text", "1row"]
        );
    }

    #[test]
    fn test_find_and_count() {
        let tree = sample();
        assert_eq!(tree.count("col"), 2);
        assert_eq!(tree.find("text").map(|n| n.value.as_str()), Some("A"));
        assert!(tree.find("image").is_none());
        assert_eq!(tree.node_count(), 7);
    }

    #[test]
    fn test_json_shape() {
        let tree = Structure::new("qrcode")
            .with_value("code")
            .with_detail("prop_percent", 100.0);
        let value: Value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!({"type": "qrcode", "value": "code", "details": {"prop_percent": 100.0}})
        );
    }

    #[test]
    fn test_json_round_trip() {
        let tree = sample();
        let json = tree.to_json_pretty().unwrap();
        assert_eq!(Structure::from_json(&json).unwrap(), tree);
    }

    #[test]
    fn test_diff_identical() {
        assert!(sample().diff(&sample()).is_empty());
    }

    #[test]
    fn test_diff_reports_paths() {
        let mut actual = sample();
        actual.children[0].children[1].children[0].value = "C".into();
        actual.children[1]
            .details
            .insert("prop_top".into(), json!(1.0));

        let diffs = actual.diff(&sample());
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].path, "document/row[0]/col[1]/text[0]");
        assert_eq!(diffs[0].to_string(), "document/row[0]/col[1]/text[0] value: expected \"B\", got \"C\"");
        assert_eq!(diffs[1].field, "details.prop_top");
        assert_eq!(diffs[1].expected, "<missing>");
    }

    #[test]
    fn test_diff_quotes_empty_value() {
        let actual = Structure::new("col");
        let expected = Structure::new("col").with_value("4").with_detail("k", "4");
        let lines: Vec<String> = actual.diff(&expected).iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "col value: expected \"4\", got \"\"",
                "col details.k: expected \"4\", got <missing>",
            ]
        );
    }

    #[test]
    fn test_diff_child_count() {
        let mut actual = sample();
        actual.children.pop();
        let diffs = actual.diff(&sample());
        assert_eq!(diffs[0].field, "children");
        assert_eq!((diffs[0].expected.as_str(), diffs[0].actual.as_str()), ("2", "1"));
    }

    #[test]
    fn test_display_outline() {
        let outline = Structure::new("row")
            .with_value(10)
            .with_child(Structure::new("col"))
            .to_string();
        assert_eq!(outline, "row \"10\"\n  col\n");
    }
}
