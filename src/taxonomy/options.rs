//! Drop-down tree options for the category pickers.

use serde::Serialize;
use tracing::warn;

use super::tree::{TaxonomyNode, TaxonomyTree};

/// Separator used in option values. The store never allows it inside a key;
/// a node whose key contains it is left out of the options along with its
/// subtree, since its value would collide with a nested path.
pub const PATH_SEPARATOR: char = '/';

/// One entry of a tree-select widget. `value` is the full path of the node so
/// two categories with the same key under different parents stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SelectOption>,
}

impl TaxonomyTree {
    pub fn to_select_options(&self) -> Vec<SelectOption> {
        options_for(self.roots(), "")
    }
}

fn options_for(nodes: &[TaxonomyNode], parent: &str) -> Vec<SelectOption> {
    nodes
        .iter()
        .filter(|node| {
            let clean = !node.key.contains(PATH_SEPARATOR);
            if !clean {
                warn!(key = %node.key, parent, "category key contains the path separator, skipped");
            }
            clean
        })
        .map(|node| to_option(node, parent))
        .collect()
}

fn to_option(node: &TaxonomyNode, parent: &str) -> SelectOption {
    let value = if parent.is_empty() {
        node.key.clone()
    } else {
        format!("{parent}{PATH_SEPARATOR}{}", node.key)
    };
    let children = options_for(&node.children, &value);
    SelectOption {
        label: node.key.clone(),
        value,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::tree::TaxonomyOptions;
    use serde_json::json;

    #[test]
    fn nested_options_carry_full_paths() {
        let doc = json!({
            "2020": { "CSE": { "DBMS": {} }, "ECE": {} },
            "2021": { "CSE": {} }
        });
        let tree = TaxonomyTree::build(&doc, &TaxonomyOptions::default());
        let options = tree.to_select_options();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].children[0].value, "2020/CSE");
        assert_eq!(options[0].children[0].children[0].value, "2020/CSE/DBMS");
        assert_eq!(options[1].children[0].value, "2021/CSE");
        assert_eq!(options[1].children[0].label, "CSE");
    }

    #[test]
    fn serializes_without_empty_children() {
        let doc = json!({ "CSE": { "2020": {} } });
        let tree = TaxonomyTree::build(&doc, &TaxonomyOptions::default());
        let rendered = serde_json::to_value(tree.to_select_options()).unwrap();
        assert_eq!(
            rendered,
            json!([{
                "label": "CSE",
                "value": "CSE",
                "children": [{ "label": "2020", "value": "CSE/2020" }]
            }])
        );
    }

    #[test]
    fn keys_containing_the_separator_are_skipped() {
        let doc = json!({ "a/b": { "x": {} }, "a": { "b": {} } });
        let tree = TaxonomyTree::build(&doc, &TaxonomyOptions::default());
        let options = tree.to_select_options();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "a");
        assert_eq!(options[0].children[0].value, "a/b");
        assert!(options[0].children[0].children.is_empty());
    }

    #[test]
    fn empty_tree_has_no_options() {
        let tree = TaxonomyTree::build(&json!(null), &TaxonomyOptions::default());
        assert!(tree.to_select_options().is_empty());
    }
}
