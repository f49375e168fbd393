//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{PropertyTree, PropertyValue, Value};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Single-line rendering of a resolved value.
///
/// Nested trees are summarised; use [`render_tree`] to expand them.
pub fn format_value(value: &PropertyValue) -> String {
    fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
        format!(
            "[{}]",
            items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
        )
    }
    match value {
        PropertyValue::Integer(v) => v.to_string(),
        PropertyValue::Double(v) => v.to_string(),
        PropertyValue::String(v) => v.clone(),
        PropertyValue::Properties(tree) => format!("<Properties: {} entries>", tree.size()),
        PropertyValue::IntegerList(list) => join(list.iter()),
        PropertyValue::DoubleList(list) => join(list.iter()),
        PropertyValue::StringList(list) => join(list.iter().map(|s| format!("{s:?}"))),
        PropertyValue::PropertiesList(list) => {
            join(list.iter().map(|t| format!("<Properties: {} entries>", t.size())))
        }
    }
}

/// Build a display tree, keys sorted for stable output.
pub fn render_tree(label: &str, tree: &PropertyTree, show_kinds: bool) -> Tree<String> {
    let mut keys: Vec<&String> = tree.as_map().keys().collect();
    keys.sort();
    let leaves = keys
        .into_iter()
        .map(|key| render_value(key, &tree.as_map()[key], show_kinds));
    Tree::new(label.to_string()).with_leaves(leaves)
}

fn render_value(label: &str, value: &Value, show_kinds: bool) -> Tree<String> {
    let kind = |text: String| {
        if show_kinds {
            format!("{} {}", text, format!("({})", value.kind()).dimmed())
        } else {
            text
        }
    };
    match value {
        Value::Integer(v) => Tree::new(kind(format!("{label} = {v}"))),
        Value::Double(v) => Tree::new(kind(format!("{label} = {v}"))),
        Value::String(v) => Tree::new(kind(format!("{label} = {v:?}"))),
        Value::Map(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let leaves = keys
                .into_iter()
                .map(|key| render_value(key, &map[key], show_kinds));
            Tree::new(label.to_string()).with_leaves(leaves)
        }
        Value::List(items) => {
            let leaves = items
                .iter()
                .enumerate()
                .map(|(i, item)| render_value(&format!("[{i}]"), item, show_kinds));
            Tree::new(kind(label.to_string())).with_leaves(leaves)
        }
    }
}
