//! In-place rewriting of single keys in a definition document

use std::fs;
use std::path::Path;

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::bump::mutation::{KeyPath, RewriteIntent};
use crate::definition::error::MutationError;

/// Applies rewrite intents to definition files
#[cfg_attr(test, automock)]
pub trait DefinitionWriter: Send + Sync {
    fn write(&self, file: &Path, intent: &RewriteIntent) -> Result<(), MutationError>;
}

/// Writer that edits the YAML text in place
///
/// Only the targeted value is touched; comments, key order and quoting of
/// every other entry are kept. Values are always written double-quoted.
pub struct YamlPatcher;

impl DefinitionWriter for YamlPatcher {
    fn write(&self, file: &Path, intent: &RewriteIntent) -> Result<(), MutationError> {
        let content = fs::read_to_string(file).map_err(|source| MutationError::Io {
            path: file.to_path_buf(),
            source,
        })?;

        let patched = patch_document(&content, &intent.key, &intent.value)?;

        fs::write(file, patched).map_err(|source| MutationError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        debug!("Wrote {} to {:?}", intent, file);
        Ok(())
    }
}

/// Return `content` with `key` set to the double-quoted `value`
///
/// Missing keys are inserted at the end of their parent mapping, using the
/// indentation of that mapping.
pub fn patch_document(content: &str, key: &KeyPath, value: &str) -> Result<String, MutationError> {
    let mut parser = tree_sitter::Parser::new();
    let language = tree_sitter_yaml::LANGUAGE;
    parser.set_language(&language.into()).map_err(|e| {
        warn!("Failed to set YAML language for tree-sitter: {}", e);
        MutationError::TreeSitter(e.to_string())
    })?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| MutationError::ParseFailed("Failed to parse YAML".to_string()))?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(MutationError::ParseFailed(
            "document contains syntax errors".to_string(),
        ));
    }

    let segments = key.segments();
    let quoted = quote(value);
    let unsupported = |reason: String| MutationError::UnsupportedShape {
        key: key.to_string(),
        reason,
    };

    let Some(mut mapping) = find_block_mapping(root) else {
        if content.trim().is_empty() {
            return Ok(format!("{}\n", render_block(&segments, &quoted, 0)));
        }
        return Err(unsupported(
            "document root is not a block mapping".to_string(),
        ));
    };

    for (depth, segment) in segments.iter().enumerate() {
        let is_last = depth + 1 == segments.len();

        let Some(pair) = find_pair(mapping, content, segment) else {
            return Ok(insert_into_mapping(
                content,
                mapping,
                &segments[depth..],
                &quoted,
            ));
        };

        let value_node = pair.child_by_field_name("value");
        match (value_node, is_last) {
            (Some(node), true) => {
                if !is_scalar(node) {
                    return Err(unsupported(format!("{} is not a scalar", segment)));
                }
                let mut patched = content.to_string();
                patched.replace_range(node.byte_range(), &quoted);
                return Ok(patched);
            }
            (None, true) => {
                let mut patched = content.to_string();
                patched.insert_str(pair.end_byte(), &format!(" {}", quoted));
                return Ok(patched);
            }
            (Some(node), false) => {
                mapping = find_block_mapping(node).ok_or_else(|| {
                    unsupported(format!("{} is not a block mapping", segment))
                })?;
            }
            (None, false) => {
                let indent = pair.start_position().column + 2;
                let mut patched = content.to_string();
                patched.insert_str(
                    pair.end_byte(),
                    &format!("\n{}", render_block(&segments[depth + 1..], &quoted, indent)),
                );
                return Ok(patched);
            }
        }
    }

    Err(unsupported("empty key path".to_string()))
}

/// Descend through stream/document/block_node wrappers to a block mapping
///
/// YAML tree structure of a definition file:
/// ```text
/// stream
///   document
///     block_node
///       block_mapping
///         block_mapping_pair          <- "labels: ..."
///           flow_node                 <- key: "labels"
///           block_node
///             block_mapping
///               block_mapping_pair    <- "git.hash: abc"
///                 flow_node           <- key
///                 flow_node           <- value (TARGET)
/// ```
fn find_block_mapping(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    if node.kind() == "block_mapping" {
        return Some(node);
    }
    if !matches!(node.kind(), "stream" | "document" | "block_node") {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(find_block_mapping)
}

fn find_pair<'t>(
    mapping: tree_sitter::Node<'t>,
    content: &str,
    key: &str,
) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = mapping.walk();
    let pairs: Vec<_> = mapping
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "block_mapping_pair")
        .collect();
    pairs.into_iter().find(|pair| {
        pair.child_by_field_name("key")
            .is_some_and(|key_node| key_text(key_node, content) == key)
    })
}

/// Key text with surrounding quotes removed
fn key_text<'c>(node: tree_sitter::Node, content: &'c str) -> &'c str {
    content[node.byte_range()]
        .trim()
        .trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\''])
}

fn is_scalar(node: tree_sitter::Node) -> bool {
    if node.kind() != "flow_node" {
        return false;
    }
    let mut cursor = node.walk();
    let is_collection = node
        .named_children(&mut cursor)
        .any(|child| matches!(child.kind(), "flow_mapping" | "flow_sequence"));
    !is_collection
}

fn insert_into_mapping(
    content: &str,
    mapping: tree_sitter::Node,
    segments: &[&str],
    quoted: &str,
) -> String {
    let indent = mapping.start_position().column;
    let end = mapping.end_byte();
    let line_end = content[end..]
        .find('\n')
        .map_or(content.len(), |offset| end + offset);

    let mut patched = content.to_string();
    patched.insert_str(
        line_end,
        &format!("\n{}", render_block(segments, quoted, indent)),
    );
    if !patched.ends_with('\n') {
        patched.push('\n');
    }
    patched
}

/// Render nested `key:` lines ending in `last: "value"`, without a trailing newline
fn render_block(segments: &[&str], quoted: &str, indent: usize) -> String {
    let mut lines = Vec::with_capacity(segments.len());
    for (depth, segment) in segments.iter().enumerate() {
        let pad = " ".repeat(indent + depth * 2);
        if depth + 1 == segments.len() {
            lines.push(format!("{}{}: {}", pad, segment, quoted));
        } else {
            lines.push(format!("{}{}:", pad, segment));
        }
    }
    lines.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
