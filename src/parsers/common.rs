use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::core::error::{AnalysisError, Result};

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|err| AnalysisError::configuration(format!("incompatible grammar: {err}")))?;
        Ok(Self { parser })
    }

    /// Parse `source`, rejecting trees that contain syntax errors.
    pub fn parse_source(&mut self, source: &str, label: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::parse(label, "parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            let position = first_error(&root)
                .map(|node| node.start_position())
                .unwrap_or_else(|| root.start_position());
            return Err(AnalysisError::parse(
                label,
                format!(
                    "invalid syntax at line {}, column {}",
                    position.row + 1,
                    position.column + 1
                ),
            ));
        }
        Ok(tree)
    }
}

/// Buffered read of a whole source file
pub fn read_source(file_path: &Path) -> Result<String> {
    let read = || -> std::io::Result<String> {
        let file = File::open(file_path)?;
        let file_size = file.metadata()?.len() as usize;
        let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
        let mut content = String::with_capacity(file_size);
        reader.read_to_string(&mut content)?;
        Ok(content)
    };
    read().map_err(|err| AnalysisError::from_read_error(file_path, err))
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn first_error<'a>(root: &TSNode<'a>) -> Option<TSNode<'a>> {
    let mut cursor = root.walk();
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let children: Vec<_> = node
            .children(&mut cursor)
            .filter(|child| child.has_error())
            .collect();
        // Reversed so the earliest error in source order is popped first
        stack.extend(children.into_iter().rev());
    }
    None
}
