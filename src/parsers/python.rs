use tree_sitter::Node as TSNode;

use super::common::{extract_text, TreeSitterParser};
use super::{CallTarget, FileAnalysis, LanguageParser};
use crate::core::error::Result;
use crate::core::FunctionKey;

/// Python front end built on tree-sitter.
///
/// `def` and `async def` are both definitions. Calls are attributed to the
/// innermost enclosing definition; decorators, default values and annotations
/// belong to the function they decorate. Calls outside any function are
/// ignored.
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }

    /// Reduce the `function` field of a `call` node to a [`CallTarget`].
    pub fn call_target(call_node: &TSNode, source: &[u8]) -> CallTarget {
        let Some(function) = call_node.child_by_field_name("function") else {
            return CallTarget::Other;
        };

        match function.kind() {
            "identifier" => CallTarget::Identifier(extract_text(&function, source).to_string()),
            "attribute" => function
                .child_by_field_name("attribute")
                .map(|member| CallTarget::Member(extract_text(&member, source).to_string()))
                .unwrap_or(CallTarget::Other),
            _ => CallTarget::Other,
        }
    }

    fn function_key(def_node: &TSNode, source: &[u8], relative_path: &str) -> Option<FunctionKey> {
        let name_node = def_node.child_by_field_name("name")?;
        let name = extract_text(&name_node, source);
        if name.is_empty() {
            return None;
        }
        Some(FunctionKey::new(relative_path, name))
    }

    /// Walk the tree with an explicit stack so nesting depth is bounded by
    /// the heap, not the thread stack. Each entry carries the index of its
    /// enclosing function in `scopes`.
    fn collect(
        &self,
        root: TSNode,
        source: &[u8],
        relative_path: &str,
        out: &mut FileAnalysis,
    ) {
        let mut scopes: Vec<FunctionKey> = Vec::new();
        let mut stack: Vec<(TSNode, Option<usize>)> = vec![(root, None)];
        let mut cursor = root.walk();

        while let Some((node, enclosing)) = stack.pop() {
            let mut inner = enclosing;
            // The decorated function itself still belongs to the outer scope
            let mut undecorated = None;

            match node.kind() {
                "function_definition" => {
                    if let Some(key) = Self::function_key(&node, source, relative_path) {
                        out.definitions.insert(key.clone());
                        scopes.push(key);
                        inner = Some(scopes.len() - 1);
                    }
                }
                "decorated_definition" => {
                    let definition = node
                        .child_by_field_name("definition")
                        .filter(|def| def.kind() == "function_definition");
                    let key = definition
                        .and_then(|def| Self::function_key(&def, source, relative_path));

                    if let (Some(definition), Some(key)) = (definition, key) {
                        scopes.push(key);
                        inner = Some(scopes.len() - 1);
                        undecorated = Some(definition);
                    }
                }
                "call" => {
                    if let Some(caller) = enclosing.map(|idx| &scopes[idx]) {
                        if let Some(name) = Self::call_target(&node, source).called_name() {
                            out.raw_calls
                                .entry(caller.clone())
                                .or_default()
                                .insert(name.to_string());
                        }
                    }
                }
                _ => {}
            }

            for child in node.children(&mut cursor) {
                let scope = if Some(child) == undecorated {
                    enclosing
                } else {
                    inner
                };
                stack.push((child, scope));
            }
        }
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for PythonParser {
    fn analyze_source(&self, source: &str, relative_path: &str) -> Result<FileAnalysis> {
        let mut parser = TreeSitterParser::new(tree_sitter_python::language())?;
        let tree = parser.parse_source(source, relative_path)?;

        let mut analysis = FileAnalysis::default();
        self.collect(tree.root_node(), source.as_bytes(), relative_path, &mut analysis);
        Ok(analysis)
    }

    fn language_name(&self) -> &str {
        "python"
    }
}
