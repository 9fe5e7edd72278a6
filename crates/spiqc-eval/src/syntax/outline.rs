//! Declaration outline built from a tree-sitter syntax tree

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Parser};

use crate::error::SyntaxError;

/// Kind of a named declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Function,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Class => write!(f, "class"),
            DeclarationKind::Function => write!(f, "function"),
        }
    }
}

/// A class or function definition, nested ones included
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// 1-based line of the `class`/`def` keyword
    pub line: usize,
    /// Body opens with a non-empty docstring
    pub documented: bool,
    /// Functions defined directly in a class body
    pub methods: Vec<String>,
}

/// Every declaration in a source file plus its parse status
#[derive(Debug, Clone)]
pub struct Outline {
    declarations: Vec<Declaration>,
    error_line: Option<usize>,
}

impl Outline {
    /// Parse Python source
    ///
    /// A tree with error nodes still yields an outline; call
    /// [`Outline::ensure_valid`] when the caller needs clean syntax. The
    /// grammar also accepts Python 2 forms that Python 3 rejects, and those
    /// count as errors too.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| SyntaxError::Language(e.to_string()))?;
        let tree = parser.parse(source, None).ok_or(SyntaxError::Parse)?;
        let root = tree.root_node();

        let mut declarations = Vec::new();
        collect(root, source.as_bytes(), &mut declarations);

        let tree_error = if root.has_error() {
            Some(first_error(root).map_or(1, |n| n.start_position().row + 1))
        } else {
            None
        };
        let legacy = first_legacy(root, source.as_bytes()).map(|n| n.start_position().row + 1);
        let error_line = match (tree_error, legacy) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        Ok(Self {
            declarations,
            error_line,
        })
    }

    pub fn ensure_valid(&self) -> Result<(), SyntaxError> {
        match self.error_line {
            Some(line) => Err(SyntaxError::Invalid { line }),
            None => Ok(()),
        }
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn classes(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|d| d.kind == DeclarationKind::Class)
    }
}

fn collect(node: Node<'_>, src: &[u8], out: &mut Vec<Declaration>) {
    let kind = match node.kind() {
        "class_definition" => Some(DeclarationKind::Class),
        "function_definition" => Some(DeclarationKind::Function),
        _ => None,
    };
    if let Some(kind) = kind {
        if let Some(decl) = declaration(node, kind, src) {
            out.push(decl);
        }
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
    for child in children {
        collect(child, src, out);
    }
}

fn declaration(node: Node<'_>, kind: DeclarationKind, src: &[u8]) -> Option<Declaration> {
    let name = node.child_by_field_name("name")?.utf8_text(src).ok()?;
    let body = node.child_by_field_name("body");

    let methods = match (kind, body) {
        (DeclarationKind::Class, Some(body)) => method_names(body, src),
        _ => Vec::new(),
    };

    Some(Declaration {
        kind,
        name: name.to_string(),
        line: node.start_position().row + 1,
        documented: body.is_some_and(|b| has_docstring(b, src)),
        methods,
    })
}

fn method_names(body: Node<'_>, src: &[u8]) -> Vec<String> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter_map(|child| match child.kind() {
            "function_definition" => Some(child),
            "decorated_definition" => child
                .child_by_field_name("definition")
                .filter(|d| d.kind() == "function_definition"),
            _ => None,
        })
        .filter_map(|f| f.child_by_field_name("name"))
        .filter_map(|n| n.utf8_text(src).ok())
        .map(str::to_string)
        .collect()
}

/// First statement is a plain, non-empty string literal
fn has_docstring(body: Node<'_>, src: &[u8]) -> bool {
    let mut cursor = body.walk();
    let Some(first) = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")
    else {
        return false;
    };
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return false;
    }
    let Some(string) = first.named_child(0).filter(|s| s.kind() == "string") else {
        return false;
    };

    let mut cursor = string.walk();
    let mut plain = true;
    let mut content = String::new();
    for part in string.named_children(&mut cursor) {
        match part.kind() {
            "string_start" => {
                let prefix = part.utf8_text(src).unwrap_or_default().to_ascii_lowercase();
                plain = !prefix.contains('f') && !prefix.contains('b');
            }
            "string_content" => content.push_str(part.utf8_text(src).unwrap_or_default()),
            "interpolation" => plain = false,
            _ => {}
        }
    }
    plain && !content.trim().is_empty()
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error)
}

/// First Python 2 construct in document order
fn first_legacy<'a>(node: Node<'a>, src: &[u8]) -> Option<Node<'a>> {
    let legacy = match node.kind() {
        "print_statement" | "exec_statement" => true,
        "integer" => node.utf8_text(src).is_ok_and(is_legacy_integer),
        _ => false,
    };
    if legacy {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'a>> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(|c| first_legacy(c, src))
}

/// `0777` style octals and `10L` longs
fn is_legacy_integer(text: &str) -> bool {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    if digits.ends_with(['l', 'L']) {
        return true;
    }
    if digits.ends_with(['j', 'J']) {
        return false;
    }
    let mut chars = digits.chars();
    chars.next() == Some('0')
        && chars.clone().next().is_some_and(|c| c.is_ascii_digit())
        && chars.any(|c| c != '0')
}
