//! Include and symbol-use collection using tree-sitter.
//!
//! The collector walks the translation unit the way a preprocessor would:
//! it parses the main file, resolves every include directive it finds,
//! recurses into each header exactly once (include guards collapse
//! re-entry), and emits one include event per directive in source order.
//! Along the way it indexes every declaration it sees; a second pass over
//! the main file then emits a symbol-use event for each call, member call,
//! constructor expression, and variable declaration whose name the index
//! knows. Declaration lookup is purely name-based — the first declaration
//! of a name wins — which is the precision a syntax-level front end can
//! offer without a real semantic analysis.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use super::search::HeaderSearchPath;
use crate::analysis::{AnalysisSession, SessionError};

/// Errors that can occur while collecting events.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Failed to read a source file from disk.
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Tree-sitter could not produce a tree for a file.
    #[error("Failed to parse file: {path}")]
    ParseError { path: String },

    /// Tree-sitter language initialization failed.
    #[error("Tree-sitter language initialization failed")]
    LanguageInit,

    /// The analysis session rejected an event.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for collection operations.
pub type CollectResult<T> = Result<T, CollectError>;

/// Drives one traversal of one translation unit, feeding the session.
pub struct Collector {
    parser: Parser,
    search: HeaderSearchPath,
    /// Symbol name -> file of its first seen declaration.
    declarations: HashMap<String, PathBuf>,
    /// Files already scanned; a file is parsed at most once.
    visited: HashSet<PathBuf>,
}

impl Collector {
    /// Creates a collector over the given header search path.
    pub fn new(search: HeaderSearchPath) -> CollectResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_cpp::LANGUAGE.into())
            .map_err(|_| CollectError::LanguageInit)?;

        Ok(Self {
            parser,
            search,
            declarations: HashMap::new(),
            visited: HashSet::new(),
        })
    }

    /// Runs the full traversal for the session's main file.
    ///
    /// First scans the include closure, emitting include events and
    /// indexing declarations; then walks the main file again and emits the
    /// symbol-use events. The session's main file path must be normalized,
    /// as every path the collector emits is canonicalized.
    pub fn run(&mut self, session: &mut AnalysisSession) -> CollectResult<()> {
        let main = session.main_file().to_path_buf();
        self.scan_file(&main, session)?;

        let source = fs::read_to_string(&main)?;
        let tree = self.parse(&source, &main)?;
        self.emit_uses(tree.root_node(), &source, &main, session)?;
        Ok(())
    }

    fn parse(&mut self, source: &str, path: &Path) -> CollectResult<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| CollectError::ParseError {
                path: path.display().to_string(),
            })
    }

    /// Parses one file, emitting its include events in source order and
    /// indexing its declarations, then recurses into newly discovered
    /// headers.
    fn scan_file(&mut self, file: &Path, session: &mut AnalysisSession) -> CollectResult<()> {
        if !self.visited.insert(file.to_path_buf()) {
            return Ok(());
        }

        let source = fs::read_to_string(file)?;
        let tree = self.parse(&source, file)?;

        let mut discovered = Vec::new();
        self.visit(tree.root_node(), &source, file, session, &mut discovered)?;

        for header in discovered {
            self.scan_file(&header, session)?;
        }
        Ok(())
    }

    fn visit(
        &mut self,
        node: Node,
        source: &str,
        file: &Path,
        session: &mut AnalysisSession,
        discovered: &mut Vec<PathBuf>,
    ) -> CollectResult<()> {
        match node.kind() {
            "preproc_include" => {
                if let Some((resolved, spelling)) = self.resolve_include(&node, source, file) {
                    session.on_include(file, &resolved, Some(&spelling))?;
                    discovered.push(resolved);
                }
            }
            "function_definition" | "declaration" | "field_declaration" => {
                if let Some(name) = declared_function_name(&node, source) {
                    self.record_declaration(name, file);
                }
            }
            "class_specifier" | "struct_specifier" | "enum_specifier" | "union_specifier" => {
                if let Some(name) = named_type(&node, source) {
                    self.record_declaration(name, file);
                }
            }
            "type_definition" => {
                if let Some(name) = typedef_name(&node, source) {
                    self.record_declaration(name, file);
                }
            }
            "alias_declaration" => {
                if let Some(name) = named_type(&node, source) {
                    self.record_declaration(name, file);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source, file, session, discovered)?;
        }
        Ok(())
    }

    /// Resolves the directive to (canonical path, spelling), or `None`
    /// when the header is outside the search path.
    fn resolve_include(
        &self,
        node: &Node,
        source: &str,
        file: &Path,
    ) -> Option<(PathBuf, PathBuf)> {
        let path_node = node.child_by_field_name("path")?;
        let raw = node_text(&path_node, source)?;
        let includer_dir = file.parent()?;

        let (spelling, resolved) = match path_node.kind() {
            "string_literal" => {
                let spelling = PathBuf::from(raw.trim_matches('"'));
                let resolved = self.search.resolve_quoted(includer_dir, &spelling);
                (spelling, resolved)
            }
            "system_lib_string" => {
                let spelling =
                    PathBuf::from(raw.trim_start_matches('<').trim_end_matches('>'));
                let resolved = self.search.resolve_angled(&spelling);
                (spelling, resolved)
            }
            _ => return None,
        };

        match resolved {
            Some(resolved) => Some((resolved, spelling)),
            None => {
                debug!(
                    spelling = %spelling.display(),
                    includer = %file.display(),
                    "include not found on search path, skipping"
                );
                None
            }
        }
    }

    fn record_declaration(&mut self, name: String, file: &Path) {
        self.declarations
            .entry(name)
            .or_insert_with(|| file.to_path_buf());
    }

    /// Walks the main file and reports every recognized symbol reference.
    fn emit_uses(
        &self,
        node: Node,
        source: &str,
        main: &Path,
        session: &mut AnalysisSession,
    ) -> CollectResult<()> {
        match node.kind() {
            "call_expression" => {
                if let Some(name) = node
                    .child_by_field_name("function")
                    .and_then(|function| identifier_text(&function, source))
                {
                    self.emit_use(&name, main, session)?;
                }
            }
            "new_expression" => {
                if let Some(name) = node
                    .child_by_field_name("type")
                    .and_then(|ty| identifier_text(&ty, source))
                {
                    self.emit_use(&name, main, session)?;
                }
            }
            "declaration" => {
                // Variable declaration by type: the type name counts as a use.
                if let Some(type_node) = node.child_by_field_name("type") {
                    if type_node.kind() == "type_identifier" {
                        if let Some(name) = node_text(&type_node, source) {
                            self.emit_use(name, main, session)?;
                        }
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.emit_uses(child, source, main, session)?;
        }
        Ok(())
    }

    /// Emits a use event when the name has a known declaration.
    ///
    /// Names without one (std library calls outside the search path,
    /// compiler builtins) have no attributable header and are dropped here,
    /// before they reach the session.
    fn emit_use(
        &self,
        name: &str,
        main: &Path,
        session: &mut AnalysisSession,
    ) -> CollectResult<()> {
        if let Some(declaring) = self.declarations.get(name) {
            session.on_symbol_use(main, declaring, name)?;
        }
        Ok(())
    }
}

/// Extract the text content of a node.
fn node_text<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

/// The simple name behind an identifier-like node, drilling through
/// member and scope qualification.
fn identifier_text(node: &Node, source: &str) -> Option<String> {
    match node.kind() {
        "identifier" | "field_identifier" | "type_identifier" => {
            node_text(node, source).map(str::to_string)
        }
        "field_expression" => identifier_text(&node.child_by_field_name("field")?, source),
        "qualified_identifier" => identifier_text(&node.child_by_field_name("name")?, source),
        "template_function" | "template_type" => {
            identifier_text(&node.child_by_field_name("name")?, source)
        }
        _ => None,
    }
}

/// The declared name of a function definition, prototype, or method
/// declaration, if the node is one.
fn declared_function_name(node: &Node, source: &str) -> Option<String> {
    let mut declarator = node.child_by_field_name("declarator")?;
    loop {
        match declarator.kind() {
            "function_declarator" => {
                return identifier_text(&declarator.child_by_field_name("declarator")?, source);
            }
            "pointer_declarator" | "reference_declarator" | "init_declarator" => {
                declarator = declarator.child_by_field_name("declarator")?;
            }
            _ => return None,
        }
    }
}

/// The name of a named class/struct/enum/union specifier or alias.
fn named_type(node: &Node, source: &str) -> Option<String> {
    identifier_text(&node.child_by_field_name("name")?, source)
}

/// The alias introduced by a typedef: the type_identifier that is a direct
/// child (the aliased type's own name sits deeper in the tree).
fn typedef_name(node: &Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "type_identifier" {
            return node_text(&child, source).map(str::to_string);
        }
    }
    None
}
