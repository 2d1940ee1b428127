use crate::ast::SourceFile;
use crate::error::{Result, SyntaxError};
use crate::lower::Lowerer;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tree_sitter::Parser;

/// Go parser producing [`SourceFile`] trees
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a parser with the Go grammar loaded
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| SyntaxError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser })
    }

    /// Parse one source unit held in memory
    pub fn parse_source(&mut self, source: &str) -> Result<SourceFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| SyntaxError::tree_sitter("parser returned no tree"))?;

        let lowerer = Lowerer::new(source);
        let root = tree.root_node();
        lowerer.check_errors(root)?;
        lowerer.source_file(root)
    }

    /// Read and parse one source unit from disk
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<SourceFile> {
        let source = std::fs::read_to_string(path.as_ref())?;
        self.parse_source(&source)
    }
}

fn package_clause_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\A\x{FEFF}?(?:\s+|//[^\n]*|(?s:/\*.*?\*/))*package[ \t]+([\p{L}_][\p{L}\p{N}_]*)")
            .expect("package clause pattern is valid")
    })
}

/// Package name from the leading `package` clause, without parsing the rest
/// of the unit. Leading whitespace and comments are skipped.
pub fn scan_package_clause(source: &str) -> Result<String> {
    package_clause_pattern()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .ok_or(SyntaxError::MissingPackageClause)
}

/// [`scan_package_clause`] over a file on disk
pub fn read_package_clause(path: impl AsRef<Path>) -> Result<String> {
    let source = std::fs::read_to_string(path.as_ref())?;
    scan_package_clause(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Decl, Expr};

    #[test]
    fn scans_package_after_comments() {
        let source = "// Copyright\n/* multi\n line */\n\npackage bank\n\nfunc main() {}\n";
        assert_eq!(scan_package_clause(source).unwrap(), "bank");
    }

    #[test]
    fn package_scan_rejects_code_before_clause() {
        assert!(matches!(
            scan_package_clause("func main() {}\npackage x\n"),
            Err(SyntaxError::MissingPackageClause)
        ));
    }

    #[test]
    fn parse_reports_syntax_error_position() {
        let mut parser = GoParser::new().unwrap();
        let err = parser
            .parse_source("package main\n\nfunc broken( {\n")
            .unwrap_err();
        match err {
            SyntaxError::Parse { line, .. } => assert!(line >= 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parses_function_signature() {
        let mut parser = GoParser::new().unwrap();
        let file = parser
            .parse_source("package main\n\nfunc Add(a, b int, rest ...int) (int, error) { return a + b, nil }\n")
            .unwrap();

        assert_eq!(file.package, "main");
        let Decl::Func(func) = &file.decls[0] else {
            panic!("expected a function");
        };
        assert_eq!(func.name, "Add");
        assert_eq!(func.ty.params.len(), 2);
        assert_eq!(func.ty.params[0].names, vec!["a", "b"]);
        assert_eq!(
            func.ty.params[1].ty,
            Expr::Ellipsis(Box::new(Expr::Ident("int".into())))
        );
        assert_eq!(func.ty.results.len(), 2);
        assert!(func.recv.is_none());
    }
}
