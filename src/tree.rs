use {
    crate::language::Language,
    thiserror::Error,
    tree_sitter::{LanguageError, Tree},
};

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("failed to load {0} grammar")]
    Grammar(Language, #[source] LanguageError),
    #[error("{0} parser did not produce a tree")]
    NoTree(Language),
}

// a parser is cheap compared to parsing, so there is no shared instance
pub fn parse(text: &str, language: Language) -> Result<Tree, TreeError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|error| TreeError::Grammar(language, error))?;
    log::debug!("parsing {} bytes as {language}", text.len());
    parser.parse(text, None).ok_or(TreeError::NoTree(language))
}

/// Single-line S-expression of the whole tree, e.g.
/// `(module (expression_statement (integer)))`.
pub fn sexp(tree: &Tree) -> String {
    tree.root_node().to_sexp()
}
