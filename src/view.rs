use {
    crate::{
        config::Config,
        diagnostics::{self, SyntaxError},
        highlight::{self, HighlightError},
        language::Language,
        sexp,
        tree::{self, TreeError},
    },
    serde::Serialize,
    std::path::{Path, PathBuf},
    thiserror::Error,
};

/// Everything shown for a single source file.
#[derive(Debug, Clone, Serialize)]
pub struct SourceView {
    pub path: PathBuf,
    pub language: Option<Language>,
    /// highlighted HTML
    pub code: String,
    /// CSS for `code`
    pub style: String,
    /// indented S-expression, absent when no language could be resolved
    pub sexp: Option<String>,
    pub errors: Vec<SyntaxError>,
}

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

pub fn render(
    path: &Path,
    text: &str,
    config: &Config,
    explicit: Option<Language>,
) -> Result<SourceView, ViewError> {
    let language = Language::resolve(explicit, path, config.default_language);
    log::debug!("rendering {} as {language:?}", path.display());

    let code = highlight::html(text, language, &highlight::Options::from(config))?;
    let style = highlight::style_defs(&config.theme);

    let (sexp, errors) = match language {
        Some(language) => {
            let tree = tree::parse(text, language)?;
            let indented = sexp::indent_by(config.spaces, &tree::sexp(&tree));
            (
                Some(indented),
                diagnostics::syntax_errors(tree.root_node(), text),
            )
        }
        None => (None, Vec::new()),
    };

    Ok(SourceView {
        path: path.to_path_buf(),
        language,
        code,
        style,
        sexp,
        errors,
    })
}

#[cfg(test)]
mod test {
    use {super::*, indoc::indoc};

    #[test]
    fn test_render_python() {
        let text = indoc! {"
            def foo():
                pass
        "};
        let view = render(Path::new("app/foo.py"), text, &Config::default(), None).unwrap();
        assert_eq!(view.language, Some(Language::Python));
        assert!(view.code.contains("id=\"line-2\""));
        assert!(view.style.contains(".hl-keyword"));
        let sexp = view.sexp.unwrap();
        assert!(sexp.starts_with("(module\n  (function_definition"));
        assert!(view.errors.is_empty());
    }

    #[test]
    fn test_render_unknown_extension() {
        let view = render(Path::new("notes.txt"), "<b>\n", &Config::default(), None).unwrap();
        assert_eq!(view.language, None);
        assert_eq!(view.sexp, None);
        assert!(view.code.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_render_uses_config() {
        let config = Config {
            spaces: 4,
            default_language: Some(Language::Python),
            ..Config::default()
        };
        let view = render(Path::new("script"), "x = 1\n", &config, None).unwrap();
        assert_eq!(view.language, Some(Language::Python));
        assert!(view.sexp.unwrap().starts_with("(module\n    (expression_statement"));

        let view = render(Path::new("script"), "x = 1\n", &config, Some(Language::R)).unwrap();
        assert_eq!(view.language, Some(Language::R));
    }

    #[test]
    fn test_render_reports_errors() {
        let view = render(Path::new("bad.py"), "def (:\n", &Config::default(), None).unwrap();
        assert!(!view.errors.is_empty());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["language"], "python");
        assert!(json["errors"][0]["message"].is_string());
    }
}
