use {
    serde::{Deserialize, Serialize},
    std::{fmt, path::Path, str::FromStr},
    thiserror::Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    R,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::Java, Language::R];

    pub fn name(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::R => "r",
        }
    }

    pub fn from_name(name: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|language| language.name().eq_ignore_ascii_case(name))
    }

    pub fn from_extension(extension: &str) -> Option<Language> {
        match extension {
            "py" | "pyi" => Some(Language::Python),
            "java" => Some(Language::Java),
            "r" | "R" => Some(Language::R),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Language> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Language::from_extension)
    }

    /// An explicitly requested language wins over the file extension, which
    /// wins over the configured fallback.
    pub fn resolve(
        explicit: Option<Language>,
        path: &Path,
        fallback: Option<Language>,
    ) -> Option<Language> {
        explicit.or_else(|| Language::from_path(path)).or(fallback)
    }

    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            Language::Python => tree_sitter_python::LANGUAGE.into(),
            Language::Java => tree_sitter_java::LANGUAGE.into(),
            Language::R => tree_sitter_r::LANGUAGE.into(),
        }
    }

    pub fn highlights_query(self) -> &'static str {
        match self {
            Language::Python => tree_sitter_python::HIGHLIGHTS_QUERY,
            Language::Java => tree_sitter_java::HIGHLIGHTS_QUERY,
            Language::R => tree_sitter_r::HIGHLIGHTS_QUERY,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug)]
#[error("unsupported language '{0}' (expected one of: python, java, r)")]
pub struct UnknownLanguage(String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_name(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use {super::Language, std::path::Path};

    #[test]
    fn test_from_path() {
        assert_eq!(
            Language::from_path(Path::new("src/app.py")),
            Some(Language::Python)
        );
        assert_eq!(
            Language::from_path(Path::new("Main.java")),
            Some(Language::Java)
        );
        assert_eq!(Language::from_path(Path::new("R/utils.R")), Some(Language::R));
        assert_eq!(Language::from_path(Path::new("README.md")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!("Python".parse::<Language>().ok(), Some(Language::Python));
        assert_eq!(Language::from_name("JAVA"), Some(Language::Java));
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_resolve_precedence() {
        let path = Path::new("script.py");
        assert_eq!(
            Language::resolve(Some(Language::Java), path, Some(Language::R)),
            Some(Language::Java)
        );
        assert_eq!(
            Language::resolve(None, path, Some(Language::R)),
            Some(Language::Python)
        );
        assert_eq!(
            Language::resolve(None, Path::new("notes.txt"), Some(Language::R)),
            Some(Language::R)
        );
        assert_eq!(Language::resolve(None, Path::new("notes.txt"), None), None);
    }

    #[test]
    fn test_highlight_queries() {
        for language in Language::ALL {
            assert!(!language.highlights_query().is_empty(), "{language}");
        }
    }
}
