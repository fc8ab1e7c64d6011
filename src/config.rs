use {
    crate::{language::Language, sexp},
    serde::Deserialize,
    std::{collections::BTreeMap, io, path::Path},
    thiserror::Error,
};

pub const FILE_NAME: &str = "sexpview.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// spaces per nesting level of the indented tree
    pub spaces: usize,
    pub line_numbers: bool,
    /// prefix of the per-line anchors, `line` gives `line-1`, `line-2`, ...
    pub line_anchors: String,
    pub anchor_line_numbers: bool,
    pub default_language: Option<Language>,
    /// highlight name -> CSS declarations, merged over the built-in theme
    pub theme: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            spaces: sexp::DEFAULT_SPACES,
            line_numbers: true,
            line_anchors: "line".into(),
            anchor_line_numbers: true,
            default_language: None,
            theme: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Searches the ancestors of `path` for a `sexpview.toml`.
    pub fn from_path(path: &Path) -> Result<Config, ConfigError> {
        let mut current_path = path.to_path_buf();

        while current_path.pop() {
            let config_path = current_path.join(FILE_NAME);
            if config_path.exists() {
                log::debug!("using config {}", config_path.display());
                let text = std::fs::read_to_string(&config_path)?;
                return Ok(toml::from_str(&text)?);
            }
        }

        Ok(Config::default())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config")]
    IoError(#[from] io::Error),
    #[error("invalid config file")]
    Invalid(#[from] toml::de::Error),
}

#[cfg(test)]
mod test {
    use {super::*, indoc::indoc};

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.spaces, 2);
        assert_eq!(config.line_anchors, "line");
    }

    #[test]
    fn test_parse() {
        let config: Config = toml::from_str(indoc! {r#"
            spaces = 4
            line_numbers = false
            default_language = "java"

            [theme]
            keyword = "color: red"
        "#})
        .unwrap();
        assert_eq!(config.spaces, 4);
        assert!(!config.line_numbers);
        assert!(config.anchor_line_numbers);
        assert_eq!(config.default_language, Some(Language::Java));
        assert_eq!(config.theme["keyword"], "color: red");
    }

    #[test]
    fn test_from_path_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(FILE_NAME), "spaces = 3\n").unwrap();

        let config = Config::from_path(&nested.join("main.py")).unwrap();
        assert_eq!(config.spaces, 3);
    }

    #[test]
    fn test_from_path_invalid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FILE_NAME), "spaces = \"many\"\n").unwrap();
        let result = Config::from_path(&dir.path().join("main.py"));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
