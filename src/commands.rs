use {
    crate::{cli, config::Config, diagnostics, highlight, language::Language, sexp, tree, view},
    std::{
        io::{self, Read},
        path::{Path, PathBuf},
    },
};

/// Explicit files are kept as given, directories contribute every file with
/// a known extension.
fn expand(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .flat_map(|path| {
            if path.is_dir() {
                diagnostics::source_files(std::slice::from_ref(path))
                    .into_iter()
                    .map(|(path, _)| path)
                    .collect()
            } else {
                vec![path.clone()]
            }
        })
        .collect()
}

fn load(path: &Path) -> Result<(String, Config), ()> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        cli::error(&format!("failed to read {}: {err}", path.display()));
    })?;
    let config = Config::from_path(path).map_err(|err| {
        cli::error(&format!("{}: {err}", path.display()));
    })?;
    Ok((text, config))
}

/// Config for input that has no path of its own, looked up from `dir`.
fn config_in(dir: &Path) -> Result<Config, ()> {
    Config::from_path(&dir.join(".")).map_err(|err| {
        cli::error(&format!("{}: {err}", dir.display()));
    })
}

pub fn sexp(paths: &[PathBuf], raw: bool, explicit: Option<Language>) -> Result<(), ()> {
    let files = expand(paths);
    if files.is_empty() {
        cli::warning("no source files found under the given path(s)");
        return Err(());
    }

    let mut failed = false;
    for path in &files {
        let Ok((text, config)) = load(path) else {
            failed = true;
            continue;
        };
        let Some(language) = Language::resolve(explicit, path, config.default_language) else {
            cli::error(&format!(
                "cannot determine language of {}, use --language",
                path.display()
            ));
            failed = true;
            continue;
        };
        let tree = match tree::parse(&text, language) {
            Ok(tree) => tree,
            Err(err) => {
                cli::error(&format!("{}: {err}", path.display()));
                failed = true;
                continue;
            }
        };

        if files.len() > 1 {
            cli::file_header(path);
        }
        let expression = tree::sexp(&tree);
        if raw {
            println!("{expression}");
        } else {
            println!("{}", sexp::indent_by(config.spaces, &expression));
        }
    }

    if failed { Err(()) } else { Ok(()) }
}

pub fn indent(maybe_file: Option<&Path>, spaces: Option<usize>) -> Result<(), ()> {
    let (expression, config) = match maybe_file {
        Some(path) => load(path)?,
        None => {
            let mut expression = String::new();
            io::stdin().read_to_string(&mut expression).map_err(|err| {
                cli::error(&format!("failed to read stdin: {err}"));
            })?;
            let config = match std::env::current_dir() {
                Ok(cwd) => config_in(&cwd)?,
                Err(_) => Config::default(),
            };
            (expression, config)
        }
    };
    let output = sexp::indent_by(spaces.unwrap_or(config.spaces), &expression);
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

pub fn highlight(path: &Path, with_style: bool, explicit: Option<Language>) -> Result<(), ()> {
    let (text, config) = load(path)?;
    let language = Language::resolve(explicit, path, config.default_language);
    if language.is_none() {
        cli::warning(&format!(
            "cannot determine language of {}, rendering plain text",
            path.display()
        ));
    }
    let html = highlight::html(&text, language, &highlight::Options::from(&config))
        .map_err(|err| cli::error(&format!("{}: {err}", path.display())))?;

    if with_style {
        println!("<style>\n{}</style>", highlight::style_defs(&config.theme));
    }
    println!("{html}");
    Ok(())
}

pub fn view(path: &Path, explicit: Option<Language>) -> Result<(), ()> {
    let (text, config) = load(path)?;
    let view = view::render(path, &text, &config, explicit)
        .map_err(|err| cli::error(&format!("{}: {err}", path.display())))?;
    let json = serde_json::to_string_pretty(&view)
        .map_err(|err| cli::error(&format!("failed to serialize view: {err}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_expand() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("script");
        std::fs::write(&explicit, "x = 1\n").unwrap();
        let nested = dir.path().join("src");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("main.py"), "x = 1\n").unwrap();
        std::fs::write(nested.join("README"), "hi\n").unwrap();

        let files = expand(&[explicit.clone(), nested.clone()]);
        assert_eq!(files, vec![explicit, nested.join("main.py")]);
    }

    #[test]
    fn test_config_in_reports_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(crate::config::FILE_NAME), "spaces = 3\n").unwrap();
        assert_eq!(config_in(dir.path()).map(|config| config.spaces), Ok(3));

        std::fs::write(dir.path().join(crate::config::FILE_NAME), "spaces = [\n").unwrap();
        assert!(config_in(dir.path()).is_err());
    }

    #[test]
    fn test_sexp_unknown_language_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script");
        std::fs::write(&path, "x = 1\n").unwrap();
        assert!(sexp(&[path.clone()], false, None).is_err());
        assert!(sexp(&[path], true, Some(Language::Python)).is_ok());
    }
}
