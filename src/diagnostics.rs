use {
    crate::{cli, language::Language, tree},
    console::style,
    ignore::Walk,
    ropey::{Rope, RopeSlice},
    serde::Serialize,
    std::path::{Path, PathBuf},
    tree_sitter::{Node, Point, TreeCursor},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub message: String,
    /// zero-based (row, column)
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl SyntaxError {
    fn new(node: Node, message: String) -> SyntaxError {
        let point = |point: Point| (point.row, point.column);
        SyntaxError {
            message,
            start: point(node.start_position()),
            end: point(node.end_position()),
        }
    }
}

pub fn syntax_errors(node: Node, text: &str) -> Vec<SyntaxError> {
    fn traverse(cursor: &mut TreeCursor, text: &str, errors: &mut Vec<SyntaxError>) {
        let node = cursor.node();
        if !(node.is_error() || node.has_error()) {
            return;
        }

        if node.is_missing() {
            errors.push(SyntaxError::new(node, format!("missing {}", node.kind())));
            return;
        }

        if node.is_error() {
            let raw = text.get(node.byte_range()).unwrap_or_default().trim();
            let raw = raw.lines().next().unwrap_or_default();
            let message = match raw {
                ")" | "}" | "]" => format!("unexpected closing delimiter {raw}"),
                _ => format!("unexpected {raw:?}"),
            };
            errors.push(SyntaxError::new(node, message));
            return;
        }

        if cursor.goto_first_child() {
            loop {
                traverse(cursor, text, errors);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }

    let mut errors = Vec::new();
    let mut cursor = node.walk();
    traverse(&mut cursor, text, &mut errors);
    errors
}

/// Prints every error with its location and the offending line underlined.
pub fn report(path: &Path, text: &str, errors: &[SyntaxError]) {
    let rope = Rope::from_str(text);
    for error in errors {
        let (row, column) = error.start;
        cli::error(&error.message);
        eprintln!(
            "{} {}:{}:{}",
            style("  -->").bold().blue(),
            path.display(),
            row + 1,
            column + 1
        );

        let Some(line) = rope.get_line(row) else {
            continue;
        };
        let (offset, width) = caret_span(line, error);
        let line = line.to_string();
        let line = line.trim_end_matches(['\n', '\r']);
        let gutter = (row + 1).to_string();

        eprintln!("{} {line}", style(format!("{gutter} |")).blue().bold());
        eprintln!(
            "{} {}{}",
            style(format!("{} |", " ".repeat(gutter.len()))).blue().bold(),
            " ".repeat(offset),
            style("^".repeat(width)).red().bold()
        );
        eprintln!();
    }
}

/// Character offset and width of the carets under the first line of
/// `error`. Tree-sitter columns count bytes.
fn caret_span(line: RopeSlice, error: &SyntaxError) -> (usize, usize) {
    let line_end = line
        .chars()
        .take_while(|&char| char != '\n' && char != '\r')
        .count();
    let to_char = |byte: usize| line.try_byte_to_char(byte).unwrap_or(line_end).min(line_end);

    let start = to_char(error.start.1);
    let end = if error.end.0 == error.start.0 {
        to_char(error.end.1)
    } else {
        line_end
    };
    (start, usize::max(1, end.saturating_sub(start)))
}

/// Collects every file below `paths` whose extension maps to a language.
pub fn source_files(paths: &[PathBuf]) -> Vec<(PathBuf, Language)> {
    paths
        .iter()
        .flat_map(Walk::new)
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter_map(|path| Language::from_path(&path).map(|language| (path, language)))
        .collect()
}

pub fn run(maybe_paths: Option<&[PathBuf]>) -> Result<(), ()> {
    let root: Vec<PathBuf> = vec![".".into()];
    let paths = maybe_paths.unwrap_or(&root);

    let files = source_files(paths);
    if files.is_empty() {
        cli::warning("no source files found under the given path(s)");
        return Err(());
    }

    let mut n_errors = 0;
    for (path, language) in &files {
        log::info!("checking {} as {language}", path.display());
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                n_errors += 1;
                cli::error(&format!("failed to read {}: {err}", path.display()));
                continue;
            }
        };
        let tree = match tree::parse(&text, *language) {
            Ok(tree) => tree,
            Err(err) => {
                n_errors += 1;
                cli::error(&format!("{}: {err}", path.display()));
                continue;
            }
        };
        let errors = syntax_errors(tree.root_node(), &text);
        n_errors += errors.len();
        report(path, &text, &errors);
    }

    if n_errors == 0 {
        cli::info(&format!("checked {} file(s), no syntax errors", files.len()));
        Ok(())
    } else {
        cli::warning(&format!(
            "found {n_errors} problem(s) in {} file(s)",
            files.len()
        ));
        Err(())
    }
}
