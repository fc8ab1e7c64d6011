use {
    clap::{Parser, Subcommand},
    sexpview::{commands, diagnostics, language::Language},
    std::{path::PathBuf, process::ExitCode},
};

#[derive(Parser, Debug)]
#[command(name = "sexpview", version)]
#[command(about = "Show tree-sitter parse trees as indented S-expressions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parse tree of each file as an indented S-expression
    Sexp {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print the single-line S-expression without indentation
        #[arg(long)]
        raw: bool,
        /// Language to parse with, overrides the file extension
        #[arg(long, short)]
        language: Option<Language>,
    },
    /// Indent an S-expression read from a file or stdin
    Indent {
        file: Option<PathBuf>,
        /// Spaces per nesting level
        #[arg(long)]
        spaces: Option<usize>,
    },
    /// Print a file as syntax highlighted HTML
    Highlight {
        path: PathBuf,
        /// Prepend the CSS style definitions
        #[arg(long)]
        style: bool,
        #[arg(long, short)]
        language: Option<Language>,
    },
    /// Print highlighted HTML, CSS, parse tree and syntax errors as JSON
    View {
        path: PathBuf,
        #[arg(long, short)]
        language: Option<Language>,
    },
    /// Report syntax errors
    Check { paths: Option<Vec<PathBuf>> },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let result = match cli.command {
        Command::Sexp {
            paths,
            raw,
            language,
        } => commands::sexp(&paths, raw, language),
        Command::Indent { file, spaces } => commands::indent(file.as_deref(), spaces),
        Command::Highlight {
            path,
            style,
            language,
        } => commands::highlight(&path, style, language),
        Command::View { path, language } => commands::view(&path, language),
        Command::Check { paths } => diagnostics::run(paths.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}
