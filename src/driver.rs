//! Driver that runs the pipeline and prints what each stage produced

use crate::parser::{format_tokens, parse, tokenize, LexError, ParseError};
use crate::report::{ast_outline, diagnostics_report, symbol_table_report, token_preview};
use crate::semantic::{analyze, Analysis};
use clap::ValueEnum;
use crossterm::style::{style, Stylize};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const BANNER_WIDTH: usize = 80;

/// Last stage to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Stage {
    /// Tokenize and list the tokens
    Lex,
    /// Parse and print the AST outline
    Parse,
    /// Run the semantic analyzer as well
    #[default]
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Print the token preview and the AST outline
    pub verbose: bool,
    pub stage: Stage,
    pub color: ColorChoice,
    /// Number of tokens shown in verbose mode
    pub preview: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            verbose: false,
            stage: Stage::Check,
            color: ColorChoice::Auto,
            preview: 10,
        }
    }
}

/// Why a compilation did not succeed
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("could not read file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{count} semantic error(s) found")]
    Semantic { count: usize },

    /// Writing the report itself failed
    #[error("could not write report: {0}")]
    Output(#[from] io::Error),
}

/// Run every stage over `source` and return the analysis
///
/// Semantic diagnostics are part of the returned [`Analysis`]; only lexical
/// and syntax errors are `Err`.
pub fn compile(source: &str) -> Result<Analysis, CompileError> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    Ok(analyze(&program))
}

#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Success,
    Failure,
}

/// The compilation driver
pub struct Driver<W: Write> {
    config: DriverConfig,
    out: W,
    styled: bool,
}

impl<W: Write> Driver<W> {
    pub fn new(config: DriverConfig, out: W) -> Self {
        let styled = config.color.enabled();
        Driver {
            config,
            out,
            styled,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Read `path` and compile it
    pub fn compile_file(&mut self, path: &Path) -> Result<(), CompileError> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(source) => {
                let error = CompileError::Io {
                    path: path.to_path_buf(),
                    source,
                };
                self.separator("FILE ERROR", Tone::Failure)?;
                writeln!(self.out, "{}", error)?;
                return Err(error);
            }
        };

        writeln!(self.out, "File: {}", path.display())?;
        self.compile_source(&source)
    }

    /// Run the configured stages over `source`
    pub fn compile_source(&mut self, source: &str) -> Result<(), CompileError> {
        debug!(chars = source.chars().count(), stage = ?self.config.stage, "compiling");
        writeln!(self.out, "Size: {} characters", source.chars().count())?;

        // === Lexical Analysis ===
        self.separator("PHASE 1: LEXICAL ANALYSIS", Tone::Heading)?;
        let tokens = match tokenize(source) {
            Ok(tokens) => tokens,
            Err(error) => return self.fail("LEXICAL ERROR", error.into()),
        };

        if self.config.stage == Stage::Lex {
            writeln!(self.out, "{}", format_tokens(&tokens))?;
            return Ok(());
        }

        writeln!(self.out, "Lexical analysis completed")?;
        writeln!(self.out, "Tokens generated: {}", tokens.len())?;
        if self.config.verbose {
            writeln!(self.out, "\nFirst {} tokens:", self.config.preview)?;
            writeln!(self.out, "{}", token_preview(&tokens, self.config.preview))?;
        }

        // === Parsing ===
        self.separator("PHASE 2: SYNTAX ANALYSIS", Tone::Heading)?;
        let program = match parse(&tokens) {
            Ok(program) => program,
            Err(error) => return self.fail("SYNTAX ERROR", error.into()),
        };

        if self.config.stage == Stage::Parse {
            writeln!(self.out, "{}", ast_outline(&program))?;
            return Ok(());
        }

        writeln!(self.out, "Syntax analysis completed")?;
        if self.config.verbose {
            writeln!(self.out, "\nAST structure:")?;
            writeln!(self.out, "{}", ast_outline(&program))?;
        }

        // === Semantic Analysis ===
        self.separator("PHASE 3: SEMANTIC ANALYSIS", Tone::Heading)?;
        let analysis = analyze(&program);
        writeln!(self.out, "{}", symbol_table_report(&analysis.symbols))?;

        if analysis.is_ok() {
            writeln!(self.out, "\n{}", diagnostics_report(&analysis.diagnostics))?;
            self.separator("COMPILATION SUCCEEDED", Tone::Success)?;
            writeln!(self.out, "The program passed every phase")?;
            Ok(())
        } else {
            let count = analysis.diagnostics.len();
            writeln!(self.out, "\n{}", diagnostics_report(&analysis.diagnostics))?;
            self.separator("COMPILATION FAILED", Tone::Failure)?;
            writeln!(self.out, "Semantic errors: {}", count)?;
            Err(CompileError::Semantic { count })
        }
    }

    fn fail(&mut self, title: &str, error: CompileError) -> Result<(), CompileError> {
        debug!(%error, "stage failed");
        self.separator(title, Tone::Failure)?;
        writeln!(self.out, "{}", error)?;
        Err(error)
    }

    /// `---- TITLE ----` centered in the banner width, preceded by a blank line
    fn separator(&mut self, title: &str, tone: Tone) -> io::Result<()> {
        let padding = BANNER_WIDTH.saturating_sub(title.len() + 2) / 2;
        let dashes = "-".repeat(padding);
        let line = format!("{dashes} {title} {dashes}");
        let line = self.paint(line, tone);
        writeln!(self.out, "\n{}", line)
    }

    fn paint(&self, text: String, tone: Tone) -> String {
        if !self.styled {
            return text;
        }
        let content = style(text).bold();
        match tone {
            Tone::Heading => content.cyan().to_string(),
            Tone::Success => content.green().to_string(),
            Tone::Failure => content.red().to_string(),
        }
    }
}
