//! Plain-text reports for each stage
//!
//! Every formatter returns a `String` with no styling; the driver decides
//! whether to color it.

use crate::parser::ast::Program;
use crate::parser::lexer::Token;
use crate::semantic::{SemanticError, SymbolTable};

const RULE_WIDTH: usize = 80;

fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// First `limit` tokens, numbered from 1, plus a line counting the rest
pub fn token_preview(tokens: &[Token], limit: usize) -> String {
    let mut lines: Vec<String> = tokens
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, token)| format!("  {}. {}", i + 1, token))
        .collect();

    if tokens.len() > limit {
        lines.push(format!("  ... and {} more", tokens.len() - limit));
    }

    lines.join("\n")
}

/// Program summary followed by one line per top-level declaration
pub fn ast_outline(program: &Program) -> String {
    let mut lines = vec![program.to_string()];
    lines.extend(program.nodes.iter().map(|node| format!("  {}", node)));
    lines.join("\n")
}

/// Global variables and functions, each in declaration order
pub fn symbol_table_report(symbols: &SymbolTable) -> String {
    let mut lines = vec![
        rule('=', RULE_WIDTH),
        "SYMBOL TABLE".to_string(),
        rule('=', RULE_WIDTH),
        String::new(),
        "--- Global Variables ---".to_string(),
    ];

    let globals: Vec<_> = symbols.globals().collect();
    if globals.is_empty() {
        lines.push("(none)".to_string());
    } else {
        lines.push(format!("{:<20} {}", "Name", "Type"));
        lines.push(rule('-', 35));
        for (name, ty) in globals {
            lines.push(format!("{:<20} {}", name, ty));
        }
    }

    lines.push(String::new());
    lines.push("--- Functions ---".to_string());

    let functions: Vec<_> = symbols.functions().collect();
    if functions.is_empty() {
        lines.push("(none)".to_string());
    } else {
        lines.push(format!("{:<20} {:<15} {}", "Name", "Return Type", "Parameters"));
        lines.push(rule('-', 65));
        for (name, sig) in functions {
            let params = if sig.params.is_empty() {
                "(no parameters)".to_string()
            } else {
                sig.params
                    .iter()
                    .map(|p| p.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            lines.push(format!("{:<20} {:<15} {}", name, sig.return_type.name(), params));
        }
    }

    lines.push(String::new());
    lines.push(rule('=', RULE_WIDTH));
    lines.join("\n")
}

/// Numbered list of diagnostics
pub fn diagnostics_report(diagnostics: &[SemanticError]) -> String {
    if diagnostics.is_empty() {
        return "No semantic errors found".to_string();
    }

    let mut lines = vec![
        rule('=', RULE_WIDTH),
        "SEMANTIC ERRORS".to_string(),
        rule('=', RULE_WIDTH),
    ];
    lines.extend(
        diagnostics
            .iter()
            .enumerate()
            .map(|(i, error)| format!("{}. {}", i + 1, error)),
    );
    lines.push(rule('=', RULE_WIDTH));
    lines.join("\n")
}
