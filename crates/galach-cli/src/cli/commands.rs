//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("galach")
        .about("Forgiving query-string parser")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokenize_command())
        .subcommand(ast_command())
        .subcommand(emit_command())
}

/// Show the token stream a query lexes into.
pub fn tokenize_command() -> Command {
    Command::new("tokenize")
        .about("Show the token stream a query lexes into")
        .after_help(
            r#"EXAMPLES:
  galach tokenize 'foo AND bar'
  galach tokenize -q 'field:(a OR b)' --json"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(json_arg())
}

/// Parse a query and show its AST plus any corrections made.
pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Parse a query and show its AST plus any corrections")
        .after_help(
            r#"EXAMPLES:
  galach ast 'foo AND (bar OR -baz)'
  galach ast -q '+must NOT this' --json
  galach ast 'AND foo' --color=always"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
        .arg(json_arg())
        .arg(color_arg())
}

/// Parse a query and render it back to Galach surface syntax.
pub fn emit_command() -> Command {
    Command::new("emit")
        .about("Parse a query and render it back to Galach surface syntax")
        .after_help(
            r#"EXAMPLES:
  galach emit 'foo    AND    bar'
  galach emit -q 'field:( a   b )'"#,
        )
        .arg(query_path_arg())
        .arg(query_text_arg())
}
