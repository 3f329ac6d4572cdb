//! Show the token stream a query lexes into.

use std::path::PathBuf;

use crate::input::load_query;

pub struct TokenizeArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
}

pub fn run(args: TokenizeArgs) {
    let source = load_query(args.query_path.as_deref(), args.query_text.as_deref()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let tokens = galach_lexer::tokenize(&source);

    if args.json {
        let rendered = serde_json::to_string_pretty(&tokens).expect("TokenSequence serializes");
        println!("{rendered}");
        return;
    }

    for token in tokens.tokens() {
        println!(
            "{:>12} @ {:<4} {:?}",
            format!("{:?}", token.kind()),
            token.position(),
            token.lexeme()
        );
    }
}
