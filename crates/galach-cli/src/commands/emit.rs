//! Parse a query and render it back to Galach surface syntax.

use std::path::PathBuf;

use crate::input::load_query;

pub struct EmitArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
}

pub fn run(args: EmitArgs) {
    let source = load_query(args.query_path.as_deref(), args.query_text.as_deref()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let tree = galach_parser::parse(galach_lexer::tokenize(&source));
    println!("{}", galach_gen::generate(&tree.root));
}
