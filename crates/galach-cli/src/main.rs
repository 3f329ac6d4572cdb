mod cli;
mod commands;
mod input;

use cli::{AstParams, EmitParams, TokenizeParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("tokenize", m)) => {
            let params = TokenizeParams::from_matches(m);
            commands::tokenize::run(params.into());
        }
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("emit", m)) => {
            let params = EmitParams::from_matches(m);
            commands::emit::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
