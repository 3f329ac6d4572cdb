//! Dispatch logic: extract params from `ArgMatches` and convert to command
//! args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::emit::EmitArgs;
use crate::commands::tokenize::TokenizeArgs;

pub struct TokenizeParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
}

impl TokenizeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            json: m.get_flag("json"),
        }
    }
}

impl From<TokenizeParams> for TokenizeArgs {
    fn from(p: TokenizeParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            json: p.json,
        }
    }
}

pub struct AstParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into `ColorChoice`.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

pub struct EmitParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
        }
    }
}
