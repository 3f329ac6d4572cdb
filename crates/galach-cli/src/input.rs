//! Loading a query string from the three places a user can put one:
//! inline text takes precedence, then a file path, `-` meaning stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("query is required: pass it as a positional argument, via -q/--query, or '-' for stdin")]
    Missing,
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to read '{path}': {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn load_query(query_path: Option<&Path>, query_text: Option<&str>) -> Result<String, Error> {
    if let Some(text) = query_text {
        return Ok(text.to_string());
    }

    if let Some(path) = query_path {
        if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(Error::Stdin)?;
            return Ok(buf);
        }
        return fs::read_to_string(path).map_err(|source| Error::File {
            path: path.to_path_buf(),
            source,
        });
    }

    Err(Error::Missing)
}
