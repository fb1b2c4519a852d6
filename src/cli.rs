use clap::Parser;
use std::ffi::OsString;

/// Replace a literal byte sequence in every file under the current directory.
///
/// Entries whose name starts with `.` or `_`, and entries named `vendor`, are
/// skipped; ignored directories are not descended into.
#[derive(Parser, Debug)]
#[command(
    name = "subst",
    author,
    version,
    about = "Replace a literal string in every file under the current directory",
    long_about = "subst - in-place literal replacement across a directory tree.

Walks the current directory in lexical order and rewrites every file,
replacing each non-overlapping occurrence of SEARCH with REPLACEMENT.
Hidden entries (.*), underscore entries (_*) and `vendor` are skipped.
Symbolic links are never followed.

EXAMPLES:
  subst foo bar          # Replace foo with bar everywhere
  subst -p oldName new   # Ask before touching each file
  subst 'DEBUG ' ''      # Delete every occurrence"
)]
pub struct Args {
    /// Ask for confirmation before rewriting each file.
    #[arg(short, long)]
    pub prompt: bool,

    /// Print each rewritten file and a summary when done.
    #[arg(short, long)]
    pub verbose: bool,

    /// The literal text to search for. Must not be empty.
    pub search: OsString,

    /// The literal text to substitute for each match. May be empty.
    pub replacement: OsString,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}
