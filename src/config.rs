use crate::cli::Args;
use crate::errors::{Error, Result};
use std::ffi::OsString;

/// Configuration for a replace run.
///
/// Built once from the command line and passed by reference to every stage,
/// so the search/replacement pair cannot change mid-walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceConfig {
    /// The literal byte sequence to search for. Never empty.
    pub search: Vec<u8>,
    /// The literal byte sequence substituted for each match. May be empty.
    pub replacement: Vec<u8>,
    /// Ask before rewriting each eligible file.
    pub prompt: bool,
    /// Report each rewritten file and a closing summary.
    pub verbose: bool,
}

impl ReplaceConfig {
    /// Creates a validated `ReplaceConfig`.
    ///
    /// An empty search sequence would match at every byte boundary, so it is
    /// rejected with `Error::EmptyPattern`.
    pub fn new(
        search: impl Into<Vec<u8>>,
        replacement: impl Into<Vec<u8>>,
        prompt: bool,
        verbose: bool,
    ) -> Result<Self> {
        let search = search.into();
        if search.is_empty() {
            return Err(Error::EmptyPattern);
        }
        Ok(Self {
            search,
            replacement: replacement.into(),
            prompt,
            verbose,
        })
    }

    /// Builds the configuration from parsed command-line arguments.
    pub fn from_args(args: Args) -> Result<Self> {
        Self::new(
            os_bytes(args.search),
            os_bytes(args.replacement),
            args.prompt,
            args.verbose,
        )
    }
}

/// Takes the raw bytes of an OS argument without any re-encoding.
#[cfg(unix)]
fn os_bytes(arg: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    arg.into_vec()
}

#[cfg(not(unix))]
fn os_bytes(arg: OsString) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_empty_search_is_rejected() {
        let err = ReplaceConfig::new("", "x", false, false).unwrap_err();
        assert!(matches!(err, Error::EmptyPattern));
    }

    #[test]
    fn test_empty_replacement_is_allowed() {
        let cfg = ReplaceConfig::new("foo", "", false, false).unwrap();
        assert_eq!(cfg.search, b"foo");
        assert!(cfg.replacement.is_empty());
    }

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from(["subst", "-p", "foo", "bar"]).unwrap();
        let cfg = ReplaceConfig::from_args(args).unwrap();
        assert_eq!(cfg, ReplaceConfig::new("foo", "bar", true, false).unwrap());
    }

    #[test]
    fn test_from_args_rejects_empty_search() {
        let args = Args::try_parse_from(["subst", "", "bar"]).unwrap();
        assert!(matches!(
            ReplaceConfig::from_args(args),
            Err(Error::EmptyPattern)
        ));
    }
}
