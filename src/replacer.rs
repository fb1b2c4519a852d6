use crate::config::ReplaceConfig;
use crate::errors::{Error, Result};
use crate::prompt::{Confirm, Prompter, Unconditional};
use crate::walker::{DirWalk, Eligible, FsWalk};
use memchr::memmem::Finder;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// Core engine for literal find-and-replace on whole files.
///
/// A `Replacer` holds a precompiled searcher for the search sequence and the
/// replacement bytes. Both are fixed for its lifetime.
pub struct Replacer {
    finder: Finder<'static>,
    replacement: Vec<u8>,
}

/// The result of processing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessResult {
    /// The number of occurrences replaced.
    pub changes: usize,
}

/// Totals for one run over a tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Files that passed the ignore predicate.
    pub eligible: usize,
    /// Eligible files the confirmation gate turned down.
    pub declined: usize,
    /// Files read, substituted and written back.
    pub rewritten: usize,
    /// Occurrences replaced across all rewritten files.
    pub changes: usize,
}

impl Replacer {
    /// Creates a new `Replacer` from a validated `ReplaceConfig`.
    pub fn new(config: &ReplaceConfig) -> Self {
        Self {
            finder: Finder::new(&config.search).into_owned(),
            replacement: config.replacement.clone(),
        }
    }

    /// Rewrites a single file with every occurrence replaced.
    ///
    /// The file is always written back, even when nothing matched. Writing
    /// truncates the existing file in place; a file that vanished in between
    /// is recreated with mode `0644`.
    pub fn process_file(&self, path: &Path) -> Result<ProcessResult> {
        let mut file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
        drop(file);

        let (new_content, changes) = substitute(&content, &self.finder, &self.replacement);

        write_file(path, &new_content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(ProcessResult { changes })
    }
}

/// Replaces every non-overlapping occurrence of `needle` in `haystack`,
/// scanning left to right. Returns the new buffer and the number of matches.
///
/// Replacement text is never rescanned. An empty `needle` matches nothing.
pub fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> (Vec<u8>, usize) {
    substitute(haystack, &Finder::new(needle), replacement)
}

fn substitute(haystack: &[u8], finder: &Finder<'_>, replacement: &[u8]) -> (Vec<u8>, usize) {
    let needle_len = finder.needle().len();
    if needle_len == 0 {
        return (haystack.to_vec(), 0);
    }

    let mut output = Vec::with_capacity(haystack.len());
    let mut last = 0;
    let mut count = 0;
    for start in finder.find_iter(haystack) {
        output.extend_from_slice(&haystack[last..start]);
        output.extend_from_slice(replacement);
        last = start + needle_len;
        count += 1;
    }
    output.extend_from_slice(&haystack[last..]);
    (output, count)
}

fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.flush()
}

/// Drives a walk through the gate and the replacer, one file at a time.
///
/// The first error from any stage ends the run. Files rewritten before it
/// stay rewritten.
pub fn replace_tree<W, C>(
    walk: W,
    gate: &mut C,
    replacer: &Replacer,
    verbose: bool,
) -> Result<RunStats>
where
    W: DirWalk,
    C: Confirm + ?Sized,
{
    let mut stats = RunStats::default();

    for path in Eligible::new(walk) {
        let path = path?;
        stats.eligible += 1;

        if !gate.confirm(&path) {
            stats.declined += 1;
            continue;
        }

        let result = replacer.process_file(&path)?;
        stats.rewritten += 1;
        stats.changes += result.changes;
        if verbose {
            println!("Modified {} ({} changes)", path.display(), result.changes);
        }
    }

    Ok(stats)
}

/// The main entry point: replaces across the current working directory.
pub fn run_replace(config: &ReplaceConfig) -> Result<RunStats> {
    let root = env::current_dir().map_err(Error::CurrentDir)?;
    run_replace_in(&root, config)
}

/// Replaces across the tree rooted at `root`, prompting on the terminal when
/// the configuration asks for it.
pub fn run_replace_in(root: &Path, config: &ReplaceConfig) -> Result<RunStats> {
    let replacer = Replacer::new(config);
    let mut gate: Box<dyn Confirm> = if config.prompt {
        Box::new(Prompter::stdio())
    } else {
        Box::new(Unconditional)
    };

    let stats = replace_tree(FsWalk::new(root), gate.as_mut(), &replacer, config.verbose)?;

    if config.verbose {
        println!("\n{}", "-".repeat(50));
        println!("Files eligible : {}", stats.eligible);
        println!("Files skipped  : {}", stats.declined);
        println!("Files rewritten: {}", stats.rewritten);
        println!("Total edits    : {}", stats.changes);
    }

    Ok(stats)
}
