use std::io::{self, BufRead, Stdin, Stdout, Write};
use std::path::Path;

/// Decides whether an eligible file may be rewritten.
pub trait Confirm {
    fn confirm(&mut self, path: &Path) -> bool;
}

/// Lets every file through. Used when prompting is off.
pub struct Unconditional;

impl Confirm for Unconditional {
    fn confirm(&mut self, _path: &Path) -> bool {
        true
    }
}

/// Asks a yes/no question per file on `output` and reads one line of `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompter<io::StdinLock<'static>, Stdout> {
    /// A prompter on the process's terminal.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for Prompter<R, W> {
    /// Anything but an explicit yes counts as no, including a failed read or
    /// end of input.
    fn confirm(&mut self, path: &Path) -> bool {
        if write!(self.output, "update file: {} (Y/N)", path.display())
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&answer),
        }
    }
}

/// Matches the trimmed answer, case-sensitively, against the accepted forms
/// of yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES")
}
