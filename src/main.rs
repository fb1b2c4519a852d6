//! The main entry point for the `subst` command-line application.

use std::process;
use subst::cli;
use subst::config::ReplaceConfig;
use subst::replacer;

fn main() {
    let args = cli::parse_args();

    let result = ReplaceConfig::from_args(args).and_then(|config| replacer::run_replace(&config));

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
