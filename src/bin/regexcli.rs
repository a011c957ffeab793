//! `[AMBIENT]` the command-line test harness `spec.md` §1 names as an
//! out-of-scope collaborator ("The command-line test harness... [is]
//! treated as a collaborator: the core consumes a stack-like buffer and
//! emits diagnostic events, but their implementations are not specified").
//! This binary is one reasonable implementation of it: a thin `clap`
//! front end over the library, in the spirit of the teacher's own
//! `fn main()` entry points but using the same CLI framework larger crates
//! in the retrieval pack (`examples/foundry-rs-foundry`) use instead of
//! hand-parsing `std::env::args()`.

use clap::Parser;
use pt_regex::{compile, match_at, Mode, MatchStatus};

/// Compile a pattern and test it against one or more target strings.
#[derive(Parser, Debug)]
#[command(name = "regexcli", about = "Compile a pattern to a matcher graph and scan target strings")]
struct Cli {
    /// The regex pattern (printable ASCII; see the crate docs for the
    /// supported operators and the `$` wildcard departure from PCRE).
    pattern: String,

    /// One or more strings to scan for a match.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Byte offset to start scanning from.
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Emit per-stage diagnostic traces (rewritten pattern, postfix form,
    /// NFA, matcher-graph transitions, and per-byte match steps).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let mode = if cli.verbose { Mode::Verbose } else { Mode::Silent };

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .without_time()
            .init();
    }

    let matcher = compile(cli.pattern.as_bytes(), mode);
    if !matcher.is_valid() {
        eprintln!(
            "error: pattern {:?} failed to compile: {}",
            cli.pattern,
            matcher.compile_error().expect("invalid matcher always carries a compile error")
        );
        std::process::exit(1);
    }

    let mut any_failed = false;
    for target in &cli.targets {
        let result = match_at(&matcher, target.as_bytes(), cli.start, mode);
        match result.status {
            MatchStatus::Found => {
                println!(
                    "{target:?}: found [{}, {}) -> {:?}",
                    result.match_start,
                    result.match_end,
                    &target[result.match_start..result.match_end]
                );
            }
            MatchStatus::NotFound => {
                println!("{target:?}: not found");
                any_failed = true;
            }
            MatchStatus::InvalidInput => {
                println!("{target:?}: invalid input (empty text or out-of-range start)");
                any_failed = true;
            }
        }
    }

    pt_regex::destroy(matcher);

    if any_failed {
        std::process::exit(1);
    }
}
