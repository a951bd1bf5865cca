//! Replace the token under the cursor in a search-query string.
//!
//! A query is a run of whitespace-separated tokens, optionally quoted with
//! `"` or `'`, optionally shaped like `key:value` or `key:"value with
//! spaces"`. Given the raw text of an input field and a caret offset,
//! [`replace_text_at_position`] works out which run of characters the caret
//! is "in" -- quotes may be unbalanced, and apostrophes may masquerade as
//! quote marks -- and splices a suggestion over it with context-appropriate
//! quoting and spacing. [`token_at_position`] answers the companion
//! question: what should a suggestion lookup search on?
//!
//! ```
//! use sqe::{replace_text_at_position, ReplaceOptions};
//!
//! let r = replace_text_at_position("\"test\" \"two", "yes", 11, &ReplaceOptions::default());
//! assert_eq!(r.text, "\"test\" \"yes\"");
//! assert_eq!(r.new_end_position, 12);
//! ```
//!
//! Every call is independent and deterministic: no state, no I/O, nothing to
//! cancel. The library never fails; the worst case for a confusing query is
//! a broader-than-ideal replacement span.

use cli::{Cli, OutputFormat};
use std::io;
use std::io::{stdin, Read};

pub mod cli;

mod balance;
mod breaks;
mod compose;
mod mask;
mod replace;

pub use replace::{
    replace_text_at_position, token_at_position, ReplaceOptions, ReplaceOptionsBuilder, Replacement, TokenSpan,
};

/// Runs one CLI invocation against an in-memory query string, returning what
/// would be printed. Useful for driving the CLI workflow within-process.
pub fn run_in_memory(cli: &Cli, query: &str) -> String {
    let position = cli.position.unwrap_or_else(|| query.chars().count());

    if cli.token_only {
        let token = token_at_position(query, position);
        return match cli.output {
            OutputFormat::Text => token.text,
            OutputFormat::Json => serde_json::to_string(&token).unwrap(),
        };
    }

    let insert = cli.insert.as_deref().unwrap_or_default();
    let replaced = replace_text_at_position(query, insert, position, &cli.replace_options());
    match cli.output {
        OutputFormat::Text => replaced.text,
        OutputFormat::Json => serde_json::to_string(&replaced).unwrap(),
    }
}

/// Reads the query string from stdin and prints the result to stdout.
/// Returns `false` (after reporting to stderr) only when stdin can't be
/// read; the replacement itself has no failure mode.
pub fn run_stdio(cli: &Cli) -> bool {
    let mut query = String::new();
    if let Err(err) = read_query(&mut query) {
        eprintln!("error reading query from stdin: {err}");
        return false;
    }
    println!("{}", run_in_memory(cli, &query));
    true
}

fn read_query(query: &mut String) -> io::Result<()> {
    stdin().read_to_string(query)?;
    // editors hand us the field text verbatim; shells add a newline
    if query.ends_with('\n') {
        query.pop();
        if query.ends_with('\r') {
            query.pop();
        }
    }
    Ok(())
}
