use crate::replace::ReplaceOptions;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::fmt::{Display, Formatter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The text to insert at the cursor, exactly as a suggestion list would
    /// supply it (it may already carry a prefix like `artist:"Name"`).
    #[arg(value_name = "insert")]
    pub(crate) insert: Option<String>,

    /// Zero-based character offset of the cursor in the query. Offsets past
    /// the end of the query clamp to the end, which is also the default.
    #[arg(long, short)]
    pub(crate) position: Option<usize>,

    /// Insert the text verbatim, without wrapping it in quote marks.
    #[arg(long)]
    pub(crate) no_quotation: bool,

    /// Append a trailing space when the insertion lands at the end of the
    /// query.
    #[arg(long)]
    pub(crate) add_space: bool,

    /// Print the token under the cursor instead of replacing it. No <insert>
    /// argument is needed.
    #[arg(long)]
    pub(crate) token_only: bool,

    /// Output format.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) output: OutputFormat,
}

impl Cli {
    pub(crate) fn replace_options(&self) -> ReplaceOptions {
        ReplaceOptions {
            quotation: !self.no_quotation,
            add_space: self.add_space,
        }
    }

    pub fn extra_validation(&self) -> bool {
        if self.insert.is_none() && !self.token_only {
            let _ = Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "an <insert> argument is required unless --token-only is set",
                )
                .print();
            return false;
        }
        true
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Print just the new query string (or, with --token-only, the token).
    Text,

    /// Print the full result as a JSON object with camelCase keys -- the
    /// shape a text-input integration consumes to reposition its caret.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let self_str = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        f.write_str(self_str)
    }
}
