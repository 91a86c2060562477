//! CLI module for H.E.R.A.
//!
//! Provides command-line parsing for the hera-server binary. Uses clap
//! for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand, ValueEnum};

/// H.E.R.A - HIPAA Evidence Retrieval Assistant
///
/// Retrieval-augmented question answering over HIPAA regulatory text.
#[derive(Parser, Debug)]
#[command(
    name = "hera-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "H.E.R.A - HIPAA Evidence Retrieval Assistant",
    long_about = "Retrieval-augmented question answering over HIPAA regulatory text.\n\
                  Build a corpus from cleaned source documents, then ask questions\n\
                  answered strictly from the retrieved regulatory context.",
    after_help = "EXAMPLES:\n    \
                  hera-server build                               # Chunk, embed, and index the sources\n    \
                  hera-server search \"minimum necessary\" -k 5     # Retrieval only\n    \
                  hera-server ask \"What is the Security Rule?\"    # Full question answering\n    \
                  hera-server ask --faq breach-notification       # One of the common questions"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the corpus and index artifacts from the source directory
    ///
    /// Runs the offline pipeline: chunk every *.txt source at paragraph,
    /// sentence, and sentence-window granularity, embed all chunks, and
    /// write both artifacts atomically.
    Build,

    /// Retrieve the most similar chunks for a query (no generation)
    Search {
        /// The query text
        query: String,

        /// Number of chunks to retrieve (defaults to HERA_TOP_K)
        #[arg(short)]
        k: Option<usize>,
    },

    /// Ask a question and get a grounded, cited answer
    Ask {
        /// The question text (omit when using --faq)
        question: Option<String>,

        /// Ask one of the common questions instead of free text
        #[arg(long, value_enum, conflicts_with = "question")]
        faq: Option<FaqTopic>,

        /// Number of context chunks to retrieve (defaults to HERA_TOP_K)
        #[arg(short)]
        k: Option<usize>,
    },
}

/// Canned common questions, a finite label-to-query lookup.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqTopic {
    /// The Minimum Necessary standard and its exceptions
    MinimumNecessary,
    /// Privacy Rule vs Security Rule
    PrivacyVsSecurity,
    /// Breach notification requirements
    BreachNotification,
    /// Key patient rights
    PatientRights,
    /// Daily compliance practices
    DailyAwareness,
    /// Penalties and consequences of violations
    Consequences,
}

impl FaqTopic {
    /// The full question submitted for this topic.
    pub fn query(self) -> &'static str {
        match self {
            FaqTopic::MinimumNecessary => {
                "What is the HIPAA Minimum Necessary standard and when does it NOT apply?"
            }
            FaqTopic::PrivacyVsSecurity => {
                "What is the difference between the HIPAA Privacy Rule and Security Rule?"
            }
            FaqTopic::BreachNotification => {
                "When does HIPAA require breach notification and what must be included?"
            }
            FaqTopic::PatientRights => "What are the key patient rights under HIPAA?",
            FaqTopic::DailyAwareness => {
                "What are the important daily practices for HIPAA compliance in healthcare?"
            }
            FaqTopic::Consequences => {
                "What are the penalties and consequences for HIPAA violations?"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_faq_topic_has_a_query() {
        for topic in [
            FaqTopic::MinimumNecessary,
            FaqTopic::PrivacyVsSecurity,
            FaqTopic::BreachNotification,
            FaqTopic::PatientRights,
            FaqTopic::DailyAwareness,
            FaqTopic::Consequences,
        ] {
            assert!(!topic.query().is_empty());
        }
    }

    #[test]
    fn test_ask_accepts_faq_without_question() {
        let cli = Cli::try_parse_from(["hera-server", "ask", "--faq", "minimum-necessary"]).unwrap();
        match cli.command {
            Commands::Ask { question, faq, .. } => {
                assert!(question.is_none());
                assert_eq!(faq, Some(FaqTopic::MinimumNecessary));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
