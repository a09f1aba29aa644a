//! Data capture command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use octofhir_datacapture::cli::{answers, input, logger, output, validate};
use std::path::PathBuf;

/// FHIR questionnaire data capture tool
#[derive(Parser)]
#[command(name = "datacapture")]
#[command(author, version, about = "FHIR questionnaire response tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t, global = true)]
    format: output::OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output
    #[arg(long, value_enum, default_value_t, global = true)]
    color: output::ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a QuestionnaireResponse against its Questionnaire
    Validate {
        /// Questionnaire JSON file
        #[arg(short, long)]
        questionnaire: PathBuf,

        /// QuestionnaireResponse JSON file
        #[arg(short, long)]
        response: PathBuf,

        /// Message catalog JSON file overriding the English messages
        #[arg(short, long)]
        messages: Option<PathBuf>,
    },

    /// List the answers of a QuestionnaireResponse
    Answers {
        /// Questionnaire JSON file
        #[arg(short, long)]
        questionnaire: PathBuf,

        /// QuestionnaireResponse JSON file
        #[arg(short, long)]
        response: PathBuf,
    },
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Validate {
            questionnaire,
            response,
            messages,
        } => {
            let messages = input::load_messages(messages.as_deref())?.install()?;
            let config = validate::ValidateConfig {
                questionnaire,
                response,
                messages,
                verbose: cli.verbose,
                output_format: cli.format,
                output_file: cli.output,
            };
            validate::validate(config)
        }

        Commands::Answers {
            questionnaire,
            response,
        } => {
            let config = answers::AnswersConfig {
                questionnaire,
                response,
                output_format: cli.format,
                output_file: cli.output,
            };
            answers::answers(config).map(|()| true)
        }
    }
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(cli.color);
    logger::init(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            std::process::exit(1);
        }
    }
}
