//! DocQA: answer questions about a document with a hosted LLM.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docqa_chat::PromptType;
use docqa_runtime::{Orchestrator, QaRequest};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "docqa", version, about = "Ask questions about a document")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Answer a question about a file or inline text
    Ask {
        /// Question to answer
        #[arg(short, long)]
        question: String,
        /// Document to load (.pdf, .docx, .csv or plain text)
        #[arg(short, long, required_unless_present = "text")]
        file: Option<PathBuf>,
        /// Document text, used when no file is given
        #[arg(short, long)]
        text: Option<String>,
        /// default, detailed, concise or technical
        #[arg(short, long)]
        prompt_type: Option<String>,
    },
    /// Show the model that would be used, without checking credentials
    Describe,
    /// List available prompt types
    Prompts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let orchestrator = Orchestrator::new();

    match cli.command {
        Command::Ask {
            question,
            file,
            text,
            prompt_type,
        } => {
            let request = QaRequest {
                question,
                document_path: file.map(|p| p.to_string_lossy().into_owned()),
                document_text: text,
                prompt_type,
            };
            match orchestrator.answer(request).await {
                Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&orchestrator.describe())?);
        }
        Command::Prompts => {
            for prompt_type in PromptType::ALL {
                println!("{}", prompt_type);
            }
        }
    }

    Ok(())
}
