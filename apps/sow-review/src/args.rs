use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "sow-review")]
#[command(version, about = "Automated Scope of Work reviewer")]
pub struct Args {
    /// Path to the SOW PDF or text file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Report file; the extension picks the format (.json, .md, .txt, .pdf)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Include the language-model review
    #[arg(long)]
    pub llm: bool,

    /// Print the risk score with the summary
    #[arg(long)]
    pub risk: bool,

    /// Review configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reference template (JSON), overriding the config
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Vocabulary of synonyms, ambiguous terms and contradiction categories (TOML)
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,

    /// API key for the language-model service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name, overriding the config
    #[arg(long, env = "DEFAULT_MODEL")]
    pub model: Option<String>,

    /// Completion token limit, overriding the config
    #[arg(long, env = "MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature, overriding the config
    #[arg(long, env = "TEMPERATURE")]
    pub temperature: Option<f32>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
