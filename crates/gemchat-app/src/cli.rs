use std::path::PathBuf;

use clap::Parser;
use gemchat_common::{ContextPolicy, SystemInstructionMode};
use gemchat_config::GemchatConfig;

/// gemchat: a terminal chat with a Gemini model.
#[derive(Parser, Debug)]
#[command(name = "gemchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Model id, e.g. gemini-2.0-flash.
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// System instruction mode (none, native, simulated).
    #[arg(long)]
    pub mode: Option<SystemInstructionMode>,

    /// System instruction text.
    #[arg(short = 's', long)]
    pub system: Option<String>,

    /// How much of the transcript the model sees (full, latest).
    #[arg(long)]
    pub context: Option<ContextPolicy>,

    /// Let the model run code server-side.
    #[arg(long)]
    pub code_execution: bool,

    /// Print each reply part (code, results) separately.
    #[arg(long)]
    pub show_parts: bool,

    /// Print the transcript on exit.
    #[arg(long)]
    pub print_history: bool,

    /// Key file with a `name:secret` first line.
    #[arg(long)]
    pub key_file: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Layer command-line values over the loaded config.
    pub fn apply_to(&self, config: &mut GemchatConfig) {
        if let Some(model) = &self.model {
            config.provider.model = model.clone();
        }
        if let Some(mode) = self.mode {
            config.session.mode = mode;
        }
        if let Some(system) = &self.system {
            config.session.system_instruction = Some(system.clone());
        }
        if let Some(context) = self.context {
            config.session.context = context;
        }
        if let Some(key_file) = &self.key_file {
            config.credentials.key_file = key_file.display().to_string();
        }
        config.session.code_execution |= self.code_execution;
        config.display.show_parts |= self.show_parts;
        config.display.print_history |= self.print_history;
    }

    /// `tracing` directive for the gemchat crates.
    pub fn log_directive(&self, config: &GemchatConfig) -> String {
        let level = self
            .log_level
            .as_deref()
            .unwrap_or(config.logging.level.as_directive());
        format!("gemchat={}", level.to_ascii_lowercase())
    }
}
