//! Shared helpers for the `bert-tokenize` binary.

use std::io::Read;
use std::path::Path;

use crate::config::TokenizerConfig;
use crate::error::TokenizerError;

/// Initialize tracing/logging to stderr.
///
/// If `disable` is true, no output is produced.
/// Otherwise respects `RUST_LOG` env var, defaulting to WARN.
pub fn init_logging(disable: bool) {
    use tracing_subscriber::EnvFilter;

    if disable {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read input text from one of: prompt string, file path, or stdin.
pub fn read_input(
    prompt: Option<&str>,
    file: Option<&Path>,
    use_stdin: bool,
) -> Result<String, String> {
    if let Some(text) = prompt {
        return Ok(text.to_string());
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e));
    }

    if use_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(buf);
    }

    Err("No input provided. Use --prompt, --file, or --stdin".to_string())
}

/// Command-line overrides applied on top of a config file (or the defaults).
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub cased: bool,
    pub no_chinese_chars: bool,
    pub never_split: Vec<String>,
    pub max_len: Option<usize>,
}

/// Load the tokenizer config from `path` if given, then apply CLI overrides.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<TokenizerConfig, TokenizerError> {
    let mut config = match path {
        Some(path) => TokenizerConfig::from_file(path)?,
        None => TokenizerConfig::default(),
    };

    if overrides.cased {
        config.do_lower_case = false;
    }
    if overrides.no_chinese_chars {
        config.tokenize_chinese_chars = false;
    }
    config.never_split.extend(overrides.never_split.iter().cloned());
    if let Some(max_len) = overrides.max_len {
        config.model_max_length = max_len;
    }

    config.validate()?;
    Ok(config)
}
