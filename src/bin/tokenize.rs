//! bert-tokenize: Tokenize text with a BERT WordPiece vocabulary.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use bert_tokenizer::cli::{self, ConfigOverrides};
use bert_tokenizer::{BertTokenizer, InputBuilder, Vocab};

#[derive(Parser)]
#[command(name = "bert-tokenize", about = "Tokenize text with a BERT WordPiece vocabulary")]
struct Args {
    /// Path to vocab.txt (one token per line)
    #[arg(short = 'v', long)]
    vocab: PathBuf,

    /// Optional tokenizer_config.json
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Text to tokenize
    #[arg(short = 'p', long, conflicts_with_all = ["file", "stdin"])]
    prompt: Option<String>,

    /// Read text from file
    #[arg(short = 'f', long, conflicts_with = "stdin")]
    file: Option<PathBuf>,

    /// Read text from stdin
    #[arg(long)]
    stdin: bool,

    /// Keep case and accents
    #[arg(long)]
    cased: bool,

    /// Don't isolate CJK ideographs
    #[arg(long)]
    no_chinese_chars: bool,

    /// Extra token to keep intact (repeatable)
    #[arg(long = "never-split", value_name = "TOKEN")]
    never_split: Vec<String>,

    /// Maximum encoded length including [CLS]/[SEP]
    #[arg(long)]
    max_len: Option<usize>,

    /// Treat each non-empty input line as a separate text and emit a padded
    /// batch as JSON
    #[arg(long, conflicts_with_all = ["ids", "show_count", "no_special", "output_format"])]
    lines: bool,

    /// Output only token IDs in list format: [1, 2, 3]
    #[arg(long)]
    ids: bool,

    /// Print total token count
    #[arg(long)]
    show_count: bool,

    /// Don't add [CLS]/[SEP]
    #[arg(long)]
    no_special: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text", value_parser = validate_output_format)]
    output_format: String,

    /// Suppress all logging
    #[arg(long)]
    log_disable: bool,
}

fn validate_output_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("Unknown output format '{}'. Options: text, json", s)),
    }
}

#[derive(Serialize)]
struct TokenEntry<'a> {
    id: u32,
    text: &'a str,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    tokens: Vec<TokenEntry<'a>>,
    count: usize,
}

fn main() {
    let args = Args::parse();
    cli::init_logging(args.log_disable);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = cli::read_input(args.prompt.as_deref(), args.file.as_deref(), args.stdin)?;

    let overrides = ConfigOverrides {
        cased: args.cased,
        no_chinese_chars: args.no_chinese_chars,
        never_split: args.never_split.clone(),
        max_len: args.max_len,
    };
    let config = cli::resolve_config(args.config.as_deref(), &overrides)?;
    let vocab = Arc::new(Vocab::from_file(&args.vocab)?);
    let builder = InputBuilder::new(BertTokenizer::new(vocab, config)?)?;

    if args.lines {
        let texts: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();
        let batch = builder.encode_batch(&texts)?;
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    let encoding = builder.encode(&input)?;
    let (ids, tokens): (&[u32], Vec<&str>) = if args.no_special {
        let n = encoding.input_ids.len();
        (
            &encoding.input_ids[1..n - 1],
            encoding.tokens.iter().map(String::as_str).collect(),
        )
    } else {
        let config = builder.tokenizer().config();
        let mut tokens = Vec::with_capacity(encoding.tokens.len() + 2);
        tokens.push(config.cls_token.as_str());
        tokens.extend(encoding.tokens.iter().map(String::as_str));
        tokens.push(config.sep_token.as_str());
        (encoding.input_ids.as_slice(), tokens)
    };

    match args.output_format.as_str() {
        "json" => {
            let entries: Vec<TokenEntry> = ids
                .iter()
                .zip(&tokens)
                .map(|(&id, &text)| TokenEntry { id, text })
                .collect();
            let output = JsonOutput {
                count: entries.len(),
                tokens: entries,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            if args.ids {
                let id_strs: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                println!("[{}]", id_strs.join(", "));
            } else {
                for (id, text) in ids.iter().zip(&tokens) {
                    println!("{:>5} -> '{}'", id, text);
                }
            }

            if args.show_count {
                println!("Total number of tokens: {}", ids.len());
            }
        }
    }

    Ok(())
}
