//! covert-chess CLI: hide chess positions in plain text.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use covert_chess::alphabet::{self, Alphabet, Variant};
use covert_chess::codec::{self, SymbolSequence};
use covert_chess::config::{ALPHABET_ENV, CovertConfig};
use covert_chess::error::CodecError;
use covert_chess::interleave;
use covert_chess::links::LinkConfig;
use covert_chess::paths::CovertPaths;
use covert_chess::position::{Position, START_FEN};

#[derive(Parser)]
#[command(
    name = "covert-chess",
    version,
    about = "Encode chess positions as emoji and hide them in text"
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/covert-chess/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Unicode emoji-test.txt file that defines the alphabet.
    #[arg(long, global = true)]
    alphabet: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the starting position as FEN, emoji, and analysis link.
    #[command(alias = "newgame")]
    Start,

    /// Encode a FEN position as 25 emoji.
    #[command(alias = "encrypt")]
    Encode {
        /// Position in FEN, e.g. "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".
        fen: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Decode emoji (bare or mixed into a message) back to FEN.
    #[command(alias = "decrypt")]
    Decode {
        /// Emoji sequence or mixed message.
        text: String,
    },

    /// Hide a position inside a message.
    Mix {
        /// Emoji sequence or FEN.
        position: String,

        /// Message to hide the position in.
        #[arg(long)]
        message: String,
    },

    /// Pull the emoji out of a mixed message.
    #[command(alias = "unmix")]
    Extract {
        /// Mixed message.
        text: String,
    },

    /// Link to an analysis board for a position, to play the next move.
    #[command(alias = "show")]
    Move {
        /// Emoji sequence or FEN.
        position: String,
    },

    /// Link to a board editor, starting from a position or the initial setup.
    #[command(alias = "create")]
    Edit {
        /// Emoji sequence or FEN.
        position: Option<String>,
    },

    /// Show the alphabet entry for a single emoji.
    Info {
        /// A single emoji.
        symbol: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = CovertPaths::resolve()?;
    let config = match &cli.config {
        Some(path) => CovertConfig::load(path)?,
        None => CovertConfig::load_or_default(&paths)?,
    };
    let alphabet_path = config.alphabet_path(
        cli.alphabet.as_deref(),
        std::env::var_os(ALPHABET_ENV).map(PathBuf::from),
        &paths,
    );
    let links = &config.links;

    match cli.command {
        Commands::Start => {
            let alphabet = load_alphabet(&alphabet_path)?;
            let emoji = codec::encode_fen(alphabet, START_FEN)?;
            println!("FEN:\n{START_FEN}\n");
            println!("Emoji encoding:\n{emoji}\n");
            println!("Analysis board:\n{}", links.analysis_url(START_FEN));
        }

        Commands::Encode { fen, json } => {
            let alphabet = load_alphabet(&alphabet_path)?;
            let fen = fen.trim();
            let position = Position::from_fen(fen)?;
            let sequence = codec::encode(alphabet, &position)?;
            let emoji = sequence.render(alphabet)?;
            if json {
                let out = serde_json::json!({
                    "fen": fen,
                    "emoji": emoji,
                    "indices": sequence.indices(),
                    "analysis": links.analysis_url(fen),
                });
                println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
            } else {
                println!("Input FEN:\n{fen}\n");
                println!("Emoji encoding:\n{emoji}\n");
                println!("Analysis board:\n{}", links.analysis_url(fen));
            }
        }

        Commands::Decode { text } => {
            let alphabet = load_alphabet(&alphabet_path)?;
            // Accept mixed messages directly.
            let sequence = SymbolSequence::from_text(alphabet, &text)?;
            let emoji = sequence.render(alphabet)?;
            let fen = codec::decode(alphabet, &sequence)?.to_fen();
            println!("Input emoji encoding:\n{emoji}\n");
            println!("Decoded FEN position:\n{fen}\n");
            println!("Analysis board:\n{}", links.analysis_url(&fen));
        }

        Commands::Mix { position, message } => {
            let alphabet = load_alphabet(&alphabet_path)?;
            let position = position.trim();
            let sequence = if contains_symbols(alphabet, position) {
                SymbolSequence::from_text(alphabet, position)?
            } else {
                codec::encode(alphabet, &Position::from_fen(position)?)?
            };
            let mixed = interleave::mix_sequence(alphabet, &sequence, &message)?;
            println!("Passed position:\n{position}\n");
            println!("Mixed message:\n{mixed}");
        }

        Commands::Extract { text } => {
            let alphabet = load_alphabet(&alphabet_path)?;
            let emoji = interleave::extract(alphabet, &text);
            println!("Input message:\n{}\n", text.trim());
            if emoji.is_empty() {
                println!("No emoji found in message.");
            } else {
                println!("Extracted emoji:\n{emoji}");
            }
        }

        Commands::Move { position } => {
            let alphabet = load_alphabet(&alphabet_path)?;
            let fen = position_fen(alphabet, position.trim())?;
            println!("Analysis board:\n{}", links.analysis_url(&fen));
        }

        Commands::Edit { position } => {
            let fen = match position.as_deref().map(str::trim) {
                Some(arg) => Some(position_fen(load_alphabet(&alphabet_path)?, arg)?),
                None => None,
            };
            print_editor(links, fen.as_deref());
        }

        Commands::Info { symbol, json } => {
            let alphabet = load_alphabet(&alphabet_path)?;
            let (index, variant) =
                alphabet
                    .describe(&symbol)
                    .ok_or_else(|| CodecError::UnknownSymbol {
                        symbol: symbol.trim().to_string(),
                    })?;
            let entry = alphabet.metadata_at(index)?;
            if json {
                let out = serde_json::json!({
                    "index": index,
                    "matched": variant,
                    "entry": entry,
                });
                println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
            } else {
                println!("Emoji {index}: {}", entry.symbol);
                if variant == Variant::Loose {
                    println!("(matched less-qualified form {})", alphabet.loose_at(index)?);
                }
                println!("Name: {}", entry.name);
                println!("Group: {}", entry.category);
                println!("Subgroup: {}", entry.subcategory);
                println!("Escape Sequence: {}", entry.escape);
            }
        }
    }

    Ok(())
}

fn load_alphabet(path: &Path) -> Result<&'static Alphabet> {
    Ok(alphabet::shared(path)?)
}

fn contains_symbols(alphabet: &Alphabet, text: &str) -> bool {
    alphabet.scan(text).next().is_some()
}

/// FEN for a command argument that is either emoji (possibly mixed into a
/// message) or FEN. FEN must also fit the encoding.
fn position_fen(alphabet: &Alphabet, arg: &str) -> Result<String> {
    let position = if contains_symbols(alphabet, arg) {
        let sequence = SymbolSequence::from_text(alphabet, arg)?;
        codec::decode(alphabet, &sequence)?
    } else {
        let position = Position::from_fen(arg)?;
        codec::encode(alphabet, &position)?;
        position
    };
    Ok(position.to_fen())
}

fn print_editor(links: &LinkConfig, fen: Option<&str>) {
    match fen {
        Some(fen) => println!("Board editor for passed position:\n{}", links.editor_url(Some(fen))),
        None => println!("Board editor (from starting position):\n{}", links.editor_url(None)),
    }
}
