use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
mod input;
use phonevault::{
    FileKeySlot, SymmetricKey, decrypt, default_key_slot, encrypt, load_or_generate, regenerate,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

fn resolve_slot(path: Option<PathBuf>) -> Result<FileKeySlot> {
    match path {
        Some(p) => Ok(FileKeySlot::new(p)),
        None => default_key_slot(),
    }
}

#[derive(Debug, Parser)]
#[command(name = "phonevault")]
#[command(
    version,
    about = "Encrypt and decrypt phone numbers with a locally stored AES-256 key."
)]
struct Cli {
    /// Path to the key file
    #[arg(long, global = true, value_name = "PATH", env = "PHONEVAULT_KEY_STORE")]
    key_store: Option<PathBuf>,

    /// Use this 64-character hex key instead of the key file
    #[arg(long, global = true, value_name = "HEX", env = "PHONEVAULT_KEY", hide_env_values = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encrypts a phone number (reads stdin if omitted)
    Encrypt { phone: Option<String> },

    /// Decrypts an encrypted phone number (reads stdin if omitted)
    Decrypt { token: Option<String> },

    /// Manages the encryption key
    #[command(subcommand)]
    Key(KeyCommands),
}

#[derive(Debug, Subcommand)]
enum KeyCommands {
    /// Prints the current key, generating one if none is stored
    Show,

    /// Replaces the stored key; existing tokens can no longer be decrypted
    Regenerate,
}

impl Cli {
    fn key(&self) -> Result<SymmetricKey> {
        if let Some(hex) = &self.key {
            let hex = Zeroizing::new(hex.clone());
            return SymmetricKey::from_hex(&hex).context("invalid --key");
        }

        let slot = resolve_slot(self.key_store.clone())?;
        debug!(path = %slot.path().display(), "using key file");
        load_or_generate(&slot)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Cli::parse();

    match &args.command {
        Commands::Encrypt { phone } => {
            let phone = input::read_value(phone.clone(), "a phone number to encrypt")?;
            let key = args.key()?;
            let token = encrypt(&phone, &key).context("failed to encrypt phone number")?;
            println!("{token}");
        }
        Commands::Decrypt { token } => {
            let token = input::read_value(token.clone(), "encrypted text to decrypt")?;
            let key = args.key()?;
            let phone = decrypt(token.trim(), &key).context("failed to decrypt phone number")?;
            let phone = Zeroizing::new(phone);
            println!("{}", phone.as_str());
        }
        Commands::Key(KeyCommands::Show) => {
            let key = args.key()?;
            println!("{}", key.to_hex().as_str());
        }
        Commands::Key(KeyCommands::Regenerate) => {
            let slot = resolve_slot(args.key_store.clone())?;
            let key = regenerate(&slot)?;
            println!("{}", key.to_hex().as_str());
            println!("new key saved to {}", slot.path().display());
        }
    }

    Ok(())
}
