//! Command line surface of `passforge`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use passforge::config::Config;
use passforge::PasswordOptions;

#[derive(Parser, Debug)]
#[command(
    name = "passforge",
    version,
    about = "Generate random passwords and copy them to the clipboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a config file holding the current defaults
    InitConfig {
        /// Where to write the file (defaults to $PASSFORGE_CONFIG or ./passforge.json)
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Length of the generated password
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Leave out uppercase characters (A-Z)
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase characters (a-z)
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out digits (0-9)
    #[arg(long)]
    pub no_numbers: bool,

    /// Leave out symbols (e.g. !@#$%)
    #[arg(long)]
    pub no_symbols: bool,

    /// Leave out ambiguous characters: 'I', 'l', '1', 'O', '0'
    #[arg(long)]
    pub exclude_ambiguous: bool,

    /// Copy the last generated password to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Clear the clipboard after this many seconds
    #[arg(long, value_name = "SECS")]
    pub clear_after: Option<u64>,

    /// Number of passwords to generate
    #[arg(
        short = 'n',
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub count: u32,

    /// Reduce random values with a single modulo instead of rejection sampling
    #[arg(long)]
    pub modulo: bool,

    /// Config file with default options
    #[arg(long, env = "PASSFORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Applies the flags on top of the file defaults.
    pub fn merge(&self, mut config: Config) -> Config {
        let options: &mut PasswordOptions = &mut config.options;
        if let Some(length) = self.length {
            options.length = length;
        }
        options.use_uppercase &= !self.no_uppercase;
        options.use_lowercase &= !self.no_lowercase;
        options.use_numbers &= !self.no_numbers;
        options.use_symbols &= !self.no_symbols;
        options.exclude_ambiguous |= self.exclude_ambiguous;

        config.copy |= self.copy;
        if self.clear_after.is_some() {
            config.clear_after_secs = self.clear_after;
        }
        config
    }
}
