use clap::{Parser, ValueEnum};
use console::style;
use std::path::PathBuf;
use treesync::{Message, MessageLevel, SyncOptions, SyncPolicy, Synchronizer};

/// One-way directory tree synchronizer
#[derive(Parser)]
#[command(name = "treesync", version, about)]
struct Cli {
    /// Source file or directory
    source: PathBuf,

    /// Destination path to make identical to the source
    destination: PathBuf,

    /// Exclusion pattern, `*` matches any substring (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Overwrite policy for existing destination files
    #[arg(long, value_enum, default_value_t = PolicyArg::Differential)]
    policy: PolicyArg,

    /// Minimum message level to print
    #[arg(long, value_enum, default_value_t = LevelArg::FileIo)]
    verbosity: LevelArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Full,
    Differential,
}

impl From<PolicyArg> for SyncPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Full => SyncPolicy::Full,
            PolicyArg::Differential => SyncPolicy::Differential,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Debug,
    Information,
    FileIo,
    Warning,
    Error,
}

impl From<LevelArg> for MessageLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Debug => MessageLevel::Debug,
            LevelArg::Information => MessageLevel::Information,
            LevelArg::FileIo => MessageLevel::FileIo,
            LevelArg::Warning => MessageLevel::Warning,
            LevelArg::Error => MessageLevel::Error,
        }
    }
}

fn print_message(message: &Message) {
    let line = message.to_string();
    match message.level {
        MessageLevel::Error => eprintln!("{}", style(line).red()),
        MessageLevel::Warning => println!("{}", style(line).yellow()),
        MessageLevel::FileIo => println!("{line}"),
        MessageLevel::Debug | MessageLevel::Information => println!("{}", style(line).dim()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let synchronizer = Synchronizer::new(SyncOptions {
        policy: cli.policy.into(),
        verbosity: cli.verbosity.into(),
        exclude: cli.exclude,
    })?;

    let messages =
        synchronizer.sync_with(&cli.source, &cli.destination, Some(&print_message))?;

    let errors = messages
        .iter()
        .filter(|m| m.level == MessageLevel::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("sync completed with {errors} error(s)");
    }

    Ok(())
}
