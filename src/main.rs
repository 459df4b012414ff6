use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pr_bot::cmd::{self, CompareOptions, RunOptions};
use std::path::PathBuf;
use std::process;

/// Build-output size reports for pull requests
///
/// pr-bot builds the base and head revisions of a pull request, compares the
/// files they produce and posts the size changes as a review comment.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two already built snapshot directories
    Compare {
        /// Snapshot of the base revision
        #[arg(value_name = "BEFORE")]
        before: String,

        /// Snapshot of the proposed change
        #[arg(value_name = "AFTER")]
        after: String,

        /// Files to compare, relative to each snapshot (e.g. "dist/**/*.js")
        #[arg(short, long = "glob", value_name = "PATTERN")]
        glob_pattern: String,

        /// Let wildcards match files starting with a dot
        #[arg(long)]
        dot: bool,

        /// Match the pattern case-insensitively
        #[arg(long)]
        ignore_case: bool,

        /// Rewrite matched paths before comparing, as REGEX=REPLACEMENT
        #[arg(short, long = "transform", value_name = "REGEX=REPLACEMENT")]
        transforms: Vec<String>,

        /// Print the Markdown report
        #[arg(long, conflicts_with = "json")]
        markdown: bool,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,
    },

    /// Build both checkouts, run the configured plugins and report
    Run {
        /// Checkout of the base revision
        #[arg(long, value_name = "DIR")]
        before: PathBuf,

        /// Checkout of the proposed change
        #[arg(long, value_name = "DIR")]
        after: PathBuf,

        /// Config file (default: ./pr-bot.toml)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Compare the checkouts without running the build command
        #[arg(long)]
        skip_build: bool,

        /// File receiving the review comment on pull request builds
        #[arg(long, value_name = "FILE")]
        comment_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match cli.command {
        Commands::Compare {
            before,
            after,
            glob_pattern,
            dot,
            ignore_case,
            transforms,
            markdown,
            json,
        } => cmd::cmd_compare(
            &before,
            &after,
            &CompareOptions {
                glob_pattern,
                dot,
                ignore_case,
                transforms,
                markdown,
                json,
            },
        ),
        Commands::Run {
            before,
            after,
            config,
            skip_build,
            comment_file,
        } => cmd::cmd_run(&RunOptions {
            before,
            after,
            config,
            skip_build,
            comment_file,
        }),
        Commands::Completions { shell } => {
            cmd::cmd_completions(shell, &mut Cli::command(), &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        use pr_bot::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
