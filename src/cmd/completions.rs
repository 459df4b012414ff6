//! Completions command implementation
//!
//! Handles the `pr-bot completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Write the completion script for `shell` to `out`
///
/// `cmd` is the binary's clap command, so completions always match the
/// arguments the binary actually accepts.
///
/// # Examples
///
/// ```bash
/// # Bash
/// pr-bot completions bash > /etc/bash_completion.d/pr-bot
///
/// # Zsh
/// pr-bot completions zsh > ~/.zfunc/_pr-bot
///
/// # Fish
/// pr-bot completions fish > ~/.config/fish/completions/pr-bot.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Arg;

    fn command() -> Command {
        Command::new("pr-bot")
            .subcommand(Command::new("compare").arg(Arg::new("glob").long("glob")))
            .subcommand(Command::new("run"))
    }

    #[test]
    fn test_cmd_completions_all_shells_generate_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let mut out: Vec<u8> = Vec::new();
            cmd_completions(shell, &mut command(), &mut out);

            let script = String::from_utf8(out).unwrap();
            assert!(script.contains("pr-bot"), "{shell:?} script names the binary");
        }
    }

    #[test]
    fn test_cmd_completions_bash_includes_subcommands() {
        let mut out: Vec<u8> = Vec::new();
        cmd_completions(Shell::Bash, &mut command(), &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("compare"));
        assert!(script.contains("--glob"));
    }
}
