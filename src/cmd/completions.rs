//! Completions command implementation
//!
//! Handles the `bundle-dedupe completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// bundle-dedupe completions bash > /etc/bash_completion.d/bundle-dedupe
///
/// # Zsh
/// bundle-dedupe completions zsh > ~/.zfunc/_bundle-dedupe
/// ```
pub fn cmd_completions(shell: Shell) {
    // Cli lives in main.rs, so the command tree is re-created here.
    use clap::{Arg, ArgAction, Command};

    let mut cmd = Command::new("bundle-dedupe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Cross-bundle JavaScript duplication analyzer")
        .subcommand(
            Command::new("analyze")
                .about("Analyze bundles for duplicated modules")
                .arg(Arg::new("bundles").num_args(1..))
                .arg(Arg::new("threshold").short('t').long("threshold"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("completions").about("Generate shell completions"));

    let bin_name = "bundle-dedupe".to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}
