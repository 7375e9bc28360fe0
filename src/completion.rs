//! # Shell Completion Module
//!
//! Generates completion scripts for the `camelot-mixer` command line through
//! clap_complete.
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! camelot-mixer completion bash > ~/.local/share/bash-completion/completions/camelot-mixer
//!
//! # Generate zsh completions
//! camelot-mixer completion zsh > ~/.config/zsh/completions/_camelot-mixer
//! ```

use crate::cli::{Args, Shell};
use clap::CommandFactory;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Generate shell completions for the given shell into `out`
pub fn generate_completions<G: Generator>(gen: G, out: &mut dyn Write) {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    generate(gen, &mut cmd, name, out);
}

/// Print completions for `shell` on stdout
pub fn print_completions(shell: Shell) {
    generate_completions(shell_to_completion_shell(shell), &mut io::stdout());
}

/// Convert our CLI shell enum to clap_complete's
#[must_use]
pub fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}
