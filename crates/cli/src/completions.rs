// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation for the lab CLI.
//!
//! ```bash
//! # Bash
//! lab completions bash > ~/.local/share/bash-completion/completions/lab
//!
//! # Zsh
//! lab completions zsh > ~/.zfunc/_lab
//!
//! # Fish
//! lab completions fish > ~/.config/fish/completions/lab.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions and write to stdout.
pub fn generate_completions<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "lab", &mut io::stdout());
}

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
