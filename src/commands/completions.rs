//! Completions command - shell completion scripts

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

/// Write the completion script for `shell` to stdout.
pub fn execute(cmd: &mut Command, shell: Shell) {
    write_script(cmd, shell, &mut io::stdout());
}

/// Generate the script for `cmd` under its own binary name.
pub fn write_script(cmd: &mut Command, shell: Shell, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}
