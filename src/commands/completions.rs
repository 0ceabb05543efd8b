//! Completions command - shell completion scripts

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

/// Write the completion script for `shell` to `buf`
pub fn execute<W: Write>(shell: Shell, buf: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        execute(Shell::Bash, &mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("keyforms"));
        assert!(script.contains("completions"));
    }
}
