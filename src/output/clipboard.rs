//! System clipboard access.
//!
//! The address is piped into a platform clipboard tool (`pbcopy`, `clip`,
//! `wl-copy`, `xclip`, `xsel`) or a user supplied command line.

use colored::Colorize;
use regex::Regex;
use std::error::Error;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// Something that can take a copy of a string.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn Error>>;
}

impl Clipboard for Box<dyn Clipboard> {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn Error>> {
        (**self).copy(text)
    }
}

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(target_os = "macos")]
const CANDIDATES: &[&str] = &["pbcopy"];
#[cfg(windows)]
const CANDIDATES: &[&str] = &["clip"];
#[cfg(not(any(target_os = "macos", windows)))]
const CANDIDATES: &[&str] = &[
    "wl-copy",
    "xclip -selection clipboard",
    "xsel --clipboard --input",
];

/// Clipboard backed by an external command that reads the text on stdin.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    commands: Vec<String>,
}

impl CommandClipboard {
    /// Use the platform defaults, tried in order until one succeeds.
    pub fn system() -> CommandClipboard {
        CommandClipboard {
            commands: CANDIDATES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Use exactly this command line.
    pub fn with_command(cmd: &str) -> CommandClipboard {
        CommandClipboard {
            commands: vec![cmd.to_string()],
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Clipboard for CommandClipboard {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn Error>> {
        let mut last_err: Box<dyn Error> = "no clipboard command configured".into();
        for cmd in &self.commands {
            match pipe_to(cmd, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::debug!("clipboard command {cmd} failed: {e}");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

/// Run `cmd` and write `text` to its stdin.
///
/// Only the tool's own exit is waited for. Tools like `xclip` fork a process
/// that keeps the selection alive, so none of the child's output streams are
/// captured.
fn pipe_to(cmd: &str, text: &str) -> Result<(), Box<dyn Error>> {
    log::debug!("pipe_to({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd);
    log::trace!("split cmds={:?}", cmds);
    let program = cmds.first().ok_or("empty clipboard command")?;

    let mut command = Command::new(program);
    command
        .args(cmds.iter().skip(1))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let mut child = command
        .spawn()
        .map_err(|e| format!("Failed to execute {program}: {e}"))?;

    // stdin is dropped at the end of the match so the tool sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin
            .write_all(text.as_bytes())
            .map_err(|e| format!("Failed to write to {program}: {e}")),
        None => Err(format!("{program} stdin not captured")),
    };
    if written.is_err() {
        if let Err(e) = child.kill() {
            log::debug!("kill {program}: {e}");
        }
    }

    // Always reap the child, even when the write failed
    let status = child.wait()?;
    written?;

    if status.success() {
        log::debug!("Success cmd: {cmd}");
        Ok(())
    } else {
        log::trace!("code={code:?}, status={status}", code = status.code());
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        Err(format!("{program} exited with {status}").into())
    }
}

/// Clipboard used when copying is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&mut self, _text: &str) -> Result<(), Box<dyn Error>> {
        Err("clipboard disabled".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_strip_complex() {
        let input = "Hello 'World War'  'fail' Rust";
        let expected = vec!["Hello", "World War", "fail", "Rust"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_and_strip_clipboard_cmds() {
        assert_eq!(
            split_and_strip("xclip -selection clipboard"),
            vec!["xclip", "-selection", "clipboard"]
        );
        assert_eq!(
            split_and_strip("\"/opt/my tools/copy\" --quiet"),
            vec!["/opt/my tools/copy", "--quiet"]
        );
        assert!(split_and_strip("   ").is_empty());
    }

    #[test]
    fn test_system_has_candidates() {
        assert!(!CommandClipboard::system().commands().is_empty());
    }

    #[test]
    fn test_missing_command_is_an_error() {
        let mut clip = CommandClipboard::with_command("definitely-not-a-clipboard-tool-4821");
        let err = clip.copy("10.0.0.1").unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-clipboard-tool-4821"));
    }

    #[test]
    fn test_empty_command_is_an_error() {
        let mut clip = CommandClipboard::with_command("");
        assert!(clip.copy("10.0.0.1").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_an_error() {
        let mut clip = CommandClipboard::with_command("false");
        assert!(clip.copy("10.0.0.1").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_reading_command_succeeds() {
        let mut clip = CommandClipboard::with_command("cat");
        clip.copy("10.0.0.1").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_forking_tool_does_not_block() {
        // exits at once but leaves a background child running, like xclip
        let mut clip = CommandClipboard::with_command("sh -c \"cat >/dev/null; sleep 4 &\"");
        let start = std::time::Instant::now();
        clip.copy("10.0.0.1").unwrap();
        let elapsed = start.elapsed();
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "copy blocked for {elapsed:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_ignoring_stdin_is_an_error() {
        // larger than a pipe buffer, so the write fails once `true` exits
        let text = "10.0.0.1\n".repeat(200_000);
        let mut clip = CommandClipboard::with_command("true");
        let err = clip.copy(&text).unwrap_err();
        assert!(
            err.to_string().starts_with("Failed to write to true"),
            "{err}"
        );
    }

    #[test]
    fn test_no_clipboard() {
        assert_eq!(
            NoClipboard.copy("10.0.0.1").unwrap_err().to_string(),
            "clipboard disabled"
        );
    }
}
