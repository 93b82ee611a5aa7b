//! Interactive prompt loop.
//!
//! [`Session::handle_line`] holds all command handling so it can be driven
//! without a terminal; [`Session::run`] feeds it from a rustyline editor.

use crate::error::SubnetError;
use crate::models::{History, HistoryEntry, Subnet};
use crate::output::{terminal, Clipboard};
use crate::processing::random_usable_address;
use rand::Rng;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::error::Error;
use std::io::Write;
use std::net::Ipv4Addr;

/// What the loop should do after a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

pub struct Session<R, C, W> {
    rng: R,
    clipboard: C,
    out: W,
    history: History,
}

impl<R: Rng, C: Clipboard, W: Write> Session<R, C, W> {
    pub fn new(rng: R, clipboard: C, out: W) -> Session<R, C, W> {
        Session {
            rng,
            clipboard,
            out,
            history: History::new(),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn say(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Handle one line of user input.
    ///
    /// Input is trimmed and lowercased before dispatch. Bad subnets are
    /// reported and the loop continues; only I/O errors on the output are
    /// returned.
    pub fn handle_line(&mut self, line: &str) -> Result<Step, Box<dyn Error>> {
        let input = line.trim().to_lowercase();
        log::debug!("handle_line({input:?})");

        match input.as_str() {
            "" => {}
            "exit" | "quit" => {
                self.say(&terminal::goodbye())?;
                return Ok(Step::Exit);
            }
            "history" => {
                let text = terminal::history(&self.history);
                self.say(&text)?;
            }
            "history json" => {
                let text = terminal::history_json(&self.history)?;
                if !text.is_empty() {
                    self.say(&text)?;
                }
            }
            "clear" => {
                self.history.clear();
                self.say(&terminal::cleared())?;
            }
            "help" | "?" => self.say(&terminal::help())?,
            cidr => self.generate(cidr)?,
        }
        Ok(Step::Continue)
    }

    /// Parse, pick, record and copy. Subnet errors are shown, not returned.
    fn generate(&mut self, input: &str) -> Result<(), Box<dyn Error>> {
        let (subnet, ip) = match self.pick(input) {
            Ok(picked) => picked,
            Err(e @ SubnetError::InvalidSubnetFormat(_)) => {
                log::debug!("rejected {input:?}: {e}");
                self.say(&terminal::error(&e))?;
                return Ok(());
            }
            Err(e @ SubnetError::EmptyUsableRange { .. }) => {
                report_defect(input, &e);
                self.say(&terminal::error(&e))?;
                return Ok(());
            }
        };

        self.say(&terminal::generated(input, &subnet, ip))?;
        self.history.push(HistoryEntry::new(input, subnet, ip));

        match self.clipboard.copy(&ip.to_string()) {
            Ok(()) => self.say(&terminal::copied())?,
            Err(e) => {
                log::warn!("clipboard copy of {ip} failed: {e}");
                self.say(&terminal::clipboard_warning(e.as_ref()))?;
            }
        }
        Ok(())
    }

    fn pick(&mut self, input: &str) -> Result<(Subnet, Ipv4Addr), SubnetError> {
        let subnet = Subnet::parse(input)?;
        let ip = random_usable_address(&subnet, &mut self.rng)?;
        Ok((subnet, ip))
    }

    /// Read lines until `exit`, Ctrl-C or Ctrl-D.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let mut rl = DefaultEditor::new()?;
        self.say(&terminal::banner())?;
        log::info!("session started");

        loop {
            self.out.flush()?;
            match rl.readline(terminal::PROMPT) {
                Ok(line) => {
                    remember(rl.history_mut(), &line);
                    if self.handle_line(&line)? == Step::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.say(&format!("\n{}", terminal::interrupted()))?;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        log::info!("session ended after {} generations", self.history.len());
        Ok(())
    }
}

/// An empty usable range means the range arithmetic is wrong.
///
/// Development builds stop here; release builds log and carry on.
fn report_defect(input: &str, e: &SubnetError) {
    log::error!("BUG: {input} produced {e}");
    if cfg!(debug_assertions) {
        panic!("BUG: {input} produced {e}");
    }
}

/// Add a non-blank line to the editor's recall list.
fn remember<H: rustyline::history::History>(history: &mut H, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    if let Err(e) = history.add(line) {
        log::debug!("could not add {line:?} to line history: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rustyline::history::{History as LineHistory, MemHistory};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records copies, optionally failing every time.
    #[derive(Default, Clone)]
    struct FakeClipboard {
        copied: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl Clipboard for FakeClipboard {
        fn copy(&mut self, text: &str) -> Result<(), Box<dyn Error>> {
            if self.fail {
                return Err("no display".into());
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    fn session(clip: FakeClipboard) -> Session<StepRng, FakeClipboard, Vec<u8>> {
        Session::new(StepRng::new(0, 0), clip, Vec::new())
    }

    fn output(s: Session<StepRng, FakeClipboard, Vec<u8>>) -> String {
        String::from_utf8(s.into_output()).unwrap()
    }

    #[test]
    fn test_generate_records_and_copies() {
        let clip = FakeClipboard::default();
        let mut s = session(clip.clone());

        assert_eq!(s.handle_line("10.0.0.0/30\n").unwrap(), Step::Continue);

        assert_eq!(s.history().len(), 1);
        let entry = &s.history().entries()[0];
        assert_eq!(entry.subnet, "10.0.0.0/30");
        assert_eq!(entry.address, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(*clip.copied.borrow(), vec!["10.0.0.1".to_string()]);

        let out = output(s);
        assert!(out.contains("Random IP from 10.0.0.0/30: "));
        assert!(out.contains("IP address copied to clipboard."));
    }

    #[test]
    fn test_invalid_subnet_keeps_going() {
        let clip = FakeClipboard::default();
        let mut s = session(clip.clone());

        assert_eq!(s.handle_line("10.0.0.0/33").unwrap(), Step::Continue);
        assert_eq!(s.handle_line("not-a-subnet").unwrap(), Step::Continue);

        assert!(s.history().is_empty());
        assert!(clip.copied.borrow().is_empty());
        let out = output(s);
        assert!(out.contains("Invalid subnet format"));
        assert!(out.contains("prefix /33"));
    }

    #[test]
    fn test_clipboard_failure_is_a_warning() {
        let clip = FakeClipboard {
            fail: true,
            ..Default::default()
        };
        let mut s = session(clip);

        assert_eq!(s.handle_line("192.168.1.0/24").unwrap(), Step::Continue);
        assert_eq!(s.history().len(), 1);
        let out = output(s);
        assert!(out.contains("Could not copy to clipboard. (no display)"));
    }

    #[test]
    fn test_history_and_clear() {
        let mut s = session(FakeClipboard::default());

        s.handle_line("history").unwrap();
        s.handle_line("10.1.0.0/16").unwrap();
        s.handle_line("10.2.0.0/16").unwrap();
        s.handle_line("  HISTORY ").unwrap();
        s.handle_line("history json").unwrap();
        assert_eq!(s.history().len(), 2);
        s.handle_line("clear").unwrap();
        assert!(s.history().is_empty());

        let out = output(s);
        assert!(out.contains("No generation history available."));
        assert!(out.contains("Subnet: 10.1.0.0/16 → IP: 10.1.0.1"));
        assert!(out.contains("Subnet: 10.2.0.0/16 → IP: 10.2.0.1"));
        assert!(out.contains(r#""address":"10.2.0.1""#));
        assert!(out.contains("History cleared."));
    }

    #[test]
    fn test_exit_and_blank() {
        let mut s = session(FakeClipboard::default());
        assert_eq!(s.handle_line("   ").unwrap(), Step::Continue);
        assert_eq!(s.handle_line("help").unwrap(), Step::Continue);
        assert_eq!(s.handle_line("Exit").unwrap(), Step::Exit);
        assert_eq!(s.handle_line("quit").unwrap(), Step::Exit);
        assert!(s.history().is_empty());
        assert!(output(s).contains("Goodbye!"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "BUG: 10.0.0.0/30 produced no usable hosts")]
    fn test_empty_range_panics_in_debug() {
        let e = SubnetError::EmptyUsableRange {
            lo: Ipv4Addr::new(10, 0, 0, 3),
            hi: Ipv4Addr::new(10, 0, 0, 0),
        };
        report_defect("10.0.0.0/30", &e);
    }

    #[test]
    fn test_remember_skips_blank_lines() {
        let mut lines = MemHistory::new();
        remember(&mut lines, "   ");
        remember(&mut lines, "10.0.0.0/24");
        assert_eq!(lines.len(), 1);
    }
}
