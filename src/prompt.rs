use std::io::{self, BufRead, Write};

/// Line-oriented operator prompt over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one line with its line ending removed.
    /// Returns `None` once the input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?; // Make sure the prompt is immediately displayed

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = input.trim_end_matches(&['\n', '\r'][..]).to_string();
        Ok(Some(line))
    }

    /// Yes/no question. An empty answer takes `default`; with no default the
    /// question repeats. End of input counts as "no".
    pub fn confirm(&mut self, prompt: &str, default: Option<bool>) -> io::Result<bool> {
        loop {
            let question = match default {
                Some(true) => format!("{} (Y/n): ", prompt),
                Some(false) | None => format!("{} (y/N): ", prompt),
            };

            let Some(answer) = self.ask(&question)? else {
                return Ok(false);
            };

            match answer.trim().to_uppercase().as_str() {
                "Y" | "YES" => return Ok(true),
                "N" | "NO" => return Ok(false),
                "" => match default {
                    Some(default) => return Ok(default),
                    None => continue,
                },
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(script: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_ending_only() {
        let mut p = prompter("  F1 \r\nnext\n");
        assert_eq!(p.ask("Command: ").unwrap().as_deref(), Some("  F1 "));
        assert_eq!(p.ask("Command: ").unwrap().as_deref(), Some("next"));
        assert_eq!(p.ask("Command: ").unwrap(), None);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.starts_with("Command: "));
    }

    #[test]
    fn test_confirm_defaults_and_retries() {
        let mut p = prompter("\nmaybe\ny\nn\n");
        assert!(!p.confirm("Proceed?", Some(false)).unwrap());
        assert!(p.confirm("Proceed?", None).unwrap());
        assert!(!p.confirm("Proceed?", Some(true)).unwrap());
        // exhausted input declines
        assert!(!p.confirm("Proceed?", Some(true)).unwrap());
    }
}
