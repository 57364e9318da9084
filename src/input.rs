use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

/// Returns the value given on the command line, or reads one line from piped stdin.
///
/// ```text
/// phonevault encrypt +15551234567
/// echo "+15551234567" | phonevault encrypt
/// ```
pub fn read_value(arg: Option<String>, what: &str) -> Result<Zeroizing<String>> {
    if let Some(value) = arg {
        return non_blank(Zeroizing::new(value), what);
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut buf)?;
        trim_newline(&mut buf);
        return non_blank(buf, what);
    }

    bail!("please enter {what}")
}

fn non_blank(value: Zeroizing<String>, what: &str) -> Result<Zeroizing<String>> {
    if value.trim().is_empty() {
        bail!("please enter {what}");
    }
    Ok(value)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
