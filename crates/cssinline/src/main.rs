//! `cssinline <stylesheet.css> [input.html]`
//!
//! Inlines the stylesheet into the HTML read from `input.html` (or stdin)
//! and writes the result to stdout.

use anyhow::{Context as _, Result, bail};
use std::env;
use std::fs;
use std::io::{self, Read as _, Write as _};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(stylesheet) = args.next() else {
        bail!("usage: cssinline <stylesheet.css> [input.html]");
    };
    let markup = match args.next() {
        Some(input) => {
            fs::read_to_string(&input).with_context(|| format!("Failed to read {input}"))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read HTML from stdin")?;
            buffer
        }
    };

    let output = cssinline::global_registry().inline(&stylesheet, &markup)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
