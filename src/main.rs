use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use charmatch::{CharMatcher, CharPredicate, compile};

/// Apply a character class to each line of standard input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Precompute the class into a lookup table before reading input
    #[arg(short = 'p', long, global = true)]
    precompute: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete matching characters
    Remove {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// Keep only matching characters
    Retain {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// Replace each matching character with a string
    Replace {
        #[arg(value_name = "CLASS")]
        class: String,
        replacement: String,
    },
    /// Strip matching characters from both ends
    Trim {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// Replace each run of matching characters with one character
    Collapse {
        #[arg(value_name = "CLASS")]
        class: String,
        replacement: char,
        /// Trim matching characters from both ends first
        #[arg(short, long)]
        trim: bool,
    },
    /// Print the number of matching characters
    Count {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// Print the index of the first matching character, or -1
    Index {
        #[arg(value_name = "CLASS")]
        class: String,
        /// First character index to search from
        #[arg(short, long, default_value_t = 0)]
        from: usize,
    },
    /// Print how a class expression was compiled
    Describe {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// List the standard class names
    Classes,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let precompute = args.precompute;
    let class = |expr: &str| build_class(expr, precompute);

    match args.command {
        Command::Remove { class: expr } => {
            let m = class(&expr)?;
            for_each_line(|line| m.remove_from(line))
        }
        Command::Retain { class: expr } => {
            let m = class(&expr)?;
            for_each_line(|line| m.retain_from(line))
        }
        Command::Replace {
            class: expr,
            replacement,
        } => {
            let m = class(&expr)?;
            for_each_line(|line| m.replace_from_str(line, &replacement))
        }
        Command::Trim { class: expr } => {
            let m = class(&expr)?;
            for_each_line(|line| m.trim_from(line).to_string())
        }
        Command::Collapse {
            class: expr,
            replacement,
            trim,
        } => {
            let m = class(&expr)?;
            if trim {
                for_each_line(|line| m.trim_and_collapse_from(line, replacement))
            } else {
                for_each_line(|line| m.collapse_from(line, replacement))
            }
        }
        Command::Count { class: expr } => {
            let m = class(&expr)?;
            for_each_line(|line| m.count_in(line).to_string())
        }
        Command::Index { class: expr, from } => {
            let m = class(&expr)?;
            for_each_line(|line| match m.index_in(line, from) {
                Some(i) => i.to_string(),
                None => "-1".to_string(),
            })
        }
        Command::Describe { class: expr } => {
            let m = class(&expr)?;
            println!("{m}");
            Ok(())
        }
        Command::Classes => {
            for name in CharMatcher::names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn build_class(expr: &str, precompute: bool) -> Result<CharMatcher> {
    let matcher =
        compile(expr).with_context(|| format!("Invalid character class '{expr}'."))?;
    if !precompute {
        return Ok(matcher);
    }
    Ok(matcher.precomputed()?)
}

/// Write `f(line)` for every line of stdin, one output line per input line.
fn for_each_line(f: impl FnMut(&str) -> String) -> Result<()> {
    let stdout = io::stdout();
    process_lines(io::stdin().lock(), io::BufWriter::new(stdout.lock()), f)
}

/// Lines end at `\n` only, so a `\r` before it is passed to `f` as part of the
/// line. Bytes that are not valid UTF-8 are replaced with U+FFFD and the rest
/// of the input is still processed.
fn process_lines(
    mut input: impl BufRead,
    mut output: impl Write,
    mut f: impl FnMut(&str) -> String,
) -> Result<()> {
    let mut buf = Vec::new();
    let mut line_number = 0usize;
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read input")?;
        if read == 0 {
            break;
        }
        line_number += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!(line = line_number, "invalid UTF-8 replaced with U+FFFD");
        }
        writeln!(output, "{}", f(&line))?;
    }
    output.flush()?;
    Ok(())
}
