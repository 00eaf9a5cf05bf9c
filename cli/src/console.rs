use anyhow::{bail, Context, Result};
use search_core::Rating;
use std::io::BufRead;

/// Documents and query read from the line-oriented console format:
///
/// ```text
/// <stop words>
/// <document count N>
/// <text of document 0>
/// <k> <r1> ... <rk>
/// ... (N text/ratings pairs)
/// <query>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleInput {
    pub stop_words: String,
    pub documents: Vec<(String, Vec<Rating>)>,
    pub query: String,
}

/// Read one line without its trailing newline. End of input reads as "".
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    Ok(next_line(reader)?.unwrap_or_default())
}

/// `None` at end of input.
fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    Ok(Some(trimmed.strip_suffix('\r').unwrap_or(trimmed).to_string()))
}

fn expect_line<R: BufRead>(reader: &mut R, what: &str) -> Result<String> {
    next_line(reader)?.with_context(|| format!("input ended before {what}"))
}

pub fn read_line_with_number<R: BufRead>(reader: &mut R) -> Result<i32> {
    let line = read_line(reader)?;
    line.trim()
        .parse()
        .with_context(|| format!("expected a number, got {line:?}"))
}

fn parse_ratings(line: &str) -> Result<Vec<Rating>> {
    let mut numbers = line.split_whitespace().map(|n| {
        n.parse::<Rating>().with_context(|| format!("invalid rating {n:?}"))
    });
    let count = match numbers.next() {
        Some(count) => count?,
        None => return Ok(Vec::new()),
    };
    let ratings = numbers.collect::<Result<Vec<_>>>()?;
    if count < 0 || ratings.len() != count as usize {
        bail!("ratings line declares {count} values but has {}", ratings.len());
    }
    Ok(ratings)
}

pub fn read_console_input<R: BufRead>(reader: &mut R) -> Result<ConsoleInput> {
    let stop_words = read_line(reader)?;
    let count = read_line_with_number(reader)?;
    if count < 0 {
        bail!("negative document count {count}");
    }
    // count comes from input, so no preallocation
    let mut documents = Vec::new();
    for id in 0..count {
        let text = expect_line(reader, &format!("text of document {id}"))?;
        let ratings = parse_ratings(&expect_line(reader, &format!("ratings of document {id}"))?)?;
        documents.push((text, ratings));
    }
    let query = read_line(reader)?;
    Ok(ConsoleInput { stop_words, documents, query })
}
