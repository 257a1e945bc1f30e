//! JSON Lines (JSONL) output writer.
//!
//! One record per line, convenient for streaming consumers and `jq`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::message::MessageRecord;

fn write_lines<'a, W, I>(writer: &mut W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a MessageRecord>,
{
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Writes records to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"date":"2021-02-01","time":"10:30:00","sender":"Alice","body":"hello",...}
/// {"date":"2021-02-01","time":"10:31:00","sender":"Bob","body":"hi",...}
/// ```
pub fn write_jsonl<'a, I>(records: I, output_path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut writer = BufWriter::new(File::create(output_path.as_ref())?);
    write_lines(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Renders records as JSON Lines.
pub fn to_jsonl<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut buf = Vec::new();
    write_lines(&mut buf, records)?;
    Ok(String::from_utf8(buf)?)
}
