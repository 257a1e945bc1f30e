//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::message::MessageRecord;

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"date": "2021-02-01", "time": "10:30:00", "sender": "Alice", "body": "hello", ...},
///   {"date": "2021-02-01", "time": "10:31:00", "sender": "Bob", "body": "hi", ...}
/// ]
/// ```
pub fn write_json<'a, I>(records: I, output_path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let json = to_json(records)?;
    let mut writer = BufWriter::new(File::create(output_path.as_ref())?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Renders records as a pretty-printed JSON array.
pub fn to_json<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let records: Vec<&MessageRecord> = records.into_iter().collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
