//! CSV output writer.

use std::fs::File;
use std::path::Path;

use crate::error::Result;
use crate::message::MessageRecord;

/// Column header of the exported table.
pub const CSV_HEADER: [&str; 8] = [
    "Date",
    "Time",
    "Sender",
    "Message",
    "MonthBucket",
    "Hour",
    "Weekday",
    "Emojis",
];

fn new_writer<W: std::io::Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().delimiter(b';').from_writer(inner)
}

fn write_records<'a, W, I>(writer: &mut csv::Writer<W>, records: I) -> Result<()>
where
    W: std::io::Write,
    I: IntoIterator<Item = &'a MessageRecord>,
{
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            record.time.format("%H:%M:%S").to_string(),
            record.sender.clone(),
            record.body.clone(),
            record.month_bucket.format("%Y-%m-%d").to_string(),
            record.hour.to_string(),
            record.weekday.to_string(),
            record.emojis.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes records to a CSV file with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Date;Time;Sender;Message;MonthBucket;Hour;Weekday;Emojis`
/// - Encoding: UTF-8, multi-line messages quoted
pub fn write_csv<'a, I>(records: I, output_path: impl AsRef<Path>) -> Result<()>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let file = File::create(output_path.as_ref())?;
    let mut writer = new_writer(file);
    write_records(&mut writer, records)
}

/// Renders records as a CSV string, same layout as [`write_csv`].
pub fn to_csv<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a MessageRecord>,
{
    let mut writer = new_writer(Vec::new());
    write_records(&mut writer, records)?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
