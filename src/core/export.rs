use crate::domain::model::MovieLanguageRecord;
use crate::utils::error::Result;
use std::io::Write;

/// Output columns. `genre`/`genreLabel` hold the language; the names are kept for
/// compatibility with files produced by earlier exports.
pub const CSV_HEADER: [&str; 4] = ["film", "filmLabel", "genre", "genreLabel"];

/// Writes the header and one row per record. Returns the number of data rows.
///
/// The header is written even when `records` is empty.
pub fn write_csv<W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = MovieLanguageRecord>,
{
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for record in records {
        wtr.write_record(record.as_row())?;
        rows += 1;
    }

    wtr.flush()?;
    Ok(rows)
}

/// Same as [`write_csv`] into an in-memory buffer.
pub fn encode_csv<I>(records: I) -> Result<(Vec<u8>, usize)>
where
    I: IntoIterator<Item = MovieLanguageRecord>,
{
    let mut buffer = Vec::new();
    let rows = write_csv(&mut buffer, records)?;
    Ok((buffer, rows))
}
