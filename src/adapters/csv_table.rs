use crate::domain::model::RowTable;
use crate::utils::error::Result;

/// Reads CSV bytes with a header row into a [`RowTable`]. Rows may be shorter
/// or longer than the header. Each row keeps its position among the lines
/// after the header, empty lines included.
pub fn parse_csv(data: &[u8]) -> Result<RowTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    let positions = record_positions(data);
    let positions = if positions.len() == records.len() {
        positions
    } else {
        tracing::debug!("Could not map CSV records to source lines, numbering densely");
        (0..records.len()).collect()
    };

    let mut table = RowTable::new(headers);
    for (record, position) in records.iter().zip(positions) {
        let values: Vec<String> = record.iter().map(str::to_string).collect();
        table.push_values_at(position, &values);
    }

    tracing::debug!(
        "Parsed CSV with {} columns and {} rows",
        table.headers.len(),
        table.len()
    );
    Ok(table)
}

/// Slot of every data record among the lines following the header. Empty
/// lines take a slot but produce no record; line breaks inside quoted fields
/// do not end a record.
fn record_positions(data: &[u8]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut seen_header = false;
    let mut in_quotes = false;
    let mut has_content = false;
    let mut slot = 0;

    let mut end_record = |has_content: bool| {
        if !seen_header {
            seen_header = has_content;
            return;
        }
        if has_content {
            positions.push(slot);
        }
        slot += 1;
    };

    let mut bytes = data.iter().peekable();
    while let Some(&byte) = bytes.next() {
        match byte {
            b'"' => {
                in_quotes = !in_quotes;
                has_content = true;
            }
            b'\r' | b'\n' if !in_quotes => {
                if byte == b'\r' && bytes.peek() == Some(&&b'\n') {
                    bytes.next();
                }
                end_record(has_content);
                has_content = false;
            }
            _ => has_content = true,
        }
    }
    if has_content {
        end_record(true);
    }

    positions
}
