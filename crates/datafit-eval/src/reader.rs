use datafit_core::{Cell, Column, Encoding, Error, FormatHints, InvalidCellPolicy, Result, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse a delimited payload into a rectangular [`Table`].
///
/// The first record is the header. Data cells are kept as text; missing
/// markers are resolved later by the summarizer. Cells whose bytes do not
/// decode under `hints.encoding` either fail the payload or become
/// [`Cell::Missing`], depending on `hints.invalid_cells`.
pub fn read_table(bytes: &[u8], hints: &FormatHints) -> Result<Table> {
    let bytes = strip_bom(bytes, hints.encoding);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .delimiter(hints.delimiter)
        .quote(hints.quote)
        .from_reader(bytes);

    let headers = reader.byte_headers().map_err(malformed)?.clone();
    let names = headers
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            decode(raw, hints.encoding).ok_or_else(|| {
                Error::MalformedInput(format!(
                    "header field {} is not valid {}",
                    idx + 1,
                    hints.encoding.as_str()
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];
    for (row_idx, result) in reader.byte_records().enumerate() {
        let record = result.map_err(malformed)?;
        for (col_idx, raw) in record.iter().enumerate() {
            let cell = match decode(raw, hints.encoding) {
                Some(text) => Cell::Text(text),
                None => match hints.invalid_cells {
                    InvalidCellPolicy::Missing => Cell::Missing,
                    InvalidCellPolicy::Reject => {
                        return Err(Error::MalformedInput(format!(
                            "row {} column '{}' is not valid {}",
                            row_idx + 1,
                            names[col_idx],
                            hints.encoding.as_str()
                        )));
                    }
                },
            };
            cells[col_idx].push(cell);
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Table::new(columns)
}

/// Drop a leading UTF-8 byte-order mark when the payload is read as UTF-8.
pub(crate) fn strip_bom(bytes: &[u8], encoding: Encoding) -> &[u8] {
    match encoding {
        Encoding::Utf8 => bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes),
        Encoding::Latin1 => bytes,
    }
}

fn decode(raw: &[u8], encoding: Encoding) -> Option<String> {
    match encoding {
        Encoding::Utf8 => std::str::from_utf8(raw).ok().map(str::to_string),
        Encoding::Latin1 => Some(raw.iter().map(|&byte| char::from(byte)).collect()),
    }
}

fn malformed(err: csv::Error) -> Error {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos
                .as_ref()
                .map(|pos| format!(" at line {}", pos.line()))
                .unwrap_or_default();
            Error::MalformedInput(format!(
                "record{line} has {len} field(s), expected {expected_len}"
            ))
        }
        _ => Error::MalformedInput(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(table: &Table, column: &str, row: usize) -> Cell {
        table.column(column).expect("column exists").cells[row].clone()
    }

    #[test]
    fn reads_header_and_rows() {
        let table = read_table(b"age,city\n10,A\n20,\n", &FormatHints::default())
            .expect("read table");
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(text(&table, "age", 1), Cell::from("20"));
        assert_eq!(text(&table, "city", 1), Cell::from(""));
    }

    #[test]
    fn header_only_payload_is_zero_rows() {
        let table = read_table(b"a,b\n", &FormatHints::default()).expect("read table");
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.n_cols(), 2);
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let err = read_table(b"a,b,c\n1,2,3\n4,5\n", &FormatHints::default())
            .expect_err("ragged rows must fail");
        assert!(matches!(err, Error::MalformedInput(_)));
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn duplicate_headers_are_malformed() {
        let err = read_table(b"a,a\n1,2\n", &FormatHints::default())
            .expect_err("duplicate headers must fail");
        assert!(err.to_string().contains("duplicate column name"));
    }

    #[test]
    fn honours_custom_delimiter_and_bom() {
        let hints = FormatHints {
            delimiter: b';',
            ..FormatHints::default()
        };
        let table = read_table(b"\xEF\xBB\xBFx;y\n1,5;2\n", &hints).expect("read table");
        assert!(table.column("x").is_some());
        assert_eq!(text(&table, "x", 0), Cell::from("1,5"));
    }

    #[test]
    fn invalid_utf8_cell_is_rejected_by_default() {
        let err = read_table(b"name\n\xFF\xFE\n", &FormatHints::default())
            .expect_err("invalid utf-8 must fail");
        assert!(err.to_string().contains("row 1 column 'name'"));
    }

    #[test]
    fn invalid_utf8_cell_can_count_as_missing() {
        let hints = FormatHints {
            invalid_cells: InvalidCellPolicy::Missing,
            ..FormatHints::default()
        };
        let table = read_table(b"name\n\xFF\nok\n", &hints).expect("read table");
        assert_eq!(text(&table, "name", 0), Cell::Missing);
        assert_eq!(text(&table, "name", 1), Cell::from("ok"));
    }

    #[test]
    fn invalid_utf8_header_always_fails() {
        let hints = FormatHints {
            invalid_cells: InvalidCellPolicy::Missing,
            ..FormatHints::default()
        };
        let err = read_table(b"\xFF\n1\n", &hints).expect_err("invalid header must fail");
        assert!(err.to_string().contains("header field 1"));
    }

    #[test]
    fn latin1_decodes_every_byte() {
        let hints = FormatHints {
            encoding: Encoding::Latin1,
            ..FormatHints::default()
        };
        let table = read_table(b"city\nS\xE3o Paulo\n", &hints).expect("read table");
        assert_eq!(text(&table, "city", 0), Cell::from("São Paulo"));
    }
}
