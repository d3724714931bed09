//! Test utilities: a small FITS writer for building fixture files.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::io::Write;

use tempfile::NamedTempFile;

pub const BLOCK_SIZE: usize = 2880;
const CARD_SIZE: usize = 80;

/// Values of one binary table column, encoded big-endian on write.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Byte(Vec<u8>),
    Int16(Vec<i16>),
    Logical(Vec<bool>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Float32(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Byte(v) => v.len(),
            ColumnData::Int16(v) => v.len(),
            ColumnData::Logical(v) => v.len(),
        }
    }

    fn letter(&self) -> char {
        match self {
            ColumnData::Float32(_) => 'E',
            ColumnData::Float64(_) => 'D',
            ColumnData::Byte(_) => 'B',
            ColumnData::Int16(_) => 'I',
            ColumnData::Logical(_) => 'L',
        }
    }

    fn width(&self) -> usize {
        match self {
            ColumnData::Float32(_) => 4,
            ColumnData::Float64(_) => 8,
            ColumnData::Byte(_) | ColumnData::Logical(_) => 1,
            ColumnData::Int16(_) => 2,
        }
    }

    fn encode_into(&self, idx: usize, buf: &mut Vec<u8>) {
        match self {
            ColumnData::Float32(v) => buf.extend_from_slice(&v[idx].to_be_bytes()),
            ColumnData::Float64(v) => buf.extend_from_slice(&v[idx].to_be_bytes()),
            ColumnData::Byte(v) => buf.push(v[idx]),
            ColumnData::Int16(v) => buf.extend_from_slice(&v[idx].to_be_bytes()),
            ColumnData::Logical(v) => buf.push(if v[idx] { b'T' } else { b'F' }),
        }
    }
}

/// A binary table column. Columns without a name get no `TTYPEn` card.
///
/// Each row holds `repeat` consecutive values of `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: Option<String>,
    pub data: ColumnData,
    pub repeat: usize,
}

impl Column {
    pub fn new(name: &str, data: ColumnData) -> Self {
        Self::with_repeat(name, data, 1)
    }

    pub fn unnamed(data: ColumnData) -> Self {
        Self {
            name: None,
            data,
            repeat: 1,
        }
    }

    /// A column of `repeat` elements per row. With a repeat of 0 the column
    /// occupies no bytes and `data` must be empty.
    pub fn with_repeat(name: &str, data: ColumnData, repeat: usize) -> Self {
        Self {
            name: Some(name.to_string()),
            data,
            repeat,
        }
    }

    fn rows(&self) -> Option<usize> {
        (self.repeat > 0).then(|| self.data.len() / self.repeat)
    }

    fn tform(&self) -> String {
        format!("{}{}", self.repeat, self.data.letter())
    }

    fn width(&self) -> usize {
        self.data.width() * self.repeat
    }
}

pub fn card_logical(keyword: &str, value: bool) -> String {
    format!("{keyword:<8}= {:>20}", if value { "T" } else { "F" })
}

pub fn card_int(keyword: &str, value: i64) -> String {
    format!("{keyword:<8}= {value:>20}")
}

pub fn card_str(keyword: &str, value: &str) -> String {
    format!("{keyword:<8}= '{:<8}'", value.replace('\'', "''"))
}

/// Serialize one HDU: the cards, an `END` card, then `data`, each part
/// padded to whole blocks (spaces for the header, zeros for the data).
pub fn hdu_bytes(cards: &[String], data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    for card in cards.iter().map(String::as_str).chain(["END"]) {
        let mut raw = format!("{card:<80}").into_bytes();
        raw.truncate(CARD_SIZE);
        buf.extend_from_slice(&raw);
    }
    buf.resize(buf.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE, b' ');

    buf.extend_from_slice(data);
    buf.resize(buf.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE, 0);
    buf
}

/// Builds a FITS file HDU by HDU. Starts with an empty primary HDU.
#[derive(Debug, Clone)]
pub struct FitsBuilder {
    hdus: Vec<Vec<u8>>,
}

impl Default for FitsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FitsBuilder {
    pub fn new() -> Self {
        let primary = hdu_bytes(
            &[
                card_logical("SIMPLE", true),
                card_int("BITPIX", 8),
                card_int("NAXIS", 0),
                card_logical("EXTEND", true),
            ],
            &[],
        );
        Self {
            hdus: vec![primary],
        }
    }

    /// Replace the primary HDU with a 16-bit image holding `pixels`.
    pub fn primary_image(mut self, pixels: &[i16]) -> Self {
        let data: Vec<u8> = pixels.iter().flat_map(|p| p.to_be_bytes()).collect();
        self.hdus[0] = hdu_bytes(
            &[
                card_logical("SIMPLE", true),
                card_int("BITPIX", 16),
                card_int("NAXIS", 1),
                card_int("NAXIS1", pixels.len() as i64),
                card_logical("EXTEND", true),
            ],
            &data,
        );
        self
    }

    /// Append a `BINTABLE` extension. All columns must have the same number
    /// of rows.
    pub fn bintable(mut self, columns: &[Column]) -> Self {
        let rows = columns.iter().find_map(Column::rows).unwrap_or(0);
        assert!(
            columns
                .iter()
                .all(|c| c.rows().map_or(c.data.len() == 0, |n| n == rows)),
            "columns differ in length"
        );
        let row_width: usize = columns.iter().map(Column::width).sum();

        let mut cards = vec![
            card_str("XTENSION", "BINTABLE"),
            card_int("BITPIX", 8),
            card_int("NAXIS", 2),
            card_int("NAXIS1", row_width as i64),
            card_int("NAXIS2", rows as i64),
            card_int("PCOUNT", 0),
            card_int("GCOUNT", 1),
            card_int("TFIELDS", columns.len() as i64),
        ];
        for (idx, column) in columns.iter().enumerate() {
            let n = idx + 1;
            if let Some(name) = &column.name {
                cards.push(card_str(&format!("TTYPE{n}"), name));
            }
            cards.push(card_str(&format!("TFORM{n}"), &column.tform()));
        }

        let mut data = Vec::with_capacity(rows * row_width);
        for row in 0..rows {
            for column in columns {
                let start = row * column.repeat;
                for idx in start..start + column.repeat {
                    column.data.encode_into(idx, &mut data);
                }
            }
        }

        self.hdus.push(hdu_bytes(&cards, &data));
        self
    }

    /// Append an ASCII `TABLE` extension with one column and no rows.
    pub fn ascii_table(mut self) -> Self {
        let cards = [
            card_str("XTENSION", "TABLE"),
            card_int("BITPIX", 8),
            card_int("NAXIS", 2),
            card_int("NAXIS1", 8),
            card_int("NAXIS2", 0),
            card_int("PCOUNT", 0),
            card_int("GCOUNT", 1),
            card_int("TFIELDS", 1),
            card_str("TTYPE1", "PA"),
            card_str("TFORM1", "F8.2"),
            card_int("TBCOL1", 1),
        ];
        self.hdus.push(hdu_bytes(&cards, &[]));
        self
    }

    /// Append an `IMAGE` extension of 16-bit pixels.
    pub fn image(mut self, pixels: &[i16]) -> Self {
        let data: Vec<u8> = pixels.iter().flat_map(|p| p.to_be_bytes()).collect();
        let cards = [
            card_str("XTENSION", "IMAGE"),
            card_int("BITPIX", 16),
            card_int("NAXIS", 1),
            card_int("NAXIS1", pixels.len() as i64),
            card_int("PCOUNT", 0),
            card_int("GCOUNT", 1),
        ];
        self.hdus.push(hdu_bytes(&cards, &data));
        self
    }

    /// Append pre-serialized HDU bytes.
    pub fn raw(mut self, bytes: Vec<u8>) -> Self {
        self.hdus.push(bytes);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.hdus.concat()
    }

    /// Write the file to a fresh temporary path.
    pub fn write_temp(&self) -> std::io::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&self.to_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

/// A 3-row table with the four report columns.
pub fn sample_report_table() -> FitsBuilder {
    FitsBuilder::new().bintable(&[
        Column::new("PA", ColumnData::Float32(vec![10.0, 20.0, 30.0])),
        Column::new("MJD", ColumnData::Float64(vec![100.5, 200.5, 300.5])),
        Column::new("Included", ColumnData::Byte(vec![1, 0, 1])),
        Column::new("ascending", ColumnData::Byte(vec![1, 1, 0])),
    ])
}
