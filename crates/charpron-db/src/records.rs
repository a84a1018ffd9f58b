//! CSV records on top of `csv_core`.
//!
//! Reading works on a whole in-memory buffer (mmap or owned); quoted fields
//! may span lines. Writing quotes a field only when it has to.

use std::io::{self, Write};

use csv_core::{ReadRecordResult, Reader, WriteResult, Writer};
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Structural problems that abort a run.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table is empty; expected a header row")]
    MissingHeader,
    #[error("record {record}: expected at least {needed} columns, found {found}")]
    MissingColumn {
        record: usize,
        needed: usize,
        found: usize,
    },
    #[error("record {record}: frequency {value:?} is not an integer")]
    BadFrequency { record: usize, value: String },
    #[error("record {record}: field is not valid UTF-8")]
    InvalidUtf8 { record: usize },
}

/// One parsed CSV record. `number` is 1-based and counts the header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub number: usize,
    fields: Vec<String>,
}

impl Record {
    fn decode(number: usize, buf: &[u8], ends: &[usize]) -> Result<Self, TableError> {
        let mut fields = Vec::with_capacity(ends.len());
        let mut start = 0;
        for &end in ends {
            let text = std::str::from_utf8(&buf[start..end])
                .map_err(|_| TableError::InvalidUtf8 { record: number })?;
            fields.push(text.to_string());
            start = end;
        }
        Ok(Self { number, fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// Pick fields by position; any position past the end is structural.
    pub fn columns<const N: usize>(&self, positions: [usize; N]) -> Result<[&str; N], TableError> {
        let needed = positions.iter().max().map_or(0, |p| p + 1);
        if self.len() < needed {
            return Err(TableError::MissingColumn {
                record: self.number,
                needed,
                found: self.len(),
            });
        }
        Ok(positions.map(|p| self.field(p).unwrap_or_default()))
    }
}

/// Parse every record in `bytes`, header included.
pub fn read_records(bytes: &[u8]) -> Result<Vec<Record>, TableError> {
    let mut input = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = Reader::new();
    let mut output = vec![0u8; 1024];
    let mut ends = vec![0usize; 16];
    let (mut outlen, mut endlen) = (0, 0);
    let mut records = Vec::new();

    loop {
        let (result, nin, nout, nend) =
            reader.read_record(input, &mut output[outlen..], &mut ends[endlen..]);
        input = &input[nin..];
        outlen += nout;
        endlen += nend;
        match result {
            // An empty slice on the next call signals end of input.
            ReadRecordResult::InputEmpty => {}
            ReadRecordResult::OutputFull => {
                let len = output.len();
                output.resize(len * 2, 0);
            }
            ReadRecordResult::OutputEndsFull => {
                let len = ends.len();
                ends.resize(len * 2, 0);
            }
            ReadRecordResult::Record => {
                let number = records.len() + 1;
                records.push(Record::decode(number, &output[..outlen], &ends[..endlen])?);
                outlen = 0;
                endlen = 0;
            }
            ReadRecordResult::End => break,
        }
    }

    Ok(records)
}

/// Streaming CSV writer.
pub struct RecordWriter<W: Write> {
    inner: W,
    writer: Writer,
    buf: Vec<u8>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            writer: Writer::new(),
            buf: vec![0u8; 4096],
        }
    }

    pub fn write_record<'a, I>(&mut self, fields: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (idx, field) in fields.into_iter().enumerate() {
            if idx > 0 {
                let (_, n) = self.writer.delimiter(&mut self.buf);
                self.inner.write_all(&self.buf[..n])?;
            }
            let mut input = field.as_bytes();
            loop {
                let (result, nin, nout) = self.writer.field(input, &mut self.buf);
                self.inner.write_all(&self.buf[..nout])?;
                input = &input[nin..];
                if matches!(result, WriteResult::InputEmpty) {
                    break;
                }
            }
        }
        let (_, n) = self.writer.terminator(&mut self.buf);
        self.inner.write_all(&self.buf[..n])
    }

    /// Flush pending output and hand back the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        let (_, n) = self.writer.finish(&mut self.buf);
        self.inner.write_all(&self.buf[..n])?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(record: &Record) -> Vec<&str> {
        (0..record.len()).filter_map(|i| record.field(i)).collect()
    }

    #[test]
    fn reads_quoted_and_multiline_fields() {
        let records = read_records("a,b\n\"x,1\",\"line\nbreak\"\r\n\"q\"\"\",\n".as_bytes())
            .expect("parse");
        assert_eq!(records.len(), 3);
        assert_eq!(fields(&records[1]), vec!["x,1", "line\nbreak"]);
        assert_eq!(fields(&records[2]), vec!["q\"", ""]);
        assert_eq!(records[2].number, 3);
    }

    #[test]
    fn strips_bom_and_handles_missing_final_newline() {
        let records = read_records("\u{feff}char,pron\n行,hang4".as_bytes()).expect("parse");
        assert_eq!(fields(&records[0]), vec!["char", "pron"]);
        assert_eq!(fields(&records[1]), vec!["行", "hang4"]);
    }

    #[test]
    fn columns_reports_short_records() {
        let records = read_records(b"a,b,c\n1,2\n").expect("parse");
        let err = records[1].columns([0, 2]).unwrap_err();
        assert!(matches!(
            err,
            TableError::MissingColumn {
                record: 2,
                needed: 3,
                found: 2
            }
        ));
        assert_eq!(records[0].columns([2, 0]).unwrap(), ["c", "a"]);
    }

    #[test]
    fn writer_quotes_only_when_needed() {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_record(["行", "", "a,b"]).unwrap();
        writer.write_record(["say \"hi\"", "x"]).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "行,,\"a,b\"\n\"say \"\"hi\"\"\",x\n");
    }
}
