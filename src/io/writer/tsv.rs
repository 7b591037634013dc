//! Tab separated example writer.
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::Error;
use crate::pairs::PairExample;

/// Writes [PairExample] records as TSV rows.
pub struct TsvWriter<W: Write> {
    writer: csv::Writer<W>,
    nb_records: usize,
}

impl TsvWriter<File> {
    /// Create (or truncate) the file at `dst`.
    pub fn from_path(dst: &Path) -> Result<Self, Error> {
        info!("creating {:?}", dst);
        Ok(Self::from_writer(File::create(dst)?))
    }
}

impl<W: Write> TsvWriter<W> {
    pub fn from_writer(w: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(w);
        Self {
            writer,
            nb_records: 0,
        }
    }

    pub fn write_single(&mut self, example: &PairExample) -> Result<(), Error> {
        self.writer.serialize(example)?;
        self.nb_records += 1;
        Ok(())
    }

    pub fn write(&mut self, examples: &[PairExample]) -> Result<(), Error> {
        for example in examples {
            self.write_single(example)?;
        }
        Ok(())
    }

    /// Number of records written so far.
    pub fn nb_records(&self) -> usize {
        self.nb_records
    }

    /// Flush and give back the inner writer.
    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

/// Write `examples` to `dst`, overwriting it.
pub fn write_tsv(examples: &[PairExample], dst: &Path) -> Result<(), Error> {
    let mut writer = TsvWriter::from_path(dst)?;
    writer.write(examples)?;
    let nb_records = writer.nb_records();
    writer.into_inner()?.flush()?;
    info!("wrote {} examples to {:?}", nb_records, dst);
    Ok(())
}
