//! Thin output glue: interleaved binary I/Q samples and a TSV symbol
//! trace. Carries no DSP semantics.

use crate::types::IqSample;
use byteorder::{LittleEndian, WriteBytesExt};
use log::error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `samples` as interleaved little-endian signed 16-bit values
/// (`i0, q0, i1, q1, ...`). Failure to open the file is logged and
/// returned to the caller as non-fatal: the binary still attempts the
/// symbol trace write.
pub fn write_iq_bin(path: impl AsRef<Path>, samples: &[IqSample]) -> io::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        error!("failed to open {}: {}", path.display(), e);
        e
    })?;
    let mut writer = BufWriter::new(file);
    for s in samples {
        writer.write_i16::<LittleEndian>(s.i)?;
        writer.write_i16::<LittleEndian>(s.q)?;
    }
    writer.flush()
}

/// Write one `<i>\t<q>\n` line per pre-filter symbol.
pub fn write_symbols_tsv(path: impl AsRef<Path>, symbols: &[IqSample]) -> io::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        error!("failed to open {}: {}", path.display(), e);
        e
    })?;
    let mut writer = BufWriter::new(file);
    for s in symbols {
        writeln!(writer, "{}\t{}", s.i, s.q)?;
    }
    writer.flush()
}
