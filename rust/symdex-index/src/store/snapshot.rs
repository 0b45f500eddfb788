//! Whole-index persistence.
//!
//! A snapshot is an object with two fields: `symbol_table`, the interned
//! strings in id order, and `indexes`, the complete per-level maps and
//! histograms. It is written either as JSON or as a bincode payload behind a
//! short magic header. Loading validates the snapshot before handing out an
//! index, so `load(save(index))` answers every query exactly like `index`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};
use symdex_common::{Result, error::Error};

use super::{Indexes, validate::validate};
use crate::{index::SymbolIndex, symbol_table::SymbolTable};

/// Leading bytes of a binary snapshot: format tag and version.
const BINARY_MAGIC: &[u8; MAGIC_LEN] = b"SYMDEX\x00\x01";
const MAGIC_LEN: usize = 8;

/// Encoding of a persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    Json,
    #[default]
    Binary,
}

impl SnapshotFormat {
    /// `.json` files are JSON, everything else is binary.
    pub fn from_path(path: &Path) -> SnapshotFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SnapshotFormat::Json,
            _ => SnapshotFormat::Binary,
        }
    }
}

/// An owned, not yet validated snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub symbol_table: Vec<String>,
    pub indexes: Indexes,
}

/// Borrowed view used for saving without cloning the index.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    symbol_table: &'a [String],
    indexes: &'a Indexes,
}

impl SymbolIndex {
    /// Copies the index into an owned snapshot.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            symbol_table: self.symbols.strings().to_vec(),
            indexes: self.indexes.clone(),
        }
    }

    /// Validates `snapshot` and turns it into an index.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<SymbolIndex> {
        let symbols = SymbolTable::from_strings(snapshot.symbol_table)?;
        validate(&symbols, &snapshot.indexes)?;
        Ok(SymbolIndex {
            symbols,
            indexes: snapshot.indexes,
        })
    }

    /// Writes the whole index to `writer`.
    pub fn save<W: Write>(&self, mut writer: W, format: SnapshotFormat) -> Result<()> {
        let snapshot = SnapshotRef {
            symbol_table: self.symbols.strings(),
            indexes: &self.indexes,
        };
        match format {
            SnapshotFormat::Json => serde_json::to_writer(&mut writer, &snapshot)
                .map_err(|e| Error::persistence("snapshot", e.to_string()))?,
            SnapshotFormat::Binary => {
                writer
                    .write_all(BINARY_MAGIC)
                    .map_err(|e| Error::io("snapshot header", e))?;
                bincode::serde::encode_into_std_write(&snapshot, &mut writer, binc_config())
                    .map_err(|e| Error::persistence("snapshot", e.to_string()))?;
            }
        }
        writer.flush().map_err(|e| Error::io("snapshot", e))
    }

    /// Reads and validates an index written by [`SymbolIndex::save`].
    pub fn load<R: Read>(mut reader: R, format: SnapshotFormat) -> Result<SymbolIndex> {
        let snapshot: Snapshot = match format {
            SnapshotFormat::Json => serde_json::from_reader(&mut reader)
                .map_err(|e| Error::persistence("snapshot", e.to_string()))?,
            SnapshotFormat::Binary => {
                let mut magic = [0u8; MAGIC_LEN];
                reader
                    .read_exact(&mut magic)
                    .map_err(|e| Error::persistence("snapshot header", e.to_string()))?;
                if &magic != BINARY_MAGIC {
                    return Err(Error::persistence(
                        "snapshot header",
                        "not a binary symbol index snapshot",
                    ));
                }
                bincode::serde::decode_from_std_read(&mut reader, binc_config())
                    .map_err(|e| Error::persistence("snapshot", e.to_string()))?
            }
        };
        SymbolIndex::from_snapshot(snapshot)
    }

    /// Saves to `path`, choosing the format from its extension.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        self.save(BufWriter::new(file), SnapshotFormat::from_path(path))?;
        info!(
            "saved symbol index to {} ({} symbols, {} texts)",
            path.display(),
            self.symbols.len(),
            self.indexes.texts.len()
        );
        Ok(())
    }

    /// Loads from `path`, choosing the format from its extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<SymbolIndex> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        let index = SymbolIndex::load(BufReader::new(file), SnapshotFormat::from_path(path))?;
        info!(
            "loaded symbol index from {} ({} symbols, {} texts)",
            path.display(),
            index.symbols.len(),
            index.indexes.texts.len()
        );
        Ok(index)
    }
}

fn binc_config() -> impl bincode::config::Config {
    bincode::config::standard().with_fixed_int_encoding()
}
