//! Opening of (possibly gzipped) JSON documents.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::Error;

/// Find `name` or `name.gz` in `dir`, plain file first.
pub(crate) fn locate(dir: &Path, name: &str) -> Option<PathBuf> {
    let plain = dir.join(name);
    if plain.is_file() {
        return Some(plain);
    }
    let gzipped = dir.join(format!("{}.gz", name));
    if gzipped.is_file() {
        return Some(gzipped);
    }
    None
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Deserialize a whole JSON document, decompressing it if its extension is `.gz`.
///
/// Valid JSON of the wrong shape is a [Error::Contract], malformed JSON an [Error::Serde].
pub(crate) fn load<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    debug!("loading {:?}", path);
    let f = BufReader::new(File::open(path)?);
    let reader: Box<dyn Read> = if is_gzipped(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(f)
    };

    serde_json::from_reader(reader).map_err(|e| match e.classify() {
        Category::Data => Error::Contract(format!("unexpected content in {:?}: {}", path, e)),
        _ => Error::from(e),
    })
}
