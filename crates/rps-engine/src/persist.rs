//! JSON artifact files.
//!
//! Both the score record and the trained model are stored as pretty-printed JSON.
//! Writes go to a sibling temporary file first and are renamed into place, so a
//! crash mid-write leaves the previous artifact intact.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistError {
    #[display("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[display("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("incompatible artifact {}: {reason}", path.display())]
    Incompatible { path: PathBuf, reason: String },
}

impl PersistError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Parse { path, .. }
            | Self::Serialize { path, .. }
            | Self::Incompatible { path, .. } => path,
        }
    }
}

/// Reads a JSON file.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_json_file<T, P>(path: P) -> Result<Option<T>, PersistError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistError::Read {
                path: path.to_owned(),
                source,
            });
        }
    };
    let value = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        PersistError::Parse {
            path: path.to_owned(),
            source,
        }
    })?;
    Ok(Some(value))
}

/// Writes `value` as pretty JSON, creating parent directories as needed.
pub fn write_json_file<T, P>(path: P, value: &T) -> Result<(), PersistError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let write_err = |source| PersistError::Write {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let file = File::create(&tmp_path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
        PersistError::Serialize {
            path: path.to_owned(),
            source,
        }
    })?;
    writeln!(writer).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(write_err)?;
    Ok(())
}
