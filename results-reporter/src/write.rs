// Copyright (c) The results-tracker Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisting rendered reports.

use crate::errors::WriteReportError;
use atomicwrites::{AllowOverwrite, AtomicFile};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Writes `contents` to `path`, creating parent directories as needed.
///
/// The file is written to a temporary location and renamed into place, so a failed write never
/// leaves a partially written file behind. An existing file is overwritten.
pub fn write_report(path: &Utf8Path, contents: &str) -> Result<(), WriteReportError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|error| WriteReportError::CreateDir {
            path: parent.to_owned(),
            error,
        })?;
    }

    AtomicFile::new(path, AllowOverwrite)
        .write(|f| f.write_all(contents.as_bytes()))
        .map_err(|error| WriteReportError::Write {
            path: path.to_owned(),
            error,
        })?;

    debug!("wrote {} bytes to {path}", contents.len());
    Ok(())
}

/// Outputs that are written together, in the order they were added.
///
/// If one write fails, the outputs already written by this batch are put back the way they were:
/// earlier contents are restored and newly created files are removed. Directories created along
/// the way are left in place.
#[derive(Clone, Debug, Default)]
pub struct OutputBatch<'a> {
    outputs: Vec<(&'a Utf8Path, &'a str)>,
}

impl<'a> OutputBatch<'a> {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output to the batch.
    pub fn add(&mut self, path: &'a Utf8Path, contents: &'a str) -> &mut Self {
        self.outputs.push((path, contents));
        self
    }

    /// Writes every output, returning the paths written in order.
    pub fn write(self) -> Result<Vec<Utf8PathBuf>, WriteReportError> {
        let mut written: Vec<(&Utf8Path, PreviousContents)> =
            Vec::with_capacity(self.outputs.len());

        for (path, contents) in self.outputs {
            let previous = PreviousContents::read(path);
            if let Err(error) = write_report(path, contents) {
                for (path, previous) in written.into_iter().rev() {
                    previous.restore(path);
                }
                return Err(error);
            }
            written.push((path, previous));
        }

        Ok(written
            .into_iter()
            .map(|(path, _)| path.to_owned())
            .collect())
    }
}

#[derive(Debug)]
enum PreviousContents {
    Absent,
    Present(Vec<u8>),
    Unreadable(io::Error),
}

impl PreviousContents {
    fn read(path: &Utf8Path) -> Self {
        match std::fs::read(path) {
            Ok(contents) => Self::Present(contents),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Self::Absent,
            Err(error) => Self::Unreadable(error),
        }
    }

    fn restore(self, path: &Utf8Path) {
        match self {
            Self::Absent => match std::fs::remove_file(path) {
                Ok(()) => debug!("removed {path}"),
                Err(error) => warn!("failed to remove {path} after a later write failed: {error}"),
            },
            Self::Present(contents) => {
                match AtomicFile::new(path, AllowOverwrite).write(|f| f.write_all(&contents)) {
                    Ok(()) => debug!("restored previous contents of {path}"),
                    Err(error) => {
                        warn!("failed to restore {path} after a later write failed: {error}")
                    }
                }
            }
            Self::Unreadable(error) => {
                warn!("{path} was overwritten and can't be restored (reading it failed: {error})")
            }
        }
    }
}
