// Copyright (C) 2023 gigablaster

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::{
    collections::HashMap,
    fs::{self, ReadDir},
    path::{Path, PathBuf},
};

use bytes::Bytes;
use dess_vfs::{MappedFile, VfsError};
use log::{error, info};

use crate::{normalize_name, ContainerStore};

/// Store backed by buffers that are already in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: HashMap<String, Bytes>,
}

impl MemoryStore {
    pub fn insert(&mut self, name: &str, data: impl Into<Bytes>) {
        self.files.insert(normalize_name(name), data.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ContainerStore for MemoryStore {
    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(&normalize_name(name))
    }

    fn open_file(&self, name: &str) -> Option<Bytes> {
        self.files.get(&normalize_name(name)).cloned()
    }
}

/// Store over loose data directories. Every file below a mounted root is
/// memory mapped and stays mapped for the lifetime of the store.
#[derive(Debug, Default)]
pub struct MappedStore {
    roots: Vec<PathBuf>,
    files: HashMap<String, Bytes>,
}

impl MappedStore {
    /// Maps all files under `root`. Files from later roots replace files with
    /// the same name from earlier ones. Returns the number of mapped files.
    ///
    /// Fails without touching the store if `root` can't be read. Unreadable
    /// subdirectories and files below it are logged and skipped.
    pub fn mount(&mut self, root: &Path) -> Result<usize, VfsError> {
        info!("Mounting data at path {:?}", root);
        let entries = fs::read_dir(root)?;
        let mut files = HashMap::new();
        map_entries(root, entries, &mut files);
        let count = files.len();
        self.files.extend(files);
        self.roots.push(root.to_path_buf());
        info!("Mapped {} files from {:?}", count, root);

        Ok(count)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn map_entries(root: &Path, entries: ReadDir, files: &mut HashMap<String, Bytes>) {
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                error!("Failed to read entry in {:?} - {:?}", root, err);
                continue;
            }
        };
        if path.is_symlink() {
            continue;
        }
        if path.is_dir() {
            match fs::read_dir(&path) {
                Ok(entries) => map_entries(root, entries, files),
                Err(err) => error!("Failed to read directory {:?} - {:?}", path, err),
            }
            continue;
        }
        let Some(name) = relative_name(root, &path) else {
            continue;
        };
        match map_file(&path) {
            Ok(data) => {
                files.insert(name, data);
            }
            Err(err) => error!("Failed to map file {:?} - {:?}", path, err),
        }
    }
}

impl ContainerStore for MappedStore {
    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(&normalize_name(name))
    }

    fn open_file(&self, name: &str) -> Option<Bytes> {
        self.files.get(&normalize_name(name)).cloned()
    }
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.to_str()?;

    Some(normalize_name(relative))
}

fn map_file(path: &Path) -> Result<Bytes, VfsError> {
    // Zero sized files can't be mapped.
    if fs::metadata(path)?.len() == 0 {
        return Ok(Bytes::new());
    }

    Ok(MappedFile::open(path)?.into_bytes())
}
