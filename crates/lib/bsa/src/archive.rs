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

use std::{sync::Arc, time::SystemTime};

use dess_vfs::{
    is_wildcard, Archive, ArchiveFactory, DataStream, FileInfo, MemoryDataStream, VfsError,
};
use log::{debug, trace};

use crate::{ContainerStore, BSA_ARCHIVE_TYPE};

/// Every container known to the store, seen as a single archive.
#[derive(Debug)]
pub struct BsaArchive {
    name: String,
    store: Arc<dyn ContainerStore>,
}

impl BsaArchive {
    pub fn new(name: impl Into<String>, store: Arc<dyn ContainerStore>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }
}

impl Archive for BsaArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn archive_type(&self) -> &str {
        BSA_ARCHIVE_TYPE
    }

    fn is_case_sensitive(&self) -> bool {
        false
    }

    // Containers are loaded by the store and stay mapped until exit.
    fn load(&self) -> Result<(), VfsError> {
        Ok(())
    }

    fn unload(&self) {}

    fn exists(&self, name: &str) -> bool {
        trace!("exists({})", name);
        self.store.exists(name)
    }

    fn open(&self, name: &str) -> Result<Box<dyn DataStream>, VfsError> {
        trace!("open({})", name);
        let data = self
            .store
            .open_file(name)
            .ok_or_else(|| VfsError::NotFound(name.to_string()))?;

        Ok(Box::new(MemoryDataStream::new(name, data)))
    }

    fn modified_time(&self, _name: &str) -> SystemTime {
        SystemTime::UNIX_EPOCH
    }

    fn list(&self, recursive: bool, dirs: bool) -> Vec<String> {
        debug!("list({}, {}) on {}", recursive, dirs, self.name);
        Vec::new()
    }

    fn list_file_info(&self, recursive: bool, dirs: bool) -> Vec<FileInfo> {
        debug!("list_file_info({}, {}) on {}", recursive, dirs, self.name);
        Vec::new()
    }

    // Called with "*" right after load. Resources are still found through exists().
    fn find(&self, _pattern: &str, _recursive: bool, _dirs: bool) -> Vec<String> {
        Vec::new()
    }

    // Only literal names are looked up, there is no wildcard or recursive matching.
    fn find_file_info(&self, pattern: &str, _recursive: bool, _dirs: bool) -> Vec<FileInfo> {
        if is_wildcard(pattern) || !self.exists(pattern) {
            return Vec::new();
        }

        vec![FileInfo {
            archive: self.name.clone(),
            filename: pattern.to_string(),
            path: String::new(),
            basename: String::new(),
            compressed_size: 0,
            uncompressed_size: 0,
        }]
    }
}

/// Creates [`BsaArchive`] instances sharing one store.
#[derive(Debug)]
pub struct BsaArchiveFactory {
    store: Arc<dyn ContainerStore>,
}

impl BsaArchiveFactory {
    pub fn new(store: Arc<dyn ContainerStore>) -> Self {
        Self { store }
    }
}

impl ArchiveFactory for BsaArchiveFactory {
    fn archive_type(&self) -> &str {
        BSA_ARCHIVE_TYPE
    }

    fn create_instance(&self, name: &str) -> Arc<dyn Archive> {
        Arc::new(BsaArchive::new(name, self.store.clone()))
    }
}
