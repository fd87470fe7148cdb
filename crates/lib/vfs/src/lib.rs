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

mod error;
mod mmap;
mod registry;
mod stream;
mod vfs;

pub use error::*;
pub use mmap::MappedFile;
pub use registry::*;
pub use stream::*;
pub use vfs::*;

use std::{
    fmt::Debug,
    io::{self, Read, Seek},
    time::SystemTime,
};

/// Readable resource handed out by an archive. Ownership passes to the caller.
pub trait DataStream: Read + Seek + Send + Debug {
    fn name(&self) -> &str;
    fn size(&self) -> usize;
    fn eof(&self) -> bool;

    /// Borrows the whole backing buffer when the stream sits on memory.
    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }

    /// Reads everything from the current position to the end.
    fn load(&mut self) -> io::Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.size());
        self.read_to_end(&mut data)?;

        Ok(data)
    }
}

/// Metadata record produced by archive enumeration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Name of the archive that produced the record.
    pub archive: String,
    pub filename: String,
    pub path: String,
    pub basename: String,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

/// Named container the resource system queries for existence and content.
///
/// Enumeration methods take the `recursive` and `dirs` flags of the host
/// resource system even when an implementation ignores them.
pub trait Archive: Send + Sync + Debug {
    fn name(&self) -> &str;
    fn archive_type(&self) -> &str;
    fn is_case_sensitive(&self) -> bool;

    fn load(&self) -> Result<(), VfsError>;
    fn unload(&self);

    fn exists(&self, name: &str) -> bool;
    fn open(&self, name: &str) -> Result<Box<dyn DataStream>, VfsError>;
    fn modified_time(&self, name: &str) -> SystemTime;

    fn list(&self, recursive: bool, dirs: bool) -> Vec<String>;
    fn list_file_info(&self, recursive: bool, dirs: bool) -> Vec<FileInfo>;
    fn find(&self, pattern: &str, recursive: bool, dirs: bool) -> Vec<String>;
    fn find_file_info(&self, pattern: &str, recursive: bool, dirs: bool) -> Vec<FileInfo>;
}

/// Returns true if a search pattern uses glob wildcards.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

#[cfg(test)]
mod test {
    use super::is_wildcard;

    #[test]
    fn wildcards() {
        assert!(is_wildcard("*"));
        assert!(is_wildcard("textures\\*.dds"));
        assert!(is_wildcard("meshes\\b?se.nif"));
        assert!(!is_wildcard("meshes\\base.nif"));
        assert!(!is_wildcard(""));
    }
}
