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

//! BSA archive support for the dess resource system.
//!
//! The containers themselves are read and mapped by a [`ContainerStore`] that
//! lives outside of this crate. [`BsaArchive`] only forwards the resource
//! system's questions to it, treating every loaded container as one archive.

mod archive;
mod store;

pub use archive::*;
pub use store::*;

use std::{fmt::Debug, sync::Arc};

use bytes::Bytes;
use dess_vfs::{ArchiveRegistry, VfsError};

/// Type tag of BSA archives. Container files with this extension are routed here.
pub const BSA_ARCHIVE_TYPE: &str = "BSA";

/// Already loaded container files, queried by resource name.
pub trait ContainerStore: Send + Sync + Debug {
    fn exists(&self, name: &str) -> bool;

    /// Shared view of the resource bytes. The view stays valid for as long as
    /// it's alive, the store never unmaps data that was handed out.
    fn open_file(&self, name: &str) -> Option<Bytes>;
}

/// Registers the BSA archive type. Called once during start-up.
pub fn register(
    registry: &mut ArchiveRegistry,
    store: Arc<dyn ContainerStore>,
) -> Result<(), VfsError> {
    registry.register_factory(Box::new(BsaArchiveFactory::new(store)))
}

/// Canonical form of a resource name: forward slashes, lowercase ASCII.
pub fn normalize_name(name: &str) -> String {
    name.replace('\\', "/").to_ascii_lowercase()
}

#[cfg(test)]
mod test {
    use std::{path::Path, sync::Arc};

    use dess_vfs::{ArchiveRegistry, VfsError};

    use crate::{normalize_name, register, MemoryStore, BSA_ARCHIVE_TYPE};

    #[test]
    fn normalize() {
        assert_eq!("meshes/base.nif", normalize_name("Meshes\\BASE.nif"));
        assert_eq!("meshes/base.nif", normalize_name("meshes/base.nif"));
    }

    #[test]
    fn register_once() {
        let store = Arc::new(MemoryStore::default());
        let mut registry = ArchiveRegistry::default();
        register(&mut registry, store.clone()).unwrap();
        assert!(matches!(
            register(&mut registry, store),
            Err(VfsError::DuplicateArchiveType(_))
        ));
        assert_eq!(
            Some(BSA_ARCHIVE_TYPE),
            registry.type_for_path(Path::new("Data Files/Morrowind.bsa"))
        );
    }
}
