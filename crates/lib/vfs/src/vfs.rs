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

use std::{fs, path::Path, sync::Arc};

use log::{error, info};
use parking_lot::RwLock;

use crate::{Archive, ArchiveRegistry, DataStream, FileInfo, VfsError};

/// Ordered set of archive locations searched as one.
#[derive(Default)]
pub struct ResourceGroup {
    locations: RwLock<Vec<Arc<dyn Archive>>>,
}

impl ResourceGroup {
    pub fn add_location(&self, archive: Arc<dyn Archive>) {
        info!(
            "Adding {} location {}",
            archive.archive_type(),
            archive.name()
        );
        self.locations.write().push(archive);
    }

    /// Adds every file in `root` whose extension matches a registered archive type.
    pub fn scan(&self, registry: &mut ArchiveRegistry, root: &Path) -> Result<(), VfsError> {
        let paths = fs::read_dir(root)?;
        for path in paths {
            let path = path?.path();
            if !path.is_file() {
                continue;
            }
            let Some(ty) = registry.type_for_path(&path).map(str::to_string) else {
                continue;
            };
            let name = path.to_string_lossy();
            match registry.load(&name, &ty) {
                Ok(archive) => self.add_location(archive),
                Err(err) => error!("Failed to add archive {:?} - {:?}", path, err),
            }
        }

        Ok(())
    }

    pub fn locations(&self) -> Vec<Arc<dyn Archive>> {
        self.locations.read().clone()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// Opens the resource from the first location that reports it.
    pub fn open(&self, name: &str) -> Result<Box<dyn DataStream>, VfsError> {
        match self.locate(name) {
            Some(archive) => archive.open(name),
            None => Err(VfsError::NotFound(name.into())),
        }
    }

    pub fn find_file_info(&self, pattern: &str, recursive: bool) -> Vec<FileInfo> {
        self.locations
            .read()
            .iter()
            .flat_map(|archive| archive.find_file_info(pattern, recursive, false))
            .collect()
    }

    fn locate(&self, name: &str) -> Option<Arc<dyn Archive>> {
        self.locations
            .read()
            .iter()
            .find(|archive| archive.exists(name))
            .cloned()
    }
}
