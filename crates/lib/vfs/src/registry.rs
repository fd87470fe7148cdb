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

use std::{collections::HashMap, path::Path, sync::Arc};

use log::{debug, info};
use smol_str::SmolStr;

use crate::{Archive, VfsError};

/// Creates archives of a single type.
pub trait ArchiveFactory: Send + Sync {
    /// Type tag, also used as the container file extension.
    fn archive_type(&self) -> &str;
    fn create_instance(&self, name: &str) -> Arc<dyn Archive>;
    fn destroy_instance(&self, archive: Arc<dyn Archive>) {
        drop(archive);
    }
}

struct LoadedArchive {
    archive: Arc<dyn Archive>,
    ty: SmolStr,
}

/// Archive factories by type and the archives created from them by name.
#[derive(Default)]
pub struct ArchiveRegistry {
    factories: HashMap<SmolStr, Box<dyn ArchiveFactory>>,
    archives: HashMap<String, LoadedArchive>,
}

fn type_key(ty: &str) -> SmolStr {
    SmolStr::new(ty.to_ascii_lowercase())
}

impl ArchiveRegistry {
    pub fn register_factory(&mut self, factory: Box<dyn ArchiveFactory>) -> Result<(), VfsError> {
        let key = type_key(factory.archive_type());
        if self.factories.contains_key(&key) {
            return Err(VfsError::DuplicateArchiveType(
                factory.archive_type().to_string(),
            ));
        }
        info!("Registered archive type {}", factory.archive_type());
        self.factories.insert(key, factory);

        Ok(())
    }

    pub fn archive_types(&self) -> Vec<&str> {
        self.factories
            .values()
            .map(|factory| factory.archive_type())
            .collect()
    }

    /// Archive type whose tag matches the file extension.
    pub fn type_for_path(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?;
        self.factories
            .get(&type_key(ext))
            .map(|factory| factory.archive_type())
    }

    /// Returns the archive with this name, creating and loading it first if needed.
    pub fn load(&mut self, name: &str, ty: &str) -> Result<Arc<dyn Archive>, VfsError> {
        if let Some(loaded) = self.archives.get(name) {
            return Ok(loaded.archive.clone());
        }
        let key = type_key(ty);
        let factory = self
            .factories
            .get(&key)
            .ok_or_else(|| VfsError::UnknownArchiveType(ty.to_string()))?;
        let archive = factory.create_instance(name);
        if let Err(err) = archive.load() {
            factory.destroy_instance(archive);
            return Err(err);
        }
        info!("Loaded {} archive {}", factory.archive_type(), name);
        self.archives.insert(
            name.to_string(),
            LoadedArchive {
                archive: archive.clone(),
                ty: key,
            },
        );

        Ok(archive)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Archive>> {
        self.archives.get(name).map(|loaded| loaded.archive.clone())
    }

    pub fn unload(&mut self, name: &str) -> Result<(), VfsError> {
        let loaded = self
            .archives
            .remove(name)
            .ok_or_else(|| VfsError::ArchiveNotLoaded(name.to_string()))?;
        self.destroy(loaded);

        Ok(())
    }

    pub fn unload_all(&mut self) {
        let archives = self.archives.drain().map(|(_, loaded)| loaded).collect::<Vec<_>>();
        for loaded in archives {
            self.destroy(loaded);
        }
    }

    fn destroy(&self, loaded: LoadedArchive) {
        debug!("Unloading archive {}", loaded.archive.name());
        loaded.archive.unload();
        if let Some(factory) = self.factories.get(&loaded.ty) {
            factory.destroy_instance(loaded.archive);
        }
    }
}

impl Drop for ArchiveRegistry {
    fn drop(&mut self) {
        self.unload_all();
    }
}
