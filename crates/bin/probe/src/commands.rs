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
    io::{self, Write},
    time::UNIX_EPOCH,
};

use dess_vfs::ResourceGroup;

pub fn exists(group: &ResourceGroup, name: &str, out: &mut impl Write) -> anyhow::Result<bool> {
    let found = group.exists(name);
    writeln!(out, "{}", found)?;

    Ok(found)
}

pub fn cat(group: &ResourceGroup, name: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let mut stream = group.open(name)?;
    io::copy(&mut stream, out)?;

    Ok(())
}

pub fn find(group: &ResourceGroup, pattern: &str, out: &mut impl Write) -> anyhow::Result<usize> {
    let found = group.find_file_info(pattern, true);
    for info in &found {
        writeln!(out, "{}: {}", info.archive, info.filename)?;
    }

    Ok(found.len())
}

pub fn info(group: &ResourceGroup, name: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(archive) = group
        .locations()
        .into_iter()
        .find(|archive| archive.exists(name))
    else {
        anyhow::bail!("File {} not found", name);
    };
    let stream = archive.open(name)?;
    let modified = archive
        .modified_time(name)
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    writeln!(out, "name: {}", stream.name())?;
    writeln!(out, "archive: {} ({})", archive.name(), archive.archive_type())?;
    writeln!(out, "size: {}", stream.size())?;
    writeln!(out, "modified: {}", modified.as_secs())?;

    Ok(())
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use bytes::Bytes;
    use dess_bsa::{register, MemoryStore, BSA_ARCHIVE_TYPE};
    use dess_vfs::{ArchiveRegistry, ResourceGroup};

    fn group() -> (ArchiveRegistry, ResourceGroup) {
        let mut store = MemoryStore::default();
        store.insert("meshes\\base_anim.nif", Bytes::from_static(b"NetImmerse"));
        let mut registry = ArchiveRegistry::default();
        register(&mut registry, Arc::new(store)).unwrap();
        let group = ResourceGroup::default();
        group.add_location(registry.load("Morrowind.bsa", BSA_ARCHIVE_TYPE).unwrap());

        (registry, group)
    }

    #[test]
    fn exists() {
        let (_registry, group) = group();
        let mut out: Vec<u8> = Vec::new();
        assert!(super::exists(&group, "Meshes\\Base_Anim.nif", &mut out).unwrap());
        assert!(!super::exists(&group, "meshes\\missing.nif", &mut out).unwrap());
        assert_eq!("true\nfalse\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn cat() {
        let (_registry, group) = group();
        let mut out: Vec<u8> = Vec::new();
        super::cat(&group, "meshes\\base_anim.nif", &mut out).unwrap();
        assert_eq!(b"NetImmerse", out.as_slice());
        assert!(super::cat(&group, "meshes\\missing.nif", &mut out).is_err());
    }

    #[test]
    fn find() {
        let (_registry, group) = group();
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(1, super::find(&group, "meshes\\base_anim.nif", &mut out).unwrap());
        assert_eq!(0, super::find(&group, "meshes\\*.nif", &mut out).unwrap());
        assert_eq!(
            "Morrowind.bsa: meshes\\base_anim.nif\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn info() {
        let (_registry, group) = group();
        let mut out: Vec<u8> = Vec::new();
        super::info(&group, "meshes\\base_anim.nif", &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("archive: Morrowind.bsa (BSA)"));
        assert!(out.contains("size: 10"));
        assert!(out.contains("modified: 0"));
        assert!(super::info(&group, "missing", &mut Vec::<u8>::new()).is_err());
    }
}
