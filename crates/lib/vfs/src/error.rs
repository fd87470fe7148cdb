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

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("IO error: {0}")]
    Io(io::Error),
    #[error("File {0} not found")]
    NotFound(String),
    #[error("Archive type {0} isn't registered")]
    UnknownArchiveType(String),
    #[error("Archive type {0} is already registered")]
    DuplicateArchiveType(String),
    #[error("Archive {0} isn't loaded")]
    ArchiveNotLoaded(String),
}

impl From<io::Error> for VfsError {
    fn from(value: io::Error) -> Self {
        VfsError::Io(value)
    }
}
