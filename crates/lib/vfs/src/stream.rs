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
    cmp::min,
    io::{self, Read, Seek, SeekFrom},
};

use bytes::Bytes;

use crate::DataStream;

/// Read-only stream over memory owned by someone else. Never copies the
/// underlying bytes; `data()` borrows them directly.
///
/// Seeking past the end clamps the position to the end of the buffer, the
/// returned offset is where the cursor actually ended up.
#[derive(Debug, Clone)]
pub struct MemoryDataStream {
    name: String,
    data: Bytes,
    cursor: usize,
}

impl MemoryDataStream {
    pub fn new(name: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            data,
            cursor: 0,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl Read for MemoryDataStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let from = min(self.cursor, self.data.len());
        let to = min(from + buf.len(), self.data.len());
        let size = to - from;
        buf[..size].copy_from_slice(&self.data[from..to]);
        self.cursor = to;

        Ok(size)
    }
}

impl Seek for MemoryDataStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (base, offset) = match pos {
            SeekFrom::Start(offset) => {
                self.cursor = min(offset, self.data.len() as u64) as usize;
                return Ok(self.cursor as u64);
            }
            SeekFrom::Current(offset) => (self.cursor as i64, offset),
            SeekFrom::End(offset) => (self.data.len() as i64, offset),
        };
        let target = base.checked_add(offset).filter(|target| *target >= 0);
        match target {
            Some(target) => {
                self.cursor = min(target as usize, self.data.len());
                Ok(self.cursor as u64)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Can't seek before start of stream",
            )),
        }
    }
}

impl DataStream for MemoryDataStream {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn eof(&self) -> bool {
        self.cursor >= self.data.len()
    }

    fn as_bytes(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

#[cfg(test)]
mod test {
    use std::io::{Read, Seek, SeekFrom};

    use bytes::Bytes;

    use crate::DataStream;

    use super::MemoryDataStream;

    #[test]
    fn read_in_chunks() {
        let mut stream = MemoryDataStream::new("file", Bytes::from_static(b"Hello world!"));
        let mut buf = [0u8; 5];
        assert_eq!(5, stream.read(&mut buf).unwrap());
        assert_eq!(b"Hello", &buf);
        assert!(!stream.eof());
        assert_eq!(b" world!", stream.load().unwrap().as_slice());
        assert!(stream.eof());
        assert_eq!(0, stream.read(&mut buf).unwrap());
    }

    #[test]
    fn no_copy() {
        let data = Bytes::from_static(b"Hi there!");
        let stream = MemoryDataStream::new("file", data.clone());
        assert_eq!(data.as_ptr(), stream.data().as_ptr());
        let boxed: Box<dyn DataStream> = Box::new(stream.clone());
        assert_eq!(data.as_ptr(), boxed.as_bytes().unwrap().as_ptr());
        assert_eq!(9, stream.size());
        assert_eq!("file", stream.name());
    }

    #[test]
    fn seek() {
        let mut stream = MemoryDataStream::new("file", Bytes::from_static(b"0123456789"));
        assert_eq!(7, stream.seek(SeekFrom::End(-3)).unwrap());
        assert_eq!(5, stream.seek(SeekFrom::Current(-2)).unwrap());
        assert_eq!(10, stream.seek(SeekFrom::Start(100)).unwrap());
        assert!(stream.eof());
        assert!(stream.seek(SeekFrom::Current(-11)).is_err());
        assert_eq!(10, stream.position());
    }
}
