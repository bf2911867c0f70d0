use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};
use serde_json::{Map, Value};

use crate::formats::{
    EmdContainer, FixedHeader, FormatError, FormatLibrary, Result, StreamHeader, TagTree,
};
use crate::model::RawArray;

/// Little-endian, mode 2 MRC volume writer.
pub(crate) struct MrcFixture {
    pub(crate) shape: [usize; 3],
    /// Cell lengths `[x, y, z]` in Angstrom.
    pub(crate) cell: [f32; 3],
    pub(crate) values: Vec<f32>,
    pub(crate) extended_type: [u8; 4],
    pub(crate) extended_header: Vec<u8>,
}

impl MrcFixture {
    /// `shape` is `(nz, ny, nx)`; samples count up from zero.
    pub(crate) fn new(shape: [usize; 3], cell: [f32; 3]) -> Self {
        let count = shape.iter().product::<usize>();
        Self {
            shape,
            cell,
            values: (0..count).map(|index| index as f32).collect(),
            extended_type: [0; 4],
            extended_header: Vec::new(),
        }
    }

    pub(crate) fn header_bytes(&self) -> Vec<u8> {
        let [nz, ny, nx] = self.shape;
        let mut header = vec![0_u8; 1024];
        let mut put_i32 = |offset: usize, value: i32| {
            LittleEndian::write_i32(&mut header[offset..offset + 4], value)
        };
        put_i32(0, nx as i32);
        put_i32(4, ny as i32);
        put_i32(8, nz as i32);
        put_i32(12, 2);
        put_i32(28, nx as i32);
        put_i32(32, ny as i32);
        put_i32(36, nz as i32);
        put_i32(64, 1);
        put_i32(68, 2);
        put_i32(72, 3);
        put_i32(92, self.extended_header.len() as i32);
        for (index, length) in self.cell.iter().enumerate() {
            LittleEndian::write_f32(&mut header[40 + index * 4..44 + index * 4], *length);
            LittleEndian::write_f32(&mut header[52 + index * 4..56 + index * 4], 90.0);
        }
        header[104..108].copy_from_slice(&self.extended_type);
        header[208..212].copy_from_slice(b"MAP ");
        header[212] = 0x44;
        header[213] = 0x41;
        header
    }

    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.header_bytes();
        bytes.extend_from_slice(&self.extended_header);
        let mut payload = vec![0_u8; self.values.len() * 4];
        LittleEndian::write_f32_into(&self.values, &mut payload);
        bytes.extend_from_slice(&payload);
        bytes
    }

    pub(crate) fn write(&self, path: &Path) {
        fs::write(path, self.to_bytes()).expect("write mrc fixture");
    }
}

/// In-memory [`FormatLibrary`] serving canned parse results per path.
#[derive(Debug, Default)]
pub(crate) struct FixtureLibrary {
    pub(crate) tag_trees: HashMap<PathBuf, TagTree>,
    pub(crate) headers: HashMap<PathBuf, FixedHeader>,
    pub(crate) containers: HashMap<PathBuf, EmdContainer>,
    pub(crate) streams: HashMap<PathBuf, StreamHeader>,
    pub(crate) companions: HashMap<PathBuf, Map<String, Value>>,
    pub(crate) arrays: HashMap<PathBuf, RawArray>,
}

fn lookup<T: Clone>(entries: &HashMap<PathBuf, T>, path: &Path) -> Result<T> {
    entries.get(path).cloned().ok_or_else(|| {
        FormatError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no fixture for {}", path.display()),
        ))
    })
}

impl FormatLibrary for FixtureLibrary {
    fn read_tag_tree(&self, path: &Path) -> Result<TagTree> {
        lookup(&self.tag_trees, path)
    }

    fn read_fixed_header(&self, path: &Path) -> Result<FixedHeader> {
        lookup(&self.headers, path)
    }

    fn read_container(&self, path: &Path) -> Result<EmdContainer> {
        lookup(&self.containers, path)
    }

    fn read_stream_header(&self, path: &Path) -> Result<StreamHeader> {
        lookup(&self.streams, path)
    }

    fn read_companion_info(&self, path: &Path) -> Result<Map<String, Value>> {
        lookup(&self.companions, path)
    }

    fn read_array(&self, path: &Path) -> Result<RawArray> {
        lookup(&self.arrays, path)
    }
}

/// A fixed header as [`crate::formats::NativeLibrary`] would report it.
pub(crate) fn fixed_header(shape: [usize; 3], voxel_size: [f64; 3]) -> FixedHeader {
    FixedHeader {
        shape,
        mode: 2,
        voxel_size,
        axis_orientations: [1, 2, 3],
        cell_angles: [90.0, 90.0, 90.0],
        extended_header_len: 0,
        vendor_info: None,
    }
}
