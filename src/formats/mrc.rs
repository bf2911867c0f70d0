use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use ndarray::{Array, IxDyn};
use serde_json::{Map, Value, json};

use crate::model::RawArray;

use super::{FixedHeader, FormatError, Result};

const FORMAT: &str = "MRC";
pub(crate) const HEADER_LEN: usize = 1024;
/// Bytes of the first FEI extended-header section we decode.
const FEI_SECTION_LEN: usize = 172;

const OFFSET_MODE: usize = 12;
const OFFSET_GRID: usize = 28;
const OFFSET_CELL_LENGTHS: usize = 40;
const OFFSET_CELL_ANGLES: usize = 52;
const OFFSET_AXIS_MAP: usize = 64;
const OFFSET_EXTENDED_LEN: usize = 92;
const OFFSET_EXTENDED_TYPE: usize = 104;
const OFFSET_MACHINE_STAMP: usize = 212;

/// Header plus the layout facts needed to read the volume behind it.
struct MrcLayout {
    header: FixedHeader,
    big_endian: bool,
    extended_type: [u8; 4],
}

impl MrcLayout {
    fn data_offset(&self) -> u64 {
        (HEADER_LEN + self.header.extended_header_len) as u64
    }
}

pub(crate) fn read_header(path: &Path) -> Result<FixedHeader> {
    let mut file = File::open(path)?;
    let mut layout = read_layout(&mut file)?;
    if matches!(&layout.extended_type, b"FEI1" | b"FEI2")
        && layout.header.extended_header_len >= FEI_SECTION_LEN
    {
        let mut section = [0_u8; FEI_SECTION_LEN];
        match file.read_exact(&mut section) {
            Ok(()) => layout.header.vendor_info = Some(parse_fei_section(&section)),
            Err(error) => log::warn!(
                "skipping FEI extended header of {}: {error}",
                path.display()
            ),
        }
    }
    Ok(layout.header)
}

pub(crate) fn read_volume(path: &Path) -> Result<RawArray> {
    let mut file = File::open(path)?;
    let layout = read_layout(&mut file)?;
    let header = &layout.header;
    let [nz, ny, nx] = header.shape;

    let bytes_per_voxel = match header.mode {
        0 => 1,
        1 | 6 => 2,
        2 => 4,
        other => {
            return Err(FormatError::UnsupportedLayout(format!(
                "MRC mode {other} is not supported"
            )));
        }
    };
    let count = nz
        .checked_mul(ny)
        .and_then(|value| value.checked_mul(nx))
        .ok_or_else(|| malformed(format!("volume {nx}x{ny}x{nz} overflows")))?;
    let payload_len = count
        .checked_mul(bytes_per_voxel)
        .ok_or_else(|| malformed(format!("volume {nx}x{ny}x{nz} overflows")))?;

    let expected = layout.data_offset() + payload_len as u64;
    let found = file.metadata()?.len();
    if found < expected {
        return Err(FormatError::Truncated {
            format: FORMAT,
            expected,
            found,
        });
    }

    file.seek(SeekFrom::Start(layout.data_offset()))?;
    let mut payload = vec![0_u8; payload_len];
    file.read_exact(&mut payload)?;

    let values = if layout.big_endian {
        decode_samples::<BigEndian>(&payload, header.mode, count)
    } else {
        decode_samples::<LittleEndian>(&payload, header.mode, count)
    };
    let data = Array::from_shape_vec(IxDyn(&header.shape), values)
        .map_err(|error| FormatError::UnsupportedLayout(error.to_string()))?;
    let [vz, vy, vx] = header.voxel_size;
    Ok(RawArray::new(
        data,
        vec![vz, vy, vx],
        vec!["A".to_string(); 3],
    )?)
}

fn read_layout(file: &mut File) -> Result<MrcLayout> {
    let mut bytes = [0_u8; HEADER_LEN];
    file.read_exact(&mut bytes).map_err(|error| {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::Truncated {
                format: FORMAT,
                expected: HEADER_LEN as u64,
                found: file.metadata().map(|meta| meta.len()).unwrap_or(0),
            }
        } else {
            FormatError::Io(error)
        }
    })?;
    parse_layout(&bytes)
}

fn parse_layout(bytes: &[u8; HEADER_LEN]) -> Result<MrcLayout> {
    // 0x11 in the first stamp byte marks big-endian writers; everything else
    // (0x44, 0x41 or an unset stamp) is read as little-endian.
    let big_endian = bytes[OFFSET_MACHINE_STAMP] == 0x11;
    let header = if big_endian {
        parse_header::<BigEndian>(bytes)?
    } else {
        parse_header::<LittleEndian>(bytes)?
    };
    let mut extended_type = [0_u8; 4];
    extended_type.copy_from_slice(&bytes[OFFSET_EXTENDED_TYPE..OFFSET_EXTENDED_TYPE + 4]);
    Ok(MrcLayout {
        header,
        big_endian,
        extended_type,
    })
}

fn parse_header<B: ByteOrder>(bytes: &[u8]) -> Result<FixedHeader> {
    let i32_at = |offset: usize| B::read_i32(&bytes[offset..offset + 4]);
    let f32_at = |offset: usize| f64::from(B::read_f32(&bytes[offset..offset + 4]));

    let (nx, ny, nz) = (i32_at(0), i32_at(4), i32_at(8));
    if nx <= 0 || ny <= 0 || nz <= 0 {
        return Err(malformed(format!("non-positive dimensions {nx}x{ny}x{nz}")));
    }
    let extended_header_len = i32_at(OFFSET_EXTENDED_LEN);
    if extended_header_len < 0 {
        return Err(malformed(format!(
            "negative extended header length {extended_header_len}"
        )));
    }

    let grid = [
        i32_at(OFFSET_GRID),
        i32_at(OFFSET_GRID + 4),
        i32_at(OFFSET_GRID + 8),
    ];
    let lengths = [
        f32_at(OFFSET_CELL_LENGTHS),
        f32_at(OFFSET_CELL_LENGTHS + 4),
        f32_at(OFFSET_CELL_LENGTHS + 8),
    ];
    let sampling = |axis: usize| {
        if grid[axis] > 0 {
            lengths[axis] / f64::from(grid[axis])
        } else {
            0.0
        }
    };

    Ok(FixedHeader {
        shape: [nz as usize, ny as usize, nx as usize],
        mode: i32_at(OFFSET_MODE),
        voxel_size: [sampling(2), sampling(1), sampling(0)],
        axis_orientations: [
            i32_at(OFFSET_AXIS_MAP),
            i32_at(OFFSET_AXIS_MAP + 4),
            i32_at(OFFSET_AXIS_MAP + 8),
        ],
        cell_angles: [
            f32_at(OFFSET_CELL_ANGLES),
            f32_at(OFFSET_CELL_ANGLES + 4),
            f32_at(OFFSET_CELL_ANGLES + 8),
        ],
        extended_header_len: extended_header_len as usize,
        vendor_info: None,
    })
}

/// First section of an FEI1/FEI2 extended header. FEI writes these
/// little-endian regardless of the main header.
fn parse_fei_section(bytes: &[u8; FEI_SECTION_LEN]) -> Map<String, Value> {
    let f64_at = |offset: usize| LittleEndian::read_f64(&bytes[offset..offset + 8]);
    let text_at = |offset: usize| {
        String::from_utf8_lossy(&bytes[offset..offset + 16])
            .trim_end_matches(['\0', ' '])
            .to_string()
    };

    let mut info = Map::new();
    info.insert(
        "Metadata size".into(),
        json!(LittleEndian::read_i32(&bytes[0..4])),
    );
    info.insert(
        "Metadata version".into(),
        json!(LittleEndian::read_i32(&bytes[4..8])),
    );
    info.insert(
        "Bitmask 1".into(),
        json!(LittleEndian::read_u32(&bytes[8..12])),
    );
    info.insert("Timestamp".into(), json!(f64_at(12)));
    info.insert("Microscope type".into(), json!(text_at(20)));
    info.insert("D-Number".into(), json!(text_at(36)));
    info.insert("Application".into(), json!(text_at(52)));
    info.insert("Application version".into(), json!(text_at(68)));
    let numeric = [
        ("HT", 84),
        ("Dose", 92),
        ("Alpha tilt", 100),
        ("Beta tilt", 108),
        ("X-Stage", 116),
        ("Y-Stage", 124),
        ("Z-Stage", 132),
        ("Tilt axis angle", 140),
        ("Dual axis rotation", 148),
        ("Pixel size X", 156),
        ("Pixel size Y", 164),
    ];
    for (name, offset) in numeric {
        let value = f64_at(offset);
        if value.is_finite() {
            info.insert(name.into(), json!(value));
        }
    }
    info
}

fn decode_samples<B: ByteOrder>(payload: &[u8], mode: i32, count: usize) -> Vec<f32> {
    match mode {
        0 => payload.iter().map(|byte| f32::from(*byte as i8)).collect(),
        1 => {
            let mut samples = vec![0_i16; count];
            B::read_i16_into(payload, &mut samples);
            samples.into_iter().map(f32::from).collect()
        }
        6 => {
            let mut samples = vec![0_u16; count];
            B::read_u16_into(payload, &mut samples);
            samples.into_iter().map(f32::from).collect()
        }
        _ => {
            let mut samples = vec![0_f32; count];
            B::read_f32_into(payload, &mut samples);
            samples
        }
    }
}

fn malformed(reason: String) -> FormatError {
    FormatError::MalformedHeader {
        format: FORMAT,
        reason,
    }
}
