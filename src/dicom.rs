use std::path::Path;
use std::{fs, io::Cursor};

use anyhow::{bail, Context, Result};
use dicom_object::{from_reader, open_file, DefaultDicomObject, ReadError};
use dicom_pixeldata::PixelDecoder;

use crate::grayscale::GrayscaleImage;

pub const INFO_FIELD_NAMES: &[&str] = &[
    "PatientName",
    "PatientID",
    "PatientSex",
    "PatientBirthDate",
    "StudyDate",
    "StudyDescription",
    "SeriesDescription",
    "Modality",
    "Manufacturer",
    "InstitutionName",
    "BodyPartExamined",
    "SliceThickness",
    "Rows",
    "Columns",
    "BitsAllocated",
    "BitsStored",
    "PhotometricInterpretation",
    "WindowCenter",
    "WindowWidth",
    "InstanceNumber",
];

const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// A decoded first frame reduced to 8-bit grayscale plus the tags shown in
/// the information table.
#[derive(Debug, Clone)]
pub struct DecodedDicom {
    pub image: GrayscaleImage,
    pub info: Vec<(String, String)>,
}

pub fn load_dicom(path: &Path) -> Result<DecodedDicom> {
    let obj = open_dicom_object(path)?;

    let width: usize = obj
        .element_by_name("Columns")
        .context("Missing Columns tag")?
        .to_int()
        .context("Invalid Columns value")?;
    let height: usize = obj
        .element_by_name("Rows")
        .context("Missing Rows tag")?
        .to_int()
        .context("Invalid Rows value")?;
    if width == 0 || height == 0 {
        bail!("Image has no pixels ({width}x{height})");
    }

    let decoded = obj
        .decode_pixel_data_frame(0)
        .context("Failed to decode PixelData frame 0")?;
    if decoded.columns() as usize != width || decoded.rows() as usize != height {
        bail!(
            "Decoded frame dimensions mismatch: decoded={}x{}, tags={}x{}",
            decoded.columns(),
            decoded.rows(),
            width,
            height
        );
    }

    let bits_allocated = decoded.bits_allocated();
    if bits_allocated != 8 && bits_allocated != 16 {
        bail!("BitsAllocated={} is not supported (only 8/16)", bits_allocated);
    }

    let pixel_count = width
        .checked_mul(height)
        .context("Overflow while calculating frame size")?;

    let gray = match decoded.samples_per_pixel() {
        1 => {
            let samples: Vec<i32> = decoded
                .to_vec_frame(0)
                .context("Could not convert decoded frame 0 to i32 samples")?;
            if samples.len() != pixel_count {
                bail!(
                    "Decoded pixel count mismatch in frame 0: got {}, expected {}",
                    samples.len(),
                    pixel_count
                );
            }

            let photometric =
                read_string_or_default(&obj, "PhotometricInterpretation", "MONOCHROME2");
            let invert = photometric.eq_ignore_ascii_case("MONOCHROME1");
            let window = read_float_first(&obj, "WindowCenter")
                .zip(read_float_first(&obj, "WindowWidth"))
                .filter(|(_, window_width)| *window_width > 0.0)
                .or_else(|| min_max_window(&samples))
                .context("No pixels available for rendering")?;
            monochrome_to_u8(&samples, window, invert)
        }
        spp if spp >= 3 => {
            let spp = spp as usize;
            let samples: Vec<u8> = if bits_allocated == 8 {
                decoded
                    .to_vec_frame(0)
                    .context("Could not convert decoded frame 0 to u8 samples")?
            } else {
                let bits_shift = decoded.bits_stored().saturating_sub(8);
                let wide: Vec<u16> = decoded
                    .to_vec_frame(0)
                    .context("Could not convert decoded frame 0 to u16 samples")?;
                wide.into_iter()
                    .map(|sample| (sample >> bits_shift) as u8)
                    .collect()
            };
            let expected = pixel_count
                .checked_mul(spp)
                .context("Overflow while calculating color frame size")?;
            if samples.len() != expected {
                bail!(
                    "Decoded color pixel count mismatch in frame 0: got {}, expected {}",
                    samples.len(),
                    expected
                );
            }
            color_to_luma(&samples, spp)
        }
        other => bail!(
            "Unsupported SamplesPerPixel={} (supports 1 for monochrome and >=3 for color)",
            other
        ),
    };

    let image = GrayscaleImage::new(width, height, gray)?;
    Ok(DecodedDicom {
        image,
        info: collect_info(&obj),
    })
}

/// Linear VOI mapping of stored values onto 0..=255.
fn monochrome_to_u8(samples: &[i32], (center, width): (f32, f32), invert: bool) -> Vec<u8> {
    let width = width.max(1.0);
    let low = center - width / 2.0;
    let range = width.max(1e-6);

    samples
        .iter()
        .map(|&sample| {
            let normalized = ((sample as f32 - low) / range).clamp(0.0, 1.0);
            let gray = (normalized * 255.0).round() as u8;
            if invert {
                255 - gray
            } else {
                gray
            }
        })
        .collect()
}

fn color_to_luma(samples: &[u8], samples_per_pixel: usize) -> Vec<u8> {
    samples
        .chunks_exact(samples_per_pixel)
        .map(|pixel| {
            let luma = pixel
                .iter()
                .zip(LUMA_WEIGHTS)
                .map(|(&channel, weight)| channel as f32 * weight)
                .sum::<f32>();
            luma.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

fn min_max_window(samples: &[i32]) -> Option<(f32, f32)> {
    let (min_value, max_value) = min_max(samples)?;
    let center = (min_value as f32 + max_value as f32) / 2.0;
    let width = (max_value as i64 - min_value as i64).max(1) as f32;
    Some((center, width))
}

fn open_dicom_object(path: &Path) -> Result<DefaultDicomObject> {
    let err = match open_file(path) {
        Ok(obj) => return Ok(obj),
        Err(err) => err,
    };

    if lacks_meta_group_length(&err) {
        let bytes = fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
        if let Some(repaired) = insert_meta_group_length(&bytes) {
            log::debug!(
                "Inserted File Meta Information Group Length into {}",
                path.display()
            );
            return from_reader(Cursor::new(repaired)).with_context(|| {
                format!(
                    "Could not open {} after repairing missing File Meta Information Group Length (0002,0000)",
                    path.display()
                )
            });
        }
    }

    Err(err).with_context(|| format!("Could not open {}", path.display()))
}

fn lacks_meta_group_length(error: &ReadError) -> bool {
    matches!(
        error,
        ReadError::ParseMetaDataSet {
            source: dicom_object::meta::Error::UnexpectedTag { tag, .. }
        } if tag.group() == 0x0002 && tag.element() != 0x0000
    )
}

/// Returns a copy of `bytes` with a (0002,0000) UL element inserted before
/// the first meta element, or `None` when the file already has one or the
/// meta group cannot be walked.
fn insert_meta_group_length(bytes: &[u8]) -> Option<Vec<u8>> {
    let offset = meta_start(bytes)?;
    let first = bytes.get(offset..offset + 4)?;
    let group = u16::from_le_bytes([first[0], first[1]]);
    let element = u16::from_le_bytes([first[2], first[3]]);
    if group != 0x0002 || element == 0x0000 {
        return None;
    }

    let group_len = u32::try_from(meta_group_len(bytes, offset)?).ok()?;

    let mut repaired = Vec::with_capacity(bytes.len() + 12);
    repaired.extend_from_slice(&bytes[..offset]);
    repaired.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00]);
    repaired.extend_from_slice(&group_len.to_le_bytes());
    repaired.extend_from_slice(&bytes[offset..]);
    Some(repaired)
}

fn meta_start(bytes: &[u8]) -> Option<usize> {
    if bytes.get(128..132) == Some(b"DICM".as_slice()) {
        Some(132)
    } else if bytes.get(..4) == Some(b"DICM".as_slice()) {
        Some(4)
    } else {
        None
    }
}

/// Byte length of the explicit-VR little-endian group 0002 elements starting
/// at `start`.
fn meta_group_len(bytes: &[u8], start: usize) -> Option<usize> {
    let mut position = start;
    while let Some(header) = bytes.get(position..position + 8) {
        if u16::from_le_bytes([header[0], header[1]]) != 0x0002 {
            break;
        }

        let (header_len, value_len) = if has_long_length(&header[4..6]) {
            let raw = bytes.get(position + 8..position + 12)?;
            let value_len = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
            if value_len == u32::MAX {
                return None;
            }
            (12, value_len as usize)
        } else {
            (8, u16::from_le_bytes([header[6], header[7]]) as usize)
        };

        let next = position.checked_add(header_len)?.checked_add(value_len)?;
        if next > bytes.len() {
            return None;
        }
        position = next;
    }

    (position > start).then_some(position - start)
}

fn has_long_length(vr: &[u8]) -> bool {
    matches!(
        vr,
        b"OB" | b"OD" | b"OF" | b"OL" | b"OW" | b"SQ" | b"UC" | b"UR" | b"UT" | b"UN"
    )
}

fn collect_info(obj: &DefaultDicomObject) -> Vec<(String, String)> {
    INFO_FIELD_NAMES
        .iter()
        .filter_map(|name| {
            let value = obj.element_by_name(name).ok()?.to_str().ok()?;
            let value = value.trim();
            (!value.is_empty()).then(|| (name.to_string(), value.to_string()))
        })
        .collect()
}

fn read_string_or_default(obj: &DefaultDicomObject, name: &str, default: &str) -> String {
    obj.element_by_name(name)
        .ok()
        .and_then(|el| el.to_str().ok())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| default.to_string())
}

fn read_float_first(obj: &DefaultDicomObject, name: &str) -> Option<f32> {
    obj.element_by_name(name)
        .ok()
        .and_then(|el| el.to_str().ok())
        .and_then(|s| parse_multi_valued_number(&s))
}

fn parse_multi_valued_number(value: &str) -> Option<f32> {
    value.split('\\').next()?.trim().parse::<f32>().ok()
}

fn min_max(values: &[i32]) -> Option<(i32, i32)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(low, high), v| (low.min(v), high.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preamble() -> Vec<u8> {
        let mut bytes = vec![0u8; 128];
        bytes.extend_from_slice(b"DICM");
        bytes
    }

    #[test]
    fn repair_inserts_group_length_when_missing() {
        let mut bytes = preamble();
        // (0002,0002) UI "ABCD"
        bytes.extend_from_slice(&[
            0x02, 0x00, 0x02, 0x00, b'U', b'I', 0x04, 0x00, b'A', b'B', b'C', b'D',
        ]);
        // (0002,0001) OB, long length form, 2 bytes
        bytes.extend_from_slice(&[
            0x02, 0x00, 0x01, 0x00, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01,
        ]);
        // first data set element ends the meta group
        bytes.extend_from_slice(&[0x08, 0x00, 0x16, 0x00, b'U', b'I', 0x02, 0x00, b'1', 0x00]);

        let repaired = insert_meta_group_length(&bytes).expect("expected repaired bytes");

        let offset = 132;
        assert_eq!(&repaired[offset..offset + 4], &[0x02, 0x00, 0x00, 0x00]);
        assert_eq!(&repaired[offset + 4..offset + 6], b"UL");
        assert_eq!(&repaired[offset + 6..offset + 8], &[0x04, 0x00]);
        assert_eq!(&repaired[offset + 8..offset + 12], &26u32.to_le_bytes());
        assert_eq!(&repaired[offset + 12..], &bytes[offset..]);
    }

    #[test]
    fn repair_is_noop_when_group_length_already_exists() {
        let mut bytes = preamble();
        bytes.extend_from_slice(&[
            0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 0x08, 0x00, 0x00, 0x00,
        ]);
        assert!(insert_meta_group_length(&bytes).is_none());
    }

    #[test]
    fn repair_rejects_truncated_meta_group() {
        let mut bytes = preamble();
        bytes.extend_from_slice(&[0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x40, 0x00, b'1']);
        assert!(insert_meta_group_length(&bytes).is_none());
        assert!(insert_meta_group_length(b"not a dicom file").is_none());
    }

    #[test]
    fn monochrome_window_maps_range_onto_full_scale() {
        let gray = monochrome_to_u8(&[-100, 0, 100, 200, 300], (100.0, 200.0), false);
        assert_eq!(gray, vec![0, 0, 128, 255, 255]);
    }

    #[test]
    fn monochrome1_is_inverted() {
        let gray = monochrome_to_u8(&[0, 1000], (500.0, 1000.0), true);
        assert_eq!(gray, vec![255, 0]);
    }

    #[test]
    fn min_max_window_spans_stored_values() {
        assert_eq!(min_max_window(&[40, -20, 60]), Some((20.0, 80.0)));
        assert_eq!(min_max_window(&[7, 7]), Some((7.0, 1.0)));
        assert_eq!(min_max_window(&[]), None);
    }

    #[test]
    fn color_reduces_to_luma_and_skips_alpha() {
        let gray = color_to_luma(&[255, 0, 0, 0, 255, 255, 255, 9], 4);
        assert_eq!(gray, vec![76, 255]);
    }

    #[test]
    fn multi_valued_numbers_use_first_value() {
        assert_eq!(parse_multi_valued_number("40\\400"), Some(40.0));
        assert_eq!(parse_multi_valued_number(" -600.5 "), Some(-600.5));
        assert_eq!(parse_multi_valued_number("abc"), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_dicom(Path::new("does/not/exist.dcm")).expect_err("missing file");
        assert!(format!("{err:#}").contains("does/not/exist.dcm"));
    }
}
