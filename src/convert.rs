//! File-to-file conversion, as used by the `mbpenc` binary.

use crate::decode::{decode, LevelMap};
use crate::encode::raster::check_dimensions;
use crate::encode::select::{encode_to, Encoded};
use crate::image::load::load_pixmap;
use crate::utils::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Loads `input`, encodes it with its smallest variant and writes `output`.
///
/// The output file is only created once the image is known to fit the
/// header, so a rejected image leaves no file behind.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Encoded> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let pixmap = load_pixmap(input)?;
    check_dimensions(pixmap.width(), pixmap.height())?;

    let file = File::create(output)?;
    let (encoded, mut writer) = encode_to(&pixmap, BufWriter::new(file))?;
    writer.flush()?;
    log::info!(
        "{} -> {}: {} ({} bytes)",
        input.display(),
        output.display(),
        encoded.variant,
        encoded.size
    );
    Ok(encoded)
}

/// Reads and decodes an encoded file.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<LevelMap> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
