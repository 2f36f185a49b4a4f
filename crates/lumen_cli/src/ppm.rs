//! Plain-text PPM ("P3") output.

use std::io::{self, Write};

use lumen_renderer::ImageBuffer;

/// Frame the image's byte triples as a P3 file: `P3`, dimensions, the 255
/// max value, then one `R G B` line per pixel in scanline order.
pub fn write_ppm<W: Write>(out: &mut W, image: &ImageBuffer) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for rgb in image.to_rgb_bytes().chunks_exact(3) {
        writeln!(out, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }
    Ok(())
}
