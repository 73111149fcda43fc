//! Image

use ::image::{ImageBuffer, ImageFormat, Rgb};
use kernel::common::*;
use kernel::geometry::*;
use kernel::output_sample::*;
use kernel::render_target::*;
use kernel::spectrum::*;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Accumulated pixel data.
#[derive(Clone, Default)]
struct Pixels {
    /// Sum of weighted radiance per pixel.
    radiance: Vec<Spectral>,

    /// Sum of weights per pixel.
    weight: Vec<Float>,

    /// Sum of weighted coverage per pixel.
    alpha: Vec<Float>,

    /// Number of samples received.
    samples: u64,
}

/// Render target that box filters output samples into pixels.
pub struct Image {
    /// Resolution in pixels.
    resolution: Point2i,

    /// Accumulated pixel data.
    pixels: Mutex<Pixels>,
}

impl Image {
    /// Create a new black `Image`.
    ///
    /// * `resolution` - Resolution in pixels.
    pub fn new(resolution: Point2i) -> Self {
        let resolution = Point2i::new(resolution.x.max(1), resolution.y.max(1));
        let n = (resolution.x * resolution.y) as usize;
        Self {
            resolution,
            pixels: Mutex::new(Pixels {
                radiance: vec![Spectral::ZERO; n],
                weight: vec![0.0; n],
                alpha: vec![0.0; n],
                samples: 0,
            }),
        }
    }

    /// Returns the pixel index of a screen coordinate, or `None` if it lies
    /// outside the frame.
    ///
    /// * `p` - Screen coordinate.
    fn pixel_index(&self, p: &Point2f) -> Option<usize> {
        if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
            return None;
        }
        let x = min((p.x * self.resolution.x as Float) as Int, self.resolution.x - 1);
        let y = min((p.y * self.resolution.y as Float) as Int, self.resolution.y - 1);
        Some((y * self.resolution.x + x) as usize)
    }

    /// Returns the filtered radiance of a pixel; black if it received no
    /// samples.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn pixel(&self, x: Int, y: Int) -> Spectral {
        if x < 0 || y < 0 || x >= self.resolution.x || y >= self.resolution.y {
            return Spectral::ZERO;
        }
        let i = (y * self.resolution.x + x) as usize;
        let pixels = self.pixels.lock().unwrap_or_else(PoisonError::into_inner);
        if pixels.weight[i] > 0.0 {
            pixels.radiance[i] / pixels.weight[i]
        } else {
            Spectral::ZERO
        }
    }

    /// Returns the filtered coverage of a pixel.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn alpha(&self, x: Int, y: Int) -> Float {
        if x < 0 || y < 0 || x >= self.resolution.x || y >= self.resolution.y {
            return 0.0;
        }
        let i = (y * self.resolution.x + x) as usize;
        let pixels = self.pixels.lock().unwrap_or_else(PoisonError::into_inner);
        if pixels.weight[i] > 0.0 {
            pixels.alpha[i] / pixels.weight[i]
        } else {
            0.0
        }
    }

    /// Returns the number of samples received.
    pub fn number_of_samples(&self) -> u64 {
        self.pixels.lock().unwrap_or_else(PoisonError::into_inner).samples
    }

    /// Write the image as an 8-bit sRGB file. The format follows the file
    /// extension; PNG and TGA are supported.
    ///
    /// * `path` - Output file path.
    pub fn write(&self, path: &str) -> Result<(), String> {
        let format = match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("png") => ImageFormat::Png,
            Some("tga") => ImageFormat::Tga,
            Some(extension) => return Err(format!("Extension {extension} is not supported")),
            None => return Err(format!("Can't determine file type from suffix of filename {path}")),
        };

        let res_x = self.resolution.x as u32;
        let res_y = self.resolution.y as u32;
        info!("Writing image {path} with resolution {res_x}x{res_y}");

        let mut imgbuf = ImageBuffer::new(res_x, res_y);
        for y in 0..self.resolution.y {
            for x in 0..self.resolution.x {
                let c = self.pixel(x, y).clamp(0.0, 1.0);
                let rgb = [0, 1, 2].map(|band| to_byte(c[band]));
                imgbuf.put_pixel(x as u32, y as u32, Rgb(rgb));
            }
        }

        imgbuf
            .save_with_format(path, format)
            .map_err(|err| format!("Error saving output image {path}: {err}."))
    }
}

/// Gamma correct a value in `[0, 1]` and quantize it to 8 bits.
///
/// * `v` - The value.
fn to_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}

impl RenderTarget for Image {
    fn resolution(&self) -> Point2i {
        self.resolution
    }

    fn begin_render(&self) {
        debug!("Image {}x{} render started", self.resolution.x, self.resolution.y);
    }

    fn write_render(&self, samples: &[OutputSample]) {
        let mut pixels = self.pixels.lock().unwrap_or_else(PoisonError::into_inner);
        for s in samples {
            pixels.samples += 1;
            if s.radiance.has_nans() || !s.weight.is_finite() {
                continue;
            }
            if let Some(i) = self.pixel_index(&s.screen_coordinate) {
                pixels.radiance[i] += s.radiance * s.weight;
                pixels.weight[i] += s.weight;
                pixels.alpha[i] += s.alpha * s.weight;
            }
        }
    }

    fn end_render(&self) {
        debug!("Image render finished after {} samples", self.number_of_samples());
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn output(x: Float, y: Float, v: Float, weight: Float) -> OutputSample {
        OutputSample::new(Point2f::new(x, y), Spectral::new(v), 1.0, 1.0, weight)
    }

    #[test]
    fn pixels_are_weighted_averages() {
        let image = Image::new(Point2i::new(4, 2));
        image.write_render(&[
            output(0.1, 0.1, 1.0, 1.0),
            output(0.2, 0.4, 4.0, 3.0),
            output(0.9, 0.9, 2.0, 1.0),
        ]);
        assert!(approx_eq!(Float, image.pixel(0, 0)[0], 13.0 / 4.0));
        assert!(approx_eq!(Float, image.pixel(3, 1)[1], 2.0));
        assert_eq!(image.pixel(1, 0), Spectral::ZERO);
        assert!(approx_eq!(Float, image.alpha(0, 0), 1.0));
        assert_eq!(image.number_of_samples(), 3);
    }

    #[test]
    fn screen_edge_maps_to_last_pixel() {
        let image = Image::new(Point2i::new(2, 2));
        image.write_render(&[output(1.0, 1.0, 1.0, 1.0), output(1.5, 0.5, 1.0, 1.0)]);
        assert_eq!(image.pixel(1, 1), Spectral::ONE);
        assert_eq!(image.pixel(1, 0), Spectral::ZERO);
    }

    #[test]
    fn quantization_is_gamma_corrected() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(1.0), 255);
        assert!(to_byte(0.5) > 127);
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let image = Image::new(Point2i::new(1, 1));
        assert!(image.write("out.xyz").is_err());
        assert!(image.write("out").is_err());
    }
}
