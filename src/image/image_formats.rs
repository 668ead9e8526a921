// src/image/image_formats.rs

//! In-memory RGB images and the pixel accessor the encoders read through.
//!
//! The encoders never touch a concrete buffer type. They only ask a
//! [`PixelSource`] for its dimensions and for the RGB sample at `(x, y)`, so
//! a `Pixmap`, an `image::RgbImage` or a decoded `LevelMap` can all be fed
//! to them directly.

use crate::utils::error::{MbpError, Result};
use bytemuck::{Pod, Zeroable};

// --- Pixel Type Definitions ---

/// A single RGB pixel with 8-bit components.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b }
    }

    /// A pixel with the same intensity in all three channels.
    pub fn gray(v: u8) -> Self {
        Pixel { r: v, g: v, b: v }
    }

    pub fn black() -> Self {
        Pixel::gray(0)
    }

    pub fn white() -> Self {
        Pixel::gray(255)
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(arr: [u8; 3]) -> Self {
        Pixel {
            r: arr[0],
            g: arr[1],
            b: arr[2],
        }
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(p: Pixel) -> Self {
        [p.r, p.g, p.b]
    }
}

// --- Pixel accessor ---

/// Read-only access to a grid of RGB samples.
///
/// Implementations must return a sample for every `x < width()` and
/// `y < height()`. Each encoding pass calls [`PixelSource::pixel`] exactly
/// `width * height` times.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> Pixel;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        (**self).pixel(x, y)
    }
}

impl PixelSource for ::image::RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        Pixel::from(self.get_pixel(x, y).0)
    }
}

// --- Pixmap Type (Color Image Buffer) ---

/// A 2D buffer of color pixels, stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<Pixel>,
}

impl Pixmap {
    /// Creates a new pixmap with the given dimensions, initialized to black.
    pub fn new(width: u32, height: u32) -> Self {
        Pixmap::from_pixel(width, height, Pixel::black())
    }

    /// Creates a pixmap filled with a single pixel value.
    pub fn from_pixel(width: u32, height: u32, pixel: Pixel) -> Self {
        Pixmap {
            width,
            height,
            data: vec![pixel; (width as usize) * (height as usize)],
        }
    }

    /// Creates a pixmap from a raw vector of pixels in row-major order.
    pub fn from_vec(width: u32, height: u32, data: Vec<Pixel>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(MbpError::InvalidArg(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Pixmap {
            width,
            height,
            data,
        })
    }

    /// Creates a pixmap from interleaved RGB bytes (`r, g, b, r, g, b, ...`).
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 3 != 0 {
            return Err(MbpError::InvalidArg(format!(
                "RGB buffer length {} is not a multiple of 3",
                bytes.len()
            )));
        }
        let pixels: &[Pixel] = bytemuck::cast_slice(bytes);
        Pixmap::from_vec(width, height, pixels.to_vec())
    }

    /// Creates a pixmap by calling a function for each pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Pixel,
    {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Pixmap {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        assert!(x < self.width && y < self.height);
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        assert!(x < self.width && y < self.height);
        self.data[(y as usize) * (self.width as usize) + x as usize] = pixel;
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// Returns the dimensions as a tuple (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns raw pixel data as a byte slice.
    pub fn as_raw(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }
}

impl PixelSource for Pixmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        self.get_pixel(x, y)
    }
}

impl From<&::image::RgbImage> for Pixmap {
    fn from(img: &::image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels: &[Pixel] = bytemuck::cast_slice(img.as_raw().as_slice());
        Pixmap {
            width,
            height,
            data: pixels.to_vec(),
        }
    }
}
