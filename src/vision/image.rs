//! Owned image buffers and their allocation ledger.
//!
//! Every buffer holds a [`BufferLease`] taken from a [`BufferLedger`]. The
//! lease is returned when the buffer is dropped, so the ledger always knows
//! how many buffers are alive and whether each was released exactly once.
//! Derived buffers take their lease from the ledger of their source.

use std::{cell::Cell, rc::Rc};

use embedded_graphics::pixelcolor::Rgb888;

use crate::vision::VisionError;

#[derive(Debug, Default)]
struct LedgerCounts {
    allocated: Cell<usize>,
    released:  Cell<usize>,
}

/// Counts image buffer allocations and releases.
#[derive(Debug, Clone, Default)]
pub struct BufferLedger {
    counts: Rc<LedgerCounts>,
}

impl BufferLedger {
    pub fn new() -> Self { Self::default() }

    /// Takes a lease for a new buffer.
    pub fn lease(&self) -> BufferLease {
        self.counts.allocated.set(self.counts.allocated.get() + 1);
        BufferLease {
            counts: Rc::clone(&self.counts),
        }
    }

    pub fn allocated(&self) -> usize { self.counts.allocated.get() }

    pub fn released(&self) -> usize { self.counts.released.get() }

    /// Buffers currently alive.
    pub fn live(&self) -> usize { self.allocated() - self.released() }
}

/// Proof that a buffer is registered with a ledger. Released on drop.
#[derive(Debug)]
pub struct BufferLease {
    counts: Rc<LedgerCounts>,
}

impl BufferLease {
    fn ledger(&self) -> BufferLedger {
        BufferLedger {
            counts: Rc::clone(&self.counts),
        }
    }
}

impl Drop for BufferLease {
    fn drop(&mut self) { self.counts.released.set(self.counts.released.get() + 1); }
}

fn check_dimensions(width: u32, height: u32, len: usize) -> Result<(), VisionError> {
    if width as usize * height as usize != len {
        return Err(VisionError::Processing(format!(
            "{} pixels do not fill a {}x{} image",
            len, width, height
        )));
    }
    Ok(())
}

/// A color image in 8-bit RGB.
#[derive(Debug)]
pub struct ColorImage {
    width:  u32,
    height: u32,
    pixels: Vec<Rgb888>,
    lease:  BufferLease,
}

impl ColorImage {
    /// Wraps row-major `pixels` into an image registered with `ledger`.
    pub fn from_pixels(
        ledger: &BufferLedger,
        width: u32,
        height: u32,
        pixels: Vec<Rgb888>,
    ) -> Result<Self, VisionError> {
        check_dimensions(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
            lease: ledger.lease(),
        })
    }

    /// A new image with the same size as `self` and the given pixels,
    /// registered with `self`'s ledger.
    pub fn derive(&self, pixels: Vec<Rgb888>) -> Result<Self, VisionError> {
        Self::from_pixels(&self.lease.ledger(), self.width, self.height, pixels)
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn pixels(&self) -> &[Rgb888] { &self.pixels }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x < self.width && y < self.height {
            self.pixels.get((y * self.width + x) as usize).copied()
        } else {
            None
        }
    }

    pub fn ledger(&self) -> BufferLedger { self.lease.ledger() }
}

/// A binary image: each pixel is either in or out.
#[derive(Debug)]
pub struct BinaryMask {
    width:  u32,
    height: u32,
    bits:   Vec<bool>,
    lease:  BufferLease,
}

impl BinaryMask {
    /// Wraps row-major `bits` into a mask registered with `ledger`.
    pub fn from_bits(
        ledger: &BufferLedger,
        width: u32,
        height: u32,
        bits: Vec<bool>,
    ) -> Result<Self, VisionError> {
        check_dimensions(width, height, bits.len())?;
        Ok(Self {
            width,
            height,
            bits,
            lease: ledger.lease(),
        })
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn bits(&self) -> &[bool] { &self.bits }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Number of pixels that are in.
    pub fn count(&self) -> usize { self.bits.iter().filter(|&&bit| bit).count() }

    /// Coordinates of every pixel that is in, row by row.
    pub fn points(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &bit)| bit)
            .map(move |(index, _)| (index as u32 % width, index as u32 / width))
    }

    pub fn ledger(&self) -> BufferLedger { self.lease.ledger() }
}
