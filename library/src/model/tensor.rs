//! Dense float buffers exchanged between nodes.
//!
//! Layout follows the host's convention: batch first, channels last.

use crate::error::LibraryError;

/// Side length of the placeholder mask emitted for images without alpha.
pub const EMPTY_MASK_SIZE: usize = 64;

/// RGB pixels in `[0, 1]`, shape `B x H x W x 3`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl ImageTensor {
    pub fn new(
        batch: usize,
        height: usize,
        width: usize,
        data: Vec<f32>,
    ) -> Result<Self, LibraryError> {
        let expected = batch * height * width * 3;
        if data.len() != expected {
            return Err(LibraryError::InvalidInput(format!(
                "image buffer holds {} values, shape {}x{}x{}x3 needs {}",
                data.len(),
                batch,
                height,
                width,
                expected
            )));
        }
        Ok(Self {
            shape: [batch, height, width, 3],
            data,
        })
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn batch(&self) -> usize {
        self.shape[0]
    }

    pub fn height(&self) -> usize {
        self.shape[1]
    }

    pub fn width(&self) -> usize {
        self.shape[2]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// One `H x W x 3` slice per batch entry.
    pub fn frames(&self) -> impl Iterator<Item = &[f32]> {
        let frame_len = (self.height() * self.width() * 3).max(1);
        self.data.chunks(frame_len)
    }

    pub fn pixel(&self, frame: usize, y: usize, x: usize) -> [f32; 3] {
        let idx = ((frame * self.height() + y) * self.width() + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

/// Single-channel values in `[0, 1]`, shape `B x H x W`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskTensor {
    shape: [usize; 3],
    data: Vec<f32>,
}

impl MaskTensor {
    pub fn new(
        batch: usize,
        height: usize,
        width: usize,
        data: Vec<f32>,
    ) -> Result<Self, LibraryError> {
        let expected = batch * height * width;
        if data.len() != expected {
            return Err(LibraryError::InvalidInput(format!(
                "mask buffer holds {} values, shape {}x{}x{} needs {}",
                data.len(),
                batch,
                height,
                width,
                expected
            )));
        }
        Ok(Self {
            shape: [batch, height, width],
            data,
        })
    }

    /// The fixed all-zero mask used when the source has no alpha channel.
    pub fn empty() -> Self {
        Self {
            shape: [1, EMPTY_MASK_SIZE, EMPTY_MASK_SIZE],
            data: vec![0.0; EMPTY_MASK_SIZE * EMPTY_MASK_SIZE],
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape[1]
    }

    pub fn width(&self) -> usize {
        self.shape[2]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn value(&self, frame: usize, y: usize, x: usize) -> f32 {
        self.data[(frame * self.height() + y) * self.width() + x]
    }
}
