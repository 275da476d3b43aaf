//! Binary (de)serialization of [`Dense`] matrices.
//!
//! Layout: `rows` as `u64` little-endian, `cols` as `u64` little-endian, then
//! `rows * cols` elements as `f64` little-endian in row-major order.
//! Every function returns the exact number of bytes moved, also on failure
//! (carried by `NeuraGradError::Io`).

use super::Dense;
use crate::error::{NeuraGradError, Result};
use std::io::{self, Read, Write};

/// Size in bytes of the `(rows, cols)` header.
pub const HEADER_LEN: usize = 16;

/// Writes `buf` completely, counting every byte the writer accepted.
fn write_chunk<W: Write + ?Sized>(w: &mut W, buf: &[u8], n: &mut usize) -> Result<()> {
    let mut off = 0;
    while off < buf.len() {
        match w.write(&buf[off..]) {
            Ok(0) => {
                return Err(NeuraGradError::Io {
                    transferred: *n,
                    source: io::Error::new(io::ErrorKind::WriteZero, "failed to write matrix bytes"),
                })
            }
            Ok(k) => {
                off += k;
                *n += k;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(NeuraGradError::Io {
                    transferred: *n,
                    source,
                })
            }
        }
    }
    Ok(())
}

/// Fills `buf` completely, counting every byte the reader produced.
fn read_chunk<R: Read + ?Sized>(r: &mut R, buf: &mut [u8], n: &mut usize) -> Result<()> {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => {
                return Err(NeuraGradError::Io {
                    transferred: *n,
                    source: io::Error::new(io::ErrorKind::UnexpectedEof, "matrix stream ended early"),
                })
            }
            Ok(k) => {
                off += k;
                *n += k;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(NeuraGradError::Io {
                    transferred: *n,
                    source,
                })
            }
        }
    }
    Ok(())
}

/// Elements preallocated by [`Dense::read_from`] before the data proves to be there.
const MAX_PREALLOC: usize = 4096;

fn invalid_header(n: usize, msg: &str) -> NeuraGradError {
    NeuraGradError::Io {
        transferred: n,
        source: io::Error::new(io::ErrorKind::InvalidData, msg.to_string()),
    }
}

/// Reads `(rows, cols)` and checks that the element count is addressable.
fn read_header<R: Read + ?Sized>(r: &mut R, n: &mut usize) -> Result<(usize, usize)> {
    let mut word = [0u8; 8];
    read_chunk(r, &mut word, n)?;
    let rows = usize::try_from(u64::from_le_bytes(word))
        .map_err(|_| invalid_header(*n, "matrix row count does not fit in usize"))?;
    read_chunk(r, &mut word, n)?;
    let cols = usize::try_from(u64::from_le_bytes(word))
        .map_err(|_| invalid_header(*n, "matrix column count does not fit in usize"))?;
    rows.checked_mul(cols)
        .and_then(|size| size.checked_mul(8))
        .ok_or_else(|| invalid_header(*n, "matrix header describes too many elements"))?;
    Ok((rows, cols))
}

fn read_elements<R: Read + ?Sized>(r: &mut R, out: &mut [f64], n: &mut usize) -> Result<()> {
    let mut word = [0u8; 8];
    for x in out.iter_mut() {
        read_chunk(r, &mut word, n)?;
        *x = f64::from_le_bytes(word);
    }
    Ok(())
}

impl Dense {
    /// Number of bytes [`Dense::marshal_binary_to`] writes for this matrix.
    pub fn binary_len(&self) -> usize {
        HEADER_LEN + 8 * self.size()
    }

    /// Writes the matrix to `w` and returns the number of bytes written.
    pub fn marshal_binary_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize> {
        let mut n = 0;
        write_chunk(w, &(self.rows() as u64).to_le_bytes(), &mut n)?;
        write_chunk(w, &(self.cols() as u64).to_le_bytes(), &mut n)?;
        for x in self.data() {
            write_chunk(w, &x.to_le_bytes(), &mut n)?;
        }
        Ok(n)
    }

    /// Reads a matrix from `r` into `self`, which must already have the stream's shape.
    ///
    /// On a shape mismatch nothing past the header is consumed and `self` is untouched.
    pub fn unmarshal_binary_from<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<usize> {
        let mut n = 0;
        let dims = read_header(r, &mut n)?;
        if dims != self.dims() {
            return Err(NeuraGradError::StreamShapeMismatch {
                expected: self.dims(),
                actual: dims,
                transferred: n,
            });
        }
        let mut data = vec![0.0; self.size()];
        read_elements(r, &mut data, &mut n)?;
        self.data_mut().copy_from_slice(&data);
        Ok(n)
    }

    /// Reads a matrix of any shape from `r`.
    ///
    /// The header is not trusted: elements are appended as they arrive, so a
    /// corrupted size fails with an I/O error instead of a huge allocation.
    pub fn read_from<R: Read + ?Sized>(r: &mut R) -> Result<(Dense, usize)> {
        let mut n = 0;
        let (rows, cols) = read_header(r, &mut n)?;
        let size = rows * cols;
        let mut data = Vec::with_capacity(size.min(MAX_PREALLOC));
        let mut word = [0u8; 8];
        for _ in 0..size {
            read_chunk(r, &mut word, &mut n)?;
            data.push(f64::from_le_bytes(word));
        }
        Ok((Dense::new(rows, cols, data)?, n))
    }
}

#[cfg(test)]
#[path = "serialize_test.rs"]
mod tests;
