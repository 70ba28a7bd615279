use super::decoder::{DecodeError, DecodeResult};

/// Bounds-checked little-endian cursor over a blob.
pub(super) struct BlobReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> BlobReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let end = self.offset + N;
        let chunk = self
            .bytes
            .get(self.offset..end)
            .ok_or(DecodeError::Truncated {
                offset: self.offset,
                needed: N,
                available: self.remaining(),
            })?;

        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        self.offset = end;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    /// Read a non-negative count stored as `i32`.
    pub fn read_count(&mut self, field: &'static str) -> DecodeResult<usize> {
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| DecodeError::NegativeCount { field, value })
    }

    /// Fail early if `count` items of `item_size` bytes cannot fit in the rest
    /// of the blob, so corrupt counts never drive a huge allocation.
    pub fn ensure_available(&self, count: usize, item_size: usize) -> DecodeResult<()> {
        let needed = count.saturating_mul(item_size);
        if needed > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read a vertex index whose width depends on the vertex count.
    pub fn read_index(&mut self, width: usize) -> DecodeResult<i64> {
        match width {
            1 => self.read_u8().map(i64::from),
            2 => self.read_u16().map(i64::from),
            _ => self.read_i32().map(i64::from),
        }
    }
}
