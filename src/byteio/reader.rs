//! Endian-aware reading over any [`io::Read`].

use std::io;

/// Reads fixed-width integers and floats in big-endian (network) or
/// little-endian byte order. Implemented for every [`io::Read`].
pub trait ReadEndian: io::Read {
    /// Read an unsigned 16-bit integer in big-endian byte order.
    fn read_u16_be(&mut self) -> io::Result<u16> {
        Ok(u16::from_be_bytes(read_array(self)?))
    }

    /// Read an unsigned 16-bit integer in little-endian byte order.
    fn read_u16_le(&mut self) -> io::Result<u16> {
        Ok(u16::from_le_bytes(read_array(self)?))
    }

    /// Read a signed 16-bit integer in big-endian byte order.
    fn read_i16_be(&mut self) -> io::Result<i16> {
        Ok(i16::from_be_bytes(read_array(self)?))
    }

    /// Read a signed 16-bit integer in little-endian byte order.
    fn read_i16_le(&mut self) -> io::Result<i16> {
        Ok(i16::from_le_bytes(read_array(self)?))
    }

    /// Read an unsigned 32-bit integer in big-endian byte order.
    fn read_u32_be(&mut self) -> io::Result<u32> {
        Ok(u32::from_be_bytes(read_array(self)?))
    }

    /// Read an unsigned 32-bit integer in little-endian byte order.
    fn read_u32_le(&mut self) -> io::Result<u32> {
        Ok(u32::from_le_bytes(read_array(self)?))
    }

    /// Read a signed 32-bit integer in big-endian byte order.
    fn read_i32_be(&mut self) -> io::Result<i32> {
        Ok(i32::from_be_bytes(read_array(self)?))
    }

    /// Read a signed 32-bit integer in little-endian byte order.
    fn read_i32_le(&mut self) -> io::Result<i32> {
        Ok(i32::from_le_bytes(read_array(self)?))
    }

    /// Read an unsigned 64-bit integer in big-endian byte order.
    fn read_u64_be(&mut self) -> io::Result<u64> {
        Ok(u64::from_be_bytes(read_array(self)?))
    }

    /// Read an unsigned 64-bit integer in little-endian byte order.
    fn read_u64_le(&mut self) -> io::Result<u64> {
        Ok(u64::from_le_bytes(read_array(self)?))
    }

    /// Read a signed 64-bit integer in big-endian byte order.
    fn read_i64_be(&mut self) -> io::Result<i64> {
        Ok(i64::from_be_bytes(read_array(self)?))
    }

    /// Read a signed 64-bit integer in little-endian byte order.
    fn read_i64_le(&mut self) -> io::Result<i64> {
        Ok(i64::from_le_bytes(read_array(self)?))
    }

    /// Read an IEEE-754 32-bit float in big-endian byte order.
    fn read_f32_be(&mut self) -> io::Result<f32> {
        Ok(f32::from_be_bytes(read_array(self)?))
    }

    /// Read an IEEE-754 32-bit float in little-endian byte order.
    fn read_f32_le(&mut self) -> io::Result<f32> {
        Ok(f32::from_le_bytes(read_array(self)?))
    }

    /// Read an IEEE-754 64-bit float in big-endian byte order.
    fn read_f64_be(&mut self) -> io::Result<f64> {
        Ok(f64::from_be_bytes(read_array(self)?))
    }

    /// Read an IEEE-754 64-bit float in little-endian byte order.
    fn read_f64_le(&mut self) -> io::Result<f64> {
        Ok(f64::from_le_bytes(read_array(self)?))
    }
}

impl<R: io::Read + ?Sized> ReadEndian for R {}

fn read_array<R: io::Read + ?Sized, const N: usize>(r: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_big_endian_integers() {
        let mut c = Cursor::new(vec![0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(c.read_u16_be().unwrap(), 0x1234);
        assert_eq!(c.read_u32_be().unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn reads_little_endian_integers() {
        let mut c = Cursor::new(vec![0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(c.read_u16_le().unwrap(), 0x1234);
        assert_eq!(c.read_u32_le().unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn reads_signed_values() {
        let mut c = Cursor::new(vec![0xFF, 0xFE]);
        assert_eq!(c.read_i16_be().unwrap(), -2);
        let mut c = Cursor::new(vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(c.read_i64_le().unwrap(), -1);
    }

    #[test]
    fn reads_floats() {
        let mut c = Cursor::new(vec![0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(c.read_f64_be().unwrap(), 1.0);
        let mut c = Cursor::new(0.5f32.to_le_bytes().to_vec());
        assert_eq!(c.read_f32_le().unwrap(), 0.5);
    }

    #[test]
    fn truncated_stream_is_unexpected_eof() {
        let mut c = Cursor::new(vec![0x12]);
        let err = c.read_u16_be().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        let mut empty = Cursor::new(Vec::new());
        let err = empty.read_u64_be().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
