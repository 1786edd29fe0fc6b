//! Endian-aware writing over any [`io::Write`].

use std::io;

/// Writes fixed-width integers and floats in big-endian (network) or
/// little-endian byte order. Implemented for every [`io::Write`].
pub trait WriteEndian: io::Write {
    /// Write an unsigned 16-bit integer in big-endian byte order.
    fn write_u16_be(&mut self, v: u16) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write an unsigned 16-bit integer in little-endian byte order.
    fn write_u16_le(&mut self, v: u16) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    /// Write a signed 16-bit integer in big-endian byte order.
    fn write_i16_be(&mut self, v: i16) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write a signed 16-bit integer in little-endian byte order.
    fn write_i16_le(&mut self, v: i16) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    /// Write an unsigned 32-bit integer in big-endian byte order.
    fn write_u32_be(&mut self, v: u32) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write an unsigned 32-bit integer in little-endian byte order.
    fn write_u32_le(&mut self, v: u32) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    /// Write a signed 32-bit integer in big-endian byte order.
    fn write_i32_be(&mut self, v: i32) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write a signed 32-bit integer in little-endian byte order.
    fn write_i32_le(&mut self, v: i32) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    /// Write an unsigned 64-bit integer in big-endian byte order.
    fn write_u64_be(&mut self, v: u64) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write an unsigned 64-bit integer in little-endian byte order.
    fn write_u64_le(&mut self, v: u64) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    /// Write a signed 64-bit integer in big-endian byte order.
    fn write_i64_be(&mut self, v: i64) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write a signed 64-bit integer in little-endian byte order.
    fn write_i64_le(&mut self, v: i64) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    /// Write an IEEE-754 32-bit float in big-endian byte order.
    fn write_f32_be(&mut self, v: f32) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write an IEEE-754 32-bit float in little-endian byte order.
    fn write_f32_le(&mut self, v: f32) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }

    /// Write an IEEE-754 64-bit float in big-endian byte order.
    fn write_f64_be(&mut self, v: f64) -> io::Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Write an IEEE-754 64-bit float in little-endian byte order.
    fn write_f64_le(&mut self, v: f64) -> io::Result<()> {
        self.write_all(&v.to_le_bytes())
    }
}

impl<W: io::Write + ?Sized> WriteEndian for W {}
