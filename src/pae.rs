//! Pre-auth encoding
//!
//! This is a low level detail used to build the version implementations.
//! Every byte string a MAC or signature covers goes through here. The
//! little-endian length prefixes keep the encoding injective, which matters
//! because one authentication key covers several logical fields at once.

/// A sink for the encoded stream. Lets the encoding go straight into a MAC
/// or digest without an intermediate buffer.
pub(crate) trait WriteBytes {
    fn write(&mut self, slice: &[u8]);
}

impl WriteBytes for Vec<u8> {
    fn write(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice);
    }
}

impl<W: WriteBytes> WriteBytes for &mut W {
    fn write(&mut self, slice: &[u8]) {
        (**self).write(slice);
    }
}

pub(crate) struct Mac<'a, M: digest::Mac>(pub &'a mut M);

impl<M: digest::Mac> WriteBytes for Mac<'_, M> {
    fn write(&mut self, slice: &[u8]) {
        self.0.update(slice);
    }
}

#[allow(dead_code)]
pub(crate) struct Digest<'a, D: digest::Digest>(pub &'a mut D);

impl<D: digest::Digest> WriteBytes for Digest<'_, D> {
    fn write(&mut self, slice: &[u8]) {
        self.0.update(slice);
    }
}

/// Each piece may be split over multiple slices. Only the total length of a
/// piece is encoded, so `[b"v4", b".", b"local", b"."]` hashes identically
/// to the contiguous header string.
pub(crate) fn pre_auth_encode<const N: usize>(pieces: [&[&[u8]]; N], mut out: impl WriteBytes) {
    let len = N as u64;
    out.write(&len.to_le_bytes());
    for piece in pieces {
        let len: u64 = piece.iter().map(|x| x.len() as u64).sum();
        out.write(&len.to_le_bytes());
        for x in piece {
            out.write(x);
        }
    }
}
