//! Big-endian field codec shared by the network and the action journal.
//!
//! A [`DataSerialiser`] is either saving or loading. Actions describe their
//! wire layout once, as a sequence of [`DataSerialiser::field`] calls, and the
//! same code path writes or reads depending on the mode. Field order is the
//! contract between peers.

use crate::error::StreamError;
use crate::localisation::StringId;
use crate::state::{Money, ObjectEntryIndex, PlayerId, RideId, RideType};

/// A value with a fixed network encoding.
pub trait DataField: Sized {
    fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError>;

    fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Saving,
    Loading,
}

/// Bidirectional field stream.
#[derive(Clone, Debug)]
pub struct DataSerialiser {
    mode: Mode,
    buffer: Vec<u8>,
    position: usize,
}

impl DataSerialiser {
    pub fn for_writing() -> Self {
        Self {
            mode: Mode::Saving,
            buffer: Vec::new(),
            position: 0,
        }
    }

    pub fn for_reading(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mode: Mode::Loading,
            buffer: bytes.into(),
            position: 0,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.mode == Mode::Saving
    }

    pub fn is_loading(&self) -> bool {
        self.mode == Mode::Loading
    }

    /// Writes `value` when saving, or overwrites it with the next field when loading.
    pub fn field<T: DataField>(&mut self, value: &mut T) -> Result<&mut Self, StreamError> {
        match self.mode {
            Mode::Saving => value.write(&mut self.buffer)?,
            Mode::Loading => *value = T::read(self)?,
        }
        Ok(self)
    }

    /// Unread bytes left in a loading stream.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Bytes written so far (saving) or the whole input (loading).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Ends a loading stream, rejecting any bytes no field consumed.
    pub fn finish(&self) -> Result<(), StreamError> {
        match self.remaining() {
            0 => Ok(()),
            extra if self.is_loading() => Err(StreamError::TrailingBytes(extra)),
            _ => Ok(()),
        }
    }

    /// Consumes exactly `N` bytes from a loading stream.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], StreamError> {
        let slice = self.take_slice(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(slice);
        Ok(bytes)
    }

    fn take_slice(&mut self, len: usize) -> Result<&[u8], StreamError> {
        let remaining = self.remaining();
        if remaining < len {
            return Err(StreamError::UnexpectedEof {
                needed: len,
                remaining,
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.buffer[start..start + len])
    }
}

macro_rules! impl_int_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DataField for $ty {
                fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError> {
                    out.extend_from_slice(&self.to_be_bytes());
                    Ok(())
                }

                fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError> {
                    Ok(<$ty>::from_be_bytes(stream.take()?))
                }
            }
        )*
    };
}

impl_int_field!(u8, u16, u32, u64, i8, i16, i32, i64);

impl DataField for bool {
    fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError> {
        out.push(u8::from(*self));
        Ok(())
    }

    fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError> {
        match u8::read(stream)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(StreamError::InvalidBool(other)),
        }
    }
}

impl DataField for String {
    fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError> {
        let len = u16::try_from(self.len()).map_err(|_| StreamError::StringTooLong(self.len()))?;
        len.write(out)?;
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }

    fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError> {
        let len = usize::from(u16::read(stream)?);
        let bytes = stream.take_slice(len)?.to_vec();
        String::from_utf8(bytes).map_err(|_| StreamError::InvalidUtf8)
    }
}

/// Newtypes encode exactly like the integer they wrap.
macro_rules! impl_newtype_field {
    ($($ty:ty => $inner:ty),* $(,)?) => {
        $(
            impl DataField for $ty {
                fn write(&self, out: &mut Vec<u8>) -> Result<(), StreamError> {
                    self.0.write(out)
                }

                fn read(stream: &mut DataSerialiser) -> Result<Self, StreamError> {
                    Ok(Self(<$inner>::read(stream)?))
                }
            }
        )*
    };
}

impl_newtype_field!(
    Money => i32,
    PlayerId => u32,
    RideId => u16,
    RideType => u16,
    ObjectEntryIndex => u16,
    StringId => u16,
);
