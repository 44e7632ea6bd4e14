pub const MAX: u32 = 0x0FFF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlqError {
    Truncated,
    TooLong,
}

pub fn read(bytes: &[u8]) -> Result<(u32, usize), VlqError> {
    let mut value: u32 = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == 4 {
            return Err(VlqError::TooLong);
        }
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= 4 {
        Err(VlqError::TooLong)
    } else {
        Err(VlqError::Truncated)
    }
}

/// Append `value` as a VLQ. The caller guarantees `value <= MAX`.
pub fn write(value: u32, out: &mut Vec<u8>) {
    let mut buf = [0u8; 4];
    let mut start = 3;
    let mut rest = value;
    buf[3] = (rest & 0x7F) as u8;
    rest >>= 7;
    while rest > 0 {
        start -= 1;
        buf[start] = 0x80 | (rest & 0x7F) as u8;
        rest >>= 7;
    }
    out.extend_from_slice(&buf[start..]);
}
