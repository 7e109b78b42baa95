//! Batch output of generated passwords.

use std::io::{self, Write};

use rand::{CryptoRng, Rng};
use zeroize::{Zeroize, Zeroizing};

use super::{GenerateError, generate};

const BUF_CAPACITY: usize = 8 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("failed to write passwords: {0}")]
    Io(#[from] io::Error),
}

/// Buffered writer that wipes its buffer after every flush and on drop.
pub struct SecureBufWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> SecureBufWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(BUF_CAPACITY),
        }
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        let result = self.inner.write_all(&self.buf);
        // Zeroize keeps the allocation, so the next write reuses wiped memory.
        self.buf.zeroize();
        self.buf.clear();
        result
    }
}

impl<W: Write> Write for SecureBufWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() + data.len() > self.buf.capacity() {
            self.flush_buf()?;
        }
        if data.len() >= self.buf.capacity() {
            return self.inner.write(data);
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buf()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for SecureBufWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
        self.buf.zeroize();
    }
}

/// Write `count` passwords to `out`, one per line.
pub fn write_batch<W, R>(
    out: W,
    alphabet: &str,
    min: usize,
    max: usize,
    count: usize,
    rng: &mut R,
) -> Result<(), OutputError>
where
    W: Write,
    R: Rng + CryptoRng + ?Sized,
{
    let mut out = SecureBufWriter::new(out);
    for _ in 0..count {
        let pass = generate(alphabet, min, max, rng)?;
        out.write_all(pass.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Collect `count` passwords into one newline-separated string.
///
/// Used for the clipboard, where a single final newline would be noise.
pub fn collect_batch<R>(
    alphabet: &str,
    min: usize,
    max: usize,
    count: usize,
    rng: &mut R,
) -> Result<Zeroizing<String>, GenerateError>
where
    R: Rng + CryptoRng + ?Sized,
{
    let mut passwords = Zeroizing::new(String::new());
    for i in 0..count {
        if i > 0 {
            passwords.push('\n');
        }
        let pass = generate(alphabet, min, max, rng)?;
        passwords.push_str(&pass);
    }
    Ok(passwords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn writes_one_line_per_password() {
        let mut out = Vec::new();
        write_batch(&mut out, "xyz", 5, 5, 4, &mut OsRng).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(text.ends_with('\n'));
        for line in lines {
            assert_eq!(line.len(), 5);
            assert!(line.chars().all(|c| "xyz".contains(c)));
        }
    }

    #[test]
    fn large_batches_survive_buffer_flushes() {
        let mut out = Vec::new();
        write_batch(&mut out, "ab", 64, 64, 500, &mut OsRng).unwrap();
        assert_eq!(out.len(), 500 * 65);
    }

    #[test]
    fn empty_alphabet_writes_nothing() {
        let mut out = Vec::new();
        let err = write_batch(&mut out, "", 1, 2, 3, &mut OsRng).unwrap_err();
        assert!(matches!(err, OutputError::Generate(GenerateError::EmptyAlphabet)));
        assert!(out.is_empty());
    }

    #[test]
    fn collected_batch_has_no_trailing_newline() {
        let batch = collect_batch("q", 2, 2, 3, &mut OsRng).unwrap();
        assert_eq!(batch.as_str(), "qq\nqq\nqq");
    }

    #[test]
    fn secure_writer_flushes_on_drop() {
        let mut out = Vec::new();
        {
            let mut w = SecureBufWriter::new(&mut out);
            w.write_all(b"secret").unwrap();
        }
        assert_eq!(out, b"secret");
    }
}
