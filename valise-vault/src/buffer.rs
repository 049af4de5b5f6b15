//! Encrypted in-memory buffer with dual text/binary access views.
//!
//! One resizable byte arena, two cursor-bearing adapters: [`BinaryView`]
//! speaks raw bytes through the std `io` traits, [`TextView`] is a UTF-8
//! projection that encodes on write and validates on read. Both views
//! mutate the same backing bytes; their cursors are independent. Callers
//! sharing a buffer across threads synchronize externally.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use valise_common::b64;
use valise_common::logging::{Component, Logger};

use crate::cipher;
use crate::derivation::{self, KEY_LEN, SALT_LEN};
use crate::error::{Result, VaultError};

type Arena = Arc<Mutex<Vec<u8>>>;

fn lock(arena: &Arena) -> MutexGuard<'_, Vec<u8>> {
    // A poisoned arena only means another thread panicked mid-write; the
    // bytes themselves are still usable.
    arena.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_seek(current: usize, len: usize, seek: SeekFrom) -> io::Result<usize> {
    let (base, offset) = match seek {
        SeekFrom::Start(n) => return Ok(n as usize),
        SeekFrom::End(n) => (len as i64, n),
        SeekFrom::Current(n) => (current as i64, n),
    };
    let target = base + offset;
    if target < 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "seek before start of buffer",
        ));
    }
    Ok(target as usize)
}

/// Raw byte view over the shared arena.
///
/// Reads and writes start at the view's own cursor. Writing past the end
/// grows the arena; seeking past the end and writing pads the gap with
/// zeroes, matching file semantics.
pub struct BinaryView {
    arena: Arena,
    pos: usize,
}

impl BinaryView {
    fn new(arena: Arena) -> Self {
        Self { arena, pos: 0 }
    }

    /// Current cursor position, in bytes.
    pub fn position(&self) -> u64 {
        self.pos as u64
    }
}

impl Read for BinaryView {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let arena = lock(&self.arena);
        if self.pos >= arena.len() {
            return Ok(0);
        }
        let available = &arena[self.pos..];
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        drop(arena);
        self.pos += count;
        Ok(count)
    }
}

impl Write for BinaryView {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut arena = lock(&self.arena);
        let end = self.pos + buf.len();
        if arena.len() < end {
            arena.resize(end, 0);
        }
        arena[self.pos..end].copy_from_slice(buf);
        drop(arena);
        self.pos = end;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for BinaryView {
    fn seek(&mut self, seek: SeekFrom) -> io::Result<u64> {
        let len = lock(&self.arena).len();
        self.pos = resolve_seek(self.pos, len, seek)?;
        Ok(self.pos as u64)
    }
}

/// UTF-8 text view over the shared arena.
///
/// A projection, not a separate buffer: the cursor is a byte offset into
/// the same backing bytes the binary view mutates. Reading content that
/// is not valid UTF-8 fails with [`VaultError::DecodingError`] rather
/// than returning mangled text.
pub struct TextView {
    arena: Arena,
    pos: usize,
}

impl TextView {
    fn new(arena: Arena) -> Self {
        Self { arena, pos: 0 }
    }

    /// Current cursor position, in bytes.
    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    /// Move the cursor; offsets are byte offsets into the shared arena.
    pub fn seek(&mut self, seek: SeekFrom) -> Result<u64> {
        let len = lock(&self.arena).len();
        self.pos = resolve_seek(self.pos, len, seek)?;
        Ok(self.pos as u64)
    }

    /// Reset the cursor to the start of the buffer.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Encode `text` as UTF-8 and write it at the cursor, overwriting
    /// existing bytes and growing the arena as needed. Returns the number
    /// of bytes written.
    pub fn write_str(&mut self, text: &str) -> usize {
        let bytes = text.as_bytes();
        let mut arena = lock(&self.arena);
        let end = self.pos + bytes.len();
        if arena.len() < end {
            arena.resize(end, 0);
        }
        arena[self.pos..end].copy_from_slice(bytes);
        drop(arena);
        self.pos = end;
        bytes.len()
    }

    /// Decode everything from the cursor to the end of the buffer as
    /// UTF-8. The cursor advances to the end on success and stays put on
    /// failure.
    pub fn read_to_string(&mut self) -> Result<String> {
        let arena = lock(&self.arena);
        if self.pos >= arena.len() {
            return Ok(String::new());
        }
        let text = std::str::from_utf8(&arena[self.pos..])
            .map_err(|e| {
                VaultError::DecodingError(format!("buffer content is not valid UTF-8: {e}"))
            })?
            .to_string();
        let end = arena.len();
        drop(arena);
        self.pos = end;
        Ok(text)
    }
}

/// A self-contained encrypted artifact.
///
/// Layout is `[salt | nonce | ciphertext]` when the key was derived from a
/// password and `[nonce | ciphertext]` when an explicit key was supplied.
/// The stream keeps no link back to the buffer it came from; its cursor
/// starts at offset 0.
pub struct EncryptedStream {
    data: Vec<u8>,
    pos: usize,
}

impl EncryptedStream {
    fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Read for EncryptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.data.len() {
            return Ok(0);
        }
        let available = &self.data[self.pos..];
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.pos += count;
        Ok(count)
    }
}

impl Seek for EncryptedStream {
    fn seek(&mut self, seek: SeekFrom) -> io::Result<u64> {
        self.pos = resolve_seek(self.pos, self.data.len(), seek)?;
        Ok(self.pos as u64)
    }
}

/// In-memory byte store with dual access views and symmetric encryption.
pub struct SecureBuffer {
    arena: Arena,
    binary: BinaryView,
    text: TextView,
    logger: Logger,
}

impl SecureBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Create a buffer holding `bytes`, both views positioned at 0.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let arena: Arena = Arc::new(Mutex::new(bytes.into()));
        Self {
            binary: BinaryView::new(arena.clone()),
            text: TextView::new(arena.clone()),
            arena,
            logger: Logger::new(Component::Vault),
        }
    }

    /// The raw byte view.
    pub fn binary(&mut self) -> &mut BinaryView {
        &mut self.binary
    }

    /// The UTF-8 text view.
    pub fn text(&mut self) -> &mut TextView {
        &mut self.text
    }

    /// Total content length in bytes, independent of view cursors.
    pub fn len(&self) -> usize {
        lock(&self.arena).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the whole content, independent of view cursors.
    pub fn contents(&self) -> Vec<u8> {
        lock(&self.arena).clone()
    }

    /// Drop all content and reset both views to offset 0.
    pub fn clear(&mut self) {
        lock(&self.arena).clear();
        self.binary.pos = 0;
        self.text.pos = 0;
    }

    /// Produce an encrypted copy of the buffer's binary content, read from
    /// the binary view's current position to the end. The cursor itself is
    /// left untouched; callers wanting the whole buffer rewind first.
    ///
    /// Key resolution: a non-empty `key` is used directly (32 raw bytes or
    /// their URL-safe base64 text); otherwise a key is derived from
    /// `password` (possibly empty) with a fresh salt, and the salt is
    /// written at the start of the output stream.
    pub fn encrypt(&self, key: &[u8], password: &str) -> Result<EncryptedStream> {
        let plaintext = {
            let arena = lock(&self.arena);
            let start = self.binary.pos.min(arena.len());
            arena[start..].to_vec()
        };

        let mut out = Vec::new();
        let enc_key = if !key.is_empty() {
            resolve_key(key)?
        } else {
            let salt = derivation::generate_salt();
            out.extend_from_slice(&salt);
            derivation::derive_key(password, &salt)?
        };

        let sealed = cipher::seal(&enc_key, &plaintext)?;
        out.extend_from_slice(&sealed);

        self.logger.debug(format!(
            "encrypted {} bytes ({})",
            plaintext.len(),
            if key.is_empty() {
                "password-derived key"
            } else {
                "explicit key"
            }
        ));
        Ok(EncryptedStream::new(out))
    }

    /// Replace this buffer's content with the plaintext recovered from an
    /// encrypted stream, resetting both views to offset 0.
    ///
    /// Key resolution mirrors [`encrypt`](Self::encrypt); when the key is
    /// derived from `password`, the salt is read back from the fixed-size
    /// header of `file`.
    pub fn decrypt<R: Read>(&mut self, file: &mut R, key: &[u8], password: &str) -> Result<()> {
        let mut stream = Vec::new();
        file.read_to_end(&mut stream)?;

        let (enc_key, framed) = if !key.is_empty() {
            (resolve_key(key)?, stream.as_slice())
        } else {
            if stream.len() <= SALT_LEN {
                return Err(VaultError::DecryptionError(
                    "stream shorter than the salt header".to_string(),
                ));
            }
            let (salt, rest) = stream.split_at(SALT_LEN);
            (derivation::derive_key(password, salt)?, rest)
        };

        let plaintext = cipher::open(&enc_key, framed)?;
        let recovered = plaintext.len();

        *lock(&self.arena) = plaintext;
        self.binary.pos = 0;
        self.text.pos = 0;

        self.logger.debug(format!("decrypted {recovered} bytes"));
        Ok(())
    }
}

impl Default for SecureBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept a symmetric key as 32 raw bytes or as their URL-safe base64
/// encoded text form.
fn resolve_key(key: &[u8]) -> Result<[u8; KEY_LEN]> {
    if key.len() == KEY_LEN {
        let mut out = [0u8; KEY_LEN];
        out.copy_from_slice(key);
        return Ok(out);
    }

    let text = std::str::from_utf8(key).map_err(|_| {
        VaultError::KeyDerivationError(format!(
            "key must be {KEY_LEN} raw bytes or base64 text"
        ))
    })?;
    let decoded = b64::decode(text.trim())
        .map_err(|e| VaultError::KeyDerivationError(format!("key is not valid base64: {e}")))?;
    if decoded.len() != KEY_LEN {
        return Err(VaultError::KeyDerivationError(format!(
            "decoded key is {} bytes, expected {KEY_LEN}",
            decoded.len()
        )));
    }

    let mut out = [0u8; KEY_LEN];
    out.copy_from_slice(&decoded);
    Ok(out)
}
