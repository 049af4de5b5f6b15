use std::io::{Read, Seek, SeekFrom, Write};

use valise_vault::{SecureBuffer, VaultError};

#[test]
fn test_views_share_backing_bytes() {
    let mut buffer = SecureBuffer::new();
    buffer.text().write_str("shared content");

    // The bytes written through the text view are visible raw through the
    // binary view.
    let mut raw = Vec::new();
    buffer.binary().read_to_end(&mut raw).expect("read failed");
    assert_eq!(raw, b"shared content");

    // And the other way around.
    let mut buffer = SecureBuffer::new();
    buffer
        .binary()
        .write_all("text via binary".as_bytes())
        .expect("write failed");
    assert_eq!(
        buffer.text().read_to_string().expect("read failed"),
        "text via binary"
    );
}

#[test]
fn test_cursors_are_independent() {
    let mut buffer = SecureBuffer::from_bytes(b"0123456789".to_vec());

    buffer.binary().seek(SeekFrom::Start(5)).expect("seek failed");
    assert_eq!(buffer.binary().position(), 5);
    // Moving the binary cursor does not move the text cursor.
    assert_eq!(buffer.text().position(), 0);

    assert_eq!(buffer.text().read_to_string().expect("read failed"), "0123456789");
    assert_eq!(buffer.text().position(), 10);
    assert_eq!(buffer.binary().position(), 5);
}

#[test]
fn test_text_read_of_binary_content_fails_cleanly() {
    let mut buffer = SecureBuffer::from_bytes(vec![0xff, 0xfe, 0x00]);
    let result = buffer.text().read_to_string();
    assert!(matches!(result, Err(VaultError::DecodingError(_))));
    // The cursor stays put on failure.
    assert_eq!(buffer.text().position(), 0);
}

#[test]
fn test_write_at_position_overwrites_in_place() {
    let mut buffer = SecureBuffer::from_bytes(b"aaaaaa".to_vec());
    buffer.binary().seek(SeekFrom::Start(2)).expect("seek failed");
    buffer.binary().write_all(b"BB").expect("write failed");
    assert_eq!(buffer.contents(), b"aaBBaa");
}

#[test]
fn test_write_past_end_grows_and_pads() {
    let mut buffer = SecureBuffer::from_bytes(b"ab".to_vec());
    buffer.binary().seek(SeekFrom::Start(4)).expect("seek failed");
    buffer.binary().write_all(b"cd").expect("write failed");
    assert_eq!(buffer.contents(), b"ab\x00\x00cd");
}

#[test]
fn test_seek_before_start_is_rejected() {
    let mut buffer = SecureBuffer::from_bytes(b"abc".to_vec());
    assert!(buffer.binary().seek(SeekFrom::End(-10)).is_err());
    assert!(buffer.text().seek(SeekFrom::Current(-1)).is_err());
}

#[test]
fn test_clear_resets_content_and_cursors() {
    let mut buffer = SecureBuffer::from_bytes(b"leftovers".to_vec());
    buffer.binary().seek(SeekFrom::End(0)).expect("seek failed");

    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.binary().position(), 0);
    assert_eq!(buffer.text().position(), 0);
}

#[test]
fn test_text_round_trip_through_encryption() {
    let mut source = SecureBuffer::new();
    source.text().write_str("unicode text: émet 🚀");

    let mut stream = source.encrypt(b"", "pw").expect("encrypt failed");

    let mut restored = SecureBuffer::new();
    restored.decrypt(&mut stream, b"", "pw").expect("decrypt failed");
    assert_eq!(
        restored.text().read_to_string().expect("read failed"),
        "unicode text: émet 🚀"
    );
}
