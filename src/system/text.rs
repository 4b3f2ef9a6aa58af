//! Password generation and base64 encoding.

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::Rng;

/// Characters used for generated passwords.
pub const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Longest password `password` will generate.
pub const MAX_PASSWORD_LENGTH: usize = 256;

/// Generates a random password of `length` characters.
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Result<String> {
    if length == 0 || length > MAX_PASSWORD_LENGTH {
        bail!("Password length must be between 1 and {MAX_PASSWORD_LENGTH}");
    }

    Ok((0..length)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect())
}

pub fn encode_base64(input: &str) -> String {
    STANDARD.encode(input.as_bytes())
}

/// Decodes base64 into UTF-8 text.
pub fn decode_base64(input: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(input.trim())
        .context("Input is not valid base64")?;
    String::from_utf8(bytes).context("Decoded bytes are not valid UTF-8 text")
}
