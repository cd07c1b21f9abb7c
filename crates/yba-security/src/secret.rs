use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

pub fn generate_random_bytes(len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0_u8; len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to read from the OS random source")?;
    Ok(bytes)
}

pub fn generate_random_string_url_safe(len: usize) -> Result<String> {
    let bytes = generate_random_bytes(len)?;
    Ok(URL_SAFE.encode(bytes))
}
