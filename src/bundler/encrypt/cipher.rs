//! Cipher profiles and streaming bundle encryption.
//!
//! Two profiles exist, each matching an existing native decryptor:
//!
//! | Profile     | Cipher      | Key                          | IV                 |
//! |-------------|-------------|------------------------------|--------------------|
//! | `Aes256Cbc` | AES-256-CBC | SHA-256(passphrase)          | `mLck2F8YIstoraeP` |
//! | `Aes128Ecb` | AES-128-ECB | EVP_BytesToKey(MD5, no salt) | none               |
//!
//! Both use PKCS#7 padding. The passphrase and IV are compatibility values
//! shared with the on-device decryptors, not secrets: the encryption keeps
//! casual readers out of the packaged assets and is no security boundary.

use crate::bundler::error::{Error, ErrorExt, Result};
use aes::cipher::{
    BlockDecryptMut, BlockEncryptMut, BlockSizeUser, KeyInit, KeyIvInit,
    block_padding::Pkcs7, consts::U16, generic_array::GenericArray,
};
use path_absolutize::Absolutize;
use sha2::{Digest, Sha256};
use std::{fmt, path::Path, str::FromStr};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Passphrase both profiles derive their key from.
pub const PASSPHRASE: &[u8] = b"x+=x;";

/// Fixed IV of the CBC profile.
pub const CBC_IV: [u8; 16] = *b"mLck2F8YIstoraeP";

const AES_BLOCK_LEN: usize = 16;

/// Read buffer size; a multiple of the AES block length.
const STREAM_BUFFER_LEN: usize = 64 * 1024;

/// Named cipher configuration used to encrypt a bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CipherProfile {
    /// AES-256-CBC keyed with SHA-256 of the passphrase (Android).
    Aes256Cbc,
    /// AES-128-ECB keyed with the MD5-based OpenSSL derivation (iOS, Windows).
    Aes128Ecb,
}

impl CipherProfile {
    /// Profile expected by the native decryptor of `platform`.
    pub fn for_platform(platform: crate::bundler::Platform) -> Self {
        match platform {
            crate::bundler::Platform::Android => CipherProfile::Aes256Cbc,
            crate::bundler::Platform::Ios | crate::bundler::Platform::Windows => {
                CipherProfile::Aes128Ecb
            }
        }
    }

    /// Infers the profile from where the `www/` folder lives.
    ///
    /// Compatibility shim for callers that do not know the target platform:
    /// a `www/` folder whose parent is named `assets` is taken to be an
    /// Android project. Prefer passing a profile explicitly.
    pub fn detect(www_folder: &Path) -> Result<Self> {
        let www_folder = www_folder
            .absolutize()
            .fs_context("resolving folder path", www_folder)?;
        let parent_name = www_folder
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str());

        let profile = if parent_name == Some("assets") {
            CipherProfile::Aes256Cbc
        } else {
            CipherProfile::Aes128Ecb
        };
        log::debug!(
            "Detected cipher profile {} for {}",
            profile,
            www_folder.display()
        );
        Ok(profile)
    }

    /// Short name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            CipherProfile::Aes256Cbc => "aes256-cbc",
            CipherProfile::Aes128Ecb => "aes128-ecb",
        }
    }

    /// Key material derived from [`PASSPHRASE`].
    pub fn key(&self) -> Vec<u8> {
        match self {
            CipherProfile::Aes256Cbc => Sha256::digest(PASSPHRASE).to_vec(),
            CipherProfile::Aes128Ecb => evp_bytes_to_key(PASSPHRASE, 16, 0).0,
        }
    }

    /// Initialization vector, if the mode uses one.
    pub fn iv(&self) -> Option<[u8; 16]> {
        match self {
            CipherProfile::Aes256Cbc => Some(CBC_IV),
            CipherProfile::Aes128Ecb => None,
        }
    }
}

impl fmt::Display for CipherProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CipherProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "aes256-cbc" => Ok(CipherProfile::Aes256Cbc),
            "aes128-ecb" => Ok(CipherProfile::Aes128Ecb),
            other => Err(format!(
                "Invalid cipher profile: {other}. Valid profiles: aes256-cbc, aes128-ecb"
            )),
        }
    }
}

/// OpenSSL `EVP_BytesToKey` with MD5, no salt and a single round.
///
/// Returns `(key, iv)` of the requested lengths. Digest blocks are
/// `D_1 = MD5(pass)`, `D_i = MD5(D_{i-1} || pass)`, concatenated and split.
pub fn evp_bytes_to_key(passphrase: &[u8], key_len: usize, iv_len: usize) -> (Vec<u8>, Vec<u8>) {
    let mut material = Vec::with_capacity(key_len + iv_len + 16);
    let mut previous: Option<[u8; 16]> = None;

    while material.len() < key_len + iv_len {
        let mut input = Vec::with_capacity(16 + passphrase.len());
        if let Some(block) = previous {
            input.extend_from_slice(&block);
        }
        input.extend_from_slice(passphrase);
        let digest = md5::compute(&input).0;
        material.extend_from_slice(&digest);
        previous = Some(digest);
    }

    let iv = material[key_len..key_len + iv_len].to_vec();
    material.truncate(key_len);
    (material, iv)
}

/// Encrypts `input` into `output` with `profile`, streaming in fixed-size reads.
pub async fn encrypt_file(profile: CipherProfile, input: &Path, output: &Path) -> Result<()> {
    log::debug!(
        "Encrypting {} into {} ({profile})",
        input.display(),
        output.display()
    );
    let key = profile.key();
    match profile {
        CipherProfile::Aes256Cbc => {
            let cipher = cbc::Encryptor::<aes::Aes256>::new_from_slices(&key, &CBC_IV)
                .map_err(|e| Error::Cipher(e.to_string()))?;
            encrypt_stream(cipher, input, output).await
        }
        CipherProfile::Aes128Ecb => {
            let cipher = ecb::Encryptor::<aes::Aes128>::new_from_slice(&key)
                .map_err(|e| Error::Cipher(e.to_string()))?;
            encrypt_stream(cipher, input, output).await
        }
    }
}

/// Decrypts a bundle produced by [`encrypt_file`] with the same profile.
pub async fn decrypt_file(profile: CipherProfile, input: &Path, output: &Path) -> Result<()> {
    log::debug!(
        "Decrypting {} into {} ({profile})",
        input.display(),
        output.display()
    );
    let key = profile.key();
    match profile {
        CipherProfile::Aes256Cbc => {
            let cipher = cbc::Decryptor::<aes::Aes256>::new_from_slices(&key, &CBC_IV)
                .map_err(|e| Error::Cipher(e.to_string()))?;
            decrypt_stream(cipher, input, output).await
        }
        CipherProfile::Aes128Ecb => {
            let cipher = ecb::Decryptor::<aes::Aes128>::new_from_slice(&key)
                .map_err(|e| Error::Cipher(e.to_string()))?;
            decrypt_stream(cipher, input, output).await
        }
    }
}

async fn encrypt_stream<C>(mut cipher: C, input: &Path, output: &Path) -> Result<()>
where
    C: BlockEncryptMut + BlockSizeUser<BlockSize = U16>,
{
    let mut reader = tokio::fs::File::open(input)
        .await
        .fs_context("opening unencrypted bundle", input)?;
    let mut writer = tokio::io::BufWriter::new(
        tokio::fs::File::create(output)
            .await
            .fs_context("creating encrypted bundle", output)?,
    );

    // `pending` never holds a complete block between reads: the last partial
    // (or empty) block is kept back for padding.
    let mut buffer = vec![0u8; STREAM_BUFFER_LEN];
    let mut pending: Vec<u8> = Vec::with_capacity(STREAM_BUFFER_LEN + AES_BLOCK_LEN);
    loop {
        let n = reader
            .read(&mut buffer)
            .await
            .fs_context("reading unencrypted bundle", input)?;
        if n == 0 {
            break;
        }
        pending.extend_from_slice(&buffer[..n]);

        let full = pending.len() / AES_BLOCK_LEN * AES_BLOCK_LEN;
        for block in pending[..full].chunks_exact_mut(AES_BLOCK_LEN) {
            cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        writer
            .write_all(&pending[..full])
            .await
            .fs_context("writing encrypted bundle", output)?;
        pending.drain(..full);
    }

    let tail_len = pending.len();
    let mut tail = [0u8; AES_BLOCK_LEN];
    tail[..tail_len].copy_from_slice(&pending);
    let last = cipher
        .encrypt_padded_mut::<Pkcs7>(&mut tail, tail_len)
        .map_err(|_| Error::Cipher("padding failed".to_string()))?;
    writer
        .write_all(last)
        .await
        .fs_context("writing encrypted bundle", output)?;
    writer
        .flush()
        .await
        .fs_context("flushing encrypted bundle", output)?;

    log::trace!("end of encryption stream");
    Ok(())
}

async fn decrypt_stream<C>(mut cipher: C, input: &Path, output: &Path) -> Result<()>
where
    C: BlockDecryptMut + BlockSizeUser<BlockSize = U16>,
{
    let mut reader = tokio::fs::File::open(input)
        .await
        .fs_context("opening encrypted bundle", input)?;
    let mut writer = tokio::io::BufWriter::new(
        tokio::fs::File::create(output)
            .await
            .fs_context("creating decrypted bundle", output)?,
    );

    // The final block carries the padding, so one full block is always held back.
    let mut buffer = vec![0u8; STREAM_BUFFER_LEN];
    let mut pending: Vec<u8> = Vec::with_capacity(STREAM_BUFFER_LEN + AES_BLOCK_LEN);
    loop {
        let n = reader
            .read(&mut buffer)
            .await
            .fs_context("reading encrypted bundle", input)?;
        if n == 0 {
            break;
        }
        pending.extend_from_slice(&buffer[..n]);

        let ready = match pending.len() / AES_BLOCK_LEN {
            0 | 1 => 0,
            blocks => (blocks - 1) * AES_BLOCK_LEN,
        };
        for block in pending[..ready].chunks_exact_mut(AES_BLOCK_LEN) {
            cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        writer
            .write_all(&pending[..ready])
            .await
            .fs_context("writing decrypted bundle", output)?;
        pending.drain(..ready);
    }

    if pending.len() != AES_BLOCK_LEN {
        return Err(Error::Cipher(format!(
            "{} is not a whole number of cipher blocks",
            input.display()
        )));
    }
    let last = cipher
        .decrypt_padded_mut::<Pkcs7>(&mut pending)
        .map_err(|_| Error::Cipher(format!("{} has invalid padding", input.display())))?;
    writer
        .write_all(last)
        .await
        .fs_context("writing decrypted bundle", output)?;
    writer
        .flush()
        .await
        .fs_context("flushing decrypted bundle", output)?;
    Ok(())
}
