use crate::error::{Error, ErrorKind};
use crate::result::Result;

use aes;
use cbc;

use aes::cipher::BlockEncryptMut;
use aes::cipher::BlockSizeUser;
use aes::cipher::KeyIvInit;

// The FF1 PRF is AES-CBC with a zero IV: chaining the blocks of the
// round input through the encryptor leaves the CBC-MAC in the output
// block. The key schedule is expanded once per cipher instance; the
// `zeroize` feature of the aes crate wipes it on drop.
#[derive(Clone, Debug)]
enum Engine {
    Aes128(cbc::Encryptor<aes::Aes128>),
    Aes192(cbc::Encryptor<aes::Aes192>),
    Aes256(cbc::Encryptor<aes::Aes256>),
}

#[derive(Clone, Debug)]
pub(crate) struct Cipher {
    enc: Engine,
    blksz: usize,
}

impl Cipher {
    pub fn new(key: &[u8]) -> Result<Cipher> {
        const IV: &[u8] = &[0u8; 16];

        let (enc, blksz) = match key.len() {
            16 => (
                Engine::Aes128(cbc::Encryptor::<aes::Aes128>::new(key.into(), IV.into())),
                aes::Aes128::block_size(),
            ),
            24 => (
                Engine::Aes192(cbc::Encryptor::<aes::Aes192>::new(key.into(), IV.into())),
                aes::Aes192::block_size(),
            ),
            32 => (
                Engine::Aes256(cbc::Encryptor::<aes::Aes256>::new(key.into(), IV.into())),
                aes::Aes256::block_size(),
            ),
            n => {
                return Err(Error::new(
                    ErrorKind::InvalidKey,
                    &format!("key must be 128, 192, or 256 bits, got {} bytes", n),
                ))
            }
        };

        Ok(Cipher { enc, blksz })
    }

    pub fn encrypt_block(&mut self, src: &[u8], dst: &mut [u8]) {
        match &mut self.enc {
            Engine::Aes128(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
            Engine::Aes192(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
            Engine::Aes256(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
        }
    }

    pub fn block_size(&self) -> usize {
        self.blksz
    }
}
