#[cfg(feature = "sha256")]
use sha2::Digest as ShaDigest;

#[cfg(feature = "sha1")]
use sha1::Digest as Sha1Digest;

/// Incremental digest over a byte stream.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

#[cfg(feature = "sha256")]
pub struct Sha256Hasher(sha2::Sha256);

#[cfg(feature = "sha256")]
impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) { ShaDigest::update(&mut self.0, data); }
    fn finalize(self) -> Vec<u8> { ShaDigest::finalize(self.0).to_vec() }
}

#[cfg(feature = "sha256")]
impl Default for Sha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "sha256")]
impl Sha256Hasher {
    pub fn new() -> Self { Self(<sha2::Sha256 as ShaDigest>::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { <sha2::Sha256 as ShaDigest>::digest(data).to_vec() }
}

/// SHA-1, the digest most published download checksums still use.
#[cfg(feature = "sha1")]
pub struct Sha1Hasher(sha1::Sha1);

#[cfg(feature = "sha1")]
impl Hasher for Sha1Hasher {
    fn update(&mut self, data: &[u8]) { Sha1Digest::update(&mut self.0, data); }
    fn finalize(self) -> Vec<u8> { Sha1Digest::finalize(self.0).to_vec() }
}

#[cfg(feature = "sha1")]
impl Default for Sha1Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "sha1")]
impl Sha1Hasher {
    pub fn new() -> Self { Self(<sha1::Sha1 as Sha1Digest>::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { <sha1::Sha1 as Sha1Digest>::digest(data).to_vec() }
}
