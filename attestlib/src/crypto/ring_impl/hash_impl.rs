// SPDX-License-Identifier: Apache-2.0 or MIT

use crate::crypto::AttestHash;
use crate::protocol::{AttestBaseHashAlgo, AttestDigestStruct};

pub static DEFAULT: AttestHash = AttestHash {
    hash_all_cb: hash_all,
};

fn hash_all(base_hash_algo: AttestBaseHashAlgo, data: &[u8]) -> Option<AttestDigestStruct> {
    let algorithm = match base_hash_algo {
        AttestBaseHashAlgo::SHA_256 => &ring::digest::SHA256,
        AttestBaseHashAlgo::SHA_384 => &ring::digest::SHA384,
        AttestBaseHashAlgo::SHA_512 => &ring::digest::SHA512,
        _ => return None,
    };
    let digest_value = ring::digest::digest(algorithm, data);
    Some(AttestDigestStruct::from(digest_value.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{SHA256_DIGEST_SIZE, SHA384_DIGEST_SIZE};

    #[test]
    fn test_case0_hash_all() {
        let digest = hash_all(AttestBaseHashAlgo::SHA_256, b"abc").unwrap();
        assert_eq!(digest.data_size as usize, SHA256_DIGEST_SIZE);
        // FIPS 180-2 test vector for SHA-256("abc")
        assert_eq!(
            &digest.as_ref()[..4],
            &[0xba, 0x78, 0x16, 0xbf]
        );
    }

    #[test]
    fn test_case1_hash_all_sizes() {
        let digest = hash_all(AttestBaseHashAlgo::SHA_384, &[0u8; 100]).unwrap();
        assert_eq!(digest.data_size as usize, SHA384_DIGEST_SIZE);
    }

    #[test]
    fn test_case2_hash_all_unknown_algo() {
        assert!(hash_all(AttestBaseHashAlgo::default(), b"abc").is_none());
    }
}
