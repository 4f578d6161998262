use boxoffice_core::FingerprintHasher;

/// Hex-encoded BLAKE3 digest of a layout fingerprint
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl FingerprintHasher for Blake3Hasher {
    fn digest(&self, fingerprint: &str) -> String {
        blake3::hash(fingerprint.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::{parse_layout, SnapshotKey};

    #[test]
    fn test_digest_is_stable_and_order_sensitive() {
        let hasher = Blake3Hasher;

        let a = hasher.digest(&parse_layout("2 3\n4").fingerprint());
        let b = hasher.digest(&parse_layout("2 3\n4").fingerprint());
        let swapped = hasher.digest(&parse_layout("3 2\n4").fingerprint());

        assert_eq!(a, b);
        assert_ne!(a, swapped);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_event_does_not_change_digest() {
        let theater = parse_layout("5 5");

        let plain = SnapshotKey::for_theater(&theater, &Blake3Hasher);
        let gala = SnapshotKey::for_theater(&theater.clone().with_event("Gala"), &Blake3Hasher);

        assert_eq!(plain.digest, gala.digest);
        assert_ne!(plain, gala);
    }
}
