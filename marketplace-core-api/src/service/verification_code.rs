/// Source of verification codes handed to the client at acceptance time
///
/// The code is a human-relayed shared secret, not a cryptographic token; the
/// trait exists so tests can substitute a deterministic source instead of the
/// process-wide generator.
pub trait VerificationCodeSource: Send + Sync {
    /// Returns a fresh 6-digit decimal code
    fn next_code(&self) -> String;
}

/// Default source drawing uniformly from 100000..=999999
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeSource;

impl VerificationCodeSource for RandomCodeSource {
    fn next_code(&self) -> String {
        use rand::Rng;
        rand::thread_rng().gen_range(100_000..=999_999).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_decimal_digits() {
        let source = RandomCodeSource;
        for _ in 0..100 {
            let code = source.next_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.as_bytes()[0], b'0');
        }
    }
}
