use std::path::PathBuf;

use rand::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// Generate a prefixed record id, e.g. `acc_x7f3k2a`.
///
/// Ids only need in-session uniqueness; 36^7 suffixes are plenty for the
/// collection sizes this engine handles.
pub fn uid(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{prefix}_{suffix}")
}

const STORE_PATH: &str = "SYNCLIFY_STORE";

const DEFAULT_STORE_PATH: &str = "./synclify.json";

pub fn get_default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

pub fn get_store_path() -> PathBuf {
    let path_from_env = std::env::var(STORE_PATH);
    path_from_env.map_or(get_default_store_path(), PathBuf::from)
}

const DROP_THRESHOLD: &str = "SYNCLIFY_THRESHOLD";

const DEFAULT_DROP_THRESHOLD: i32 = 40;

pub fn get_default_drop_threshold() -> i32 {
    DEFAULT_DROP_THRESHOLD
}

pub fn get_drop_threshold() -> i32 {
    let threshold_from_env = std::env::var(DROP_THRESHOLD);
    threshold_from_env.map_or(DEFAULT_DROP_THRESHOLD, |res| {
        res.parse().unwrap_or(DEFAULT_DROP_THRESHOLD)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_carries_prefix_and_suffix() {
        let id = uid("acc");
        assert!(id.starts_with("acc_"));
        assert_eq!(id.len(), "acc_".len() + ID_SUFFIX_LEN);
    }

    #[test]
    fn uids_are_unique_in_practice() {
        let a = uid("m");
        let b = uid("m");
        assert_ne!(a, b);
    }
}
