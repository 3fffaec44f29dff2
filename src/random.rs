/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&self) -> f64;
}

/// `Math.random()` from the hosting page.
pub struct BrowserRandom;

impl RandomSource for BrowserRandom {
    fn next_f64(&self) -> f64 {
        js_sys::Math::random()
    }
}

pub fn uniform(random: &dyn RandomSource, low: f64, high: f64) -> f64 {
    low + random.next_f64() * (high - low)
}

/// Index into a slice of `len` items, `len` must be non zero.
pub fn pick_index(random: &dyn RandomSource, len: usize) -> usize {
    let index = (random.next_f64() * len as f64).floor() as usize;
    index.min(len - 1)
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Short base 36 identifier.
pub fn random_id(random: &dyn RandomSource) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[pick_index(random, ID_ALPHABET.len())] as char)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedRandom;
    use super::*;

    #[test]
    fn uniform_spans_range() {
        let random = ScriptedRandom::new(&[0.0, 0.5, 0.999], 0.0);
        assert_eq!(uniform(&random, 1000.0, 3000.0), 1000.0);
        assert_eq!(uniform(&random, 1000.0, 3000.0), 2000.0);
        assert!(uniform(&random, 1000.0, 3000.0) < 3000.0);
    }

    #[test]
    fn pick_index_stays_in_bounds() {
        let random = ScriptedRandom::new(&[0.0, 0.39, 0.99, 1.0], 0.0);
        assert_eq!(pick_index(&random, 5), 0);
        assert_eq!(pick_index(&random, 5), 1);
        assert_eq!(pick_index(&random, 5), 4);
        // a misbehaving source must not index past the end
        assert_eq!(pick_index(&random, 5), 4);
    }

    #[test]
    fn ids_are_base36() {
        let random = ScriptedRandom::new(&[0.0, 0.5, 0.99], 0.3);
        let id = random_id(&random);
        assert_eq!(id.len(), 9);
        assert!(id.starts_with("0i"));
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
