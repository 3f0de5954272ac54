//! Keyword/value scanning over a page's words.
//!
//! Report headers print metadata as `Key: value` pairs with no reliable
//! block structure ("DOB: 01/02/1980", "Date Collected: 03/04/2024"). The
//! scanner slides a window over the page's words and binds each key to the
//! word right after it.

use crate::document::TextPage;
use indexmap::IndexMap;

/// Extract the word following each key.
///
/// Keys may span several words. A window as wide as the longest key plus one
/// word slides over the page's words in reading order; at each position every
/// unresolved key is tested word by word with a case-sensitive prefix match
/// (so `"DOB"` matches `"DOB:"`, and a ligature-truncated word still matches
/// its key). The first match binds the key; later occurrences are ignored.
///
/// The result holds only the keys that were found, in the order given.
pub fn extract_keyvalue<S: AsRef<str>>(page: &TextPage, keys: &[S]) -> IndexMap<String, String> {
    let words: Vec<String> = page.words().into_iter().map(|w| w.text).collect();
    scan_words(&words, keys)
}

/// Keyword/value scan over an explicit word sequence.
///
/// # Examples
///
/// ```
/// use lab_oxide::extractors::keyvalue::scan_words;
///
/// let words = ["Sex:", "Female", "Date", "Collected:", "03/04/2024", "Fasting:", "Yes"];
/// let found = scan_words(&words, &["Date Collected", "Sex"]);
/// assert_eq!(found["Date Collected"], "03/04/2024");
/// assert_eq!(found["Sex"], "Female");
/// ```
pub fn scan_words<W: AsRef<str>, S: AsRef<str>>(words: &[W], keys: &[S]) -> IndexMap<String, String> {
    let key_words: Vec<Vec<&str>> = keys
        .iter()
        .map(|k| AsRef::<str>::as_ref(k).split_whitespace().collect())
        .collect();
    let width = key_words.iter().map(Vec::len).max().unwrap_or(0) + 1;

    let mut found: Vec<Option<String>> = vec![None; keys.len()];
    for window in words.windows(width) {
        for (slot, parts) in found.iter_mut().zip(&key_words) {
            if slot.is_some() {
                continue;
            }
            let matches = window
                .iter()
                .zip(parts)
                .all(|(word, part)| AsRef::<str>::as_ref(word).starts_with(part));
            if matches {
                *slot = Some(AsRef::<str>::as_ref(&window[parts.len()]).to_string());
            }
        }
    }

    keys.iter()
        .zip(found)
        .filter_map(|(key, value)| value.map(|v| (AsRef::<str>::as_ref(key).to_string(), v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_keys() {
        let words = ["DOB:", "01/02/1980", "Age:", "44", "Sex:", "Male", "end"];
        let found = scan_words(&words, &["DOB", "Age", "Sex"]);
        assert_eq!(found["DOB"], "01/02/1980");
        assert_eq!(found["Age"], "44");
        assert_eq!(found["Sex"], "Male");
        let keys: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["DOB", "Age", "Sex"]);
    }

    #[test]
    fn test_first_match_wins() {
        let words = ["Age:", "44", "x", "Age:", "45", "y"];
        let found = scan_words(&words, &["Age"]);
        assert_eq!(found["Age"], "44");
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let words = ["dob:", "01/02/1980", "x"];
        assert!(scan_words(&words, &["DOB"]).is_empty());
    }

    #[test]
    fn test_multi_word_key_requires_every_word() {
        let words = ["Date", "Reported:", "03/06/2024", "Date", "Collected:", "03/04/2024", "Fasting:", "No"];
        let found = scan_words(&words, &["Date Collected", "Date Reported"]);
        assert_eq!(found["Date Reported"], "03/06/2024");
        assert_eq!(found["Date Collected"], "03/04/2024");
    }

    #[test]
    fn test_window_must_fit() {
        // Window is three words wide; a two-word page has no windows at all
        let words = ["Date", "Collected:"];
        assert!(scan_words(&words, &["Date Collected"]).is_empty());
    }

    #[test]
    fn test_no_keys() {
        let words = ["a", "b"];
        let keys: [&str; 0] = [];
        assert!(scan_words(&words, &keys).is_empty());
    }
}
