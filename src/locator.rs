//! Resource locators for note images

/// Characters `encodeURIComponent` leaves alone besides ASCII alphanumerics
const UNRESERVED: &[u8] = b"-_.!~*'()";

/// Percent-encode every byte outside the `encodeURIComponent` safe set.
pub fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &byte in s.as_bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// Path of a note image under `notes_dir`.
///
/// Only names containing `#` are encoded; `#` would otherwise start a URL fragment.
///
/// ```
/// use notedrill::locator::note_locator;
///
/// assert_eq!(note_locator("notes/", "Fs3-1.png"), "notes/Fs3-1.png");
/// assert_eq!(note_locator("notes/", "F#3-1.png"), "notes/F%233-1.png");
/// ```
pub fn note_locator(notes_dir: &str, file_name: &str) -> String {
    if file_name.contains('#') {
        format!("{}{}", notes_dir, encode_component(file_name))
    } else {
        format!("{}{}", notes_dir, file_name)
    }
}

/// Path of the startup placeholder, which lives next to the page.
pub fn startup_locator(startup_image: &str) -> String {
    encode_component(startup_image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("C#4.png"), "C%234.png");
        assert_eq!(encode_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_note_locator_only_encodes_hash_names() {
        assert_eq!(note_locator("notes/", "C4.png"), "notes/C4.png");
        // spaces pass through untouched when there is no '#'
        assert_eq!(note_locator("notes/", "C4 alt.png"), "notes/C4 alt.png");
        assert_eq!(note_locator("notes/", "C# 4.png"), "notes/C%23%204.png");
    }

    #[test]
    fn test_startup_locator() {
        assert_eq!(startup_locator("start up.png"), "start%20up.png");
    }
}
