//! Emoji extraction.
//!
//! Classification uses the Unicode emoji data shipped with the `emojis`
//! crate. A character is an emoji when it is an emoji on its own or in its
//! emoji presentation (followed by U+FE0F). Regional indicators and skin-tone
//! modifiers only occur inside sequences in that data and are accepted
//! explicitly. Joiners (U+200D) and variation selectors (U+FE0F) are not
//! members, so a ZWJ sequence contributes its pictographs one by one.
//!
//! ```
//! use chatpulse::emoji::extract_emojis;
//!
//! assert_eq!(extract_emojis("good morning ☀️ 😀!"), "☀😀");
//! assert_eq!(extract_emojis("done ✓ ♪ ★"), "");
//! ```

use std::ops::RangeInclusive;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

const REGIONAL_INDICATORS: RangeInclusive<char> = '\u{1F1E6}'..='\u{1F1FF}';
const SKIN_TONES: RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// Returns `true` if `c` is in the emoji classification set.
pub fn is_emoji(c: char) -> bool {
    if c == VARIATION_SELECTOR_16 || c == '\u{200D}' {
        return false;
    }
    if REGIONAL_INDICATORS.contains(&c) || SKIN_TONES.contains(&c) {
        return true;
    }

    let mut buf = [0u8; 4];
    if emojis::get(c.encode_utf8(&mut buf)).is_some() {
        return true;
    }

    // text-default symbols such as ☀ are listed in their emoji presentation
    let presented: String = [c, VARIATION_SELECTOR_16].into_iter().collect();
    emojis::get(&presented).is_some()
}

/// Returns the emoji characters of `text`, in order of appearance.
///
/// Pure and idempotent: extracting from the result returns it unchanged.
pub fn extract_emojis(text: &str) -> String {
    text.chars().filter(|&c| is_emoji(c)).collect()
}
