//! Phonetic lookup of syllable finals.

use pinyin::ToPinyin;

/// Resolves a character to the final (vowel and coda) of its pronunciation.
///
/// The returned string may still carry tone marks; callers normalize it.
/// `None` means the character has no known pronunciation.
pub trait PhoneticLookup: Send + Sync {
    fn final_sound(&self, ch: char) -> Option<String>;
}

/// Mandarin finals from the pinyin table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinLookup;

impl PhoneticLookup for PinyinLookup {
    fn final_sound(&self, ch: char) -> Option<String> {
        let syllable = ch.to_pinyin()?.with_tone();
        Some(split_final(syllable))
    }
}

const INITIALS: [&str; 21] = [
    "zh", "ch", "sh", "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "r",
    "z", "c", "s",
];

/// Map a `u` vowel (with any tone mark) to the matching `ü`.
fn umlaut(c: char) -> char {
    match c {
        'u' => 'ü',
        'ū' => 'ǖ',
        'ú' => 'ǘ',
        'ǔ' => 'ǚ',
        'ù' => 'ǜ',
        other => other,
    }
}

fn is_u(c: char) -> bool {
    matches!(c, 'u' | 'ū' | 'ú' | 'ǔ' | 'ù')
}

fn is_i(c: char) -> bool {
    matches!(c, 'i' | 'ī' | 'í' | 'ǐ' | 'ì')
}

fn with_umlaut_head(rest: &str) -> String {
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if is_u(first) => std::iter::once(umlaut(first)).chain(chars).collect(),
        _ => rest.to_string(),
    }
}

/// Remove the initial consonant from a tone-marked pinyin syllable.
///
/// The zero-initial spellings are rewritten to the finals they stand for
/// (`yan` -> `ian`, `wo` -> `uo`, `yu` -> `ü`), `u` after `j`/`q`/`x` is
/// written as `ü`, and the contracted forms `iu`, `ui`, `un` are used
/// for `you`, `wei`, `wen` so they group with `liu`, `gui`, `lun`.
pub(crate) fn split_final(syllable: &str) -> String {
    let syllable = syllable.to_lowercase();

    if let Some(rest) = syllable.strip_prefix('y') {
        let expanded = match rest.chars().next() {
            Some(c) if is_u(c) => with_umlaut_head(rest),
            Some(c) if is_i(c) => rest.to_string(),
            _ => format!("i{}", rest),
        };
        return contract(expanded);
    }

    if let Some(rest) = syllable.strip_prefix('w') {
        let expanded = match rest.chars().next() {
            Some(c) if is_u(c) => rest.to_string(),
            _ => format!("u{}", rest),
        };
        return contract(expanded);
    }

    for initial in INITIALS {
        if let Some(rest) = syllable.strip_prefix(initial) {
            if rest.is_empty() {
                // Syllabic consonants such as "m" or "ng" have no final.
                return syllable;
            }
            if matches!(initial, "j" | "q" | "x") {
                return with_umlaut_head(rest);
            }
            return rest.to_string();
        }
    }

    syllable
}

fn contract(final_sound: String) -> String {
    let mut chars: Vec<char> = final_sound.chars().collect();
    // iou -> iu, uei -> ui, uen -> un; the tone mark sits on the dropped
    // vowel, so carry it over to the one that remains.
    if chars.len() == 3 {
        let (head, mid, tail) = (chars[0], chars[1], chars[2]);
        let contracted = match (head, base_vowel(mid), tail) {
            ('i', 'o', 'u') => Some(vec!['i', move_tone(mid, 'u')]),
            ('u', 'e', 'i') => Some(vec!['u', move_tone(mid, 'i')]),
            ('u', 'e', 'n') => Some(vec![move_tone(mid, 'u'), 'n']),
            _ => None,
        };
        if let Some(c) = contracted {
            chars = c;
        }
    }
    chars.into_iter().collect()
}

fn base_vowel(c: char) -> char {
    match c {
        'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
        'ē' | 'é' | 'ě' | 'è' => 'e',
        other => other,
    }
}

/// Put the tone of `marked` onto `target`.
fn move_tone(marked: char, target: char) -> char {
    let tone = match marked {
        'ō' | 'ē' => 1,
        'ó' | 'é' => 2,
        'ǒ' | 'ě' => 3,
        'ò' | 'è' => 4,
        _ => 0,
    };
    let table: [char; 5] = match target {
        'u' => ['u', 'ū', 'ú', 'ǔ', 'ù'],
        'i' => ['i', 'ī', 'í', 'ǐ', 'ì'],
        _ => return target,
    };
    table[tone]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_final_plain_initials() {
        assert_eq!(split_final("shā"), "ā");
        assert_eq!(split_final("huā"), "uā");
        assert_eq!(split_final("zhuāng"), "uāng");
        assert_eq!(split_final("liàng"), "iàng");
    }

    #[test]
    fn test_split_final_zero_initial() {
        assert_eq!(split_final("ài"), "ài");
        assert_eq!(split_final("yán"), "ián");
        assert_eq!(split_final("yī"), "ī");
        assert_eq!(split_final("yǔ"), "ǚ");
        assert_eq!(split_final("yuán"), "üán");
        assert_eq!(split_final("wǒ"), "uǒ");
        assert_eq!(split_final("wǔ"), "ǔ");
    }

    #[test]
    fn test_split_final_contractions() {
        assert_eq!(split_final("yǒu"), "iǔ");
        assert_eq!(split_final("wèi"), "uì");
        assert_eq!(split_final("wēn"), "ūn");
    }

    #[test]
    fn test_split_final_jqx_umlaut() {
        assert_eq!(split_final("xué"), "üé");
        assert_eq!(split_final("qù"), "ǜ");
        assert_eq!(split_final("jiā"), "iā");
    }

    #[test]
    fn test_pinyin_lookup_resolves_hanzi() {
        let lookup = PinyinLookup;
        assert_eq!(lookup.final_sound('妈').as_deref(), Some("ā"));
        assert!(lookup.final_sound('a').is_none());
    }
}
