// src/infrastructure/transliteration.rs
//
// Slug generation
//
// Display names are Cyrillic; URLs are not. `transliterate` maps a name to
// a lowercase ASCII slug. Pure and total: any input, including empty,
// produces a string.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid separator pattern"));

fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'і' => "i",
        'ї' => "yi",
        'є' => "ye",
        _ => return None,
    };
    Some(latin)
}

/// URL-safe slug for a display name.
///
/// "Рекламные щиты, Москва" → "reklamnye-shchity-moskva"
pub fn transliterate(text: &str) -> String {
    let mut latin = String::with_capacity(text.len());

    for c in text.chars().flat_map(char::to_lowercase) {
        match latin_for(c) {
            Some(mapped) => latin.push_str(mapped),
            None if c.is_ascii_alphanumeric() => latin.push(c),
            None => latin.push(' '),
        }
    }

    SEPARATOR_RUN
        .replace_all(&latin, "-")
        .trim_matches('-')
        .to_string()
}

/// Slug for an optional name; absent names give an empty slug.
pub fn transliterate_opt(text: Option<&str>) -> String {
    text.map(transliterate).unwrap_or_default()
}
