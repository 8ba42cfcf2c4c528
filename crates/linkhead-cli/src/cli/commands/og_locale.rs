//! `linkhead og-locale <locale>` – print the Open Graph form of a locale.

use linkhead_core::og_locale::normalize_og_locale;

pub fn run_og_locale(locale: &str) {
    match normalize_og_locale(locale) {
        Some(normalized) => println!("{normalized}"),
        None => println!("(none)"),
    }
}
