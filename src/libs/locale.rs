// Typed access to the `locale` field of a settings document.
// Only "en" and "es" are ever accepted or returned; everything else reads as "en".

use crate::schemas::user_settings::{Locale, UserSettings};

/// Returns a copy of `doc` with `locale` set and `lastUpdated` refreshed.
pub fn set_locale(doc: &UserSettings, locale: Locale) -> UserSettings {
    let mut updated = doc.clone();
    updated.locale = Some(locale);
    updated.touch();
    updated
}

/// The document's locale, or English when absent.
pub fn get_locale(doc: &UserSettings) -> Locale {
    doc.locale.unwrap_or_default()
}
