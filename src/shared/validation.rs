use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating URL slugs
    /// Must be lowercase alphanumeric with single hyphens
    /// - Valid: "kerja-bakti-rt-03", "musdes2024", "a"
    /// - Invalid: "-berita", "berita-", "berita--baru", "Berita", "berita_baru"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    /// Regex for Indonesian mobile numbers (also used for WhatsApp)
    /// - Valid: "081234567890", "+6281234567890", "6281234567890"
    /// - Invalid: "0212345678" (landline), "12345", "08-1234"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^(?:\+62|62|0)8[1-9][0-9]{6,11}$").unwrap();

    /// Regex for 24-hour clock times ("08:00", "19:30")
    pub static ref TIME_REGEX: Regex = Regex::new(r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// Build a slug from free text ("Kerja Bakti RT 03" -> "kerja-bakti-rt-03")
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
