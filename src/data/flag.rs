/// Regional indicator symbol letter A
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Convert a two-letter country code into its flag emoji
/// (a pair of regional indicator symbols). Case-insensitive.
pub fn country_to_flag(code: &str) -> Option<String> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    code.bytes()
        .map(|b| char::from_u32(REGIONAL_INDICATOR_A + (b.to_ascii_uppercase() - b'A') as u32))
        .collect()
}
