//! Free-text address → canonical join key.

use super::abbreviations;

/// Normalizes a raw street address into its canonical form.
///
/// The result is lowercase, free of punctuation, and single-spaced. The
/// first token is taken as the house number. A trailing unit designator
/// (an all-digit or single-character last token) is moved onto the house
/// number as `house,unit`, and the token before it (the `apt`/`unit` word)
/// is dropped along with it. A leading or trailing street token found in
/// the abbreviation table is expanded.
///
/// Never fails. Input without any alphanumeric token comes back as the
/// stripped string, which callers filter by length.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let cleaned: String = lowered
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut tokens = cleaned.split_whitespace();
    let Some(house) = tokens.next() else {
        return cleaned;
    };
    let mut house = house.to_string();
    let mut street: Vec<&str> = tokens.collect();

    if street.len() > 1 {
        if let Some(&last) = street.last() {
            if is_unit_designator(last) {
                house.push(',');
                house.push_str(last);
                street.truncate(street.len() - 2);
            }
        }
    }

    if let Some(first) = street.first_mut() {
        if let Some(expanded) = abbreviations::expand(first) {
            *first = expanded;
        }
    }
    if let Some(last) = street.last_mut() {
        if let Some(expanded) = abbreviations::expand(last) {
            *last = expanded;
        }
    }

    if street.is_empty() {
        house
    } else {
        format!("{house} {}", street.join(" "))
    }
}

fn is_unit_designator(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit()) || token.chars().count() == 1
}
