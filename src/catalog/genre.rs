//! Keyword-based genre classification

use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Genre {
    Sport,
    News,
    Kids,
    Movies,
    Documentaries,
    Music,
    General,
}

/// Checked in order; the first genre with a matching keyword wins
const GENRE_KEYWORDS: &[(Genre, &[&str])] = &[
    (
        Genre::Sport,
        &["sport", "calcio", "football", "tennis", "basket", "motogp", "f1", "golf"],
    ),
    (Genre::News, &["news", "tg", "24", "meteo", "giornale", "notizie"]),
    (
        Genre::Kids,
        &["kids", "bambini", "cartoon", "disney", "nick", "boing", "junior"],
    ),
    (Genre::Movies, &["cinema", "film", "movie", "premium", "comedy"]),
    (
        Genre::Documentaries,
        &["discovery", "history", "national", "geo", "natura", "science"],
    ),
    (Genre::Music, &["music", "mtv", "vh1", "radio", "hit", "rock"]),
];

/// Genre for a channel name by case-insensitive keyword substring match
pub fn genre_of(name: &str) -> Genre {
    if name.is_empty() {
        return Genre::General;
    }
    let lowered = name.to_lowercase();
    GENRE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(genre, _)| *genre)
        .unwrap_or(Genre::General)
}

/// Every genre in declaration order, as advertised in the manifest
pub fn all_genres() -> Vec<Genre> {
    use strum::IntoEnumIterator;
    Genre::iter().collect()
}
