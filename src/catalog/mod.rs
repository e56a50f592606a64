//! Catalog query engine
//!
//! Requests go through four steps in a fixed order: search, genre filter,
//! sort, paginate. Every step works on borrowed groups from the cached
//! listing, so a page is cheap to build.

pub mod genre;
pub mod query;

pub use genre::{Genre, all_genres, genre_of};
pub use query::CatalogQuery;

use std::str::FromStr;
use tracing::{debug, info};

use crate::channels::ChannelGroup;
use crate::utils::normalize_text;

/// Page size and ordering applied to every catalog request
#[derive(Debug, Clone, Copy)]
pub struct CatalogOptions {
    pub page_size: usize,
    pub sort_by_name: bool,
}

impl From<&crate::config::CatalogConfig> for CatalogOptions {
    fn from(config: &crate::config::CatalogConfig) -> Self {
        Self {
            page_size: config.page_size,
            sort_by_name: config.sort_by_name,
        }
    }
}

/// Accent and case insensitive substring match on the display name
pub fn search<'a>(groups: Vec<&'a ChannelGroup>, query: &str) -> Vec<&'a ChannelGroup> {
    let needle = normalize_text(query);
    if needle.is_empty() {
        return groups;
    }
    groups
        .into_iter()
        .filter(|g| normalize_text(&g.display_name).contains(&needle))
        .collect()
}

/// Keep groups classified as `genre`; an unknown genre name matches nothing
pub fn filter_genre<'a>(groups: Vec<&'a ChannelGroup>, genre: &str) -> Vec<&'a ChannelGroup> {
    let Ok(wanted) = Genre::from_str(genre.trim()) else {
        debug!("Unknown genre requested: {}", genre);
        return Vec::new();
    };
    groups
        .into_iter()
        .filter(|g| genre_of(&g.display_name) == wanted)
        .collect()
}

/// Stable sort on the normalized display name
pub fn sort_by_name(groups: &mut [&ChannelGroup]) {
    groups.sort_by_cached_key(|g| normalize_text(&g.display_name));
}

/// Up to `page_size` items starting at `skip`
pub fn paginate<T>(items: Vec<T>, skip: usize, page_size: usize) -> Vec<T> {
    items.into_iter().skip(skip).take(page_size).collect()
}

/// Apply a catalog request to the cached groups
pub fn run<'a>(
    groups: &'a [ChannelGroup],
    query: &CatalogQuery,
    options: CatalogOptions,
) -> Vec<&'a ChannelGroup> {
    let mut selected: Vec<&ChannelGroup> = groups.iter().collect();

    if let Some(term) = query.search_term() {
        selected = search(selected, term);
        info!("Catalog search '{}' matched {} channels", term, selected.len());
    }
    if let Some(genre) = query.genre_name() {
        selected = filter_genre(selected, genre);
        info!("Catalog genre '{}' matched {} channels", genre, selected.len());
    }
    if options.sort_by_name {
        sort_by_name(&mut selected);
    }
    paginate(selected, query.skip, options.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{Channel, grouping::build_groups};

    fn groups(names: &[&str]) -> Vec<ChannelGroup> {
        let channels = names
            .iter()
            .enumerate()
            .map(|(i, n)| Channel::new(&i.to_string(), n, "Italy"))
            .collect();
        build_groups(channels, false, |id| format!("https://vavoo.to/play/{id}/index.m3u8"))
    }

    fn names<'a>(selected: &[&'a ChannelGroup]) -> Vec<&'a str> {
        selected.iter().map(|g| g.display_name.as_str()).collect()
    }

    const OPTIONS: CatalogOptions = CatalogOptions {
        page_size: 100,
        sort_by_name: true,
    };

    #[test]
    fn pagination_bounds() {
        let items: Vec<usize> = (0..150).collect();
        let page = paginate(items.clone(), 100, 100);
        assert_eq!(page.len(), 50);
        assert_eq!(page[0], 100);
        assert!(paginate(items.clone(), 1000, 100).is_empty());
        assert_eq!(paginate(items, 0, 100).len(), 100);
    }

    #[test]
    fn search_ignores_accents_and_case() {
        let all = groups(&["Canale Più", "Rai 1", "RAI Sport"]);
        let found = search(all.iter().collect(), "PIU");
        assert_eq!(names(&found), vec!["Canale Più"]);

        let found = search(all.iter().collect(), "rai");
        assert_eq!(names(&found), vec!["Rai 1", "RAI Sport"]);
    }

    #[test]
    fn empty_search_is_a_no_op() {
        let all = groups(&["B", "A"]);
        assert_eq!(search(all.iter().collect(), "  ").len(), 2);
    }

    #[test]
    fn unknown_genre_matches_nothing() {
        let all = groups(&["Sky Sport", "Rai 1"]);
        assert!(filter_genre(all.iter().collect(), "WEATHER").is_empty());
        assert_eq!(names(&filter_genre(all.iter().collect(), "sport")), vec!["Sky Sport"]);
    }

    #[test]
    fn run_searches_filters_sorts_then_paginates() {
        let all = groups(&["Zeta Sport", "Rai 1", "Alfa Sport", "Sky Sport Calcio", "TG Sport"]);
        let query = CatalogQuery {
            search: Some("sport".into()),
            genre: Some("SPORT".into()),
            skip: 1,
        };
        let page = run(&all, &query, CatalogOptions { page_size: 2, sort_by_name: true });
        assert_eq!(names(&page), vec!["Sky Sport Calcio", "TG Sport"]);
    }

    #[test]
    fn sorting_can_be_disabled() {
        let all = groups(&["B", "A", "C"]);
        let page = run(
            &all,
            &CatalogQuery::default(),
            CatalogOptions { page_size: 100, sort_by_name: false },
        );
        assert_eq!(names(&page), vec!["B", "A", "C"]);
    }

    #[test]
    fn sort_uses_normalized_names() {
        let all = groups(&["b", "Émilia", "A"]);
        let page = run(&all, &CatalogQuery::default(), OPTIONS);
        assert_eq!(names(&page), vec!["A", "b", "Émilia"]);
    }
}
