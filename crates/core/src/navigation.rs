use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::ListingFilter;

const ROUTE_BASE: &str = "http://hotelease.local/";

/// Parameters the listing page accepts from links and the landing search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    pub destination: Option<String>,
    pub guests: Option<u8>,
    pub date: Option<NaiveDate>,
    pub deal: Option<String>,
}

impl ListingQuery {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "destination" => query.destination = Some(value.to_string()),
                "guests" => query.guests = value.parse().ok(),
                "date" => query.date = parse_listing_date(value),
                "deal" => query.deal = Some(value.to_string()),
                _ => {}
            }
        }
        query
    }

    /// Listing filter as the page opens: destination pre-fills the text query.
    pub fn initial_filter(&self) -> ListingFilter {
        ListingFilter {
            query: self.destination.clone().unwrap_or_default(),
            ..ListingFilter::default()
        }
    }

    pub fn deal_notice(&self) -> Option<String> {
        self.deal.as_deref().map(deal_notice)
    }
}

/// Accepts plain dates and full ISO timestamps; only the calendar day is kept.
fn parse_listing_date(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub fn deal_notice(slug: &str) -> String {
    format!(
        "The {} deal has been applied to your search.",
        slug.replacen('-', " ", 1)
    )
}

pub fn deal_path(slug: &str) -> String {
    format!("/hotels?deal={slug}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Route {
    Home,
    Hotels { query: ListingQuery },
    Hotel { id: u32 },
    About,
    Contact,
    Login,
    Register,
    NotFound { path: String },
}

impl Route {
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

/// Maps a page path (optionally with a query string) onto a page. Hotel pages
/// resolve only for ids present in `known_ids`.
pub fn resolve_route(path: &str, known_ids: &[u32]) -> Route {
    let not_found = || Route::NotFound {
        path: path.to_string(),
    };

    if !path.starts_with('/') || path.starts_with("//") {
        return not_found();
    }
    let Ok(url) = Url::parse(ROUTE_BASE).and_then(|base| base.join(path)) else {
        return not_found();
    };

    let segments = url
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();

    match segments.as_slice() {
        [] => Route::Home,
        ["hotels"] => {
            let pairs = url.query_pairs().collect::<Vec<_>>();
            Route::Hotels {
                query: ListingQuery::from_pairs(
                    pairs.iter().map(|(key, value)| (key.as_ref(), value.as_ref())),
                ),
            }
        }
        ["hotels", id] => match id.parse::<u32>() {
            Ok(id) if known_ids.contains(&id) => Route::Hotel { id },
            _ => not_found(),
        },
        ["about"] => Route::About,
        ["contact"] => Route::Contact,
        ["auth", "login"] => Route::Login,
        ["auth", "register"] => Route::Register,
        _ => not_found(),
    }
}
