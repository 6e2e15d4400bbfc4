use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Amenity, Hotel};

pub const DEFAULT_MIN_PRICE: u32 = 50;
pub const DEFAULT_MAX_PRICE: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "recommended")]
    Recommended,
    #[serde(rename = "price-low")]
    PriceLow,
    #[serde(rename = "price-high")]
    PriceHigh,
    #[serde(rename = "rating")]
    Rating,
}

impl SortKey {
    /// Unknown keys fall back to the recommended order.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "price-low" | "price_low" | "price-asc" => Self::PriceLow,
            "price-high" | "price_high" | "price-desc" => Self::PriceHigh,
            "rating" => Self::Rating,
            _ => Self::Recommended,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub query: String,
    pub min_price: u32,
    pub max_price: u32,
    pub stars: Option<u8>,
    pub amenities: Vec<Amenity>,
    pub sort: SortKey,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            stars: None,
            amenities: Vec::new(),
            sort: SortKey::Recommended,
        }
    }
}

impl ListingFilter {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        self.matches_query(hotel)
            && hotel.price >= self.min_price
            && hotel.price <= self.max_price
            && self.stars.map_or(true, |stars| hotel.star_bucket() == stars)
            && self
                .amenities
                .iter()
                .all(|wanted| hotel.amenities.contains(wanted))
    }

    fn matches_query(&self, hotel: &Hotel) -> bool {
        let needle = self.query.to_lowercase();
        needle.is_empty()
            || hotel.name.to_lowercase().contains(&needle)
            || hotel.location.to_lowercase().contains(&needle)
    }
}

pub fn apply_filters(hotels: &[Hotel], filter: &ListingFilter) -> Vec<Hotel> {
    let mut filtered = hotels
        .iter()
        .filter(|hotel| filter.matches(hotel))
        .cloned()
        .collect::<Vec<_>>();
    sort_hotels(&mut filtered, filter.sort);
    filtered
}

/// The listing as shown before any filter is applied: catalog order.
pub fn reset_listing(hotels: &[Hotel]) -> (ListingFilter, Vec<Hotel>) {
    (ListingFilter::default(), hotels.to_vec())
}

pub fn sort_hotels(hotels: &mut [Hotel], sort: SortKey) {
    match sort {
        SortKey::PriceLow => hotels.sort_by_key(|hotel| hotel.price),
        SortKey::PriceHigh => hotels.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => hotels.sort_by(by_rating_desc),
        SortKey::Recommended => hotels.sort_by(|a, b| {
            match (is_discounted(a), is_discounted(b)) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => by_rating_desc(a, b),
            }
        }),
    }
}

pub fn results_notice(count: usize) -> String {
    format!("Found {count} hotels matching your criteria.")
}

fn is_discounted(hotel: &Hotel) -> bool {
    hotel.discount.is_some_and(|discount| discount > 0)
}

fn by_rating_desc(a: &Hotel, b: &Hotel) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(id: u32, name: &str, location: &str, price: u32, rating: f32) -> Hotel {
        Hotel {
            id,
            name: name.to_string(),
            location: location.to_string(),
            price,
            rating,
            image: format!("/images/hotel-{id}.png"),
            amenities: Vec::new(),
            discount: None,
            description: String::new(),
        }
    }

    fn sample() -> Vec<Hotel> {
        let mut plaza = hotel(1, "Grand Plaza Hotel", "Manhattan, New York", 199, 4.8);
        plaza.amenities = vec![Amenity::FreeWifi, Amenity::Pool, Amenity::Spa];
        plaza.discount = Some(15);
        let mut seaside = hotel(2, "Seaside Resort", "Brooklyn, New York", 249, 4.6);
        seaside.amenities = vec![Amenity::Beachfront, Amenity::Restaurant, Amenity::Gym];
        let mut lodge = hotel(3, "Mountain View Lodge", "Queens, New York", 179, 4.7);
        lodge.amenities = vec![Amenity::Breakfast, Amenity::Parking, Amenity::PetFriendly];
        lodge.discount = Some(10);
        let mut inn = hotel(4, "City Center Inn", "Bronx, New York", 159, 4.5);
        inn.amenities = vec![Amenity::FreeWifi, Amenity::Restaurant, Amenity::Bar];
        let mut budget = hotel(5, "Harbor Hostel", "Jersey City", 45, 3.9);
        budget.amenities = vec![Amenity::FreeWifi];
        vec![plaza, seaside, lodge, inn, budget]
    }

    fn ids(hotels: &[Hotel]) -> Vec<u32> {
        hotels.iter().map(|hotel| hotel.id).collect()
    }

    #[test]
    fn recommended_puts_discounts_first_then_rating() {
        let result = apply_filters(&sample(), &ListingFilter::default());
        assert_eq!(ids(&result), vec![1, 3, 2, 4]);
    }

    #[test]
    fn zero_discount_is_not_promoted() {
        let mut hotels = sample();
        hotels[3].discount = Some(0);
        let result = apply_filters(&hotels, &ListingFilter::default());
        assert_eq!(ids(&result), vec![1, 3, 2, 4]);
    }

    #[test]
    fn blank_query_is_matched_literally() {
        let filter = ListingFilter {
            query: "   ".to_string(),
            ..ListingFilter::default()
        };
        assert!(apply_filters(&sample(), &filter).is_empty());
    }

    #[test]
    fn query_matches_name_or_location_case_insensitively() {
        let filter = ListingFilter {
            query: "BROOK".to_string(),
            ..ListingFilter::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec![2]);

        let filter = ListingFilter {
            query: "lodge".to_string(),
            ..ListingFilter::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec![3]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ListingFilter {
            min_price: 159,
            max_price: 199,
            sort: SortKey::PriceLow,
            ..ListingFilter::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec![4, 3, 1]);
    }

    #[test]
    fn star_bucket_uses_floor_of_rating() {
        let filter = ListingFilter {
            min_price: 0,
            max_price: 500,
            stars: Some(3),
            ..ListingFilter::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec![5]);

        let filter = ListingFilter {
            stars: Some(5),
            ..ListingFilter::default()
        };
        assert!(apply_filters(&sample(), &filter).is_empty());
    }

    #[test]
    fn amenities_must_all_be_present() {
        let filter = ListingFilter {
            amenities: vec![Amenity::FreeWifi, Amenity::Restaurant],
            ..ListingFilter::default()
        };
        assert_eq!(ids(&apply_filters(&sample(), &filter)), vec![4]);
    }

    #[test]
    fn result_is_exactly_the_matching_set() {
        let hotels = sample();
        let filter = ListingFilter {
            query: "new york".to_string(),
            min_price: 170,
            max_price: 260,
            stars: Some(4),
            amenities: Vec::new(),
            sort: SortKey::Rating,
        };
        let result = apply_filters(&hotels, &filter);
        for hotel in &hotels {
            let included = result.iter().any(|kept| kept.id == hotel.id);
            assert_eq!(included, filter.matches(hotel), "hotel {}", hotel.id);
        }
    }

    #[test]
    fn sort_orders_are_monotonic() {
        let everything = ListingFilter {
            min_price: 0,
            max_price: 1_000,
            ..ListingFilter::default()
        };

        let low = apply_filters(
            &sample(),
            &ListingFilter {
                sort: SortKey::PriceLow,
                ..everything.clone()
            },
        );
        assert!(low.windows(2).all(|pair| pair[0].price <= pair[1].price));

        let high = apply_filters(
            &sample(),
            &ListingFilter {
                sort: SortKey::PriceHigh,
                ..everything.clone()
            },
        );
        assert!(high.windows(2).all(|pair| pair[0].price >= pair[1].price));

        let rated = apply_filters(
            &sample(),
            &ListingFilter {
                sort: SortKey::Rating,
                ..everything
            },
        );
        assert!(rated.windows(2).all(|pair| pair[0].rating >= pair[1].rating));
    }

    #[test]
    fn unknown_sort_key_is_recommended() {
        assert_eq!(SortKey::parse("cheapest-first"), SortKey::Recommended);
        assert_eq!(SortKey::parse("Price-High"), SortKey::PriceHigh);
    }

    #[test]
    fn reset_restores_catalog_order() {
        let (filter, hotels) = reset_listing(&sample());
        assert_eq!(filter, ListingFilter::default());
        assert_eq!(ids(&hotels), vec![1, 2, 3, 4, 5]);
    }
}
