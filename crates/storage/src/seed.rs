use chrono::NaiveDate;
use hotelease_core::{Amenity, Hotel, HotelDetail, Review, Room};

use Amenity::*;

const ROOM_BASICS: [Amenity; 4] = [FreeWifi, AirConditioning, FlatScreenTv, MiniBar];

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn hotel(
    id: u32,
    name: &str,
    location: &str,
    price: u32,
    rating: f32,
    amenities: &[Amenity],
    discount: Option<u8>,
    description: &str,
) -> Hotel {
    Hotel {
        id,
        name: name.to_string(),
        location: location.to_string(),
        price,
        rating,
        image: format!("/images/hotel-{id}.png"),
        amenities: amenities.to_vec(),
        discount,
        description: description.to_string(),
    }
}

fn room(id: u32, name: &str, price: u32, capacity: u8, size: &str, beds: &str, extras: &[Amenity]) -> Room {
    let mut amenities = ROOM_BASICS.to_vec();
    amenities.extend_from_slice(extras);
    Room {
        id,
        name: name.to_string(),
        price,
        capacity,
        size: size.to_string(),
        beds: beds.to_string(),
        amenities,
        image: format!("/images/room-{}.png", (id - 1) % 3 + 1),
    }
}

fn review(id: u32, name: &str, rating: u8, date: NaiveDate, comment: &str) -> Review {
    Review {
        id,
        name: name.to_string(),
        rating,
        date,
        comment: comment.to_string(),
        avatar: format!("/images/avatar-{}.png", (id - 1) % 3 + 1),
    }
}

fn gallery() -> Vec<String> {
    (1..=4)
        .map(|n| format!("/images/hotel-detail-{n}.png"))
        .collect()
}

/// The sample catalog, in listing order.
pub fn sample_catalog() -> Vec<HotelDetail> {
    vec![grand_plaza(), seaside_resort(), mountain_view_lodge(), city_center_inn()]
}

fn grand_plaza() -> HotelDetail {
    HotelDetail {
        hotel: hotel(
            1,
            "Grand Plaza Hotel",
            "Manhattan, New York",
            199,
            4.8,
            &[FreeWifi, Pool, Spa],
            Some(15),
            "Luxury hotel in the heart of Manhattan with stunning city views, a rooftop pool, and world-class dining options.",
        ),
        images: gallery(),
        overview: "Experience luxury and comfort at the Grand Plaza Hotel, located in the heart of Manhattan. Our hotel offers stunning city views, a rooftop pool, and world-class dining options. Each room is elegantly designed with modern amenities to ensure a memorable stay.".to_string(),
        amenities: vec![
            FreeWifi,
            SwimmingPool,
            SpaWellness,
            FitnessCenter,
            Restaurant,
            RoomService,
            BusinessCenter,
            Parking,
        ],
        rooms: vec![
            room(1, "Deluxe King Room", 199, 2, "35 m²", "1 King Bed", &[]),
            room(2, "Premium Double Room", 249, 2, "40 m²", "2 Queen Beds", &[CityView]),
            room(3, "Executive Suite", 349, 3, "55 m²", "1 King Bed + Sofa Bed", &[CityView, Bathtub]),
        ],
        reviews: vec![
            review(1, "Sarah Johnson", 5, date(2023, 8, 15), "Absolutely loved my stay at this hotel! The staff was incredibly friendly and helpful. The room was spacious, clean, and had an amazing view of the city. The location is perfect - close to all the major attractions. Will definitely stay here again!"),
            review(2, "Michael Brown", 4, date(2023, 7, 22), "Great hotel with excellent amenities. The pool and spa were highlights of my stay. Room was comfortable and clean. Only giving 4 stars because the restaurant was a bit pricey, but the food was delicious."),
            review(3, "Emily Davis", 5, date(2023, 6, 10), "One of the best hotel experiences I've had. The staff went above and beyond to make our anniversary special. The room was spotless and the bed was incredibly comfortable. Highly recommend!"),
        ],
    }
}

fn seaside_resort() -> HotelDetail {
    HotelDetail {
        hotel: hotel(
            2,
            "Seaside Resort",
            "Brooklyn, New York",
            249,
            4.6,
            &[Beachfront, Restaurant, Gym],
            None,
            "Beautiful beachfront resort with private access to the shore, multiple restaurants, and spacious rooms with ocean views.",
        ),
        images: gallery(),
        overview: "Wake up to the sound of the waves at the Seaside Resort. Guests enjoy private beach access, three restaurants serving fresh local seafood, and a fully equipped gym overlooking the water.".to_string(),
        amenities: vec![FreeWifi, Beachfront, Restaurant, FitnessCenter, Bar, RoomService, Parking],
        rooms: vec![
            room(4, "Ocean View Queen Room", 249, 2, "32 m²", "1 Queen Bed", &[]),
            room(5, "Family Beach Room", 299, 4, "48 m²", "2 Queen Beds", &[Bathtub]),
            room(6, "Oceanfront Suite", 399, 3, "60 m²", "1 King Bed + Sofa Bed", &[Bathtub]),
        ],
        reviews: vec![
            review(4, "Michael Brown", 4, date(2023, 8, 2), "Excellent location and friendly staff. The breakfast was delicious and had many options."),
            review(5, "Emily Davis", 5, date(2023, 7, 9), "Falling asleep to the ocean every night was unforgettable. The family room had plenty of space for the kids."),
        ],
    }
}

fn mountain_view_lodge() -> HotelDetail {
    HotelDetail {
        hotel: hotel(
            3,
            "Mountain View Lodge",
            "Queens, New York",
            179,
            4.7,
            &[Breakfast, Parking, PetFriendly],
            Some(10),
            "Cozy lodge with panoramic mountain views, complimentary breakfast, and easy access to hiking trails and outdoor activities.",
        ),
        images: gallery(),
        overview: "The Mountain View Lodge pairs panoramic views with a warm, rustic interior. Breakfast is included with every stay, parking is free, and four-legged guests are always welcome.".to_string(),
        amenities: vec![FreeWifi, Breakfast, Parking, PetFriendly, Restaurant],
        rooms: vec![
            room(7, "Cozy Cabin Room", 179, 2, "28 m²", "1 Queen Bed", &[]),
            room(8, "Lodge Twin Room", 199, 2, "30 m²", "2 Twin Beds", &[]),
            room(9, "Panorama Loft", 259, 4, "50 m²", "1 King Bed + 2 Twin Beds", &[Bathtub]),
        ],
        reviews: vec![
            review(6, "Emily Davis", 5, date(2023, 6, 28), "One of the best hotel experiences I've had. The views were breathtaking and the room was spotless."),
            review(7, "Sarah Johnson", 4, date(2023, 5, 17), "Our dog was treated like royalty and the breakfast spread was generous. The trails start right outside the door."),
        ],
    }
}

fn city_center_inn() -> HotelDetail {
    HotelDetail {
        hotel: hotel(
            4,
            "City Center Inn",
            "Bronx, New York",
            159,
            4.5,
            &[FreeWifi, Restaurant, Bar],
            None,
            "Conveniently located inn in the city center, walking distance to major attractions, shopping, and dining options.",
        ),
        images: gallery(),
        overview: "City Center Inn puts you steps from the neighborhood's best shopping and dining. Unwind in the lobby bar after a day of exploring, then rest in a quiet, comfortable room.".to_string(),
        amenities: vec![FreeWifi, Restaurant, Bar, BusinessCenter],
        rooms: vec![
            room(10, "Standard Double Room", 159, 2, "24 m²", "1 Double Bed", &[]),
            room(11, "Superior King Room", 189, 2, "30 m²", "1 King Bed", &[CityView]),
        ],
        reviews: vec![
            review(8, "Sarah Johnson", 4, date(2023, 8, 5), "Great value for the location. The bar downstairs makes a fantastic old fashioned."),
            review(9, "Michael Brown", 5, date(2023, 7, 1), "Spotless rooms, fast WiFi and helpful staff who pointed us to the best local restaurants."),
        ],
    }
}
