use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Amenity {
    #[serde(rename = "Free WiFi")]
    FreeWifi,
    #[serde(rename = "Pool")]
    Pool,
    #[serde(rename = "Swimming Pool")]
    SwimmingPool,
    #[serde(rename = "Spa")]
    Spa,
    #[serde(rename = "Spa & Wellness")]
    SpaWellness,
    #[serde(rename = "Beachfront")]
    Beachfront,
    #[serde(rename = "Restaurant")]
    Restaurant,
    #[serde(rename = "Gym")]
    Gym,
    #[serde(rename = "Fitness Center")]
    FitnessCenter,
    #[serde(rename = "Breakfast")]
    Breakfast,
    #[serde(rename = "Parking")]
    Parking,
    #[serde(rename = "Pet Friendly")]
    PetFriendly,
    #[serde(rename = "Bar")]
    Bar,
    #[serde(rename = "Room Service")]
    RoomService,
    #[serde(rename = "Business Center")]
    BusinessCenter,
    #[serde(rename = "Air Conditioning")]
    AirConditioning,
    #[serde(rename = "Flat-screen TV")]
    FlatScreenTv,
    #[serde(rename = "Mini Bar")]
    MiniBar,
    #[serde(rename = "City View")]
    CityView,
    #[serde(rename = "Bathtub")]
    Bathtub,
}

/// Icon a page renders next to an amenity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityIcon {
    Wifi,
    Waves,
    Sparkles,
    Umbrella,
    Utensils,
    Dumbbell,
    Coffee,
    Car,
    PawPrint,
    Wine,
    ConciergeBell,
    Briefcase,
    Snowflake,
    Tv,
    Building,
    Bath,
}

impl Amenity {
    pub const ALL: [Amenity; 20] = [
        Self::FreeWifi,
        Self::Pool,
        Self::SwimmingPool,
        Self::Spa,
        Self::SpaWellness,
        Self::Beachfront,
        Self::Restaurant,
        Self::Gym,
        Self::FitnessCenter,
        Self::Breakfast,
        Self::Parking,
        Self::PetFriendly,
        Self::Bar,
        Self::RoomService,
        Self::BusinessCenter,
        Self::AirConditioning,
        Self::FlatScreenTv,
        Self::MiniBar,
        Self::CityView,
        Self::Bathtub,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FreeWifi => "Free WiFi",
            Self::Pool => "Pool",
            Self::SwimmingPool => "Swimming Pool",
            Self::Spa => "Spa",
            Self::SpaWellness => "Spa & Wellness",
            Self::Beachfront => "Beachfront",
            Self::Restaurant => "Restaurant",
            Self::Gym => "Gym",
            Self::FitnessCenter => "Fitness Center",
            Self::Breakfast => "Breakfast",
            Self::Parking => "Parking",
            Self::PetFriendly => "Pet Friendly",
            Self::Bar => "Bar",
            Self::RoomService => "Room Service",
            Self::BusinessCenter => "Business Center",
            Self::AirConditioning => "Air Conditioning",
            Self::FlatScreenTv => "Flat-screen TV",
            Self::MiniBar => "Mini Bar",
            Self::CityView => "City View",
            Self::Bathtub => "Bathtub",
        }
    }

    pub fn icon(self) -> AmenityIcon {
        match self {
            Self::FreeWifi => AmenityIcon::Wifi,
            Self::Pool | Self::SwimmingPool => AmenityIcon::Waves,
            Self::Spa | Self::SpaWellness => AmenityIcon::Sparkles,
            Self::Beachfront => AmenityIcon::Umbrella,
            Self::Restaurant => AmenityIcon::Utensils,
            Self::Gym | Self::FitnessCenter => AmenityIcon::Dumbbell,
            Self::Breakfast => AmenityIcon::Coffee,
            Self::Parking => AmenityIcon::Car,
            Self::PetFriendly => AmenityIcon::PawPrint,
            Self::Bar | Self::MiniBar => AmenityIcon::Wine,
            Self::RoomService => AmenityIcon::ConciergeBell,
            Self::BusinessCenter => AmenityIcon::Briefcase,
            Self::AirConditioning => AmenityIcon::Snowflake,
            Self::FlatScreenTv => AmenityIcon::Tv,
            Self::CityView => AmenityIcon::Building,
            Self::Bathtub => AmenityIcon::Bath,
        }
    }

    /// Matches a display label, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|amenity| amenity.label().eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub price: u32,
    pub rating: f32,
    pub image: String,
    pub amenities: Vec<Amenity>,
    pub discount: Option<u8>,
    pub description: String,
}

impl Hotel {
    pub fn star_bucket(&self) -> u8 {
        self.rating.floor().clamp(0.0, 5.0) as u8
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub name: String,
    pub price: u32,
    pub capacity: u8,
    pub size: String,
    pub beds: String,
    pub amenities: Vec<Amenity>,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub name: String,
    pub rating: u8,
    pub date: NaiveDate,
    pub comment: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelDetail {
    pub hotel: Hotel,
    pub images: Vec<String>,
    pub overview: String,
    pub amenities: Vec<Amenity>,
    pub rooms: Vec<Room>,
    pub reviews: Vec<Review>,
}

impl HotelDetail {
    pub fn default_room_id(&self) -> Option<u32> {
        self.rooms.first().map(|room| room.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amenity_parse_ignores_case() {
        assert_eq!(Amenity::parse("  free wifi "), Some(Amenity::FreeWifi));
        assert_eq!(Amenity::parse("FLAT-SCREEN TV"), Some(Amenity::FlatScreenTv));
        assert_eq!(Amenity::parse("helipad"), None);
    }

    #[test]
    fn amenity_serializes_as_display_label() {
        let json = serde_json::to_string(&Amenity::SpaWellness).unwrap();
        assert_eq!(json, "\"Spa & Wellness\"");
    }

    #[test]
    fn pool_variants_share_an_icon() {
        assert_eq!(Amenity::Pool.icon(), Amenity::SwimmingPool.icon());
        assert_eq!(Amenity::FreeWifi.icon(), AmenityIcon::Wifi);
    }
}
