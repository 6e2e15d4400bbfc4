//! Fixed copy for the landing, about and contact pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chat::BOOKING_PHONE;
use crate::models::Hotel;
use crate::navigation::deal_path;

pub const FEATURED_HOTEL_COUNT: usize = 3;
pub const SUPPORT_EMAIL: &str = "info@hotelease.com";
pub const GROUPS_EMAIL: &str = "groups@hotelease.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub valid_until: NaiveDate,
    pub image: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub rating: u8,
    pub comment: String,
    pub hotel: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingPage {
    pub featured: Vec<Hotel>,
    pub deals: Vec<Deal>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitledText {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutPage {
    pub founded: i32,
    pub founding_team_size: u32,
    pub story: Vec<String>,
    pub mission: String,
    pub values: Vec<TitledText>,
    pub reasons: Vec<TitledText>,
    pub team: Vec<TeamMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Phone,
    Email,
    Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannel {
    pub kind: ChannelKind,
    pub value: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPage {
    pub channels: Vec<ContactChannel>,
    pub faq: Vec<FaqEntry>,
}

fn titled(title: &str, text: &str) -> TitledText {
    TitledText {
        title: title.to_string(),
        text: text.to_string(),
    }
}

fn deal(slug: &str, title: &str, description: &str, valid_until: (i32, u32, u32), image: &str) -> Deal {
    let (year, month, day) = valid_until;
    Deal {
        slug: slug.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        valid_until: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        image: image.to_string(),
        link: deal_path(slug),
    }
}

pub fn deals() -> Vec<Deal> {
    vec![
        deal(
            "weekend-getaway",
            "Weekend Getaway",
            "Enjoy 20% off on weekend stays at selected luxury hotels.",
            (2023, 8, 31),
            "/images/deal-1.png",
        ),
        deal(
            "family-package",
            "Family Package",
            "Kids stay free when booking a family room for 3+ nights.",
            (2023, 9, 15),
            "/images/deal-2.png",
        ),
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    let testimonial = |name: &str, rating: u8, comment: &str, hotel: &str, avatar: u8| Testimonial {
        name: name.to_string(),
        rating,
        comment: comment.to_string(),
        hotel: hotel.to_string(),
        avatar: format!("/images/avatar-{avatar}.png"),
    };
    vec![
        testimonial(
            "Sarah Johnson",
            5,
            "The hotel was amazing! Great service and beautiful rooms. Will definitely come back.",
            "Grand Plaza Hotel",
            1,
        ),
        testimonial(
            "Michael Brown",
            4,
            "Excellent location and friendly staff. The breakfast was delicious and had many options.",
            "Seaside Resort",
            2,
        ),
        testimonial(
            "Emily Davis",
            5,
            "One of the best hotel experiences I've had. The views were breathtaking and the room was spotless.",
            "Mountain View Lodge",
            3,
        ),
    ]
}

/// Featured hotels are the head of the catalog.
pub fn landing_page(catalog: &[Hotel]) -> LandingPage {
    LandingPage {
        featured: catalog.iter().take(FEATURED_HOTEL_COUNT).cloned().collect(),
        deals: deals(),
        testimonials: testimonials(),
    }
}

pub fn about_page() -> AboutPage {
    let member = |name: &str, role: &str, bio: &str, avatar: u8| TeamMember {
        name: name.to_string(),
        role: role.to_string(),
        bio: bio.to_string(),
        avatar: format!("/images/avatar-{avatar}.png"),
    };

    AboutPage {
        founded: 2015,
        founding_team_size: 5,
        story: vec![
            "Founded in 2015, Hotel Ease began with a simple mission: to make hotel booking simple, transparent, and enjoyable. What started as a small startup with just 5 team members has grown into a trusted platform serving millions of travelers worldwide.".to_string(),
            "Our founders, experienced travelers themselves, were frustrated with the complexity and hidden fees of existing booking platforms. They set out to create a solution that puts the customer first, offering clear pricing, honest reviews, and exceptional customer service.".to_string(),
            "Today, Hotel Ease partners with thousands of hotels across the globe, from boutique establishments to luxury resorts, all while maintaining our core values of transparency, quality, and customer satisfaction.".to_string(),
        ],
        mission: "To provide travelers with the easiest way to find and book their perfect accommodation, while offering exceptional value and unparalleled customer service.".to_string(),
        values: vec![
            titled("Customer First", "Every decision we make puts our customers' needs and satisfaction at the forefront."),
            titled("Trust & Transparency", "We believe in clear pricing, honest reviews, and open communication."),
            titled("Quality Experience", "We curate high-quality accommodations and ensure a seamless booking experience."),
        ],
        reasons: vec![
            titled("Global Selection", "Access to over 500,000 properties worldwide, from budget-friendly options to luxury resorts."),
            titled("Best Price Guarantee", "We match or beat any comparable price you find elsewhere for the same accommodation."),
            titled("24/7 Customer Support", "Our dedicated support team is available around the clock to assist with any questions or issues."),
            titled("Verified Reviews", "Authentic reviews from real guests help you make informed decisions about your stay."),
        ],
        team: vec![
            member("Sarah Johnson", "CEO & Co-Founder", "Former travel industry executive with 15+ years of experience in hospitality management.", 1),
            member("Michael Brown", "CTO & Co-Founder", "Tech innovator with a background in developing scalable platforms for the travel industry.", 2),
            member("Emily Davis", "COO", "Operations expert who ensures smooth customer experiences and efficient business processes.", 3),
        ],
    }
}

pub fn contact_page() -> ContactPage {
    let channel = |kind: ChannelKind, value: &str, note: &str| ContactChannel {
        kind,
        value: value.to_string(),
        note: note.to_string(),
    };
    let faq = |question: &str, answer: String| FaqEntry {
        question: question.to_string(),
        answer,
    };

    ContactPage {
        channels: vec![
            channel(ChannelKind::Phone, BOOKING_PHONE, "Mon-Fri: 9AM - 8PM"),
            channel(ChannelKind::Email, SUPPORT_EMAIL, "We'll respond within 24 hours"),
            channel(ChannelKind::Address, "123 Hotel Street", "Cityville, State 12345, Country"),
        ],
        faq: vec![
            faq(
                "How do I make a reservation?",
                format!("You can make a reservation through our website by searching for your desired location and dates, selecting a hotel, and following the booking process. Alternatively, you can call our reservation line at {BOOKING_PHONE}."),
            ),
            faq(
                "What is the cancellation policy?",
                "Most of our hotels offer free cancellation up to 24-48 hours before check-in. The specific policy for each hotel is displayed during the booking process and in your confirmation email.".to_string(),
            ),
            faq(
                "Do you offer special rates for groups?",
                format!("Yes, we offer special rates for group bookings of 10 rooms or more. Please contact our group reservations department at {GROUPS_EMAIL} for more information."),
            ),
            faq(
                "How does the loyalty program work?",
                "Our loyalty program allows you to earn points for each stay, which can be redeemed for free nights, room upgrades, and other benefits. Sign up for an account to start earning points immediately.".to_string(),
            ),
        ],
    }
}
