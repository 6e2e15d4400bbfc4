use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hotelease_core::{
    Amenity, ChatSender, GuestCounts, GuestDetails, ListingFilter, PaymentDetails, SortKey,
};
use hotelease_frontdesk::{FrontDesk, SimulatedLatency};
use hotelease_observability::{init_tracing, AppMetrics};
use hotelease_storage::MemoryStore;

const CLI_CLIENT: &str = "cli";

#[derive(Debug, Parser)]
#[command(name = "hotelease")]
#[command(about = "Hotel Ease front desk CLI")]
struct Cli {
    /// Skip the simulated network waits.
    #[arg(long, env = "HOTELEASE_INSTANT")]
    instant: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Filter and sort the hotel listing.
    Hotels {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        min_price: Option<u32>,
        #[arg(long)]
        max_price: Option<u32>,
        #[arg(long)]
        stars: Option<u8>,
        #[arg(long = "amenity")]
        amenities: Vec<String>,
        #[arg(long, default_value = "recommended")]
        sort: String,
    },
    Hotel {
        id: u32,
    },
    /// Price a stay without starting a booking.
    Quote {
        hotel_id: u32,
        #[arg(long)]
        room: Option<u32>,
        #[arg(long)]
        check_in: NaiveDate,
        #[arg(long)]
        check_out: NaiveDate,
    },
    /// Runs the booking wizard end to end as a signed-in guest paying at the hotel.
    Book {
        hotel_id: u32,
        #[arg(long)]
        room: Option<u32>,
        #[arg(long)]
        check_in: NaiveDate,
        #[arg(long)]
        check_out: NaiveDate,
        #[arg(long, default_value_t = 2)]
        adults: u8,
        #[arg(long, default_value_t = 0)]
        children: u8,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        special_requests: Option<String>,
    },
    Chat,
    /// Resolve an in-app path to the page it shows.
    Route {
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("hotelease_cli");
    let cli = Cli::parse();

    let latency = if cli.instant {
        SimulatedLatency::instant()
    } else {
        SimulatedLatency::default()
    };
    let desk = FrontDesk::new(Arc::new(MemoryStore::new()), latency, AppMetrics::shared());

    match cli.command {
        Command::Hotels {
            query,
            min_price,
            max_price,
            stars,
            amenities,
            sort,
        } => {
            let defaults = ListingFilter::default();
            let amenities = amenities
                .iter()
                .map(|label| {
                    Amenity::parse(label).with_context(|| format!("unknown amenity {label:?}"))
                })
                .collect::<Result<Vec<_>>>()?;
            let page = desk
                .list_hotels(ListingFilter {
                    query,
                    min_price: min_price.unwrap_or(defaults.min_price),
                    max_price: max_price.unwrap_or(defaults.max_price),
                    stars,
                    amenities,
                    sort: SortKey::parse(&sort),
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Hotel { id } => {
            let detail = desk.hotel_detail(id).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Command::Quote {
            hotel_id,
            room,
            check_in,
            check_out,
        } => {
            let booking = desk.open_booking(CLI_CLIENT, hotel_id).await?;
            if let Some(room_id) = room {
                desk.select_room(CLI_CLIENT, booking.booking_id, room_id)?;
            }
            let view = desk.select_dates(
                CLI_CLIENT,
                booking.booking_id,
                Some(check_in),
                Some(check_out),
            )?;
            desk.discard_booking(CLI_CLIENT, booking.booking_id)?;
            println!("{}", serde_json::to_string_pretty(&view.quote)?);
        }
        Command::Book {
            hotel_id,
            room,
            check_in,
            check_out,
            adults,
            children,
            first_name,
            last_name,
            email,
            phone,
            special_requests,
        } => {
            desk.log_in(CLI_CLIENT).await?;
            let booking = desk.open_booking(CLI_CLIENT, hotel_id).await?;
            let id = booking.booking_id;

            if let Some(room_id) = room {
                desk.select_room(CLI_CLIENT, id, room_id)?;
            }
            desk.select_dates(CLI_CLIENT, id, Some(check_in), Some(check_out))?;
            desk.set_guests(CLI_CLIENT, id, GuestCounts { adults, children })?;
            desk.start_booking(CLI_CLIENT, id).await?;
            desk.submit_guest_details(
                CLI_CLIENT,
                id,
                GuestDetails {
                    first_name,
                    last_name,
                    email,
                    phone,
                    special_requests: special_requests.unwrap_or_default(),
                },
            )?;
            let review = desk.submit_payment(CLI_CLIENT, id, PaymentDetails::pay_later())?;
            println!(
                "{} for {}: {}",
                review.quote.nights_label(),
                review.quote.subtotal,
                review.quote.total
            );

            let confirmation = desk.confirm(CLI_CLIENT, id, true)?;
            println!("{}", serde_json::to_string_pretty(&confirmation)?);
        }
        Command::Chat => run_chat(&desk).await?,
        Command::Route { path } => {
            let route = desk.resolve(&path).await?;
            println!("{}", serde_json::to_string_pretty(&route)?);
            if !route.is_found() {
                bail!("no page at {path}");
            }
        }
    }

    Ok(())
}

async fn run_chat(desk: &FrontDesk<MemoryStore>) -> Result<()> {
    let chat = desk.open_chat(CLI_CLIENT);
    for entry in &chat.entries {
        println!("{}\n", entry.text);
    }
    println!("Hotel Ease live chat. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }
        if message.is_empty() {
            continue;
        }

        let pending = desk.send_chat(CLI_CLIENT, chat.chat_id, message)?;
        if !pending.delivered().await {
            break;
        }

        let view = desk.chat(CLI_CLIENT, chat.chat_id)?;
        if let Some(reply) = view
            .entries
            .iter()
            .rev()
            .find(|entry| entry.sender == ChatSender::Agent)
        {
            println!("\n{}\n", reply.text);
        }
    }

    desk.close_chat(CLI_CLIENT, chat.chat_id)?;
    Ok(())
}
