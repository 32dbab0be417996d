use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use cinema_booking::{
    config::Config,
    error::BookingError,
    models::SeatStatus,
    receipt::Receipt,
    AppContext, BookingSession,
};

#[derive(Parser, Debug)]
#[command(name = "cinema-booking", about = "Cinema seat booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seat map for a showtime
    Show { showtime_id: u32 },
    /// Book seats for a showtime and print the payment link
    Book {
        showtime_id: u32,
        /// Seat ids, e.g. A1 B3
        #[arg(required = true)]
        seats: Vec<String>,
    },
    /// Print the confirmation receipt after payment
    Receipt {
        /// Booking id from the payment return URL; falls back to the
        /// locally cached snapshot when omitted
        #[arg(long)]
        booking_id: Option<Uuid>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ctx = AppContext::new(config);
    let cli = Cli::parse();

    match cli.command {
        Command::Show { showtime_id } => show(&ctx, showtime_id).await,
        Command::Book { showtime_id, seats } => book(&ctx, showtime_id, seats).await,
        Command::Receipt { booking_id } => receipt(&ctx, booking_id).await,
    }
}

async fn show(ctx: &AppContext, showtime_id: u32) -> anyhow::Result<()> {
    let session = BookingSession::load(ctx.api.clone(), showtime_id).await?;
    print_header(&session);
    print_seat_map(&session);
    Ok(())
}

async fn book(ctx: &AppContext, showtime_id: u32, seats: Vec<String>) -> anyhow::Result<()> {
    let mut session = BookingSession::load(ctx.api.clone(), showtime_id).await?;
    print_header(&session);

    let mut requested: Vec<String> = seats.iter().map(|s| s.to_uppercase()).collect();
    requested.dedup();
    for seat_id in &requested {
        match session.toggle(seat_id)? {
            SeatStatus::Selected => {}
            SeatStatus::Booked => bail!("seat {seat_id} is already booked"),
            SeatStatus::Available => bail!("seat {seat_id} was toggled twice"),
        }
    }

    println!(
        "Selected {}: total {:.2}",
        session.selected_seats().join(", "),
        session.total_price()
    );

    match session.checkout(&ctx.receipts).await {
        Ok(redirect) => {
            info!("booking created");
            println!("Complete your payment at:\n{}", redirect.url);
            Ok(())
        }
        Err(BookingError::SeatConflict(message)) => {
            // Cheapest correct remedy: re-fetch occupancy and make the user
            // pick again; the old selection is known stale.
            session.refresh().await?;
            print_seat_map(&session);
            bail!("seat conflict: {message} (seat map above is freshly reloaded)");
        }
        Err(BookingError::AuthRequired) => {
            bail!("you need to log in first; your selection is kept for this session")
        }
        Err(e) => Err(e.into()),
    }
}

async fn receipt(ctx: &AppContext, booking_id: Option<Uuid>) -> anyhow::Result<()> {
    let receipt = Receipt::resolve(&ctx.api, &ctx.receipts, booking_id).await;
    println!("Movie:  {}", receipt.movie);
    println!("Studio: {}", receipt.studio);
    println!("Seats:  {}", receipt.seats_display());
    if let Some(start) = receipt.start_time {
        println!("Time:   {start}");
    }
    if let Some(total) = receipt.total_amount {
        println!("Total:  {total:.2}");
    }
    Ok(())
}

fn print_header(session: &BookingSession) {
    let showtime = session.showtime();
    println!(
        "{} — {} — {} — price {:.2}",
        showtime.movie.title, showtime.studio.name, showtime.start_time, showtime.price
    );
}

fn print_seat_map(session: &BookingSession) {
    let map = session.seat_map();
    for row in map.rows() {
        let line: Vec<String> = map
            .seats()
            .iter()
            .filter(|s| s.row == row)
            .map(|s| match s.status {
                SeatStatus::Booked => format!("[ {:>2} ]", "XX"),
                SeatStatus::Selected => format!("[*{:>2}*]", s.number),
                SeatStatus::Available => format!("[ {:>2} ]", s.number),
            })
            .collect();
        println!("{row}  {}", line.join(" "));
    }
}
