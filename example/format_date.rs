use clap::Parser;
use datepicker_native::{DateFormatter, DateValue, LocalZone, local_to_utc_date, utc_to_local_date};
use std::process;

/// Format dates with token templates and show their date-control values
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Date text to format (now when omitted)
    #[arg(value_name = "DATE")]
    date: Option<String>,

    /// Template, e.g. "dw, MMMM dd yyyy hh:mm t"
    #[arg(short, long, default_value = "MM/dd/yyyy")]
    template: String,

    /// Local offset from UTC in minutes (system zone when omitted)
    #[arg(short, long, allow_hyphen_values = true)]
    offset: Option<i32>,

    /// Replace `DW` with the long weekday name
    #[arg(long)]
    long_weekday: bool,

    /// Treat DATE as a date-control value (YYYY-MM-DD, UTC midnight)
    #[arg(short, long)]
    control: bool,
}

fn main() {
    let args = Args::parse();

    let zone = match args.offset {
        Some(minutes) => match LocalZone::from_offset_minutes(minutes) {
            Some(zone) => zone,
            None => {
                eprintln!("Offset out of range: {minutes} minutes");
                process::exit(1);
            }
        },
        None => LocalZone::System,
    };

    let date = match args.date.as_deref() {
        None => zone.now(),
        Some(text) => {
            let parsed = if args.control {
                utc_to_local_date(text, &zone)
            } else {
                DateValue::parse(text, &zone)
            };
            match parsed {
                Ok(date) => date,
                Err(err) => {
                    eprintln!("Error reading date '{text}': {err}");
                    process::exit(1);
                }
            }
        }
    };

    let formatter = DateFormatter::new()
        .with_template(args.template)
        .with_zone(zone)
        .with_long_weekday_token(args.long_weekday);

    println!("Formatted:     {}", formatter.format(date));
    println!("Local:         {date}");
    println!("Control value: {}", local_to_utc_date(&date));
    println!("TZ offset:     {} min", date.timezone_offset());
}
