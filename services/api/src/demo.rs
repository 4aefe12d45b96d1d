use crate::infra::{attachment_from_path, build_locator};
use clap::Args;
use rescue_locator::config::AppConfig;
use rescue_locator::error::AppError;
use rescue_locator::reports::{AbuseReportSubmission, ReportIntakeService, ReportReceipt};
use rescue_locator::shelters::{
    filter_by_service, plot_ranking, rank, Coordinate, LocatorError, ObserverQuery, RankedShelter, ServiceFilter,
    ShelterDirectory, TracingMapView,
};
use rescue_locator::telemetry;
use std::path::PathBuf;

/// Downtown office used as the demo observer.
const DEMO_OBSERVER: (f64, f64) = (40.7128, -74.0060);

#[derive(Args, Debug, Default)]
pub(crate) struct ObserverArgs {
    /// Observer latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "longitude")]
    pub(crate) latitude: Option<f64>,
    /// Observer longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true, requires = "latitude")]
    pub(crate) longitude: Option<f64>,
    /// Address, ZIP code, or "lat, lng" text to resolve instead of coordinates
    #[arg(long)]
    pub(crate) address: Option<String>,
}

impl ObserverArgs {
    fn query(&self) -> ObserverQuery {
        ObserverQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    #[command(flatten)]
    pub(crate) observer: ObserverArgs,
    /// Service to filter by (e.g. emergency, adoption, veterinary, rescue). Defaults to all.
    #[arg(long)]
    pub(crate) service: Option<String>,
    /// Show at most this many shelters
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ConnectArgs {
    #[command(flatten)]
    pub(crate) observer: ObserverArgs,
    /// Service the shelter must offer. Defaults to any.
    #[arg(long)]
    pub(crate) service: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// What is happening to the animal
    #[arg(long)]
    pub(crate) description: String,
    #[command(flatten)]
    pub(crate) observer: ObserverArgs,
    /// Reporter name (optional)
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Reporter email for follow-up (optional)
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Photo or video to attach; repeat for several files
    #[arg(long = "attachment")]
    pub(crate) attachments: Vec<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Service filter applied to the demo ranking
    #[arg(long)]
    pub(crate) service: Option<String>,
}

pub(crate) fn run_nearby(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let locator = build_locator(&config.directory)?;
    let filter = ServiceFilter::from(args.service.as_deref());

    let found = locator.nearby(&args.observer.query(), filter, args.limit)?;
    println!(
        "Shelters near {} (service: {})",
        found.observer, found.filter
    );
    render_ranking(&found.results);
    Ok(())
}

pub(crate) fn run_connect(args: ConnectArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let locator = build_locator(&config.directory)?;
    let filter = ServiceFilter::from(args.service.as_deref());

    match locator.connect(&args.observer.query(), &filter) {
        Ok(connected) => {
            println!("Nearest shelter offering {filter}");
            render_shelter(&connected);
            Ok(())
        }
        Err(LocatorError::NoEligibleShelter) => {
            println!("{}", LocatorError::EMERGENCY_FALLBACK);
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let locator = build_locator(&config.directory)?;
    let service = ReportIntakeService::new(locator);

    let attachments = args
        .attachments
        .iter()
        .map(|path| attachment_from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let submission = AbuseReportSubmission {
        description: args.description,
        address: args.observer.address,
        latitude: args.observer.latitude,
        longitude: args.observer.longitude,
        reporter_name: args.name,
        reporter_email: args.email,
        attachments,
    };

    let receipt = service.submit(submission)?;
    render_receipt(&receipt);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let directory = ShelterDirectory::sample();
    let observer = Coordinate::new(DEMO_OBSERVER.0, DEMO_OBSERVER.1)?;
    let filter = ServiceFilter::from(args.service.as_deref());
    let ranked = filter_by_service(rank(observer, directory.records()), &filter);

    println!("Rescue locator demo");
    println!("Observer: {observer} (service: {filter})");
    render_ranking(&ranked);

    let mut map = TracingMapView;
    plot_ranking(&mut map, observer, &ranked);
    Ok(())
}

fn render_ranking(ranked: &[RankedShelter]) {
    if ranked.is_empty() {
        println!("No shelters match this search.");
        return;
    }
    for (position, entry) in ranked.iter().enumerate() {
        println!(
            "{}. {} - {} | rating {:.1} | {}",
            position + 1,
            entry.shelter.name,
            entry.distance_label(),
            entry.shelter.rating,
            entry.shelter.services.join(", ")
        );
    }
}

fn render_shelter(entry: &RankedShelter) {
    let shelter = &entry.shelter;
    println!("- {} ({})", shelter.name, entry.distance_label());
    println!("  {}", shelter.address);
    println!("  {} | {}", shelter.phone, shelter.email);
    println!("  Hours: {}", shelter.hours);
    if let Some(website) = &shelter.website {
        println!("  {website}");
    }
}

fn render_receipt(receipt: &ReportReceipt) {
    let shelter = &receipt.connected_shelter;
    println!("Report {} received", receipt.report_id.0);
    println!(
        "Connected with {} ({:.1} mi away)",
        shelter.name, shelter.distance_miles
    );
    println!("  {} | {}", shelter.phone, shelter.email);

    if !receipt.accepted_attachments.is_empty() {
        println!("Attachments:");
        for attachment in &receipt.accepted_attachments {
            println!("  - {} ({})", attachment.file_name, attachment.content_type);
        }
    }
    for dropped in &receipt.dropped_attachments {
        println!("  skipped {}: {}", dropped.file_name, dropped.reason.label());
    }
}
