use crate::infra::{read_submission, InMemoryPassportRepository};
use clap::Args;
use garment_passport::error::AppError;
use garment_passport::workflows::passport::{
    AnswerMap, OrderSnapshot, PassportReportView, PassportService, PassportSubmission, Waypoint,
    WaypointSet,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Canonical material label driving certifications and the default origin.
    #[arg(long, default_value = "Wool")]
    pub(crate) material: String,
    /// Skip printing the per-question audit trail.
    #[arg(long)]
    pub(crate) skip_audit: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PassportReportArgs {
    /// Submission JSON file (order, waypoints, answers)
    #[arg(long)]
    pub(crate) submission: PathBuf,
    /// Print the raw report as JSON instead of the formatted view
    #[arg(long)]
    pub(crate) json: bool,
    /// Append the per-question audit trail as CSV
    #[arg(long)]
    pub(crate) audit: bool,
}

pub(crate) fn run_passport_report(args: PassportReportArgs) -> Result<(), AppError> {
    let PassportReportArgs {
        submission,
        json,
        audit,
    } = args;

    let submission = read_submission(&submission)?;
    let repository = Arc::new(InMemoryPassportRepository::default());
    let service = PassportService::new(repository);

    let record = service.create(submission)?;
    let view = PassportReportView::build(&record);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render_passport_report(&view);
    }

    if audit {
        let csv = service.audit_csv(&record.id)?;
        println!("\nAudit trail");
        print!("{csv}");
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        material,
        skip_audit,
    } = args;

    println!("Garment transparency passport demo");
    let repository = Arc::new(InMemoryPassportRepository::default());
    let service = PassportService::new(repository);

    let submission = demo_submission(&material);
    let record = service.create(submission)?;
    let view = PassportReportView::build(&record);
    render_passport_report(&view);

    if skip_audit {
        return Ok(());
    }

    let csv = service.audit_csv(&record.id)?;
    println!("\nAudit trail");
    print!("{csv}");

    Ok(())
}

fn demo_submission(material: &str) -> PassportSubmission {
    let answers: AnswerMap = [
        ("p1_chemistry", "yes"),
        ("p1_rsl", "yes"),
        ("p1_trims", "partial"),
        ("p2_tier1", "atelier-prostejov"),
        ("p2_tier2", "mill-huddersfield"),
        ("p2_batch", "yes"),
        ("p3_audit", "valid"),
        ("p3_risk", "low"),
        ("p3_modern_slavery", "yes"),
        ("p4_fibre_impact", "A"),
        ("p4_longevity", "yes"),
        ("p4_eol", "yes"),
    ]
    .into_iter()
    .collect();

    PassportSubmission {
        order: OrderSnapshot {
            order_name: "#1042".to_string(),
            product_title: Some("Two-piece suit, mid-grey birdseye".to_string()),
            material: material.to_string(),
        },
        waypoints: WaypointSet {
            primary: None,
            mill: Some(Waypoint::new(53.6458, -1.7850, "Huddersfield", "UK")),
            production: Some(Waypoint::new(49.4719, 17.1128, "Prostějov", "Czechia")),
            warehouse: Some(Waypoint::new(-33.8688, 151.2093, "Sydney", "Australia")),
        },
        answers,
    }
}

pub(crate) fn render_passport_report(view: &PassportReportView) {
    println!(
        "Passport {} for order {} ({})",
        view.passport_id, view.order_name, view.material
    );
    if let Some(title) = &view.product_title {
        println!("Product: {title}");
    }
    println!("Issued: {}", view.issued_on);
    println!(
        "Overall score: {}/{} points",
        view.total_score, view.max_total
    );

    for pillar in &view.pillars {
        println!("\n{} — {}/{}", pillar.title, pillar.score, pillar.max_score);
        for question in &pillar.questions {
            match &question.answer {
                Some(answer) => println!(
                    "  - {}: {} ({} pts)",
                    question.label, answer, question.points
                ),
                None => println!("  - {}: not answered", question.label),
            }
        }
    }

    match &view.emissions {
        Some(emissions) => {
            println!("\nTransport footprint");
            for leg in &emissions.legs {
                println!(
                    "- {}: {} -> {} | {} km by {} | {} kg CO2e",
                    leg.label,
                    leg.from,
                    leg.to,
                    leg.distance_km,
                    leg.mode.label(),
                    leg.emissions_kg
                );
            }
            println!(
                "Total: {} km, {} kg CO2e (transport score {}/5)",
                emissions.total_distance_km,
                emissions.total_emissions_kg,
                emissions.transport_score
            );
        }
        None => println!(
            "\nTransport footprint: awaiting waypoints ({})",
            view.emissions_state
        ),
    }
}
