//! Print today's focus report for a fixed set of signals

use focus_flux::encoder::FocusReportEncoder;
use focus_flux::providers::FixedProvider;
use focus_flux::{FocusDetectionEngine, SignalKind};

fn main() {
    let engine = FocusDetectionEngine::with_placeholder_mindful(
        Box::new(FixedProvider::new(SignalKind::Still, 3.5 * 3600.0)),
        Box::new(FixedProvider::new(SignalKind::Interrupt, 20.0 * 60.0)),
    );

    let today = chrono::Local::now().date_naive();
    println!("Today's focus: {}", engine.focus_minutes_on(today));

    match engine.report_json_on(today, &FocusReportEncoder::new()) {
        Ok(report) => print!("{report}"),
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
