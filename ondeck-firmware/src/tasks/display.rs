//! Display task
//!
//! Applies each inbound message to the six displays, one at a time.

use defmt::*;

use ondeck_core::dispatch::DispatchReport;
use ondeck_core::station::{HandleOutcome, Station};

use crate::channels::INBOUND;
use crate::displays::GateDisplays;

/// Display task - decodes messages and drives the displays
#[embassy_executor::task]
pub async fn display_task(mut station: Station<GateDisplays>) {
    info!("Display task started, listening on {}", station.topic());

    loop {
        let message = INBOUND.receive().await;

        match station.handle_message(&message) {
            HandleOutcome::Ignored => {
                debug!("Ignoring message on topic {}", message.topic());
            }
            HandleOutcome::Broadcast(report) => {
                log_failures(&report);
            }
            HandleOutcome::Updated { report, lit } => {
                log_failures(&report);
                trace!("{} displays lit", lit);
            }
        }

        info!(
            "New message on topic {}: {}",
            message.topic(),
            message.payload()
        );
    }
}

fn log_failures(report: &DispatchReport) {
    for (index, error) in report.failures() {
        warn!("Display {} write failed: {}", index.number(), error);
    }
}
