use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use chrono::Local;
use log::{error, info};

use crate::errors::RoundelError;

use super::StatusOutput;
use super::producer::StatusProducer;

/// Marker sent by the board when the user presses the refresh button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshTrigger;

/// Run the status fetch loop until the board goes away.
///
/// The collector owns all fetching: it fetches once immediately (the
/// page-load trigger of the original board), then again for every
/// [`RefreshTrigger`] received and for every `refresh_period` that elapses
/// without one. Because every fetch runs on this one thread, overlapping
/// refreshes cannot race; triggers that arrive while a fetch is in flight
/// coalesce into at most one follow-up fetch.
///
/// Fetch failures never end the loop: they are logged and forwarded to the
/// board as a [`StatusOutput::Failure`] carrying the single generic error
/// message the board renders in place of the card list.
pub fn collect_status(
    mut producer: impl StatusProducer,
    status_sender: Sender<StatusOutput>,
    triggers: Receiver<RefreshTrigger>,
    refresh_period: Duration,
) -> Result<(), RoundelError> {
    if let Err(e) = producer.start() {
        error!("status producer failed to start: {}", e);
        let _ = status_sender.send(StatusOutput::Failure {
            message: format!("Unable to start the status client: {}", e),
        });
        return Err(e);
    }
    info!(
        "status collector started, auto-refresh every {}s",
        refresh_period.as_secs()
    );

    loop {
        let output = match producer.fetch() {
            Ok(lines) => StatusOutput::Snapshot {
                lines,
                fetched_at: Local::now(),
            },
            Err(e) => {
                error!("line status fetch failed: {}", e);
                StatusOutput::Failure {
                    message: format!("Unable to load line status: {}", e),
                }
            }
        };

        if status_sender.send(output).is_err() {
            info!("status collector stopping, board disconnected");
            return Ok(());
        }

        match triggers.recv_timeout(refresh_period) {
            Ok(RefreshTrigger) => {
                // A burst of clicks coalesces into a single fetch.
                while triggers.try_recv().is_ok() {}
                info!("manual refresh requested");
            }
            Err(RecvTimeoutError::Timeout) => {
                info!("auto-refreshing line status");
            }
            Err(RecvTimeoutError::Disconnected) => {
                info!("status collector stopping, board disconnected");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::producer::MockStatusProducer;
    use crate::status::{Line, LineStatus};
    use std::sync::mpsc;
    use std::thread;

    // Long enough that the timer never fires inside a test; refreshes are
    // driven by triggers and disconnects only.
    const TEST_PERIOD: Duration = Duration::from_secs(600);
    const RECV_WAIT: Duration = Duration::from_secs(5);

    fn line(name: &str, status: &str) -> Line {
        Line {
            id: name.to_lowercase(),
            name: name.to_string(),
            mode_name: "tube".to_string(),
            line_statuses: vec![LineStatus {
                status_severity: 10,
                status_severity_description: status.to_string(),
                reason: None,
            }],
        }
    }

    #[test]
    fn test_initial_fetch_needs_no_trigger() {
        let (status_tx, status_rx) = mpsc::channel();
        let (trigger_tx, trigger_rx) = mpsc::channel::<RefreshTrigger>();
        let producer =
            MockStatusProducer::from_snapshots(vec![vec![line("Central", "Good Service")]]);

        let handle =
            thread::spawn(move || collect_status(producer, status_tx, trigger_rx, TEST_PERIOD));

        let output = status_rx.recv_timeout(RECV_WAIT).unwrap();
        match output {
            StatusOutput::Snapshot { lines, .. } => {
                assert_eq!(lines.len(), 1);
                assert_eq!(lines[0].name, "Central");
            }
            StatusOutput::Failure { message } => panic!("unexpected failure: {}", message),
        }

        drop(trigger_tx);
        assert!(handle.join().unwrap().is_ok());
    }

    #[test]
    fn test_fetch_error_becomes_failure_output() {
        let (status_tx, status_rx) = mpsc::channel();
        let (trigger_tx, trigger_rx) = mpsc::channel::<RefreshTrigger>();
        let producer = MockStatusProducer::from_outcomes(vec![Err(
            RoundelError::StatusHttpError { code: 500 },
        )]);

        let handle =
            thread::spawn(move || collect_status(producer, status_tx, trigger_rx, TEST_PERIOD));

        let output = status_rx.recv_timeout(RECV_WAIT).unwrap();
        match output {
            StatusOutput::Failure { message } => {
                assert!(message.contains("500"), "message was: {}", message);
            }
            StatusOutput::Snapshot { .. } => panic!("expected a failure output"),
        }

        drop(trigger_tx);
        assert!(handle.join().unwrap().is_ok());
    }

    #[test]
    fn test_trigger_requests_another_fetch() {
        let (status_tx, status_rx) = mpsc::channel();
        let (trigger_tx, trigger_rx) = mpsc::channel();
        let producer = MockStatusProducer::from_snapshots(vec![
            vec![line("Central", "Good Service")],
            vec![line("Central", "Minor Delays")],
        ]);

        let handle =
            thread::spawn(move || collect_status(producer, status_tx, trigger_rx, TEST_PERIOD));

        status_rx.recv_timeout(RECV_WAIT).unwrap();
        trigger_tx.send(RefreshTrigger).unwrap();

        let second = status_rx.recv_timeout(RECV_WAIT).unwrap();
        match second {
            StatusOutput::Snapshot { lines, .. } => {
                assert_eq!(lines[0].severity_description(), "Minor Delays");
            }
            StatusOutput::Failure { message } => panic!("unexpected failure: {}", message),
        }

        drop(trigger_tx);
        assert!(handle.join().unwrap().is_ok());
    }

    #[test]
    fn test_queued_trigger_burst_coalesces_into_one_fetch() {
        let (status_tx, status_rx) = mpsc::channel();
        let (trigger_tx, trigger_rx) = mpsc::channel();
        // Only two scripted snapshots: a third fetch would surface as a
        // Failure output, which the assertions below would catch.
        let producer = MockStatusProducer::from_snapshots(vec![
            vec![line("Victoria", "Good Service")],
            vec![line("Victoria", "Good Service")],
        ]);

        // Queue the burst before the collector starts draining triggers.
        for _ in 0..3 {
            trigger_tx.send(RefreshTrigger).unwrap();
        }

        let handle =
            thread::spawn(move || collect_status(producer, status_tx, trigger_rx, TEST_PERIOD));

        for _ in 0..2 {
            let output = status_rx.recv_timeout(RECV_WAIT).unwrap();
            assert!(matches!(output, StatusOutput::Snapshot { .. }));
        }

        // The burst is spent; dropping the trigger side ends the loop
        // without a third fetch.
        drop(trigger_tx);
        assert!(handle.join().unwrap().is_ok());
        assert!(status_rx.recv().is_err());
    }

    #[test]
    fn test_start_failure_is_reported_and_fatal() {
        struct NoStart;
        impl StatusProducer for NoStart {
            fn start(&mut self) -> Result<(), RoundelError> {
                Err(RoundelError::StatusProducerError {
                    description: "no client".to_string(),
                })
            }
            fn fetch(&mut self) -> Result<Vec<Line>, RoundelError> {
                unreachable!("fetch must not run when start fails")
            }
        }

        let (status_tx, status_rx) = mpsc::channel();
        let (_trigger_tx, trigger_rx) = mpsc::channel::<RefreshTrigger>();

        let result = collect_status(NoStart, status_tx, trigger_rx, TEST_PERIOD);
        assert!(result.is_err());
        assert!(matches!(
            status_rx.recv_timeout(RECV_WAIT).unwrap(),
            StatusOutput::Failure { .. }
        ));
    }
}
