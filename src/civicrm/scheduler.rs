use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use actix_rt::time::{interval_at, Instant};
use futures::future::{self, Either};
use futures::pin_mut;
use log::{error, info};
use tokio::time::MissedTickBehavior;

/// Runs a job on a fixed interval until told to stop.
pub struct JobScheduler {
    period: Duration
}

impl JobScheduler {
    pub fn new(period: Duration) -> JobScheduler {
        JobScheduler { period }
    }

    /// Fires `job` once per period, starting one period from now, until
    /// `shutdown` resolves.
    ///
    /// Firings never overlap and a failed firing doesn't stop the schedule.
    /// Periods missed while a firing runs long are not made up.
    /// Shutdown is checked first on every poll and drops any in-flight firing.
    pub async fn start<J, F, T, E, S>(&self, mut job: J, shutdown: S)
    where
        J: FnMut() -> F,
        F: Future<Output = Result<T, E>>,
        E: Display,
        S: Future<Output = ()>,
    {
        info!("Starting job every {} seconds", self.period.as_secs());
        let mut ticks = interval_at(Instant::now() + self.period, self.period);
        // A late firing pushes the schedule back instead of catching up.
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        pin_mut!(shutdown);

        loop {
            let firing = async {
                ticks.tick().await;
                job().await
            };
            pin_mut!(firing);

            match future::select(shutdown.as_mut(), firing).await {
                Either::Left(_) => {
                    info!("Shutdown requested, stopping job schedule");
                    return;
                },
                Either::Right((Ok(_), _)) => {},
                Either::Right((Err(err), _)) => {
                    error!("Scheduled job failed: {}", err);
                },
            }
        }
    }
}

/// Resolves once the process is asked to terminate (SIGTERM or Ctrl-C).
pub async fn termination_signal() {
    let ctrl_c = async {
        if let Err(err) = actix_rt::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", err);
            future::pending::<()>().await;
        }
        info!("Received Ctrl-C");
    };

    #[cfg(unix)]
    let terminate = async {
        use actix_rt::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal");
            },
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    pin_mut!(ctrl_c, terminate);
    future::select(ctrl_c, terminate).await;
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    use actix_rt::time::Instant;

    use futures::channel::oneshot;
    use futures::future;

    use super::JobScheduler;

    #[actix_rt::test]
    async fn test_failed_firings_do_not_stop_schedule() {
        let scheduler = JobScheduler::new(Duration::from_millis(10));
        let firings = Cell::new(0);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let mut stop_tx = Some(stop_tx);

        scheduler
            .start(
                || {
                    firings.set(firings.get() + 1);
                    if firings.get() == 3 {
                        if let Some(tx) = stop_tx.take() {
                            tx.send(()).unwrap();
                        }
                    }
                    future::ready(Err::<(), _>("upstream unavailable"))
                },
                async {
                    stop_rx.await.ok();
                }
            )
            .await;

        assert_eq!(firings.get(), 3);
    }

    #[actix_rt::test]
    async fn test_first_firing_waits_one_period() {
        let scheduler = JobScheduler::new(Duration::from_secs(3600));
        let firings = Cell::new(0);

        scheduler
            .start(
                || {
                    firings.set(firings.get() + 1);
                    future::ready(Ok::<(), String>(()))
                },
                actix_rt::time::sleep(Duration::from_millis(50))
            )
            .await;

        assert_eq!(firings.get(), 0);
    }

    #[actix_rt::test]
    async fn test_shutdown_drops_in_flight_firing() {
        let scheduler = JobScheduler::new(Duration::from_millis(10));
        let completed = Cell::new(false);
        let completed_ref = &completed;

        scheduler
            .start(
                move || async move {
                    let completed = completed_ref;
                    actix_rt::time::sleep(Duration::from_secs(3600)).await;
                    completed.set(true);
                    Ok::<(), String>(())
                },
                actix_rt::time::sleep(Duration::from_millis(50))
            )
            .await;

        assert!(!completed.get());
    }

    #[actix_rt::test]
    async fn test_slow_firing_does_not_burst_missed_periods() {
        let period = Duration::from_millis(20);
        let scheduler = JobScheduler::new(period);
        let fired_at = RefCell::new(Vec::new());
        let fired_ref = &fired_at;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let stop_tx = RefCell::new(Some(stop_tx));
        let stop_ref = &stop_tx;

        scheduler
            .start(
                move || async move {
                    let count = {
                        let mut fired = fired_ref.borrow_mut();
                        fired.push(Instant::now());
                        fired.len()
                    };
                    if count == 1 {
                        actix_rt::time::sleep(Duration::from_millis(90)).await;
                    }
                    if count == 3 {
                        if let Some(tx) = stop_ref.borrow_mut().take() {
                            tx.send(()).unwrap();
                        }
                    }
                    Ok::<(), String>(())
                },
                async {
                    stop_rx.await.ok();
                }
            )
            .await;

        let fired = fired_at.borrow();
        assert_eq!(fired.len(), 3);
        assert!(fired[2] - fired[1] >= Duration::from_millis(15));
    }
}
