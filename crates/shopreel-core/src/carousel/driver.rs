use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info};

use super::seamless::{Frame, SeamlessCarousel};
use super::timer::{QueueDriven, TimerQueue};

/// Control messages from the UI event layer
#[derive(Debug, Clone)]
pub enum CarouselCommand<T> {
    /// Pointer entered the carousel
    Pause,
    /// Pointer left the carousel
    Resume,
    /// Manual "next"
    Advance,
    /// Manual "previous"
    Retreat,
    /// A refetch resolved with a new item list
    ReplaceItems(Vec<T>),
}

/// Runs a carousel on the tokio clock inside a single task
///
/// The carousel's [`TimerQueue`] keeps virtual time; the driver maps it onto
/// `tokio::time` so the carousel itself stays free of async code. Other
/// tasks only talk to it through the command channel and the frame watch.
pub struct CarouselDriver<T> {
    carousel: SeamlessCarousel<T, TimerQueue>,
    frame_tx: Option<watch::Sender<Frame>>,
}

impl<T: Clone + Send + 'static> CarouselDriver<T> {
    pub fn new(carousel: SeamlessCarousel<T, TimerQueue>) -> Self {
        Self {
            carousel,
            frame_tx: None,
        }
    }

    /// Set the channel the renderer reads frames from
    pub fn with_frame_sender(mut self, tx: watch::Sender<Frame>) -> Self {
        self.frame_tx = Some(tx);
        self
    }

    fn publish(&self) {
        if let Some(ref tx) = self.frame_tx {
            tx.send_replace(self.carousel.frame());
        }
    }

    /// Process commands and timers until shutdown, then tear the carousel down and hand it back
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<CarouselCommand<T>>,
        mut shutdown: watch::Receiver<bool>,
    ) -> SeamlessCarousel<T, TimerQueue> {
        let origin = Instant::now();
        let virtual_origin = self.carousel.queue().now();
        let mut commands_open = true;

        info!(
            items = self.carousel.items().len(),
            state = ?self.carousel.state(),
            "Carousel driver started"
        );
        self.publish();

        loop {
            let deadline = self
                .carousel
                .queue()
                .next_deadline()
                .map(|at| origin + at.saturating_sub(virtual_origin));

            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Carousel driver received shutdown signal");
                        break;
                    }
                }

                command = commands.recv(), if commands_open => {
                    match command {
                        Some(command) => {
                            self.sync_clock(origin, virtual_origin);
                            self.apply(command);
                            self.publish();
                        }
                        None => {
                            debug!("Carousel command channel closed");
                            commands_open = false;
                        }
                    }
                }

                _ = tokio::time::sleep_until(deadline.unwrap_or(origin)), if deadline.is_some() => {
                    if self.sync_clock(origin, virtual_origin) > 0 {
                        self.publish();
                    }
                }
            }
        }

        self.carousel.teardown();
        info!("Carousel driver stopped");
        self.carousel
    }

    /// Fire every carousel timer that is due by now
    fn sync_clock(&mut self, origin: Instant, virtual_origin: Duration) -> usize {
        let now = virtual_origin + origin.elapsed();
        self.carousel.run_until(now)
    }

    fn apply(&mut self, command: CarouselCommand<T>) {
        debug!(command = command_name(&command), "Carousel command");
        match command {
            CarouselCommand::Pause => self.carousel.pause(),
            CarouselCommand::Resume => self.carousel.resume(),
            CarouselCommand::Advance => self.carousel.advance(),
            CarouselCommand::Retreat => self.carousel.retreat(),
            CarouselCommand::ReplaceItems(items) => self.carousel.replace_items(items),
        }
    }
}

fn command_name<T>(command: &CarouselCommand<T>) -> &'static str {
    match command {
        CarouselCommand::Pause => "pause",
        CarouselCommand::Resume => "resume",
        CarouselCommand::Advance => "advance",
        CarouselCommand::Retreat => "retreat",
        CarouselCommand::ReplaceItems(_) => "replace_items",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselState;
    use crate::config::CarouselConfig;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    struct Harness {
        commands: mpsc::UnboundedSender<CarouselCommand<char>>,
        frames: watch::Receiver<Frame>,
        shutdown: watch::Sender<bool>,
        handle: tokio::task::JoinHandle<SeamlessCarousel<char>>,
    }

    fn spawn_driver() -> Harness {
        let mut carousel = SeamlessCarousel::with_timer_queue(CarouselConfig {
            visible_count: 3,
            interval_ms: 4000,
            transition_ms: 500,
        })
        .unwrap();
        carousel.initialize(vec!['A', 'B', 'C', 'D', 'E']);

        let (commands, command_rx) = mpsc::unbounded_channel();
        let (frame_tx, frames) = watch::channel(Frame::default());
        let (shutdown, shutdown_rx) = watch::channel(false);

        let driver = CarouselDriver::new(carousel).with_frame_sender(frame_tx);
        let handle = tokio::spawn(driver.run(command_rx, shutdown_rx));

        Harness {
            commands,
            frames,
            shutdown,
            handle,
        }
    }

    fn offset_of(index: usize) -> f64 {
        index as f64 * (100.0 / 3.0)
    }

    fn assert_offset(frames: &watch::Receiver<Frame>, index: usize) {
        let frame = *frames.borrow();
        assert!(
            (frame.offset_percent - offset_of(index)).abs() < 1e-9,
            "expected index {index}, got offset {}",
            frame.offset_percent
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_advances_on_interval() {
        let harness = spawn_driver();

        tokio::time::sleep(ms(10)).await;
        assert_offset(&harness.frames, 3);

        tokio::time::sleep(ms(4000)).await;
        assert_offset(&harness.frames, 4);

        // Reach the head clone at 8, then land back on 3 after the transition
        tokio::time::sleep(ms(4000 * 4)).await;
        assert_offset(&harness.frames, 8);
        assert!(harness.frames.borrow().is_animating);

        tokio::time::sleep(ms(500)).await;
        assert_offset(&harness.frames, 3);
        assert!(!harness.frames.borrow().is_animating);

        harness.shutdown.send(true).unwrap();
        let carousel = harness.handle.await.unwrap();
        assert_eq!(carousel.state(), CarouselState::TornDown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_pause_and_resume() {
        let harness = spawn_driver();

        harness.commands.send(CarouselCommand::Pause).unwrap();
        tokio::time::sleep(ms(20_000)).await;
        assert_offset(&harness.frames, 3);

        harness.commands.send(CarouselCommand::Resume).unwrap();
        harness.commands.send(CarouselCommand::Resume).unwrap();
        tokio::time::sleep(ms(4010)).await;
        assert_offset(&harness.frames, 4);

        harness.shutdown.send(true).unwrap();
        let carousel = harness.handle.await.unwrap();
        assert!(carousel.scheduler().now() >= ms(24_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_replaces_items() {
        let harness = spawn_driver();

        harness.commands.send(CarouselCommand::Advance).unwrap();
        harness
            .commands
            .send(CarouselCommand::ReplaceItems(vec!['X', 'Y']))
            .unwrap();
        tokio::time::sleep(ms(10)).await;
        assert_offset(&harness.frames, 0);

        tokio::time::sleep(ms(60_000)).await;
        assert_offset(&harness.frames, 0);

        harness.shutdown.send(true).unwrap();
        let carousel = harness.handle.await.unwrap();
        assert_eq!(carousel.items(), &['X', 'Y']);
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_stops_when_shutdown_sender_dropped() {
        let harness = spawn_driver();
        drop(harness.commands);
        drop(harness.shutdown);

        let carousel = tokio::time::timeout(ms(1000), harness.handle)
            .await
            .expect("driver should stop")
            .unwrap();
        assert_eq!(carousel.state(), CarouselState::TornDown);
    }
}
