use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::info;

use shopreel_core::carousel::{
    CarouselDriver, CarouselState, Frame, QueueDriven, SeamlessCarousel,
};
use shopreel_core::catalog::{Catalog, CatalogItem};
use shopreel_core::config::CarouselConfig;
use shopreel_core::AppConfig;
use shopreel_tui::app::state_label;

pub struct SimulateOptions {
    pub duration_ms: u64,
    pub visible: Option<usize>,
    pub interval_ms: Option<u64>,
    pub transition_ms: Option<u64>,
    pub catalog: Option<PathBuf>,
    pub json: bool,
    pub realtime: bool,
}

/// One observable carousel state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub at_ms: u64,
    pub index: usize,
    pub offset_percent: f64,
    pub is_animating: bool,
    /// Absent when only frames are observable, as in realtime mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CarouselState>,
    /// Ids of the items inside the window
    pub visible: Vec<String>,
}

pub async fn run(config: &AppConfig, options: SimulateOptions) -> Result<()> {
    let carousel_config = CarouselConfig {
        visible_count: options.visible.unwrap_or(config.carousel.visible_count),
        interval_ms: options.interval_ms.unwrap_or(config.carousel.interval_ms),
        transition_ms: options.transition_ms.unwrap_or(config.carousel.transition_ms),
    };

    let catalog_path = options.catalog.clone().or_else(|| config.catalog_path());
    let catalog = Catalog::load_or_sample(catalog_path.as_deref())?;
    let items = catalog.latest_items(catalog.items.len());

    let mut carousel = SeamlessCarousel::with_timer_queue(carousel_config)?;
    carousel.initialize(items);
    let duration = Duration::from_millis(options.duration_ms);

    info!(
        items = carousel.items().len(),
        visible = carousel.visible_count(),
        duration_ms = options.duration_ms,
        "Starting simulation"
    );

    if options.realtime {
        return run_realtime(carousel, duration, options.json).await;
    }

    if !options.json {
        print_header();
    }
    for step in simulate(&mut carousel, duration) {
        print_step(&step, options.json)?;
    }
    Ok(())
}

/// Drive `carousel` on its virtual clock for `duration`, recording the state after every timer
pub fn simulate(carousel: &mut SeamlessCarousel<CatalogItem>, duration: Duration) -> Vec<Step> {
    let mut steps = vec![step_of(carousel, carousel.queue().now())];
    while let Some(at) = carousel.fire_next(duration) {
        steps.push(step_of(carousel, at));
    }
    carousel.teardown();
    steps
}

fn step_of(carousel: &SeamlessCarousel<CatalogItem>, at: Duration) -> Step {
    let frame = carousel.frame();
    Step {
        at_ms: at.as_millis() as u64,
        index: carousel.index(),
        offset_percent: frame.offset_percent,
        is_animating: frame.is_animating,
        state: Some(carousel.state()),
        visible: carousel
            .visible_items()
            .iter()
            .map(|item| item.id.clone())
            .collect(),
    }
}

/// Same output, but timed by the tokio clock through [`CarouselDriver`]
async fn run_realtime(
    carousel: SeamlessCarousel<CatalogItem>,
    duration: Duration,
    json: bool,
) -> Result<()> {
    let strip = carousel.extended_items().to_vec();
    let visible = carousel.visible_count();

    let (frame_tx, mut frames) = watch::channel(carousel.frame());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (_commands, command_rx) = mpsc::unbounded_channel();

    let driver = CarouselDriver::new(carousel).with_frame_sender(frame_tx);
    let handle = tokio::spawn(driver.run(command_rx, shutdown_rx));

    let start = tokio::time::Instant::now();
    let deadline = tokio::time::sleep(duration);
    tokio::pin!(deadline);

    if !json {
        print_header();
    }

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = *frames.borrow_and_update();
                let step = step_from_frame(frame, start.elapsed(), &strip, visible);
                print_step(&step, json)?;
            }
        }
    }

    let _ = shutdown_tx.send(true);
    let carousel = handle.await?;
    info!(state = ?carousel.state(), "Simulation finished");
    Ok(())
}

/// Rebuild a step from a published frame and the strip it was computed over
fn step_from_frame(
    frame: Frame,
    elapsed: Duration,
    strip: &[CatalogItem],
    visible: usize,
) -> Step {
    let index = if visible == 0 {
        0
    } else {
        (frame.offset_percent * visible as f64 / 100.0).round() as usize
    };
    let end = (index + visible).min(strip.len());
    Step {
        at_ms: elapsed.as_millis() as u64,
        index,
        offset_percent: frame.offset_percent,
        is_animating: frame.is_animating,
        state: None,
        visible: strip[index.min(end)..end]
            .iter()
            .map(|item| item.id.clone())
            .collect(),
    }
}

fn print_header() {
    println!("{:>8}  {:>5}  {:>8}  {:<5}  {:<8}  visible", "time", "index", "offset", "move", "state");
}

fn print_step(step: &Step, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(step)?);
    } else {
        println!(
            "{:>6}ms  {:>5}  {:>7.2}%  {:<5}  {:<8}  {}",
            step.at_ms,
            step.index,
            step.offset_percent,
            if step.is_animating { "slide" } else { "snap" },
            step.state.map(state_label).unwrap_or("-"),
            step.visible.join(" "),
        );
    }
    Ok(())
}
