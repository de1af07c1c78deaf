//! Text-mode walkthrough of a checkout wizard.
//!
//! Drives a step indicator with a manual clock at 60 frames per second and
//! prints a frame every 50 ms, so the separator squeeze, its decay and the
//! marker lean are visible as numbers.
//!
//! Run with: RUST_LOG=horizon_steps=debug cargo run -p horizon-steps --example wizard

use std::sync::Arc;
use std::time::Duration;

use horizon_steps::runtime::ManualClock;
use horizon_steps::{Step, StepState, StepsConfig, StepsFrame, StepsView};

const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StepsConfig::load(path)?,
        None => StepsConfig::default(),
    };

    let clock = Arc::new(ManualClock::default());
    let steps = vec![
        Step::new("Cart").with_icon("cart"),
        Step::new("Shipping").with_icon("shippingbox"),
        Step::new("Payment").with_icon("creditcard"),
        Step::new("Review"),
    ];
    let view = StepsView::new(steps, config, clock.clone())?;

    println!("Checkout wizard");
    println!("===============");
    print_frame(&view.frame_now());

    for _ in 0..3 {
        view.advance();
        run(&view, &clock, 60);
    }
    view.retreat();
    run(&view, &clock, 60);

    Ok(())
}

/// Render frames until the view goes idle, capped at `max_frames`.
fn run(view: &StepsView, clock: &ManualClock, max_frames: usize) {
    println!();
    println!("-> step {}", view.state().current_index());
    for frame in 0..max_frames {
        let now = clock.advance(FRAME);
        let frame_data = view.frame(now);
        if frame % 3 == 0 {
            print_frame(&frame_data);
        }
        if view.time_until_next_frame(now).is_none() {
            println!("   idle after {} frames", frame + 1);
            break;
        }
    }
}

fn print_frame(frame: &StepsFrame) {
    let steps: Vec<String> = frame
        .steps
        .iter()
        .map(|step| {
            let mark = match step.state {
                StepState::Completed => 'x',
                StepState::Current => '>',
                StepState::Uncompleted => ' ',
            };
            format!("[{mark}] {}", step.title)
        })
        .collect();
    let separators: Vec<String> = frame
        .separators
        .iter()
        .map(|separator| format!("{:.2}", separator.scale))
        .collect();

    println!(
        "{} | scales {} | marker x={:6.1} shear={:+.3}",
        steps.join(" "),
        separators.join(" "),
        frame.marker.translate_x(),
        frame.marker.shear_x_component(),
    );
}
