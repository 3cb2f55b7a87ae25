//! Headless spin.
//!
//! Runs the same controller as the window, but completes the scheduled task
//! immediately instead of waiting out the animation.

use anyhow::{Context, Result};
use lucky_wheel_core::{
    Announcement, Capabilities, IndexSource, Instant, JsonFileStore, NoSpeech, SpinOutcome,
    SpinPlan, Widget,
};

use crate::config::Config;

/// Spin once and print the outcome. `index` forces the landing segment.
pub fn execute(config: &Config, index: Option<usize>) -> Result<()> {
    let user_agent = config.wheel.user_agent.as_deref().unwrap_or_default();
    let capabilities =
        Capabilities::resolve(user_agent, &config.wheel.embedded_marker, false, false);
    let store = JsonFileStore::in_dir(&config.data_dir);
    let now = Instant::now();

    let (plan, outcome) = match index {
        Some(index) => {
            let mut widget = Widget::with_index_source(
                config.wheel.clone(),
                capabilities,
                store,
                None::<NoSpeech>,
                move |_: usize| index,
            );
            run(&mut widget, now)?
        }
        None => {
            let mut widget =
                Widget::new(config.wheel.clone(), capabilities, store, None::<NoSpeech>);
            run(&mut widget, now)?
        }
    };

    let (result, announcement) = outcome;
    println!("index:   {}", result.index);
    println!("label:   {}", result.label);
    println!("angle:   {}", plan.target_angle);
    match announcement {
        Announcement::Alert(message) => println!("message: {}", message),
        other => println!("message: {:?}", other),
    }
    Ok(())
}

type Outcome = (SpinOutcome, Announcement);

fn run<R: IndexSource>(
    widget: &mut Widget<JsonFileStore, NoSpeech, R>,
    now: Instant,
) -> Result<(SpinPlan, Outcome)> {
    let plan = widget.spin(now).context("Wheel is already spinning")?;
    let outcome = widget
        .poll(plan.task.due_at)
        .context("Spin did not complete")?;
    Ok((plan, outcome))
}
