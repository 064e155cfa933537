//! Animated Stat Row Demo
//!
//! Simulates an "about" page scrolling down to a row of three stat
//! counters. Each counter stays at 0 until the scroll brings it into the
//! viewport, then springs up to its target over ~3 seconds:
//! - age: 30
//! - years of experience: 3
//! - willingness: 100
//!
//! The demo is headless: it drives the scheduler at 60 fps and prints the
//! stat row whenever a displayed value changes.
//!
//! Run with: cargo run -p countup_widgets --example about_stats

use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::Result;
use countup_animation::{get_scheduler, set_global_scheduler, AnimationScheduler};
use countup_core::geometry::Rect;
use countup_core::Event;
use countup_widgets::{counter, Widget, WidgetTree};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let scheduler = Arc::new(Mutex::new(AnimationScheduler::new()));
    scheduler.lock().unwrap().set_target_fps(60);
    set_global_scheduler(scheduler)?;

    // The stat row sits 1400px down the page
    let mut tree = WidgetTree::new();
    let age = tree.add(
        counter(30)
            .bounds(Rect::new(100.0, 1400.0, 200.0, 80.0))
            .duration_ms(3000)
            .mount(),
    );
    let experience = tree.add(
        counter(3)
            .bounds(Rect::new(400.0, 1400.0, 200.0, 80.0))
            .duration_ms(3000)
            .mount(),
    );
    let willingness = tree.add(
        counter(100)
            .bounds(Rect::new(700.0, 1400.0, 200.0, 80.0))
            .duration_ms(3000)
            .mount(),
    );

    let scheduler = get_scheduler();
    let frame_interval = scheduler.lock().unwrap().frame_interval();
    let mut scroll_y = 0.0f32;
    let mut last_row = String::new();

    loop {
        // The user scrolls down until the stat row is on screen
        if scroll_y < 1200.0 {
            scroll_y += 24.0;
            tree.broadcast(&Event::scroll(Rect::new(0.0, scroll_y, 1280.0, 720.0)));
        }

        scheduler.lock().unwrap().tick();
        tree.update_all();

        // Callers compose the "+" decoration; the widgets render bare integers
        let row = format!(
            "age {:>3}+   experience {:>3}+   willingness {:>3}+",
            tree.get(age).expect("age counter").text(),
            tree.get(experience).expect("experience counter").text(),
            tree.get(willingness).expect("willingness counter").text(),
        );
        if row != last_row {
            println!("{row}");
            last_row = row;
        }

        if scroll_y >= 1200.0 && !scheduler.lock().unwrap().has_active_animations() {
            break;
        }
        thread::sleep(frame_interval);
    }

    println!("settled.");
    Ok(())
}
