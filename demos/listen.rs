//! Listens to a DualShock controller and prints Cross/Circle presses.
//!
//! ```text
//! cargo run --example listen -- /dev/input/event4 [profile.toml]
//! ```

use dualshock::{codes, ActionProfile, Dispatcher};
use tracing::{error, info};

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let device = args.next().unwrap_or_else(|| "/dev/input/event4".to_string());
    let profile = args.next();

    if let Err(e) = run(&device, profile.as_deref()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(device: &str, profile: Option<&str>) -> dualshock::Result<()> {
    let mut pad = Dispatcher::new(device);

    pad.register(codes::CROSS, |event| {
        if event.value == 1 {
            println!("Cross pressed!");
        } else {
            println!("Cross released!");
        }
        Ok(())
    });
    pad.register(codes::CIRCLE, |event| {
        if event.value == 1 {
            println!("Circle pressed!");
        } else {
            println!("Circle released!");
        }
        Ok(())
    });

    if let Some(path) = profile {
        let profile = ActionProfile::load(path)?;
        for action in profile.actions() {
            let name = action.to_string();
            pad.bind_action(&profile, action, move |event| {
                println!("{name}: {} = {}", event.identity, event.value);
                Ok(())
            })?;
        }
    }

    // Quit on the PS button
    let stop = pad.stop_handle();
    pad.register(codes::PS, move |_| {
        stop.stop();
        Ok(())
    });

    info!("Listening on {} ({} handlers)", pad.device_path().display(), pad.len());
    pad.start_listening()
}
