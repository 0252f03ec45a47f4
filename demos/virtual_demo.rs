use dualshock::virtual_device::VirtualDevice;
use dualshock::{codes, Dispatcher, Event, EventHandler, EventLogger, EventStream, Filtered, HandlerError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Script a short session: press and release Cross, nudge the left stick
    let mut device = VirtualDevice::starting_at(1_700_000_000);
    device
        .press(codes::CROSS)
        .sync()
        .axis(codes::LEFTJOY_X, 200)
        .sync()
        .release(codes::CROSS)
        .sync();
    let bytes = device.into_bytes();

    // Print every event as JSON
    let mut logger = EventLogger::stdout();
    for event in EventStream::from_reader(bytes.as_slice()).take(3) {
        logger
            .on_event(&event?)
            .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    }

    // Dispatch the same bytes; the session ends with EOF on a record boundary
    let mut pad = Dispatcher::new("virtual");
    pad.register_handler(
        codes::CROSS,
        Filtered::presses(|_: &Event| -> Result<(), HandlerError> {
            println!("(Virtual) Cross pressed!");
            Ok(())
        }),
    );
    match pad.listen_on(EventStream::from_reader(bytes.as_slice())) {
        Err(e) if e.is_truncated() => println!("(Virtual) device drained"),
        other => other?,
    }
    Ok(())
}
