//! Competition program for the V5 Brain.

#[cfg(target_os = "vexos")]
use briareus::{config::RobotConfig, fs::logger, hardware::vex::Competition};
#[cfg(target_os = "vexos")]
use log::{LevelFilter, error};
#[cfg(target_os = "vexos")]
use vexide::prelude::*;

#[cfg(target_os = "vexos")]
#[vexide::main]
async fn main(peripherals: Peripherals) {
    if let Err(e) = logger::init(LevelFilter::Info) {
        println!("Logger init failed: {}", e);
    }

    match Competition::new(peripherals, RobotConfig::default()) {
        Ok(robot) => robot.compete().await,
        Err(e) => error!("Wiring error: {}", e),
    }
}

#[cfg(not(target_os = "vexos"))]
fn main() {
    eprintln!("compbot runs on the V5 Brain; build it for the vexos target");
}
