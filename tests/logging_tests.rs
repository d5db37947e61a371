#![cfg(feature = "std")]

use log::{Level, MetadataBuilder};
use woodland_battleship::{init_logging, LOG_ENV};

#[test]
fn logger_keeps_to_this_crate() {
    std::env::set_var(LOG_ENV, " debug ");
    init_logging();
    // A second install is a no-op.
    init_logging();

    let logger = log::logger();
    let ours = MetadataBuilder::new()
        .level(Level::Debug)
        .target("woodland_battleship::game")
        .build();
    let too_fine = MetadataBuilder::new()
        .level(Level::Trace)
        .target("woodland_battleship::game")
        .build();
    let foreign = MetadataBuilder::new()
        .level(Level::Error)
        .target("tokio::net")
        .build();
    assert!(logger.enabled(&ours));
    assert!(!logger.enabled(&too_fine));
    assert!(!logger.enabled(&foreign));
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
}
