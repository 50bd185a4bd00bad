//! Check command - evaluate a viewport against the change detector.

use tilegrid::config::ConfigFile;
use tilegrid::coord::Coordinate;
use tilegrid::viewport::{sine_deltas, ViewportChangeDetector, ViewportDecision};

use super::bounds;
use crate::error::CliError;

/// Print the sine deltas for a viewport and whether it would refresh.
pub fn run(
    south_west: Coordinate,
    north_east: Coordinate,
    config: &ConfigFile,
) -> Result<(), CliError> {
    let detector = ViewportChangeDetector::new(config.grid.sine_delta_threshold);
    let deltas = sine_deltas(south_west, north_east);

    println!("Viewport:  {}", bounds(south_west, north_east));
    println!("Threshold: {}", detector.threshold());
    println!("Deltas:    {}", deltas);

    match detector.evaluate(&bounds(south_west, north_east)) {
        ViewportDecision::Refresh([sw, ne]) => {
            println!("Decision:  refresh (fetch sw={} ne={})", sw, ne)
        }
        ViewportDecision::RangeTooBig(_) => println!("Decision:  range too big"),
    }

    Ok(())
}
