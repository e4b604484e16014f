use chrono::{TimeZone, Utc};
use nighttime::{NightTimeCalculator, NoaaSunTimes, Place, Route};

fn main() -> Result<(), nighttime::Error> {
    let route = Route::new(
        Place::new(39.5517, 2.73881, Utc.with_ymd_and_hms(2021, 12, 8, 5, 4, 0).unwrap()),
        Place::new(56.9291, 14.728, Utc.with_ymd_and_hms(2021, 12, 8, 7, 53, 0).unwrap()),
    )?;

    let calculator = NightTimeCalculator::new(NoaaSunTimes::default());
    let result = calculator.analyze(&route)?;

    println!("Distance: {:.1} NM", route.distance());
    println!("Speed: {:.0} kt", route.speed());
    println!("Flight time: {} min", route.flight_duration().num_minutes());
    println!("Phase: {:?}", result.phase);
    if let Some(crossing) = result.crossing {
        println!("Crossing: {} ({} iterations)", crossing.place, crossing.iterations);
    }
    println!("Night: {} min", result.night.num_minutes());
    Ok(())
}
