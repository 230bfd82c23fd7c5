pub mod body;
pub mod comet;
