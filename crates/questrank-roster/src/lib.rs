pub mod download;
pub mod error;
pub mod parse;

pub use download::{download_roster_from, export_url};
pub use error::RosterError;
pub use parse::{load_roster_file, parse_roster, IgnoredRow, Roster};
