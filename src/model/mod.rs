pub mod race;
pub mod record;
pub mod results;
pub mod session;
