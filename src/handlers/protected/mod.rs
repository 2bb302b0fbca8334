// Handlers behind the JWT guard; every request here carries an `AuthUser` extension.
pub mod matches;
pub mod players;
pub mod reports;
pub mod teams;
