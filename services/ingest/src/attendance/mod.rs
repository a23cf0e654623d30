pub mod fetcher;
pub mod guard;
pub mod inference;
pub mod resolver;
pub mod state;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use state::SyncReport;
pub use sync::AttendanceSyncer;
