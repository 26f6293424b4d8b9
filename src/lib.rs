pub mod backups;
pub mod editorial;
pub mod logging;
pub mod manifest;
pub mod presets;
pub mod scan;
pub mod verify;

// Re-export commonly used types for convenience.
pub use logging::{AlertLevel, AlertSink, ConsoleSink, Logger, NullSink};
pub use manifest::{Index, PathStrategy};
pub use presets::{load_presets, VerifierSettings};
pub use verify::{verify_day, GroupReport, RunOutcome, VerificationRun};
