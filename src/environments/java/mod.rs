pub mod matcher;
pub mod probe;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod validator;
pub mod version;

pub use matcher::{resolve, MatchOptions, STRICTNESS_TIERS};
pub use probe::{JdkProber, ProbeReport, ProcessProber};
pub use record::JdkRecord;
pub use registry::{RefreshReport, Registry};
pub use resolver::{current_version, current_version_from, find_pinned_version, PinnedVersion};
pub use validator::JavaValidator;
pub use version::VersionSpec;
