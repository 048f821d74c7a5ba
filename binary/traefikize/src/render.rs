//! Output collaborators: YAML artifact files and the plain-text report.

pub mod summary;
pub mod yaml;

pub use summary::{print_global_summary, print_ingress_report};
pub use yaml::write_yaml;
