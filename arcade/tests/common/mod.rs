pub mod assertions;
pub mod fixtures;
pub mod logging;

pub use assertions::{assert_contains, assert_path_exists, assert_success};
pub use fixtures::ArcadeEnv;
pub use logging::init_test_logging;
