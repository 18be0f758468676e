mod config_tests;
mod display_tests;
mod hook_tests;
mod status_tests;
