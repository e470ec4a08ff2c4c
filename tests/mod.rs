mod common;

mod config_tests;
mod fcm_tests;
mod receiver_tests;
