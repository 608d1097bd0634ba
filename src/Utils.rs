//! different utility modules used throughout the project
/// logging setup, time units and statistics tables
pub mod logger;
/// parse documents of "title / key: value1, value2" sections into nested HashMaps
pub mod task_parser;
///
mod task_parser_tests;
