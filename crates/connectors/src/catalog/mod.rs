pub mod hive;
