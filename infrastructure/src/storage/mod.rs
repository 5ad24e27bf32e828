//! Exam persistence adapters

pub mod csv_repository;

pub use csv_repository::CsvExamRepository;
