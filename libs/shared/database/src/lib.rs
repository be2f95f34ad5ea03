pub mod appointments;
pub mod db;
pub mod insurers;
pub mod patients;

pub use db::ClinicDb;
