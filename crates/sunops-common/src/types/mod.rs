pub mod calculation;
pub mod premissa;
pub mod settings;
pub mod transaction;
