pub mod backup;
pub mod boards;
pub mod cleanup;
