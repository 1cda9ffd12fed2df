pub mod characteristics;
pub mod classify;
pub mod health;
pub mod index;
