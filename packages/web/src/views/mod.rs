mod register;
pub use register::Register;
