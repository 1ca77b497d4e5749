pub mod contact;
pub mod gateway;
