pub mod entitlement;
pub mod lifecycle;
