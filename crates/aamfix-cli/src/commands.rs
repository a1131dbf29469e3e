pub mod extract;
pub mod fix;
pub mod inspect;
pub mod rule;
