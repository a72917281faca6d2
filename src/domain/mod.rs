pub mod company;
pub mod table;
