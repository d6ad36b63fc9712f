pub mod config;
pub mod evaluate;
pub mod init;
pub mod project;
pub mod promo;
pub mod register;
pub mod serve;
pub mod wizard;
