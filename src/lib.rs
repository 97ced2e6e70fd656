pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod events;
    pub mod library;
    pub mod repository;
}

pub mod utils {
    pub mod date;
    pub mod ddb;
    pub mod memory;
}

pub mod books;
pub mod borrowers;
pub mod catalog;
pub mod counters;
pub mod employees;
pub mod gateway;
pub mod loans;
pub mod reports;
pub mod seed;
