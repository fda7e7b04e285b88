#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod extract;
pub mod html;
pub mod ingest;
pub mod traits;
pub mod types;
pub mod walker;
