pub mod admin;
pub mod config;
pub mod fault;
pub mod player;
pub mod referee;
pub mod santorini;
pub mod strategy;
pub mod wire;

pub mod utils {
    pub mod prelude {
        pub use crate::fault::{Fault, Result};

        pub use std::collections::{BTreeMap, HashMap, HashSet};
    }
}

pub mod prelude {
    pub use super::admin::*;
    pub use super::config::*;
    pub use super::player::*;
    pub use super::referee::*;
    pub use super::santorini::prelude::*;
    pub use super::strategy::*;
    pub use super::utils::prelude::*;
    pub use super::wire::*;
}
