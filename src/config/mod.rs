mod client_config;

pub use client_config::{
    DetuxConfig,
    load_or_default,
};
