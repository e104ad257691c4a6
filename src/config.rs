//! Configuration and CLI argument handling

use std::{sync::Arc, time::Duration};

use clap::Parser;

use crate::{
    services::{AlwaysFail, AlwaysSucceed, RequestSimulator},
    state::StartupMinutes,
    ui::AirConditionerSettings,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "remote-services")]
#[command(about = "Vehicle remote services demo with a simulated air conditioner")]
#[command(version)]
pub struct Config {
    /// Air conditioner run time in minutes (1-60)
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u8).range(1..=60))]
    pub startup_minutes: u8,

    /// Simulated start request delay in milliseconds
    #[arg(long, default_value = "3000")]
    pub request_delay_ms: u64,

    /// Length of one countdown minute in seconds
    #[arg(long, default_value = "60")]
    pub tick_seconds: u64,

    /// How long an error banner stays visible in milliseconds
    #[arg(long, default_value = "3000")]
    pub error_display_ms: u64,

    /// Print frames as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Make every simulated start request fail
    #[arg(long, hide = true)]
    pub simulate_failure: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn timings(&self) -> Timings {
        Timings {
            request_delay: Duration::from_millis(self.request_delay_ms),
            tick_interval: Duration::from_secs(self.tick_seconds),
            error_display: Duration::from_millis(self.error_display_ms),
        }
    }

    pub fn startup_minutes(&self) -> StartupMinutes {
        StartupMinutes::new(i32::from(self.startup_minutes)).unwrap_or_default()
    }

    pub fn simulator(&self) -> Arc<dyn RequestSimulator> {
        if self.simulate_failure {
            Arc::new(AlwaysFail)
        } else {
            Arc::new(AlwaysSucceed)
        }
    }

    /// Settings for every air conditioner screen opened in this session
    pub fn screen_settings(&self) -> AirConditionerSettings {
        AirConditionerSettings {
            startup_minutes: self.startup_minutes(),
            timings: self.timings(),
            simulator: self.simulator(),
        }
    }
}

/// Fixed durations driving the simulated air conditioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay standing in for the start request round trip
    pub request_delay: Duration,
    /// One countdown minute
    pub tick_interval: Duration,
    /// Error banner lifetime before it is dismissed
    pub error_display: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(3),
            tick_interval: Duration::from_secs(60),
            error_display: Duration::from_secs(3),
        }
    }
}
