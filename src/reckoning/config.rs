//! Configuration for the dead-reckoning engine.

use std::time::Duration;

use super::error::ReckoningError;

/// Default interval between generated locations.
///
/// One second matches the cadence of typical consumer GPS hardware; if real
/// fixes arrive faster than this, dead reckoning has no visible effect.
pub const DEFAULT_RECKONING_INTERVAL: Duration = Duration::from_secs(1);

/// Default deceleration applied to the carried speed each tick, in m/s².
///
/// Zero means constant speed: the last known speed is carried unchanged
/// until the next hard fix.
pub const DEFAULT_DECELERATION_MPS2: f64 = 0.0;

/// Dead-reckoning engine configuration.
///
/// All fields are mutable only while the engine is idle; see
/// [`DeadReckoningEngine`](super::DeadReckoningEngine) setters.
#[derive(Debug, Clone)]
pub struct DeadReckoningConfig {
    /// How often to generate estimated locations.
    pub interval: Duration,
    /// Speed reduction per second of extrapolation, in m/s². The carried
    /// speed never decays below zero.
    pub deceleration: f64,
    /// Maximum number of locations to generate since the last hard fix.
    /// `None` means unlimited; the counter resets whenever a hard fix
    /// arrives. Callers relying on bounded memory should set a limit.
    pub max_generated: Option<u32>,
}

impl Default for DeadReckoningConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RECKONING_INTERVAL,
            deceleration: DEFAULT_DECELERATION_MPS2,
            max_generated: None,
        }
    }
}

impl DeadReckoningConfig {
    /// Check the configuration values for internal consistency.
    pub fn validate(&self) -> Result<(), ReckoningError> {
        if self.interval.is_zero() {
            return Err(ReckoningError::InvalidInterval);
        }
        if self.deceleration.is_nan() || self.deceleration.is_infinite() || self.deceleration < 0.0
        {
            return Err(ReckoningError::InvalidDeceleration);
        }
        Ok(())
    }
}
