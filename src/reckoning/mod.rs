//! Dead reckoning: synthetic position estimates between real GPS fixes.
//!
//! Dead reckoning generates location updates at fixed time intervals,
//! filling the gaps between consecutive fixes from the real location
//! provider. Since dead reckoning is a science of guessing, unconstrained
//! extrapolation drifts badly; the engine therefore requires a route to
//! follow and snaps every generated point onto it.
//!
//! ```text
//! Location provider ──onHardFix──▶ DeadReckoningEngine ──▶ listeners
//!                                      │        ▲
//!                                      ▼        │ tick every interval
//!                                 RouteProjector ◀── runner (tokio)
//! ```
//!
//! If real fixes arrive at a frequency higher than the configured interval,
//! dead reckoning has no visible effect: every fix resets the extrapolation
//! baseline and clears the generated history.
//!
//! The core state machine ([`DeadReckoningEngine`]) is synchronous and
//! deterministic; the periodic scheduling lives in [`runner`].

mod config;
mod engine;
mod error;
mod listener;
pub mod runner;
mod session;

pub use config::{DeadReckoningConfig, DEFAULT_DECELERATION_MPS2, DEFAULT_RECKONING_INTERVAL};
pub use engine::{DeadReckoningEngine, StopReason, TickOutcome};
pub use error::ReckoningError;
pub use listener::{DeadReckoningHandler, ListenerId};
pub use runner::RunnerHandle;
