//! Concrete mechanical systems for the mechsim core.
//!
//! Each model implements [`ms_sim::Dynamics`] and is driven through an
//! [`ms_sim::Plant`]:
//! - [`SingleLinkArm`]: torque-driven arm in a vertical plane
//! - [`CartPendulum`]: inverted pendulum on a force-driven cart
//! - [`Satellite`]: base/panel pair coupled by a torsional spring-damper

pub mod arm;
pub mod cart_pendulum;
pub mod satellite;

pub use arm::SingleLinkArm;
pub use cart_pendulum::CartPendulum;
pub use satellite::Satellite;
