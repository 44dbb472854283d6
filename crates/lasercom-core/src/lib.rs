//! # Lasercom Core
//!
//! Physical link-budget model for free-space optical inter-satellite relays.
//! Every quantity is a closed-form evaluation: Gaussian-beam spreading,
//! free-space path loss, received power, and the bit-error rate of on-off
//! keying for a given SNR.
//!
//! ## Architecture
//!
//! Data flows one way: [`constants`] → [`channel`] → [`detection`] →
//! [`sweep`]. All functions are pure and validate their inputs, returning a
//! [`LinkError`] instead of propagating NaN or infinity.
//!
//! ## Modules
//!
//! - [`constants`]: Speed of light, reference wavelength and ranges.
//! - [`beam`]: Gaussian-beam divergence, spot size and on-axis intensity.
//! - [`channel`]: Free-space path loss and received power.
//! - [`detection`]: Complementary error function, Q-function, OOK BER.
//! - [`sweep`]: Transmit-power and SNR sweeps over a set of ranges.
//! - [`types`]: Result series handed to report writers.
//!
//! ## Example
//!
//! ```
//! use lasercom_core::channel::received_power;
//! use lasercom_core::constants::{carrier_frequency, REFERENCE_WAVELENGTH, SPEED_OF_LIGHT};
//! use lasercom_core::detection::{ber_ook, db_to_linear};
//!
//! let f = carrier_frequency(REFERENCE_WAVELENGTH, SPEED_OF_LIGHT).unwrap();
//! let pr = received_power(0.2, 200e3, f).unwrap();
//! assert!(pr > 0.0 && pr < 0.2);
//!
//! let ber = ber_ook(db_to_linear(5.0)).unwrap();
//! assert!(ber < 0.01);
//! ```

pub mod beam;
pub mod channel;
pub mod constants;
pub mod detection;
pub mod error;
pub mod sweep;
pub mod types;

pub use error::LinkError;
