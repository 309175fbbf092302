//! Request Parameter Validators
//!
//! ## Overview
//!
//! Validators reject malformed input before the rule evaluator runs. The
//! domains they enforce are instrument domains, what the probe hardware can
//! plausibly report, not potability limits:
//!
//! - TDS: 0 to 10,000 mg/L (gravimetric meter saturation)
//! - Turbidity: 0 to 100 NTU (optical sensor saturation)
//! - Temperature: -10°C to 50°C (liquid water in a supply line)
//! - pH: 0 to 14 (definition limit)
//!
//! A reading inside these domains but over a guideline limit is *valid*
//! input that assesses as not potable. Keeping the two layers separate
//! means a contaminated source still gets a score and a recommendation,
//! while a broken probe gets an error.
//!
//! ## Check Order
//!
//! Fields are checked in a fixed order (TDS, turbidity, temperature, pH)
//! and the first violation is returned; error responses are therefore
//! deterministic for a given request.
//!
//! ## Usage Example
//!
//! ```rust
//! use aquaguard_core::validators::ReadingValidator;
//! use aquaguard_core::reading::Reading;
//! use aquaguard_core::traits::Validator;
//!
//! let validator = ReadingValidator::default();
//!
//! let reading = Reading::new(350.0, 0.8, 1_000);
//! validator.validate(&reading)?;
//!
//! let faulty = Reading::new(-1.0, 0.8, 1_000);
//! assert!(validator.validate(&faulty).is_err());
//! # Ok::<(), aquaguard_core::ValidationError>(())
//! ```
//!
//! ## Customization
//!
//! Deployments with different probes can widen or narrow the domains:
//!
//! ```rust
//! use aquaguard_core::validators::ReadingValidator;
//!
//! // Brackish-capable TDS meter, lab-grade turbidity sensor
//! let validator = ReadingValidator::new_with_bounds(
//!     (0.0, 50_000.0),
//!     (0.0, 4_000.0),
//!     (-10.0, 50.0),
//!     (0.0, 14.0),
//! );
//! ```

mod reading;
pub mod utils;

pub use reading::ReadingValidator;
