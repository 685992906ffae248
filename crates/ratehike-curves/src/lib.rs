//! # RateHike Curves
//!
//! Piecewise discount curve bootstrapping for interest rate curves.
//!
//! This crate provides:
//!
//! - **Interpolation engine**: [`CoefficientEngine`], a pillar table of
//!   piecewise polynomial coefficients (linear or Bessel/Hermite cubic)
//!   updated incrementally as pillars are solved
//! - **Curves**: [`IrCurve`], read as discount factors, zero rates or
//!   instantaneous forwards through its [`DataType`]
//! - **Instruments**: deposits, FRAs, futures, IRS and OIS with EUR and GBP
//!   market conventions, loaded from CSV
//! - **Bootstrap**: Brent root search per pillar, swept until discount
//!   factors settle for non-local interpolation
//! - **Re-anchoring**: moving a calibrated curve's origin from spot to today
//! - **Metrics**: round trip and benchmark comparisons
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ratehike_curves::prelude::*;
//!
//! let settings = CurveSettings::new(Currency::Eur, Date::from_ymd(2023, 7, 6)?)
//!     .with_interpolation(InterpolationMethod::Bessel, DataType::LogDf);
//!
//! let instruments = InstrumentSet::from_csv(&settings, "ois_eur.csv", None)?;
//! let mut curve = IrCurve::new("ESTR", settings)?;
//! let info = curve.bootstrap(instruments.instruments())?;
//!
//! let zeros = curve.zero_rates(CurveQuery::AllPillars)?;
//! let errors = roundtrip(&curve, instruments.market_instruments());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod anchoring;
pub mod bootstrap;
pub mod conventions;
pub mod curve;
pub mod data_type;
pub mod error;
pub mod instrument_set;
pub mod instruments;
pub mod interpolation;
pub mod metrics;
pub mod settings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::anchoring::ReAnchoring;
    pub use crate::bootstrap::{BootstrapInfo, BootstrapStatus};
    pub use crate::conventions::Currency;
    pub use crate::curve::{CurveQuery, IrCurve};
    pub use crate::data_type::DataType;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instrument_set::{InstrumentSet, SyntheticInstruments};
    pub use crate::instruments::{
        Instrument, InstrumentRecord, InstrumentType, MarketInstrument, SyntheticInstrument,
    };
    pub use crate::interpolation::{InterpolationMethod, SplineCorrection};
    pub use crate::metrics::{benchmark, roundtrip, BenchmarkKind, RoundtripReport};
    pub use crate::settings::{BootstrapConfig, CurveSettings};
    pub use ratehike_core::{Date, Period, TimeUnit};
}

pub use curve::{CurveQuery, IrCurve};
pub use data_type::DataType;
pub use error::{CurveError, CurveResult};
pub use interpolation::{CoefficientEngine, InterpolationMethod, SplineCorrection};
pub use settings::{BootstrapConfig, CurveSettings};
