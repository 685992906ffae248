//! Integration test: calibrate OIS and IBOR curves from instrument files
//! and check that every market instrument reprices to its quote.
//!
//! Market data: 2023-07-06 close, EUR (ESTR, EURIBOR 6M) and GBP
//! (SONIA and a 6M index).

use std::path::PathBuf;

use ratehike_curves::bootstrap::BootstrapStatus;
use ratehike_curves::conventions::Currency;
use ratehike_curves::instrument_set::{InstrumentSet, SyntheticInstruments};
use ratehike_curves::metrics::{roundtrip, RoundtripReport};
use ratehike_curves::prelude::*;

fn data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(file)
}

fn settings(currency: Currency, method: InterpolationMethod, data_type: DataType) -> CurveSettings {
    CurveSettings::new(currency, Date::from_ymd(2023, 7, 6).unwrap())
        .with_interpolation(method, data_type)
}

fn ois_file(currency: Currency) -> PathBuf {
    match currency {
        Currency::Eur => data_path("ois_eur.csv"),
        Currency::Gbp => data_path("ois_gbp.csv"),
    }
}

fn ibor_file(currency: Currency) -> PathBuf {
    match currency {
        Currency::Eur => data_path("ibor_eur.csv"),
        Currency::Gbp => data_path("ibor_gbp.csv"),
    }
}

fn assert_roundtrip(curve: &IrCurve<'_>, set: &InstrumentSet, tolerance: f64) {
    let errors = roundtrip(curve, set.market_instruments());
    assert_eq!(errors.len(), set.market_instruments().len());
    let report = RoundtripReport::new(curve, set.market_instruments());
    assert!(
        errors.iter().all(|e| e.abs() <= tolerance),
        "{} round trip failed:\n{report}",
        curve.name()
    );
}

/// OIS curve, then an IBOR curve discounted off itself and off the OIS curve.
fn check_currency(currency: Currency, ois_settings: CurveSettings, ibor_settings: CurveSettings) {
    let ois_set = InstrumentSet::from_csv(&ois_settings, ois_file(currency), None).unwrap();
    let mut ois = IrCurve::new("OIS", ois_settings).unwrap();
    let info = ois.bootstrap(ois_set.instruments()).unwrap();
    assert_eq!(info.status, BootstrapStatus::Converged);
    assert_roundtrip(&ois, &ois_set, 1e-10);

    let ibor_set = InstrumentSet::from_csv(&ibor_settings, ibor_file(currency), Some(&ois)).unwrap();

    let mut endogenous = IrCurve::new("IBOR", ibor_settings.clone()).unwrap();
    endogenous.bootstrap(ibor_set.instruments()).unwrap();
    assert_roundtrip(&endogenous, &ibor_set, 1e-9);

    let mut exogenous = IrCurve::new("IBOR", ibor_settings).unwrap().with_discount_curve(&ois);
    exogenous.bootstrap(ibor_set.instruments()).unwrap();
    assert_roundtrip(&exogenous, &ibor_set, 1e-9);
}

fn check_all_configurations(currency: Currency) {
    let linear = settings(currency, InterpolationMethod::Linear, DataType::LogDf);
    check_currency(currency, linear.clone(), linear);

    let bessel_df = settings(currency, InterpolationMethod::Bessel, DataType::Df);
    check_currency(currency, bessel_df.clone(), bessel_df);

    let bessel_zero = settings(currency, InterpolationMethod::Bessel, DataType::Zero);
    let with_synthetics = bessel_zero
        .clone()
        .with_synthetic_instruments(SyntheticInstruments::Ois);
    check_currency(currency, bessel_zero, with_synthetics);
}

#[test]
fn test_roundtrip_eur() {
    check_all_configurations(Currency::Eur);
}

#[test]
fn test_roundtrip_gbp() {
    check_all_configurations(Currency::Gbp);
}

#[test]
fn test_spline_corrections_roundtrip() {
    for correction in [SplineCorrection::Linear, SplineCorrection::Natural] {
        let s = settings(Currency::Eur, InterpolationMethod::Bessel, DataType::LogDf)
            .with_spline_correction(correction);
        let set = InstrumentSet::from_csv(&s, ois_file(Currency::Eur), None).unwrap();
        let mut curve = IrCurve::new("ESTR", s).unwrap();
        curve.bootstrap(set.instruments()).unwrap();
        assert_roundtrip(&curve, &set, 1e-10);
    }
}

#[test]
fn test_settings_file() {
    let s = CurveSettings::from_file(data_path("settings_eur.toml")).unwrap();
    assert_eq!(s.currency, Currency::Eur);
    assert_eq!(s.interpolation_method, InterpolationMethod::Bessel);

    let set = InstrumentSet::from_csv(&s, ois_file(Currency::Eur), None).unwrap();
    let mut curve = IrCurve::new("ESTR", s).unwrap();
    curve.bootstrap(set.instruments()).unwrap();
    assert_roundtrip(&curve, &set, 1e-10);
}

#[test]
fn test_curve_shape() {
    let s = settings(Currency::Eur, InterpolationMethod::Bessel, DataType::LogDf);
    let set = InstrumentSet::from_csv(&s, ois_file(Currency::Eur), None).unwrap();
    let mut curve = IrCurve::new("ESTR", s).unwrap();
    curve.bootstrap(set.instruments()).unwrap();

    assert_eq!(curve.n_pillars(), set.len() + 1);
    let dfs = curve.discount_factors(CurveQuery::AllPillars).unwrap();
    assert_eq!(dfs[0], 1.0);
    assert!(dfs.windows(2).all(|w| w[1] < w[0]));

    // Zero rates stay in the range of the quotes
    let zeros = curve.zero_rates(CurveQuery::AllPillars).unwrap();
    assert!(zeros[1..].iter().all(|&z| z > 0.025 && z < 0.04));

    // Flat extrapolation past the last pillar
    let last = *curve.pillar_times().last().unwrap();
    let fwd = curve
        .instantaneous_forwards(CurveQuery::Times(&[last + 1.0, last + 5.0]))
        .unwrap();
    assert!(fwd.iter().all(|f| f.is_finite()));
}

#[test]
fn test_synthetics_precede_market() {
    let s = settings(Currency::Eur, InterpolationMethod::Linear, DataType::Zero);
    let ois_set = InstrumentSet::from_csv(&s, ois_file(Currency::Eur), None).unwrap();
    let mut ois = IrCurve::new("ESTR", s.clone()).unwrap();
    ois.bootstrap(ois_set.instruments()).unwrap();

    let ibor_settings = s.with_synthetic_instruments(SyntheticInstruments::Ois);
    let set = InstrumentSet::from_csv(&ibor_settings, ibor_file(Currency::Eur), Some(&ois)).unwrap();

    // 1DY, 1WK, 2WK, 1MO, 2MO and 3MO fall before the 6MO deposit
    assert_eq!(set.n_synthetic(), 6);
    let first_market = set.market_instruments()[0].maturity_date();
    assert!(set
        .synthetic_instruments()
        .all(|s| s.maturity_date() < first_market));
}
