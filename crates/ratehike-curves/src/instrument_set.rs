//! Instrument lists loaded from CSV, with optional synthetic short end.
//!
//! An IBOR curve's first market instrument usually matures months after
//! spot. OIS synthetics fill that gap with pillars at the discount curve's
//! short pillar dates: the discount curve's zero rates, tilted linearly so
//! that they meet the IBOR curve's first zero rate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::curve::{CurveQuery, IrCurve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Instrument, InstrumentRecord, MarketInstrument, SyntheticInstrument};
use crate::settings::CurveSettings;

/// Synthetic instruments added in front of the market instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SyntheticInstruments {
    /// None.
    #[default]
    #[serde(rename = "no")]
    No,
    /// Short-end pillars interpolated off an OIS discount curve.
    #[serde(rename = "OIS")]
    Ois,
}

impl fmt::Display for SyntheticInstruments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntheticInstruments::No => f.write_str("no"),
            SyntheticInstruments::Ois => f.write_str("OIS"),
        }
    }
}

/// Calibration instruments: synthetics first, then market instruments in
/// file order.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentSet {
    instruments: Vec<Instrument>,
    n_synthetic: usize,
}

impl InstrumentSet {
    /// Reads instruments from a CSV file.
    pub fn from_csv(
        settings: &CurveSettings,
        path: impl AsRef<Path>,
        discount_curve: Option<&IrCurve<'_>>,
    ) -> CurveResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(settings, file, discount_curve)
    }

    /// Reads instruments from CSV text.
    pub fn from_reader<R: Read>(
        settings: &CurveSettings,
        reader: R,
        discount_curve: Option<&IrCurve<'_>>,
    ) -> CurveResult<Self> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = csv
            .deserialize::<InstrumentRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(settings, &records, discount_curve)
    }

    /// Builds instruments from parsed rows.
    pub fn from_records(
        settings: &CurveSettings,
        records: &[InstrumentRecord],
        discount_curve: Option<&IrCurve<'_>>,
    ) -> CurveResult<Self> {
        let market = records
            .iter()
            .map(|record| MarketInstrument::from_record(record, settings))
            .collect::<CurveResult<Vec<_>>>()?;
        Self::from_market(settings, market, discount_curve)
    }

    /// Adds the configured synthetics to market instruments.
    pub fn from_market(
        settings: &CurveSettings,
        market: Vec<MarketInstrument>,
        discount_curve: Option<&IrCurve<'_>>,
    ) -> CurveResult<Self> {
        if market.is_empty() {
            return Err(CurveError::EmptyInstrumentSet);
        }

        let synthetics = match settings.synthetic_instruments {
            SyntheticInstruments::No => Vec::new(),
            SyntheticInstruments::Ois => {
                let discount = discount_curve.ok_or_else(|| CurveError::MissingDiscountCurve {
                    kind: SyntheticInstruments::Ois.to_string(),
                })?;
                ois_synthetics(settings, &market[0], discount)?
            }
        };

        let n_synthetic = synthetics.len();
        let instruments = synthetics
            .into_iter()
            .map(Instrument::Synthetic)
            .chain(market.into_iter().map(Instrument::Market))
            .collect();
        Ok(Self {
            instruments,
            n_synthetic,
        })
    }

    /// All instruments in calibration order.
    #[must_use]
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// The synthetic instruments.
    #[must_use]
    pub fn synthetic_instruments(&self) -> impl Iterator<Item = &SyntheticInstrument> {
        self.instruments.iter().filter_map(|inst| match inst {
            Instrument::Synthetic(s) => Some(s),
            Instrument::Market(_) => None,
        })
    }

    /// The market instruments in file order.
    #[must_use]
    pub fn market_instruments(&self) -> Vec<&MarketInstrument> {
        self.instruments[self.n_synthetic..]
            .iter()
            .filter_map(Instrument::as_market)
            .collect()
    }

    /// Number of synthetic instruments.
    #[must_use]
    pub fn n_synthetic(&self) -> usize {
        self.n_synthetic
    }

    /// Total number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the set holds no instruments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Synthetic pillars at the discount curve's pillar times before the
/// first market maturity.
fn ois_synthetics(
    settings: &CurveSettings,
    first: &MarketInstrument,
    discount: &IrCurve<'_>,
) -> CurveResult<Vec<SyntheticInstrument>> {
    let mut aux = IrCurve::new("AUX", settings.clone())?;
    aux.bootstrap(&[Instrument::Market(first.clone())])?;
    let zero_first = aux.zero_rates(CurveQuery::Pillars(&[1]))?[0];
    let t_first = aux.pillar_time(1);

    let stub_times: Vec<f64> = discount
        .pillar_times()
        .iter()
        .skip(1)
        .copied()
        .filter(|&t| t < t_first)
        .collect();
    let discount_rates = discount.zero_rates(CurveQuery::Times(&stub_times))?;
    let discount_at_first = discount.zero_rates(CurveQuery::Times(&[t_first]))?[0];
    let tilt = (zero_first - discount_at_first) / t_first;

    let synthetics: Vec<SyntheticInstrument> = stub_times
        .iter()
        .zip(&discount_rates)
        .zip(discount.dates(&stub_times))
        .map(|((&t, &rate), date)| {
            let stub_rate = rate + tilt * t;
            let tau = aux.year_fraction(date);
            SyntheticInstrument::new((-stub_rate * tau).exp(), date)
        })
        .collect();

    tracing::debug!(
        count = synthetics.len(),
        first_maturity = %first.maturity_date(),
        "OIS synthetic instruments generated"
    );
    Ok(synthetics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::Currency;
    use crate::instruments::InstrumentType;
    use ratehike_core::Date;

    const OIS_CSV: &str = "\
quote,mat_no,mat_unit,insttype,start_no,start_unit,tenor_m
0.0340,1,DY,deposit,,,
0.0345,1,WK,ois,,,
0.0350,1,MO,ois,,,
0.0360,3,MO,ois,,,
0.0370,6,MO,ois,,,
0.0375,1,YR,ois,,,
";

    const IBOR_CSV: &str = "\
quote,mat_no,mat_unit,insttype,start_no,start_unit,tenor_m
0.0395,6,MO,deposit,,,
0.0405,6,MO,fra,6,MO,
0.0390,2,YR,irs,,,6
";

    fn settings() -> CurveSettings {
        CurveSettings::new(Currency::Eur, Date::from_ymd(2023, 7, 6).unwrap())
    }

    #[test]
    fn test_read_csv() {
        let set = InstrumentSet::from_reader(&settings(), OIS_CSV.as_bytes(), None).unwrap();
        assert_eq!(set.len(), 6);
        assert_eq!(set.n_synthetic(), 0);
        let market = set.market_instruments();
        assert_eq!(market[0].instrument_type(), InstrumentType::Deposit);
        assert_eq!(market[5].quote(), 0.0375);
    }

    #[test]
    fn test_empty_file() {
        let header = "quote,mat_no,mat_unit,insttype,start_no,start_unit,tenor_m\n";
        assert!(matches!(
            InstrumentSet::from_reader(&settings(), header.as_bytes(), None),
            Err(CurveError::EmptyInstrumentSet)
        ));
    }

    #[test]
    fn test_unknown_type() {
        let text = "quote,mat_no,mat_unit,insttype,start_no,start_unit,tenor_m\n0.01,1,YR,swap,,,\n";
        assert!(matches!(
            InstrumentSet::from_reader(&settings(), text.as_bytes(), None),
            Err(CurveError::Csv(_))
        ));
    }

    #[test]
    fn test_synthetics_need_discount_curve() {
        let s = settings().with_synthetic_instruments(SyntheticInstruments::Ois);
        assert!(matches!(
            InstrumentSet::from_reader(&s, IBOR_CSV.as_bytes(), None),
            Err(CurveError::MissingDiscountCurve { .. })
        ));
    }

    #[test]
    fn test_ois_synthetics() {
        let ois_set = InstrumentSet::from_reader(&settings(), OIS_CSV.as_bytes(), None).unwrap();
        let mut ois = IrCurve::new("ESTR", settings()).unwrap();
        ois.bootstrap(ois_set.instruments()).unwrap();

        let s = settings().with_synthetic_instruments(SyntheticInstruments::Ois);
        let set = InstrumentSet::from_reader(&s, IBOR_CSV.as_bytes(), Some(&ois)).unwrap();

        // 1DY, 1WK, 1MO and 3MO pillars precede the 6MO deposit
        assert_eq!(set.n_synthetic(), 4);
        assert_eq!(set.len(), 7);
        assert!(set.instruments()[..4].iter().all(Instrument::is_synthetic));
        assert_eq!(set.market_instruments().len(), 3);

        let dates: Vec<Date> = set.synthetic_instruments().map(|s| s.maturity_date()).collect();
        assert_eq!(dates, ois.dates(&ois.pillar_times()[1..5]));
        assert!(set
            .synthetic_instruments()
            .all(|s| s.discount_factor() < 1.0 && s.discount_factor() > 0.98));
    }
}
