//! Calibration instruments.
//!
//! Market instruments carry a quote and price themselves against a curve
//! through [`MarketInstrument::fixing`], the fair rate implied by the
//! curve. Synthetic instruments carry a precomputed discount factor.
//!
//! # Available Instruments
//!
//! ## Money Market
//! - Deposit: simple rate from spot to maturity
//! - FRA: simple rate between two forward dates
//! - Future: as FRA, on third-Wednesday (IMM) dates
//!
//! ## Swaps
//! - IRS: fixed against a tenor floating leg, discounted off the
//!   curve's discount curve
//! - OIS: fixed against compounded overnight, yearly payments

mod deposit;
mod fra;
mod irs;
mod ois;
mod schedule;
mod synthetic;

pub use synthetic::SyntheticInstrument;

use serde::{Deserialize, Serialize};
use std::fmt;

use ratehike_core::calendars::{roll_date, roll_dates, BusinessDayConvention, RollRule};
use ratehike_core::daycounts::DayCountConvention;
use ratehike_core::{Date, Period, TimeUnit};

use crate::conventions::Currency;
use crate::curve::IrCurve;
use crate::error::{CurveError, CurveResult};
use crate::settings::CurveSettings;

/// Instrument type tag, as written in instrument files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentType {
    /// Money market deposit.
    Deposit,
    /// Forward rate agreement.
    Fra,
    /// Short-term interest rate future.
    Future,
    /// Interest rate swap against a tenor index.
    Irs,
    /// Overnight index swap.
    Ois,
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deposit => "deposit",
            Self::Fra => "fra",
            Self::Future => "future",
            Self::Irs => "irs",
            Self::Ois => "ois",
        };
        f.write_str(name)
    }
}

/// Type-specific dates of a market instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstrumentKind {
    /// Deposit from spot to maturity.
    Deposit,
    /// FRA accruing from `start` to maturity.
    Fra {
        /// Accrual start.
        start: Date,
    },
    /// Future accruing from `start` to maturity.
    Future {
        /// Accrual start (an IMM date).
        start: Date,
    },
    /// Interest rate swap.
    Irs {
        /// Floating leg tenor in months.
        tenor_months: u32,
        /// Fixed leg payment dates.
        fixed_schedule: Vec<Date>,
        /// Floating leg payment dates.
        float_schedule: Vec<Date>,
    },
    /// Overnight index swap.
    Ois {
        /// Payment dates.
        payment_schedule: Vec<Date>,
    },
}

/// Date generation terms shared by all market instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Terms {
    pub(crate) currency: Currency,
    pub(crate) today: Date,
    pub(crate) spot_date: Date,
    pub(crate) maturity: Period,
    pub(crate) roll_rule: RollRule,
    pub(crate) convention: BusinessDayConvention,
}

impl Terms {
    /// Spot date, roll rule and adjustment for an instrument of tenor
    /// `maturity` traded on the settings' valuation date.
    ///
    /// Month and year tenors roll end-of-month when spot is the last
    /// business day of its month. Futures always roll to IMM dates.
    fn new(settings: &CurveSettings, maturity: Period, imm: bool) -> CurveResult<Self> {
        if maturity.number <= 0 {
            return Err(CurveError::invalid_instrument(format!(
                "maturity must be positive, got {maturity}"
            )));
        }

        let currency = settings.currency;
        let today = settings.today_date;
        let spot_date = currency.spot_date(today)?;
        let next = currency.tomorrow(spot_date)?;

        let roll_rule = if imm {
            RollRule::ThirdWednesday
        } else if maturity.unit.is_monthly() && next.month() != spot_date.month() {
            RollRule::EndOfMonth
        } else {
            RollRule::Standard
        };

        Ok(Self {
            currency,
            today,
            spot_date,
            maturity,
            roll_rule,
            convention: BusinessDayConvention::for_unit(maturity.unit),
        })
    }

    /// `base + period`, rolled and adjusted.
    pub(crate) fn roll(&self, base: Date, period: Period) -> CurveResult<Date> {
        Ok(roll_date(
            self.currency.calendar(),
            base,
            period,
            self.roll_rule,
            self.convention,
        )?)
    }

    /// `base + k·period` for `k = 1..=length`, rolled and adjusted.
    pub(crate) fn roll_n(&self, base: Date, period: Period, length: usize) -> CurveResult<Vec<Date>> {
        Ok(roll_dates(
            self.currency.calendar(),
            base,
            period,
            length,
            self.roll_rule,
            self.convention,
        )?)
    }
}

/// An instrument with a market quote.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketInstrument {
    quote: f64,
    terms: Terms,
    maturity_date: Date,
    day_count: DayCountConvention,
    kind: InstrumentKind,
}

impl MarketInstrument {
    /// Deposit of tenor `maturity` starting at spot.
    pub fn deposit(settings: &CurveSettings, quote: f64, maturity: Period) -> CurveResult<Self> {
        let terms = Terms::new(settings, maturity, false)?;
        let maturity_date = terms.roll(terms.spot_date, maturity)?;
        Ok(Self {
            quote,
            maturity_date,
            day_count: terms.currency.money_market_day_count(),
            terms,
            kind: InstrumentKind::Deposit,
        })
    }

    /// FRA starting `start` after spot and accruing for `maturity`.
    pub fn fra(
        settings: &CurveSettings,
        quote: f64,
        start: Period,
        maturity: Period,
    ) -> CurveResult<Self> {
        let terms = Terms::new(settings, maturity, false)?;
        let (start_date, maturity_date) = fra::dates(&terms, terms.spot_date, start)?;
        Ok(Self {
            quote,
            maturity_date,
            day_count: terms.currency.money_market_day_count(),
            terms,
            kind: InstrumentKind::Fra { start: start_date },
        })
    }

    /// Future on the IMM dates `start` and `start + maturity` after today.
    pub fn future(
        settings: &CurveSettings,
        quote: f64,
        start: Period,
        maturity: Period,
    ) -> CurveResult<Self> {
        let terms = Terms::new(settings, maturity, true)?;
        let (start_date, maturity_date) = fra::dates(&terms, terms.today, start)?;
        Ok(Self {
            quote,
            maturity_date,
            day_count: terms.currency.money_market_day_count(),
            terms,
            kind: InstrumentKind::Future { start: start_date },
        })
    }

    /// Swap of tenor `maturity` against a `tenor_months` floating index.
    pub fn irs(
        settings: &CurveSettings,
        quote: f64,
        maturity: Period,
        tenor_months: u32,
    ) -> CurveResult<Self> {
        let terms = Terms::new(settings, maturity, false)?;
        let maturity_date = terms.roll(terms.spot_date, maturity)?;
        let float_schedule = schedule::tenor_schedule(&terms, tenor_months)?;
        let fixed_schedule = if terms.currency.yearly_fixed_leg() {
            schedule::yearly_schedule(&terms, maturity_date)?
        } else {
            float_schedule.clone()
        };
        Ok(Self {
            quote,
            maturity_date,
            day_count: terms.currency.swap_fixed_day_count(),
            terms,
            kind: InstrumentKind::Irs {
                tenor_months,
                fixed_schedule,
                float_schedule,
            },
        })
    }

    /// Overnight index swap of tenor `maturity`.
    pub fn ois(settings: &CurveSettings, quote: f64, maturity: Period) -> CurveResult<Self> {
        let terms = Terms::new(settings, maturity, false)?;
        let maturity_date = terms.roll(terms.spot_date, maturity)?;
        let payment_schedule = schedule::yearly_schedule(&terms, maturity_date)?;
        Ok(Self {
            quote,
            maturity_date,
            day_count: terms.currency.money_market_day_count(),
            terms,
            kind: InstrumentKind::Ois { payment_schedule },
        })
    }

    /// Builds an instrument from an instrument file row.
    pub fn from_record(record: &InstrumentRecord, settings: &CurveSettings) -> CurveResult<Self> {
        let maturity = Period::new(record.mat_no, record.mat_unit);
        match record.insttype {
            InstrumentType::Deposit => Self::deposit(settings, record.quote, maturity),
            InstrumentType::Fra => Self::fra(settings, record.quote, record.start()?, maturity),
            InstrumentType::Future => {
                Self::future(settings, record.quote, record.start()?, maturity)
            }
            InstrumentType::Irs => {
                let tenor = record.tenor_m.ok_or_else(|| {
                    CurveError::invalid_instrument(format!("irs {maturity} needs tenor_m"))
                })?;
                Self::irs(settings, record.quote, maturity, tenor)
            }
            InstrumentType::Ois => Self::ois(settings, record.quote, maturity),
        }
    }

    /// Fair rate of the instrument implied by `curve`.
    #[must_use]
    pub fn fixing(&self, curve: &IrCurve<'_>) -> f64 {
        match &self.kind {
            InstrumentKind::Deposit => deposit::fixing(self, curve),
            InstrumentKind::Fra { start } | InstrumentKind::Future { start } => {
                fra::fixing(self, *start, curve)
            }
            InstrumentKind::Irs {
                fixed_schedule,
                float_schedule,
                ..
            } => irs::fixing(self, fixed_schedule, float_schedule, curve),
            InstrumentKind::Ois { payment_schedule } => ois::fixing(self, payment_schedule, curve),
        }
    }

    /// Market quote.
    #[must_use]
    pub fn quote(&self) -> f64 {
        self.quote
    }

    /// Instrument type tag.
    #[must_use]
    pub fn instrument_type(&self) -> InstrumentType {
        match self.kind {
            InstrumentKind::Deposit => InstrumentType::Deposit,
            InstrumentKind::Fra { .. } => InstrumentType::Fra,
            InstrumentKind::Future { .. } => InstrumentType::Future,
            InstrumentKind::Irs { .. } => InstrumentType::Irs,
            InstrumentKind::Ois { .. } => InstrumentType::Ois,
        }
    }

    /// Type-specific dates.
    #[must_use]
    pub fn kind(&self) -> &InstrumentKind {
        &self.kind
    }

    /// Currency of the instrument.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.terms.currency
    }

    /// Trade date.
    #[must_use]
    pub fn today_date(&self) -> Date {
        self.terms.today
    }

    /// Spot date.
    #[must_use]
    pub fn spot_date(&self) -> Date {
        self.terms.spot_date
    }

    /// `spot + period` under the instrument's own calendar and rolling
    /// conventions.
    pub(crate) fn roll_from_spot(&self, period: Period) -> CurveResult<Date> {
        self.terms.roll(self.terms.spot_date, period)
    }

    /// Accrual start: spot, or the forward start for FRAs and futures.
    #[must_use]
    pub fn start_date(&self) -> Date {
        match self.kind {
            InstrumentKind::Fra { start } | InstrumentKind::Future { start } => start,
            _ => self.terms.spot_date,
        }
    }

    /// Final payment date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Quoted tenor.
    #[must_use]
    pub fn maturity(&self) -> Period {
        self.terms.maturity
    }

    /// Day count of the quoted rate.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Date roll rule.
    #[must_use]
    pub fn roll_rule(&self) -> RollRule {
        self.terms.roll_rule
    }

    /// Business day convention.
    #[must_use]
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.terms.convention
    }
}

impl fmt::Display for MarketInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.instrument_type(), self.terms.maturity, self.maturity_date)
    }
}

/// A calibration instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    /// Quoted instrument solved by root search.
    Market(MarketInstrument),
    /// Precomputed discount factor.
    Synthetic(SyntheticInstrument),
}

impl Instrument {
    /// Date of the pillar the instrument calibrates.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        match self {
            Instrument::Market(m) => m.maturity_date(),
            Instrument::Synthetic(s) => s.maturity_date(),
        }
    }

    /// The market instrument, if this is one.
    #[must_use]
    pub fn as_market(&self) -> Option<&MarketInstrument> {
        match self {
            Instrument::Market(m) => Some(m),
            Instrument::Synthetic(_) => None,
        }
    }

    /// Whether the instrument is synthetic.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Instrument::Synthetic(_))
    }
}

impl From<MarketInstrument> for Instrument {
    fn from(instrument: MarketInstrument) -> Self {
        Instrument::Market(instrument)
    }
}

impl From<SyntheticInstrument> for Instrument {
    fn from(instrument: SyntheticInstrument) -> Self {
        Instrument::Synthetic(instrument)
    }
}

/// One row of an instrument file.
///
/// Columns: `quote,mat_no,mat_unit,insttype,start_no,start_unit,tenor_m`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Market quote as a decimal rate.
    pub quote: f64,
    /// Maturity tenor count.
    pub mat_no: i32,
    /// Maturity tenor unit.
    pub mat_unit: TimeUnit,
    /// Instrument type.
    pub insttype: InstrumentType,
    /// Forward start count (FRA, future).
    #[serde(default)]
    pub start_no: Option<i32>,
    /// Forward start unit (FRA, future).
    #[serde(default)]
    pub start_unit: Option<TimeUnit>,
    /// Floating tenor in months (IRS).
    #[serde(default)]
    pub tenor_m: Option<u32>,
}

impl InstrumentRecord {
    fn start(&self) -> CurveResult<Period> {
        match (self.start_no, self.start_unit) {
            (Some(number), Some(unit)) => Ok(Period::new(number, unit)),
            _ => Err(CurveError::invalid_instrument(format!(
                "{} {}{} needs start_no and start_unit",
                self.insttype,
                self.mat_no,
                self.mat_unit.code()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn eur() -> CurveSettings {
        CurveSettings::new(Currency::Eur, ymd(2023, 7, 6))
    }

    #[test]
    fn test_deposit_dates() {
        let depo = MarketInstrument::deposit(&eur(), 0.034, Period::days(1)).unwrap();
        assert_eq!(depo.spot_date(), ymd(2023, 7, 10));
        assert_eq!(depo.maturity_date(), ymd(2023, 7, 11));
        assert_eq!(depo.business_day_convention(), BusinessDayConvention::Following);
        assert_eq!(depo.day_count(), DayCountConvention::Act360);

        let depo = MarketInstrument::deposit(&eur(), 0.0395, Period::months(6)).unwrap();
        assert_eq!(depo.maturity_date(), ymd(2024, 1, 10));
        assert_eq!(depo.roll_rule(), RollRule::Standard);
    }

    #[test]
    fn test_end_of_month_roll() {
        // Spot on Friday 2023-06-30, the last business day of June
        let settings = CurveSettings::new(Currency::Eur, ymd(2023, 6, 28));
        let depo = MarketInstrument::deposit(&settings, 0.03, Period::months(1)).unwrap();
        assert_eq!(depo.spot_date(), ymd(2023, 6, 30));
        assert_eq!(depo.roll_rule(), RollRule::EndOfMonth);
        assert_eq!(depo.maturity_date(), ymd(2023, 7, 31));

        // Week tenors ignore the end-of-month rule
        let depo = MarketInstrument::deposit(&settings, 0.03, Period::weeks(1)).unwrap();
        assert_eq!(depo.roll_rule(), RollRule::Standard);
    }

    #[test]
    fn test_fra_dates() {
        let fra = MarketInstrument::fra(&eur(), 0.0405, Period::months(6), Period::months(6)).unwrap();
        assert_eq!(fra.start_date(), ymd(2024, 1, 10));
        assert_eq!(fra.maturity_date(), ymd(2024, 7, 10));
    }

    #[test]
    fn test_future_on_imm_dates() {
        let future =
            MarketInstrument::future(&eur(), 0.0398, Period::months(3), Period::months(3)).unwrap();
        assert_eq!(future.start_date(), ymd(2023, 10, 18));
        assert_eq!(future.maturity_date(), ymd(2024, 1, 17));
    }

    #[test]
    fn test_fra_mixed_units_rejected() {
        let result = MarketInstrument::fra(&eur(), 0.04, Period::weeks(2), Period::months(3));
        assert!(matches!(result, Err(CurveError::Core(_))));
    }

    #[test]
    fn test_eur_irs_schedules() {
        let irs = MarketInstrument::irs(&eur(), 0.038, Period::years(2), 6).unwrap();
        assert_eq!(irs.day_count(), DayCountConvention::Thirty360E);
        match irs.kind() {
            InstrumentKind::Irs {
                fixed_schedule,
                float_schedule,
                tenor_months,
            } => {
                assert_eq!(*tenor_months, 6);
                assert_eq!(fixed_schedule, &vec![ymd(2024, 7, 10), ymd(2025, 7, 10)]);
                assert_eq!(float_schedule.len(), 4);
                assert_eq!(float_schedule[0], ymd(2024, 1, 10));
                assert_eq!(float_schedule.last(), Some(&irs.maturity_date()));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_gbp_irs_fixed_on_float_schedule() {
        let settings = CurveSettings::new(Currency::Gbp, ymd(2023, 7, 6));
        let irs = MarketInstrument::irs(&settings, 0.05, Period::years(2), 6).unwrap();
        assert_eq!(irs.spot_date(), ymd(2023, 7, 6));
        match irs.kind() {
            InstrumentKind::Irs {
                fixed_schedule,
                float_schedule,
                ..
            } => assert_eq!(fixed_schedule, float_schedule),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_from_record_requires_fields() {
        let record = InstrumentRecord {
            quote: 0.04,
            mat_no: 6,
            mat_unit: TimeUnit::Months,
            insttype: InstrumentType::Fra,
            start_no: None,
            start_unit: None,
            tenor_m: None,
        };
        assert!(matches!(
            MarketInstrument::from_record(&record, &eur()),
            Err(CurveError::InvalidInstrument { .. })
        ));

        let record = InstrumentRecord {
            insttype: InstrumentType::Irs,
            mat_no: 5,
            mat_unit: TimeUnit::Years,
            ..record
        };
        assert!(matches!(
            MarketInstrument::from_record(&record, &eur()),
            Err(CurveError::InvalidInstrument { .. })
        ));
    }

    #[test]
    fn test_display() {
        let ois = MarketInstrument::ois(&eur(), 0.035, Period::years(10)).unwrap();
        assert!(ois.to_string().starts_with("ois 10YR"));
    }
}
