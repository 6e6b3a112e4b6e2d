use std::io::Write;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use strata_config::{
    IndicatorConfig, IndicatorKind, KairiConfig, KalmanConfig, SmaConfig, Study, StudyConfig,
    StudyError,
};
use strata_core::{Candle, Field, Frame};
use strata_indicators::IndicatorError;

fn candles(count: i64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let close = Decimal::from(100 + (i % 7) * 2 - (i % 4));
            Candle {
                timestamp: start + Duration::hours(i),
                open: close - Decimal::ONE,
                high: close + Decimal::TWO,
                low: close - Decimal::TWO,
                close,
                volume: Decimal::from(1_000 + i * 10),
            }
        })
        .collect()
}

fn frame(count: i64) -> Frame {
    Frame::from_candles(&candles(count)).unwrap()
}

fn sma(period: usize) -> IndicatorConfig {
    IndicatorKind::Sma(SmaConfig {
        period,
        ..Default::default()
    })
    .into()
}

#[test]
fn appends_columns_aligned_with_the_frame() {
    let mut frame = frame(80);
    let config = StudyConfig::from_toml_str(
        r#"
        [[indicators]]
        kind = "sma"
        period = 3

        [[indicators]]
        kind = "bollinger"

        [[indicators]]
        kind = "adx"

        [[indicators]]
        kind = "ichimoku"

        [[indicators]]
        kind = "supertrend"
        prefix = "st_"
        "#,
    )
    .unwrap();
    Study::from(config).apply(&mut frame).unwrap();

    for name in [
        "SMA_3",
        "upper_band",
        "lower_band",
        "TR",
        "DM+",
        "DM-",
        "DI+",
        "DI-",
        "DX",
        "ADX",
        "Conversion_Line",
        "Base_Line",
        "Lead_Line1",
        "Lead_Line2",
        "st_ATR",
        "st_supertrend",
    ] {
        assert_eq!(frame.column(name).unwrap().len(), 80, "{name}");
    }

    let closes = frame.field(Field::Close).unwrap().to_vec();
    let sma = frame.column("SMA_3").unwrap();
    assert_eq!(sma[1], None);
    let expected = (closes[0].unwrap() + closes[1].unwrap() + closes[2].unwrap()) / Decimal::from(3);
    assert_eq!(sma[2], Some(expected));

    let adx = frame.column("ADX").unwrap();
    assert_eq!(adx.iter().position(Option::is_some), Some(26));
    let base = frame.column("Base_Line").unwrap();
    assert_eq!(base.iter().position(Option::is_some), Some(25));
}

#[test]
fn failing_entry_writes_nothing_of_its_own() {
    let mut frame = frame(10);
    let study = Study::new(vec![sma(3), sma(0)]);
    let err = study.apply(&mut frame).unwrap_err();
    match err {
        StudyError::Indicator { index, kind, source } => {
            assert_eq!(index, 1);
            assert_eq!(kind, "sma");
            assert!(matches!(source, IndicatorError::InvalidPeriod { period: 0, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(frame.contains("SMA_3"));
    assert!(!frame.contains("SMA_0"));
}

#[test]
fn missing_columns_fail_before_evaluation() {
    let source = frame(5);
    let mut frame = Frame::new(source.timestamps().to_vec()).unwrap();
    for field in [Field::Open, Field::High, Field::Low, Field::Close] {
        frame
            .insert(field.as_str(), source.field(field).unwrap().to_vec())
            .unwrap();
    }

    let study = Study::new(vec![IndicatorKind::Obv.into()]);
    let err = study.apply(&mut frame).unwrap_err();
    assert!(matches!(
        err,
        StudyError::Indicator {
            source: IndicatorError::MissingColumn(ref column),
            ..
        } if column == "volume"
    ));
    assert!(!frame.contains("OBV"));
}

#[test]
fn heikin_ashi_sources_are_derived_when_absent() {
    let kairi: IndicatorConfig = IndicatorKind::Kairi(KairiConfig {
        period: 5,
        ..Default::default()
    })
    .into();

    let mut explicit = frame(30);
    Study::new(vec![IndicatorKind::HeikinAshi.into(), kairi.clone()])
        .apply(&mut explicit)
        .unwrap();

    let mut derived = frame(30);
    Study::new(vec![kairi]).apply(&mut derived).unwrap();

    assert!(explicit.contains("ha_close"));
    assert!(!derived.contains("ha_close"));
    assert_eq!(explicit.column("KRI").unwrap(), derived.column("KRI").unwrap());
    assert_eq!(
        derived.column("KRI").unwrap().iter().position(Option::is_some),
        Some(4)
    );
}

#[test]
fn missing_cells_restart_windows_but_not_recursive_averages() {
    let mut frame = frame(10);
    let mut closes = frame.field(Field::Close).unwrap().to_vec();
    closes[4] = None;
    frame.insert(Field::Close.as_str(), closes.clone()).unwrap();

    let study = Study::new(vec![
        sma(3),
        IndicatorKind::Ema(Default::default()).into(),
    ]);
    study.apply(&mut frame).unwrap();

    let sma = frame.column("SMA_3").unwrap();
    assert!(sma[2].is_some() && sma[3].is_some());
    assert!(sma[4..7].iter().all(Option::is_none));
    let expected = (closes[5].unwrap() + closes[6].unwrap() + closes[7].unwrap()) / Decimal::from(3);
    assert_eq!(sma[7], Some(expected));

    let ema = frame.column("EMA_20").unwrap();
    assert_eq!(ema[4], None);
    assert!(ema[5].is_some());
}

#[test]
fn single_column_entries_can_be_renamed() {
    let mut frame = frame(12);
    let kalman = IndicatorConfig::from(IndicatorKind::Kalman(KalmanConfig::default()))
        .with_name("smooth");
    Study::new(vec![kalman]).apply(&mut frame).unwrap();
    assert!(frame.contains("smooth"));
    assert!(!frame.contains("smoothed_close"));
    assert!(frame.column("smooth").unwrap().iter().all(Option::is_some));
}

#[test]
fn later_entries_overwrite_earlier_columns() {
    let mut frame = frame(40);
    let study = Study::new(vec![
        IndicatorKind::Bollinger(Default::default()).into(),
        IndicatorKind::Supertrend(Default::default()).into(),
    ]);
    study.apply(&mut frame).unwrap();
    // supertrend bands are defined from row 9, bollinger bands from row 19
    let upper = frame.column("upper_band").unwrap();
    assert_eq!(upper.iter().position(Option::is_some), Some(9));
}

#[test]
fn loads_study_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[indicators]]
kind = "bollinger"
period = 10
std_multiplier = 2.5

[[indicators]]
kind = "kalman"
process_variance = 0.5
source = "open"

[[indicators]]
kind = "rsi"
smoothing = "wilder"
"#
    )
    .unwrap();

    let config = StudyConfig::load(file.path()).unwrap();
    assert_eq!(config.indicators.len(), 3);
    match &config.indicators[0].kind {
        IndicatorKind::Bollinger(cfg) => {
            assert_eq!(cfg.period, 10);
            assert_eq!(cfg.std_multiplier, Decimal::new(25, 1));
        }
        other => panic!("unexpected entry: {other:?}"),
    }
    match &config.indicators[1].kind {
        IndicatorKind::Kalman(cfg) => {
            assert_eq!(cfg.process_variance, Decimal::new(5, 1));
            assert_eq!(cfg.measurement_variance, Decimal::ONE);
            assert_eq!(cfg.source, Field::Open);
        }
        other => panic!("unexpected entry: {other:?}"),
    }

    let mut frame = frame(20);
    Study::from(config).apply(&mut frame).unwrap();
    assert!(frame.contains("smoothed_open"));
    assert!(frame.contains("RSI"));
}

#[test]
fn missing_study_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = StudyConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
