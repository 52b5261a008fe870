// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::date;

use crate::{IngestError, RowErrorKind, parse_historical, parse_monthly};

#[test]
fn parses_a_monthly_file() {
    let csv = "RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n\
               MAR,Maricopa,011,Restaurants and Bars,0.5\n\
               PX,Phoenix,011,Restaurants and Bars,2.3\n";
    let parsed = parse_monthly(csv.as_bytes()).expect("Parse should succeed");

    assert_eq!(parsed.rows.len(), 2);
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.rows[0].region_code, "MAR");
    assert_eq!(parsed.rows[0].business_name, "Restaurants and Bars");
    assert!((parsed.rows[0].rate - 0.5).abs() < 1e-9);
    // 2.3 reads as a percentage and is divided down.
    assert!((parsed.rows[1].rate - 0.023).abs() < 1e-9);
}

#[test]
fn strips_utf8_bom_from_first_header() {
    let csv = "\u{feff}RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n\
               PX,Phoenix,017,Retail,1.8\n";
    let parsed = parse_monthly(csv.as_bytes()).expect("Parse should succeed");
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].region_code, "PX");
}

#[test]
fn missing_required_column_is_fatal() {
    let csv = "RegionCode,RegionName,TaxRate\nPX,Phoenix,1.8\n";
    let result = parse_monthly(csv.as_bytes());
    match result {
        Err(IngestError::MissingHeaders(missing)) => {
            assert_eq!(missing, vec!["BusinessCode", "BusinessCodesName"]);
        }
        other => panic!("Expected MissingHeaders, got {other:?}"),
    }
}

#[test]
fn rows_without_keys_are_recorded_not_fatal() {
    let csv = "RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n\
               ,Phoenix,011,Restaurants,1.8\n\
               PX,Phoenix,,Restaurants,1.8\n\
               PX,Phoenix,011,Restaurants,1.8\n";
    let parsed = parse_monthly(csv.as_bytes()).expect("Parse should succeed");

    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.errors.len(), 2);
    assert_eq!(parsed.errors[0].row, 2);
    assert_eq!(parsed.errors[0].kind, RowErrorKind::MissingRegionCode);
    assert_eq!(parsed.errors[1].row, 3);
    assert_eq!(parsed.errors[1].kind, RowErrorKind::MissingBusinessCode);
}

#[test]
fn rows_with_unparseable_rates_are_recorded_not_fatal() {
    let csv = "RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n\
               PX,Phoenix,011,Restaurants,n/a\n\
               PX,Phoenix,017,Retail,\n\
               PX,Phoenix,029,Use Tax,1.8\n";
    let parsed = parse_monthly(csv.as_bytes()).expect("Parse should succeed");

    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].business_code, "029");
    assert_eq!(parsed.errors.len(), 2);
    assert_eq!(
        parsed.errors[0].kind,
        RowErrorKind::UnparseableRate("n/a".to_string())
    );
    assert_eq!(
        parsed.errors[1].kind,
        RowErrorKind::UnparseableRate(String::new())
    );
}

#[test]
fn one_bad_rate_among_many_rows_rejects_only_that_row() {
    let mut csv = String::from("RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n");
    for code in 0..99 {
        csv.push_str(&format!("PX,Phoenix,{code:03},Retail,1.8\n"));
    }
    csv.push_str("PX,Phoenix,099,Retail,\n");
    let parsed = parse_monthly(csv.as_bytes()).expect("Parse should succeed");

    assert_eq!(parsed.rows.len(), 99);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].row, 101);
}

#[test]
fn malformed_records_are_recorded_not_fatal() {
    let mut csv: Vec<u8> =
        b"RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n".to_vec();
    csv.extend_from_slice(b"PX,Pho\xff\xfeenix,011,Restaurants,1.8\n");
    csv.extend_from_slice(b"MAR,Maricopa,011,Restaurants,2.0\n");
    let parsed = parse_monthly(csv.as_slice()).expect("Parse should succeed");

    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].region_code, "MAR");
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].row, 2);
    assert!(matches!(
        parsed.errors[0].kind,
        RowErrorKind::MalformedRecord(_)
    ));
}

#[test]
fn fields_are_trimmed() {
    let csv = "RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n\
               \" PX \",\" Phoenix \",\" 011 \",\" Retail \", 1.8 \n";
    let parsed = parse_monthly(csv.as_bytes()).expect("Parse should succeed");
    assert_eq!(parsed.rows[0].region_code, "PX");
    assert_eq!(parsed.rows[0].business_code, "011");
    assert_eq!(parsed.rows[0].business_name, "Retail");
    assert!((parsed.rows[0].rate - 0.018).abs() < 1e-9);
}

#[test]
fn parses_a_historical_file_with_mixed_date_formats() {
    let csv = "RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate,RateStartDate\n\
               MAR,Maricopa,011,Restaurants,0.5,1/1/2021\n\
               MAR,Maricopa,017,Retail,0.5,01/01/2021 0:00\n\
               MAR,Maricopa,029,Use Tax,0.5,2021-07-01\n";
    let parsed = parse_historical(csv.as_bytes()).expect("Parse should succeed");

    assert_eq!(parsed.rows.len(), 3);
    assert_eq!(parsed.rows[0].start_date, date!(2021 - 01 - 01));
    assert_eq!(parsed.rows[1].start_date, date!(2021 - 01 - 01));
    assert_eq!(parsed.rows[2].start_date, date!(2021 - 07 - 01));
}

#[test]
fn historical_rows_with_bad_dates_are_recorded() {
    let csv = "RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate,RateStartDate\n\
               MAR,Maricopa,011,Restaurants,0.5,not-a-date\n\
               MAR,Maricopa,017,Retail,0.5,1/1/2021\n";
    let parsed = parse_historical(csv.as_bytes()).expect("Parse should succeed");

    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(
        parsed.errors[0].kind,
        RowErrorKind::UnparseableDate("not-a-date".to_string())
    );
}

#[test]
fn historical_file_requires_start_date_column() {
    let csv = "RegionCode,RegionName,BusinessCode,BusinessCodesName,TaxRate\n\
               MAR,Maricopa,011,Restaurants,0.5\n";
    let result = parse_historical(csv.as_bytes());
    assert!(matches!(result, Err(IngestError::MissingHeaders(_))));
}
