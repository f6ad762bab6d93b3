//! Golden tests for the reconstitution engine.
//!
//! These tests verify computed draws against known worked examples.

use peptide_dose_core::engine::compute;
use peptide_dose_core::format::format_number;
use peptide_dose_core::models::{CalculatorInputs, DoseUnit, DoseWarning, RoundingPrecision};

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    vial_mg: &'static str,
    diluent_ml: &'static str,
    dose: &'static str,
    unit: DoseUnit,
    rounding: Option<RoundingPrecision>,
    expected_concentration: f64,
    expected_volume_ml: f64,
    expected_units_rounded: f64,
    expected_actual_mcg: f64,
    expected_warnings: &'static [DoseWarning],
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "default-5mg-1ml-250mcg",
            vial_mg: "5",
            diluent_ml: "1",
            dose: "250",
            unit: DoseUnit::Mcg,
            rounding: None,
            expected_concentration: 5.0,
            expected_volume_ml: 0.05,
            expected_units_rounded: 5.0,
            expected_actual_mcg: 250.0,
            expected_warnings: &[],
        },
        GoldenCase {
            id: "half-step-rounds-up",
            vial_mg: "10",
            diluent_ml: "2",
            dose: "125",
            unit: DoseUnit::Mcg,
            rounding: Some(RoundingPrecision::One),
            expected_concentration: 5.0,
            expected_volume_ml: 0.025,
            expected_units_rounded: 3.0,
            expected_actual_mcg: 150.0,
            expected_warnings: &[],
        },
        GoldenCase {
            id: "10mg-2ml-500mcg-rounded",
            vial_mg: "10",
            diluent_ml: "2",
            dose: "500",
            unit: DoseUnit::Mcg,
            rounding: Some(RoundingPrecision::One),
            expected_concentration: 5.0,
            expected_volume_ml: 0.1,
            expected_units_rounded: 10.0,
            expected_actual_mcg: 500.0,
            expected_warnings: &[],
        },
        GoldenCase {
            id: "dose-exceeds-vial",
            vial_mg: "5",
            diluent_ml: "1",
            dose: "6",
            unit: DoseUnit::Mg,
            rounding: None,
            expected_concentration: 5.0,
            expected_volume_ml: 1.2,
            expected_units_rounded: 120.0,
            expected_actual_mcg: 6000.0,
            expected_warnings: &[DoseWarning::ExceedsVial],
        },
        GoldenCase {
            id: "dose-equals-vial",
            vial_mg: "5",
            diluent_ml: "1",
            dose: "5",
            unit: DoseUnit::Mg,
            rounding: None,
            expected_concentration: 5.0,
            expected_volume_ml: 1.0,
            expected_units_rounded: 100.0,
            expected_actual_mcg: 5000.0,
            expected_warnings: &[],
        },
        GoldenCase {
            id: "volume-at-practical-minimum",
            vial_mg: "10",
            diluent_ml: "1",
            dose: "200",
            unit: DoseUnit::Mcg,
            rounding: None,
            expected_concentration: 10.0,
            expected_volume_ml: 0.02,
            expected_units_rounded: 2.0,
            expected_actual_mcg: 200.0,
            expected_warnings: &[],
        },
        GoldenCase {
            id: "volume-too-small",
            vial_mg: "10",
            diluent_ml: "5",
            dose: "1",
            unit: DoseUnit::Mcg,
            rounding: None,
            expected_concentration: 2.0,
            expected_volume_ml: 0.0005,
            expected_units_rounded: 0.05,
            expected_actual_mcg: 1.0,
            expected_warnings: &[DoseWarning::VolumeTooSmall],
        },
        GoldenCase {
            id: "small-volume-rounded-to-zero",
            vial_mg: "10",
            diluent_ml: "5",
            dose: "1",
            unit: DoseUnit::Mcg,
            rounding: Some(RoundingPrecision::Half),
            expected_concentration: 2.0,
            expected_volume_ml: 0.0005,
            expected_units_rounded: 0.0,
            expected_actual_mcg: 0.0,
            expected_warnings: &[DoseWarning::VolumeTooSmall],
        },
        GoldenCase {
            id: "15mg-3ml-2.5mg-half-units",
            vial_mg: "15",
            diluent_ml: "3",
            dose: "2.5",
            unit: DoseUnit::Mg,
            rounding: Some(RoundingPrecision::Half),
            expected_concentration: 5.0,
            expected_volume_ml: 0.5,
            expected_units_rounded: 50.0,
            expected_actual_mcg: 2500.0,
            expected_warnings: &[],
        },
        GoldenCase {
            id: "typed-units-suffix-ignored",
            vial_mg: "5mg",
            diluent_ml: " 2",
            dose: "100mcg",
            unit: DoseUnit::Mcg,
            rounding: None,
            expected_concentration: 2.5,
            expected_volume_ml: 0.04,
            expected_units_rounded: 4.0,
            expected_actual_mcg: 100.0,
            expected_warnings: &[],
        },
    ]
}

fn build_inputs(case: &GoldenCase) -> CalculatorInputs {
    let mut inputs = CalculatorInputs {
        vial_amount: case.vial_mg.into(),
        diluent_volume: case.diluent_ml.into(),
        target_dose: case.dose.into(),
        dose_unit: case.unit,
        ..Default::default()
    };
    if let Some(precision) = case.rounding {
        inputs = inputs.with_rounding(precision);
    }
    inputs
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

#[test]
fn test_golden_cases() {
    let cases = get_golden_cases();
    let mut failures = Vec::new();

    for case in &cases {
        let result = compute(&build_inputs(case));

        if !result.is_valid {
            failures.push(format!("{}: result not valid", case.id));
            continue;
        }
        if !close(result.concentration_mg_per_ml, case.expected_concentration) {
            failures.push(format!(
                "{}: concentration expected {}, got {}",
                case.id, case.expected_concentration, result.concentration_mg_per_ml
            ));
        }
        if !close(result.volume_ml, case.expected_volume_ml) {
            failures.push(format!(
                "{}: volume expected {}, got {}",
                case.id, case.expected_volume_ml, result.volume_ml
            ));
        }
        if !close(result.units_u100_rounded, case.expected_units_rounded) {
            failures.push(format!(
                "{}: units expected {}, got {}",
                case.id, case.expected_units_rounded, result.units_u100_rounded
            ));
        }
        if (result.actual_dose_mcg - case.expected_actual_mcg).abs() > 1e-6 {
            failures.push(format!(
                "{}: actual dose expected {} mcg, got {}",
                case.id, case.expected_actual_mcg, result.actual_dose_mcg
            ));
        }
        if result.warnings() != case.expected_warnings {
            failures.push(format!(
                "{}: warnings expected {:?}, got {:?}",
                case.id,
                case.expected_warnings,
                result.warnings()
            ));
        }
    }

    if !failures.is_empty() {
        panic!("Golden test failures:\n{}", failures.join("\n"));
    }
}

#[test]
fn test_zero_vial_is_invalid() {
    for (diluent, dose) in [("1", "250"), ("0", "0"), ("3", "1")] {
        let inputs = CalculatorInputs {
            vial_amount: "0".into(),
            diluent_volume: diluent.into(),
            target_dose: dose.into(),
            ..Default::default()
        };
        let result = compute(&inputs);
        assert!(!result.is_valid);
        assert_eq!(result.volume_ml, 0.0);
        assert_eq!(result.concentration_mg_per_ml, 0.0);
    }
}

#[test]
fn test_displayed_syringe_mark() {
    // The syringe mark is shown with one decimal, volumes with three
    let inputs = CalculatorInputs::new(10.0, 2.0, 125.0, DoseUnit::Mcg)
        .with_rounding(RoundingPrecision::One);
    let result = compute(&inputs);

    assert_eq!(format_number(result.units_u100_rounded, 1), "3");
    assert_eq!(format_number(result.volume_ml_rounded, 3), "0.03");
    assert_eq!(format_number(result.concentration_mg_per_ml, 3), "5");
    assert_eq!(format_number(result.actual_dose_mcg, 3), "150");
}
