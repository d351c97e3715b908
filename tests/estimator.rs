//! 가격 산정 회귀 테스트. 기준 사례와 구간 자르기, 조건부 항, 이름 조회를 확인한다.
use std::collections::HashMap;

use machine_price_estimator::{
    calculate_price, calculate_price_by_name, estimate, Attribute, EstimateError, InputRecord,
    MachineType, Scenario, PRICE_CEILING, PRICE_FLOOR,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn lathe_reference() -> InputRecord {
    InputRecord::new()
        .with(Attribute::InitialCost, 2_000_000.0)
        .with(Attribute::AreaOccupied, 100.0)
        .with(Attribute::PowerRating, 18_000.0)
        .with(Attribute::TimeSpent, 300.0)
        .with(Attribute::Workpieces, 10.0)
        .with(Attribute::Operators, 5.0)
        .with(Attribute::VentilationCost, 8_000.0)
        .with(Attribute::CleaningCost, 5_000.0)
        .with(Attribute::WasteManagementCost, 5_000.0)
        .with(Attribute::ToiletUsageCost, 5_000.0)
}

#[test]
fn reference_lathe_all_variables() {
    let est = estimate(Scenario::AllVariables, MachineType::Lathe, &lathe_reference())
        .expect("estimate");
    assert_close("raw", est.raw_sum, 47_029.0, 1e-6);
    assert_close("price", est.price, 47_029.0, 1e-6);
    assert!(!est.clamped());

    let contributions: Vec<f64> = est.terms.iter().map(|t| t.contribution).collect();
    let expected = [20.0, 5.0, 54.0, 45_000.0, 50.0, 250.0, 800.0, 400.0, 350.0, 100.0];
    assert_eq!(contributions.len(), expected.len());
    for (got, want) in contributions.iter().zip(expected) {
        assert_close("term", *got, want, 1e-9);
    }
}

#[test]
fn drilling_minimums_without_counts_hit_the_floor() {
    let input = InputRecord::form_defaults(
        Scenario::ExcludingWorkpiecesAndOperators,
        MachineType::Drilling,
    );
    let price = calculate_price(
        Scenario::ExcludingWorkpiecesAndOperators,
        MachineType::Drilling,
        &input,
    )
    .expect("price");
    assert_eq!(price, PRICE_FLOOR);
}

#[test]
fn large_inputs_hit_the_ceiling() {
    let input = lathe_reference().with(Attribute::TimeSpent, 10_000.0);
    let est = estimate(Scenario::AllVariables, MachineType::Lathe, &input).expect("estimate");
    assert!(est.raw_sum > PRICE_CEILING);
    assert_eq!(est.price, PRICE_CEILING);
    assert!(est.clamped());
}

#[test]
fn excluded_attributes_have_no_effect() {
    let cases = [
        (Scenario::ExcludingWorkpieces, vec![Attribute::Workpieces]),
        (Scenario::ExcludingOperators, vec![Attribute::Operators]),
        (
            Scenario::ExcludingWorkpiecesAndOperators,
            vec![Attribute::Workpieces, Attribute::Operators],
        ),
    ];
    for (scenario, excluded) in cases {
        let base = estimate(scenario, MachineType::Lathe, &lathe_reference()).expect("base");
        for attribute in excluded {
            for value in [0.0, 3.0, 1_000.0] {
                let input = lathe_reference().with(attribute, value);
                let est = estimate(scenario, MachineType::Lathe, &input).expect("varied");
                assert_eq!(est.raw_sum, base.raw_sum, "{scenario} / {attribute} = {value}");
            }
        }
    }
}

#[test]
fn excluded_attributes_may_be_absent() {
    let mut input = lathe_reference();
    input.remove(Attribute::Workpieces);
    let price = calculate_price(Scenario::ExcludingWorkpieces, MachineType::Lathe, &input);
    assert!(price.is_ok());

    let err = calculate_price(Scenario::AllVariables, MachineType::Lathe, &input).unwrap_err();
    assert_eq!(err, EstimateError::MissingAttribute(Attribute::Workpieces));
}

#[test]
fn missing_required_attribute_is_reported() {
    let mut input = lathe_reference();
    input.remove(Attribute::TimeSpent);
    for scenario in Scenario::ALL {
        let err = calculate_price(scenario, MachineType::Milling, &input).unwrap_err();
        assert_eq!(err, EstimateError::MissingAttribute(Attribute::TimeSpent));
    }
}

#[test]
fn machine_type_does_not_change_the_formula() {
    let input = lathe_reference();
    let prices: Vec<f64> = MachineType::ALL
        .into_iter()
        .map(|m| calculate_price(Scenario::ExcludingOperators, m, &input).expect("price"))
        .collect();
    assert!(prices.windows(2).all(|w| w[0] == w[1]));
}

fn named_reference() -> HashMap<String, f64> {
    lathe_reference()
        .iter()
        .map(|(a, v)| (a.name().to_string(), v))
        .collect()
}

#[test]
fn lookup_by_name() {
    let price = calculate_price_by_name("All Variables", "Lathe Machine", &named_reference())
        .expect("price");
    assert_close("price", price, 47_029.0, 1e-6);
}

#[test]
fn lookup_errors_for_unknown_names() {
    let named = named_reference();
    assert_eq!(
        calculate_price_by_name("Some Variables", "Lathe Machine", &named),
        Err(EstimateError::UnknownScenario("Some Variables".into()))
    );
    assert_eq!(
        calculate_price_by_name("All Variables", "Band Saw", &named),
        Err(EstimateError::UnknownMachineType("Band Saw".into()))
    );

    let mut extra = named;
    extra.insert("Coolant Cost".into(), 1.0);
    assert_eq!(
        calculate_price_by_name("All Variables", "Lathe Machine", &extra),
        Err(EstimateError::UnknownAttribute("Coolant Cost".into()))
    );
}
