//! 기종 입력 범위 전체에 대한 가격 성질 테스트.
use machine_price_estimator::{
    estimate, estimator::clamp_price, Attribute, InputRecord, MachineType, Scenario,
    PRICE_CEILING, PRICE_FLOOR,
};
use proptest::prelude::*;

fn scenario() -> impl Strategy<Value = Scenario> {
    prop::sample::select(Scenario::ALL.to_vec())
}

fn attribute() -> impl Strategy<Value = Attribute> {
    prop::sample::select(Attribute::ALL.to_vec())
}

fn excluded_pair() -> impl Strategy<Value = (Scenario, Attribute)> {
    let pairs: Vec<_> = Scenario::ALL
        .into_iter()
        .flat_map(|s| Attribute::ALL.into_iter().map(move |a| (s, a)))
        .filter(|(s, a)| !s.includes(*a))
        .collect();
    prop::sample::select(pairs)
}

/// 기종을 고르고, 10개 항목 모두 그 기종의 [min, max] 안에서 값을 뽑는다.
fn machine_and_input() -> impl Strategy<Value = (MachineType, InputRecord)> {
    prop::sample::select(MachineType::ALL.to_vec()).prop_flat_map(|machine| {
        let record = prop::collection::vec(0.0f64..=1.0, Attribute::ALL.len()).prop_map(
            move |fractions| {
                Attribute::ALL
                    .into_iter()
                    .zip(fractions)
                    .map(|(a, f)| {
                        let range = machine.range(a);
                        (a, range.min + f * (range.max - range.min))
                    })
                    .collect::<InputRecord>()
            },
        );
        (Just(machine), record)
    })
}

proptest! {
    #[test]
    fn price_stays_within_bounds((machine, input) in machine_and_input(), scenario in scenario()) {
        prop_assert!(machine.out_of_range(scenario, &input).is_empty());
        let est = estimate(scenario, machine, &input).unwrap();
        prop_assert!(
            (PRICE_FLOOR..=PRICE_CEILING).contains(&est.price),
            "{} / {}: {}",
            scenario, machine, est.price
        );
        prop_assert_eq!(est.price, clamp_price(est.raw_sum));
    }

    #[test]
    fn raising_one_input_never_lowers_the_price(
        (machine, input) in machine_and_input(),
        scenario in scenario(),
        attribute in attribute(),
        step in 0.0f64..=1.0,
    ) {
        let base = estimate(scenario, machine, &input).unwrap();
        let range = machine.range(attribute);
        let current = input.get(attribute).unwrap_or(range.min);
        let bumped = input.clone().with(attribute, current + step * (range.max - range.min));
        let est = estimate(scenario, machine, &bumped).unwrap();
        prop_assert!(est.raw_sum >= base.raw_sum, "{} / {}", scenario, attribute);
        prop_assert!(est.price >= base.price, "{} / {}", scenario, attribute);
    }

    #[test]
    fn excluded_attributes_are_ignored(
        (machine, input) in machine_and_input(),
        (scenario, attribute) in excluded_pair(),
        value in 0.0f64..1_000_000.0,
    ) {
        let base = estimate(scenario, machine, &input).unwrap();
        let varied = estimate(scenario, machine, &input.clone().with(attribute, value)).unwrap();
        prop_assert_eq!(varied.raw_sum, base.raw_sum);
    }
}
