//! 기계 가격 산정 핵심 로직. 시나리오 가중치로 선형 가중합을 구하고 고정 구간으로 자른다.

use std::collections::HashMap;

use tracing::debug;

use crate::attribute::{Attribute, InputRecord};
use crate::machine::{MachineType, RangeViolation};
use crate::scenario::Scenario;

/// 산정 가격 하한.
pub const PRICE_FLOOR: f64 = 20_000.0;
/// 산정 가격 상한.
pub const PRICE_CEILING: f64 = 300_000.0;

/// 가격 산정 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// 정의되지 않은 시나리오 이름
    UnknownScenario(String),
    /// 정의되지 않은 기종 이름
    UnknownMachineType(String),
    /// 정의되지 않은 입력 항목 이름
    UnknownAttribute(String),
    /// 시나리오가 요구하는 항목 값이 없음
    MissingAttribute(Attribute),
    /// 같은 항목을 가리키는 이름이 두 번 이상 들어옴 ("Workpieces"와 "workpieces" 등)
    DuplicateAttribute(Attribute),
    /// 기종 범위를 벗어난 입력 (엄격 모드 입력 검증에서만 발생)
    OutOfRange(RangeViolation),
}

impl std::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateError::UnknownScenario(name) => write!(f, "unknown scenario: {name}"),
            EstimateError::UnknownMachineType(name) => write!(f, "unknown machine type: {name}"),
            EstimateError::UnknownAttribute(name) => write!(f, "unknown attribute: {name}"),
            EstimateError::MissingAttribute(a) => write!(f, "missing value for attribute: {a}"),
            EstimateError::DuplicateAttribute(a) => {
                write!(f, "attribute given more than once: {a}")
            }
            EstimateError::OutOfRange(v) => write!(f, "value out of range: {v}"),
        }
    }
}

impl std::error::Error for EstimateError {}

/// 가중합의 한 항.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub attribute: Attribute,
    pub coefficient: f64,
    pub value: f64,
    pub contribution: f64,
}

/// 산정 결과와 항별 내역.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub scenario: Scenario,
    pub machine_type: MachineType,
    pub terms: Vec<Term>,
    /// 자르기 전 가중합
    pub raw_sum: f64,
    /// [`PRICE_FLOOR`, `PRICE_CEILING`]로 자른 최종 가격
    pub price: f64,
}

impl Estimate {
    /// 가중합이 하한/상한에 걸려 잘렸는지 여부.
    pub fn clamped(&self) -> bool {
        self.raw_sum != self.price
    }
}

/// `max(PRICE_FLOOR, min(PRICE_CEILING, raw))`
pub fn clamp_price(raw: f64) -> f64 {
    PRICE_FLOOR.max(PRICE_CEILING.min(raw))
}

/// 항별 내역과 함께 가격을 산정한다.
///
/// 시나리오 가중치에 있는 항목만 합산하며, 그 항목 값이 `input`에 없으면
/// `MissingAttribute`를 돌려준다. 기종은 식에 쓰이지 않는다.
pub fn estimate(
    scenario: Scenario,
    machine_type: MachineType,
    input: &InputRecord,
) -> Result<Estimate, EstimateError> {
    let terms = scenario
        .coefficients()
        .terms()
        .map(|(attribute, coefficient)| -> Result<Term, EstimateError> {
            let value = input.require(attribute)?;
            Ok(Term {
                attribute,
                coefficient,
                value,
                contribution: coefficient * value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let raw_sum: f64 = terms.iter().map(|t| t.contribution).sum();
    let price = clamp_price(raw_sum);
    debug!(
        scenario = scenario.name(),
        machine_type = machine_type.name(),
        raw_sum,
        price,
        "price estimated"
    );
    Ok(Estimate {
        scenario,
        machine_type,
        terms,
        raw_sum,
        price,
    })
}

/// 가격만 필요한 경우의 산정 함수.
pub fn calculate_price(
    scenario: Scenario,
    machine_type: MachineType,
    input: &InputRecord,
) -> Result<f64, EstimateError> {
    estimate(scenario, machine_type, input).map(|e| e.price)
}

/// 이름 문자열로 시나리오/기종/항목을 지정하는 진입점.
pub fn calculate_price_by_name(
    scenario: &str,
    machine_type: &str,
    input: &HashMap<String, f64>,
) -> Result<f64, EstimateError> {
    let scenario: Scenario = scenario.parse()?;
    let machine_type: MachineType = machine_type.parse()?;
    let record = InputRecord::from_named(input)?;
    calculate_price(scenario, machine_type, &record)
}
